use std::fs;
use std::path::PathBuf;

use chrono::Local;
use log::{error, info};

use crate::client::{DependencyMode, DeploymentServer, ItemQuery, PackageSelection};
use crate::constants::SESSION_NAME_PREFIX;
use crate::errors::{Result, packaging_error};

/// Inputs of the packaging command.
#[derive(Debug, Clone)]
pub struct PackageOptions {
    /// Where the package file is written (created or truncated)
    pub output_path: PathBuf,
    /// Item name pattern, e.g. `ncl.Rota.Processes\*`
    pub name_pattern: String,
    /// Item namespace, e.g. `urn:SourceCode/Workflows`
    pub namespace: String,
    /// Validate the package after building it
    pub validate: bool,
    /// Record dependencies as references instead of inlining them
    pub dependencies_as_reference: bool,
}

/// Builds a package from the items matching the query and writes it to
/// the output path.
///
/// Any failure is logged once and then propagated; nothing is retried or
/// swallowed.
pub fn build_package(server: &dyn DeploymentServer, options: &PackageOptions) -> Result<()> {
    run_packaging(server, options).map_err(|e| {
        error!("Packaging command failed: {e}");
        e
    })
}

fn run_packaging(server: &dyn DeploymentServer, options: &PackageOptions) -> Result<()> {
    let session_name = format!(
        "{SESSION_NAME_PREFIX}-{}",
        Local::now().format("%Y%m%d%H%M%S")
    );
    let mut session = server.create_session(&session_name)?;

    // Dependency analysis is driven by the selection below, not the server
    session.set_option("NoAnalyze", true)?;

    let query = ItemQuery {
        name_pattern: options.name_pattern.clone(),
        namespace: options.namespace.clone(),
    };
    let items = session.find_items(&query)?;
    info!(
        "Found {} items matching '{}' in namespace '{}'",
        items.len(),
        options.name_pattern,
        options.namespace
    );

    let dependency_mode = if options.dependencies_as_reference {
        DependencyMode::Reference
    } else {
        DependencyMode::Inline
    };
    let mut selection = PackageSelection::new(dependency_mode, options.validate);
    for item in items {
        selection.include(item);
    }

    let image = session.package_items(&selection)?;
    fs::write(&options.output_path, &image).map_err(|e| {
        packaging_error(&format!(
            "failed to write package file {}: {e}",
            options.output_path.display()
        ))
    })?;
    info!(
        "Wrote package ({} bytes) to {}",
        image.len(),
        options.output_path.display()
    );

    session.close()
}
