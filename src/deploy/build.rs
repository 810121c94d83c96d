use std::path::PathBuf;

use chrono::Local;
use log::info;

use crate::client::{
    ConnectionStringBuilder, DeploymentExecutor, DeploymentPackage, EnvironmentServer, Project,
    ProjectSystem,
};
use crate::constants::DATE_FIELD_FORMAT;
use crate::errors::{Error, Result};

/// Inputs of the build-and-deploy command.
#[derive(Debug, Clone)]
pub struct BuildDeployOptions {
    pub project_path: PathBuf,
    pub template: String,
    pub environment: String,
    /// Host of the environment-settings server
    pub server: String,
}

/// Loads and compiles the project, resolves the target environment and
/// executes the deployment.
///
/// Each step is a hard precondition for the next: a compile failure means
/// the environment server is never contacted, and a failed deployment is
/// terminal with no rollback.
pub fn build_and_deploy(
    projects: &dyn ProjectSystem,
    environments: &dyn EnvironmentServer,
    executor: &dyn DeploymentExecutor,
    options: &BuildDeployOptions,
) -> Result<()> {
    let project = projects.load(&options.project_path)?;
    info!("Loaded project '{}'", project.name);

    let compile = projects.compile(&project)?;
    if !compile.successful {
        return Err(Error::Compile {
            message: compile.first_error().to_string(),
        });
    }
    info!("Compiled project '{}'", project.name);

    let package = prepare_package(environments, &project, options)?;
    info!(
        "Deploying '{}' to environment '{}' ({})",
        project.name, options.environment, package.label_name
    );

    let outcome = executor.execute(&package)?;
    if !outcome.successful {
        return Err(Error::Deployment {
            detail: outcome.message,
        });
    }

    info!("Deployment of '{}' succeeded", project.name);
    Ok(())
}

/// Resolves the environment and builds the deployment package bound to it.
pub fn prepare_package(
    environments: &dyn EnvironmentServer,
    project: &Project,
    options: &BuildDeployOptions,
) -> Result<DeploymentPackage> {
    let connection_string = ConnectionStringBuilder::new(&options.server).build();

    environments.refresh()?;
    let template = environments.template(&options.template)?;
    let environment = template.environment(&options.environment)?;

    let environment_properties = environment
        .fields
        .iter()
        .map(|field| (field.name.clone(), field.value.clone()))
        .collect();

    Ok(DeploymentPackage {
        project_name: project.name.clone(),
        selected_environment: environment.name.clone(),
        environment_properties,
        label_name: Local::now().format(DATE_FIELD_FORMAT).to_string(),
        label_description: format!(
            "Template: {}, Environment: {}",
            options.template, options.environment
        ),
        smartobject_connection_string: connection_string.clone(),
        workflow_management_connection_string: connection_string,
        test_only: false,
    })
}
