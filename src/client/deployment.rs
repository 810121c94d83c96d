use serde::{Deserialize, Serialize};

use crate::errors::Result;

/// Query for workflow items on the deployment-management server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemQuery {
    pub name_pattern: String,
    pub namespace: String,
}

/// A workflow item known to the deployment-management server, together
/// with the names of the items it depends on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageItem {
    pub name: String,
    pub namespace: String,
    pub dependencies: Vec<String>,
}

/// How dependencies of selected items end up in the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DependencyMode {
    /// Dependencies are packaged alongside the items
    Inline,
    /// Dependencies are recorded as references to be resolved on import
    Reference,
}

/// The set of items to package, with their collected dependencies.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackageSelection {
    pub items: Vec<PackageItem>,
    /// Dependency names in first-seen order, each listed once even when
    /// shared by several selected items
    pub dependencies: Vec<String>,
    pub dependency_mode: DependencyMode,
    pub validate: bool,
}

impl PackageSelection {
    pub fn new(dependency_mode: DependencyMode, validate: bool) -> Self {
        PackageSelection {
            items: Vec::new(),
            dependencies: Vec::new(),
            dependency_mode,
            validate,
        }
    }

    /// Adds an item and collects its dependencies, deduplicated.
    pub fn include(&mut self, item: PackageItem) {
        for dependency in &item.dependencies {
            if !self.dependencies.contains(dependency) {
                self.dependencies.push(dependency.clone());
            }
        }
        self.items.push(item);
    }
}

/// A packaging session on the deployment-management server.
pub trait DeploymentSession {
    fn name(&self) -> &str;

    /// Sets a boolean session option, e.g. disabling dependency analysis
    fn set_option(&mut self, name: &str, value: bool) -> Result<()>;

    fn find_items(&mut self, query: &ItemQuery) -> Result<Vec<PackageItem>>;

    /// Executes packaging and returns the serialized package image
    fn package_items(&mut self, selection: &PackageSelection) -> Result<Vec<u8>>;

    fn close(&mut self) -> Result<()>;
}

/// A connection to the deployment-management server.
pub trait DeploymentServer {
    fn create_session(&self, name: &str) -> Result<Box<dyn DeploymentSession>>;
}

/// A deployment package bound to one target environment, built fresh for
/// every build-and-deploy invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeploymentPackage {
    pub project_name: String,
    pub selected_environment: String,
    /// Environment field name/value pairs, in server order
    pub environment_properties: Vec<(String, String)>,
    pub label_name: String,
    pub label_description: String,
    pub smartobject_connection_string: String,
    pub workflow_management_connection_string: String,
    pub test_only: bool,
}

/// Result of executing a deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeploymentOutcome {
    pub successful: bool,
    #[serde(default)]
    pub message: String,
}

/// Capability to execute a prepared deployment package.
pub trait DeploymentExecutor {
    fn execute(&self, package: &DeploymentPackage) -> Result<DeploymentOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, dependencies: &[&str]) -> PackageItem {
        PackageItem {
            name: name.to_string(),
            namespace: "urn:SourceCode/Workflows".to_string(),
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn test_shared_dependency_is_collected_once() {
        let mut selection = PackageSelection::new(DependencyMode::Inline, false);
        selection.include(item("Rota.Approve", &["Shared.Forms", "Shared.Rules"]));
        selection.include(item("Rota.Reject", &["Shared.Forms"]));

        assert_eq!(selection.items.len(), 2);
        assert_eq!(selection.dependencies, vec!["Shared.Forms", "Shared.Rules"]);
    }

    #[test]
    fn test_dependency_order_is_first_seen() {
        let mut selection = PackageSelection::new(DependencyMode::Reference, true);
        selection.include(item("A", &["Z"]));
        selection.include(item("B", &["Y", "Z"]));

        assert_eq!(selection.dependencies, vec!["Z", "Y"]);
    }
}
