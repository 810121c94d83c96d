use serde::{Deserialize, Serialize};

use crate::errors::{Result, environment_resolution_error};

/// A single name/value pair of an environment instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentField {
    pub name: String,
    pub value: String,
}

/// A named environment within a template, with its ordered fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentInstance {
    pub name: String,
    pub fields: Vec<EnvironmentField>,
}

/// A named environment template resolved from the settings server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentTemplate {
    pub name: String,
    pub environments: Vec<EnvironmentInstance>,
}

impl EnvironmentTemplate {
    /// Looks up an environment by name within this template.
    ///
    /// # Errors
    /// Returns `Error::EnvironmentResolution` if the template has no
    /// environment with that name.
    pub fn environment(&self, name: &str) -> Result<&EnvironmentInstance> {
        self.environments
            .iter()
            .find(|environment| environment.name == name)
            .ok_or_else(|| environment_resolution_error("environment", name))
    }
}

/// A connection to the environment-settings server.
pub trait EnvironmentServer {
    /// Refreshes the server-side environment metadata before lookups
    fn refresh(&self) -> Result<()>;

    /// Resolves a template by name.
    ///
    /// # Errors
    /// Returns `Error::EnvironmentResolution` if no template with that
    /// name exists.
    fn template(&self, name: &str) -> Result<EnvironmentTemplate>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;

    #[test]
    fn test_environment_lookup() {
        let template = EnvironmentTemplate {
            name: "K2 Blackbird".to_string(),
            environments: vec![EnvironmentInstance {
                name: "Production".to_string(),
                fields: vec![],
            }],
        };

        assert!(template.environment("Production").is_ok());

        let error = template.environment("Staging").unwrap_err();
        assert!(matches!(error, Error::EnvironmentResolution { .. }));
    }
}
