use std::path::PathBuf;

use thiserror::Error;

/// Error type covering both halves of the toolkit: the process-instance
/// broker and the deployment commands.
///
/// There is no local recovery anywhere in this crate. Every failure from a
/// remote call is surfaced to the caller as one of these kinds; the host
/// (or the CLI entry point) decides how to present it.
#[derive(Debug, Error)]
pub enum Error {
    /// A workflow-server call failed while opening, updating or closing a
    /// process instance
    #[error("Remote operation '{operation}' failed for process instance {process_instance_id}: {detail}")]
    RemoteOperation {
        process_instance_id: i32,
        operation: String,
        detail: String,
    },
    /// The named data field does not exist on the process instance
    #[error("Data field '{name}' not found on process instance {process_instance_id}")]
    FieldNotFound {
        process_instance_id: i32,
        name: String,
    },
    /// A textual value could not be converted to the field's declared type
    #[error("Cannot convert '{value}' to a {field_type} value: {detail}")]
    Conversion {
        field_type: String,
        value: String,
        detail: String,
    },
    /// Connecting to the deployment-management server failed
    #[error("Failed to connect to the deployment server: {detail}")]
    Connection { detail: String },
    /// An item query against the deployment-management server failed
    #[error("Item query '{pattern}' in namespace '{namespace}' failed: {detail}")]
    Query {
        pattern: String,
        namespace: String,
        detail: String,
    },
    /// Executing the packaging step or writing the package artifact failed
    #[error("Packaging failed: {detail}")]
    Packaging { detail: String },
    /// The project file could not be loaded
    #[error("Failed to load project {}: {detail}", .path.display())]
    ProjectLoad { path: PathBuf, detail: String },
    /// Compilation reported errors; carries the first compiler message
    #[error("Compilation failed: {message}")]
    Compile { message: String },
    /// The environment template or environment instance could not be resolved
    #[error("Failed to resolve {kind} '{name}' on the environment server")]
    EnvironmentResolution { kind: String, name: String },
    /// Deployment execution reported an unsuccessful result
    #[error("Error occurred deploying package: {detail}")]
    Deployment { detail: String },
    /// A required operation parameter is missing or malformed
    #[error("Invalid parameter '{name}': {detail}")]
    Parameter { name: String, detail: String },
    /// An operation name that is not part of the service description
    #[error("Unknown service method '{method}'")]
    UnknownMethod { method: String },
}

/// Custom Result type used throughout the library.
pub type Result<T> = std::result::Result<T, Error>;

/// Helper to create a remote operation error
pub fn remote_operation_error(process_instance_id: i32, operation: &str, detail: &str) -> Error {
    Error::RemoteOperation {
        process_instance_id,
        operation: operation.to_string(),
        detail: detail.to_string(),
    }
}

/// Helper to create a field-not-found error
pub fn field_not_found_error(process_instance_id: i32, name: &str) -> Error {
    Error::FieldNotFound {
        process_instance_id,
        name: name.to_string(),
    }
}

/// Helper to create a connection error
pub fn connection_error(detail: &str) -> Error {
    Error::Connection {
        detail: detail.to_string(),
    }
}

/// Helper to create a packaging error
pub fn packaging_error(detail: &str) -> Error {
    Error::Packaging {
        detail: detail.to_string(),
    }
}

/// Helper to create an environment resolution error
pub fn environment_resolution_error(kind: &str, name: &str) -> Error {
    Error::EnvironmentResolution {
        kind: kind.to_string(),
        name: name.to_string(),
    }
}

/// Helper to create a parameter error
pub fn parameter_error(name: &str, detail: &str) -> Error {
    Error::Parameter {
        name: name.to_string(),
        detail: detail.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_operation_error_message() {
        let error = remote_operation_error(42, "update", "server unavailable");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("update"),
            "Error message should contain the operation"
        );
        assert!(
            error_string.contains("42"),
            "Error message should contain the process instance ID"
        );
    }

    #[test]
    fn test_field_not_found_error_message() {
        let error = field_not_found_error(7, "Amount");

        let error_string = format!("{error}");
        assert!(
            error_string.contains("Amount"),
            "Error message should contain the field name"
        );
        assert!(
            error_string.contains("7"),
            "Error message should contain the process instance ID"
        );
    }

    #[test]
    fn test_conversion_error_message() {
        let error = Error::Conversion {
            field_type: "integer".to_string(),
            value: "twelve".to_string(),
            detail: "invalid digit".to_string(),
        };

        let error_string = format!("{error}");
        assert!(error_string.contains("twelve"));
        assert!(error_string.contains("integer"));
    }

    #[test]
    fn test_compile_error_carries_first_message() {
        let error = Error::Compile {
            message: "'Activity1' has no outgoing line".to_string(),
        };

        assert_eq!(
            format!("{error}"),
            "Compilation failed: 'Activity1' has no outgoing line"
        );
    }

    #[test]
    fn test_environment_resolution_error_message() {
        let error = environment_resolution_error("environment template", "Production");

        let error_string = format!("{error}");
        assert!(error_string.contains("environment template"));
        assert!(error_string.contains("Production"));
    }

    #[test]
    fn test_project_load_error_contains_path() {
        let error = Error::ProjectLoad {
            path: PathBuf::from("/builds/Rota.k2proj"),
            detail: "no such file".to_string(),
        };

        let error_string = format!("{error}");
        assert!(error_string.contains("/builds/Rota.k2proj"));
    }
}
