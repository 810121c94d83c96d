/// Constants used throughout the application
///
/// This module centralises all constants used in the application to make
/// them easier to manage and update.

/// Date format used for date-typed data fields and deployment labels
pub const DATE_FIELD_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Port the platform management gateway listens on
pub const GATEWAY_PORT: u16 = 5555;

/// Prefix for deployment session names; the current timestamp is appended
pub const SESSION_NAME_PREFIX: &str = "wfbroker";

/// Name of the exposed service object
pub const SERVICE_OBJECT_NAME: &str = "ProcessInstanceClient";

/// Help text for the server command-line option
pub const SERVER_HELP: &str = "Host name of the platform management gateway";

/// Help text for the verbose command-line option
pub const VERBOSE_HELP: &str = "Increase verbosity level (can be used multiple times)";

/// Help text for the log-file command-line option
pub const LOG_FILE_HELP: &str = "Write log output to the given file";

/// Help text for the packaging output path argument
pub const PACKAGE_PATH_HELP: &str = "Full path of the package file to write";

/// Help text for the packaging item pattern argument
pub const PACKAGE_NAME_HELP: &str = "Workflow item name pattern, e.g. ncl.Rota.Processes\\*";

/// Help text for the packaging namespace argument
pub const PACKAGE_NAMESPACE_HELP: &str = "Item namespace, e.g. urn:SourceCode/Workflows";

/// Help text for the packaging validate flag
pub const PACKAGE_VALIDATE_HELP: &str = "Validate the package after it is built";

/// Help text for the dependency-handling flag
pub const PACKAGE_DEPS_HELP: &str =
    "Include dependencies as references instead of inlining them into the package";

/// Help text for the build-deploy project path argument
pub const PROJECT_PATH_HELP: &str = "Full path to the workflow project file";

/// Help text for the build-deploy template argument
pub const TEMPLATE_HELP: &str = "Environment template to deploy against";

/// Help text for the build-deploy environment argument
pub const ENVIRONMENT_HELP: &str = "Environment within the template to deploy to";
