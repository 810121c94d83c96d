use std::path::PathBuf;

use clap::{Arg, ArgAction, ArgMatches, Command, command, value_parser};

use crate::constants::{
    ENVIRONMENT_HELP, LOG_FILE_HELP, PACKAGE_DEPS_HELP, PACKAGE_NAME_HELP, PACKAGE_NAMESPACE_HELP,
    PACKAGE_PATH_HELP, PACKAGE_VALIDATE_HELP, PROJECT_PATH_HELP, SERVER_HELP, TEMPLATE_HELP,
    VERBOSE_HELP,
};
use crate::logging::LogLevel;

/// Builds the full command tree.
///
/// The four process-instance operations mirror the service object's
/// methods; `package` and `build-deploy` are the two deployment commands.
pub fn build_command() -> Command {
    // args shared by several subcommands
    let arg_server = Arg::new("server")
        .short('s')
        .long("server")
        .help(SERVER_HELP)
        .default_value("localhost");

    let arg_instance_id = Arg::new("id")
        .help("Process instance ID")
        .required(true)
        .value_parser(value_parser!(i32));

    // define arg for verbosity level
    let arg_verbose = Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help(VERBOSE_HELP)
        .global(true)
        .action(ArgAction::Count);

    // define arg for log file
    let arg_log_file = Arg::new("log_file")
        .short('l')
        .long("log-file")
        .help(LOG_FILE_HELP)
        .global(true);

    command!()
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(arg_verbose)
        .arg(arg_log_file)
        .subcommand(
            Command::new("describe").about("Print the service object description as JSON"),
        )
        .subcommand(
            Command::new("update-folio")
                .about("Update the folio of a running process instance")
                .arg(arg_instance_id.clone())
                .arg(Arg::new("folio").help("New folio value").required(true))
                .arg(arg_server.clone()),
        )
        .subcommand(
            Command::new("update-data-field")
                .about("Update a typed data field of a running process instance")
                .arg(arg_instance_id.clone())
                .arg(Arg::new("name").help("Data field name").required(true))
                .arg(Arg::new("value").help("New value as text").required(true))
                .arg(arg_server.clone()),
        )
        .subcommand(
            Command::new("list-data-fields")
                .about("List the data fields of a process instance with their values")
                .arg(arg_instance_id.clone())
                .arg(arg_server.clone()),
        )
        .subcommand(
            Command::new("update-xml-field")
                .about("Update an XML field of a running process instance")
                .arg(arg_instance_id.clone())
                .arg(Arg::new("name").help("XML field name").required(true))
                .arg(Arg::new("xml").help("New XML content").required(true))
                .arg(arg_server.clone()),
        )
        .subcommand(
            Command::new("package")
                .about("Build a package from workflow items and write it to a file")
                .arg(
                    Arg::new("path")
                        .help(PACKAGE_PATH_HELP)
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(Arg::new("name").help(PACKAGE_NAME_HELP).required(true))
                .arg(
                    Arg::new("namespace")
                        .help(PACKAGE_NAMESPACE_HELP)
                        .required(true),
                )
                .arg(
                    Arg::new("validate")
                        .long("validate")
                        .help(PACKAGE_VALIDATE_HELP)
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("deps_as_reference")
                        .long("deps-as-reference")
                        .help(PACKAGE_DEPS_HELP)
                        .action(ArgAction::SetTrue),
                )
                .arg(arg_server.clone()),
        )
        .subcommand(
            Command::new("build-deploy")
                .about("Compile a project and deploy it to a named environment")
                .arg(
                    Arg::new("project")
                        .help(PROJECT_PATH_HELP)
                        .required(true)
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(Arg::new("template").help(TEMPLATE_HELP).required(true))
                .arg(
                    Arg::new("environment")
                        .help(ENVIRONMENT_HELP)
                        .required(true),
                )
                .arg(
                    Arg::new("server")
                        .help("Host of the environment-settings server")
                        .required(true),
                ),
        )
}

/// Parses the command-line arguments.
pub fn get_matches() -> ArgMatches {
    build_command().get_matches()
}

/// Gets the verbosity level from the command-line arguments
pub fn get_verbosity(matches: &ArgMatches) -> LogLevel {
    let verbose_count = matches.get_count("verbose");
    LogLevel::from_occurrences(verbose_count)
}

/// Gets the log file path, empty when file logging is disabled
pub fn get_log_file(matches: &ArgMatches) -> String {
    matches
        .get_one::<String>("log_file")
        .cloned()
        .unwrap_or_default()
}
