use anyhow::Result;
use clap::ArgMatches;
use log::error;

use workflow_broker::broker;
use workflow_broker::cli;
use workflow_broker::client::GatewayClient;
use workflow_broker::deploy::{self, BuildDeployOptions, PackageOptions};
use workflow_broker::logging;
use workflow_broker::service;

fn main() {
    let matches = cli::get_matches();

    let verbosity = cli::get_verbosity(&matches);
    let log_file = cli::get_log_file(&matches);
    if let Err(e) = logging::init_logger(verbosity, &log_file) {
        eprintln!("Failed to initialise logging: {e}");
    }

    if let Err(e) = run(&matches) {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(matches: &ArgMatches) -> Result<()> {
    match matches.subcommand() {
        Some(("describe", _)) => {
            let description = serde_json::to_string_pretty(service::process_instance_service())?;
            println!("{description}");
        }
        Some(("update-folio", sub)) => {
            broker::update_folio(&gateway(sub), instance_id(sub), get_str(sub, "folio"))?;
        }
        Some(("update-data-field", sub)) => {
            broker::update_data_field(
                &gateway(sub),
                instance_id(sub),
                get_str(sub, "name"),
                get_str(sub, "value"),
            )?;
        }
        Some(("list-data-fields", sub)) => {
            let rows = broker::list_data_fields(&gateway(sub), instance_id(sub))?;
            for row in &rows {
                println!("{}\t{}", row.name, row.value);
            }
        }
        Some(("update-xml-field", sub)) => {
            broker::update_xml_field(
                &gateway(sub),
                instance_id(sub),
                get_str(sub, "name"),
                get_str(sub, "xml"),
            )?;
        }
        Some(("package", sub)) => {
            let options = PackageOptions {
                output_path: sub
                    .get_one::<std::path::PathBuf>("path")
                    .cloned()
                    .unwrap_or_default(),
                name_pattern: get_str(sub, "name").to_string(),
                namespace: get_str(sub, "namespace").to_string(),
                validate: sub.get_flag("validate"),
                dependencies_as_reference: sub.get_flag("deps_as_reference"),
            };
            deploy::build_package(&gateway(sub), &options)?;
        }
        Some(("build-deploy", sub)) => {
            let options = BuildDeployOptions {
                project_path: sub
                    .get_one::<std::path::PathBuf>("project")
                    .cloned()
                    .unwrap_or_default(),
                template: get_str(sub, "template").to_string(),
                environment: get_str(sub, "environment").to_string(),
                server: get_str(sub, "server").to_string(),
            };
            let client = GatewayClient::new(&options.server);
            deploy::build_and_deploy(&client, &client, &client, &options)?;
        }
        _ => {}
    }

    Ok(())
}

fn gateway(matches: &ArgMatches) -> GatewayClient {
    GatewayClient::new(get_str(matches, "server"))
}

fn get_str<'a>(matches: &'a ArgMatches, id: &str) -> &'a str {
    matches
        .get_one::<String>(id)
        .map(String::as_str)
        .unwrap_or_default()
}

fn instance_id(matches: &ArgMatches) -> i32 {
    matches.get_one::<i32>("id").copied().unwrap_or_default()
}
