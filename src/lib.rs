//! Service broker and deployment toolkit for a workflow automation
//! platform.
//!
//! Two independent halves share this crate: the process-instance broker
//! (a declarative service description plus four operations against
//! running process instances) and the deployment commands (packaging
//! workflow items to a file, and building and deploying a project
//! against a resolved environment). Remote protocols sit behind the
//! capability traits in [`client`]; everything is synchronous and
//! blocking.

pub use errors::{Error, Result};

pub mod broker;
pub mod cli;
pub mod client;
pub mod constants;
pub mod deploy;
pub mod errors;
pub mod fields;
pub mod logging;
pub mod service;

pub mod prelude {
    pub use crate::broker::{
        DataFieldRow, dispatch, list_data_fields, update_data_field, update_folio,
        update_xml_field,
    };
    pub use crate::client::{GatewayClient, WorkflowConnection};
    pub use crate::deploy::{BuildDeployOptions, PackageOptions, build_and_deploy, build_package};
    pub use crate::errors::{Error, Result};
    pub use crate::fields::{FieldType, FieldValue, format_field_value, parse_field_value};
    pub use crate::service::process_instance_service;
}
