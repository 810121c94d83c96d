//! Process-instance broker
//!
//! The four operations the service object exposes. Each one opens the
//! named process instance on the given workflow connection, touches one
//! field, and releases the handle before returning. The connection to use
//! is an explicit parameter; there is no ambient client state.

use std::collections::HashMap;

use log::info;

use crate::errors::{Error, Result, field_not_found_error, parameter_error};
use crate::fields::{format_field_value, parse_field_value};
use crate::service::metadata::{methods, properties};

use crate::client::{WorkflowConnection, with_process_instance};

/// One output row of the list operation.
#[derive(Debug, Clone, PartialEq)]
pub struct DataFieldRow {
    pub name: String,
    pub value: String,
}

/// Sets the folio of a running process instance.
pub fn update_folio(
    connection: &dyn WorkflowConnection,
    process_instance_id: i32,
    folio: &str,
) -> Result<()> {
    with_process_instance(connection, process_instance_id, |instance| {
        instance.set_folio(folio)?;
        instance.update()
    })?;

    info!("Updated folio of process instance {process_instance_id}");
    Ok(())
}

/// Sets a typed data field of a running process instance.
///
/// The textual value is converted according to the field's declared
/// runtime type before anything is written; an unknown field or an
/// unconvertible value leaves the instance untouched.
pub fn update_data_field(
    connection: &dyn WorkflowConnection,
    process_instance_id: i32,
    field_name: &str,
    value_text: &str,
) -> Result<()> {
    with_process_instance(connection, process_instance_id, |instance| {
        let fields = instance.data_fields()?;
        let field = fields
            .iter()
            .find(|field| field.name == field_name)
            .ok_or_else(|| field_not_found_error(process_instance_id, field_name))?;

        let value = parse_field_value(field.field_type, value_text)?;
        instance.set_data_field(field_name, value)?;
        instance.update()
    })?;

    info!("Updated data field '{field_name}' of process instance {process_instance_id}");
    Ok(())
}

/// Lists all data fields of a process instance with their textual values,
/// in the instance's native enumeration order. Performs no writes.
pub fn list_data_fields(
    connection: &dyn WorkflowConnection,
    process_instance_id: i32,
) -> Result<Vec<DataFieldRow>> {
    with_process_instance(connection, process_instance_id, |instance| {
        let rows = instance
            .data_fields()?
            .into_iter()
            .map(|field| DataFieldRow {
                name: field.name,
                value: format_field_value(&field.value),
            })
            .collect();
        Ok(rows)
    })
}

/// Sets a named XML field of a running process instance.
pub fn update_xml_field(
    connection: &dyn WorkflowConnection,
    process_instance_id: i32,
    field_name: &str,
    xml_text: &str,
) -> Result<()> {
    with_process_instance(connection, process_instance_id, |instance| {
        instance.set_xml_field(field_name, xml_text)?;
        instance.update()
    })?;

    info!("Updated XML field '{field_name}' of process instance {process_instance_id}");
    Ok(())
}

/// Executes one of the service methods by name, the way the host platform
/// invokes them: string-keyed parameters, rows as the result.
///
/// Update methods return no rows. The `ProcessInstanceId` parameter is
/// mandatory for every method.
pub fn dispatch(
    connection: &dyn WorkflowConnection,
    method: &str,
    params: &HashMap<String, String>,
) -> Result<Vec<DataFieldRow>> {
    let process_instance_id = required_int(params, properties::PROCESS_INSTANCE_ID)?;

    match method {
        methods::UPDATE_FOLIO => {
            let folio = required(params, properties::PROCESS_FOLIO)?;
            update_folio(connection, process_instance_id, folio)?;
            Ok(Vec::new())
        }
        methods::UPDATE_DATA_FIELD => {
            let name = required(params, properties::DATA_FIELD_NAME)?;
            let value = optional(params, properties::DATA_FIELD_VALUE);
            update_data_field(connection, process_instance_id, name, value)?;
            Ok(Vec::new())
        }
        methods::LIST_DATA_FIELDS => list_data_fields(connection, process_instance_id),
        methods::SET_XML_FIELD => {
            let name = required(params, properties::XML_FIELD_NAME)?;
            let value = optional(params, properties::XML_FIELD_VALUE);
            update_xml_field(connection, process_instance_id, name, value)?;
            Ok(Vec::new())
        }
        other => Err(Error::UnknownMethod {
            method: other.to_string(),
        }),
    }
}

fn required<'a>(params: &'a HashMap<String, String>, name: &str) -> Result<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| parameter_error(name, "required parameter is missing"))
}

fn optional<'a>(params: &'a HashMap<String, String>, name: &str) -> &'a str {
    params.get(name).map(String::as_str).unwrap_or_default()
}

fn required_int(params: &HashMap<String, String>, name: &str) -> Result<i32> {
    required(params, name)?
        .parse::<i32>()
        .map_err(|e| parameter_error(name, &format!("expected an integer: {e}")))
}
