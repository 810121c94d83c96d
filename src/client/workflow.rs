use log::warn;

use crate::errors::Result;
use crate::fields::{FieldType, FieldValue};

/// A named, typed data field read from a process instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DataField {
    pub name: String,
    pub field_type: FieldType,
    pub value: FieldValue,
}

/// An open process instance on the workflow server.
///
/// Mutators stage changes; `update` pushes them in one remote call. The
/// handle must be closed exactly once, which [`with_process_instance`]
/// takes care of.
pub trait ProcessInstance {
    /// The instance ID the handle was opened with
    fn id(&self) -> i32;

    /// Stages a new folio for the instance
    fn set_folio(&mut self, folio: &str) -> Result<()>;

    /// Data fields in the instance's native enumeration order
    fn data_fields(&self) -> Result<Vec<DataField>>;

    /// Stages a new value for the named data field
    fn set_data_field(&mut self, name: &str, value: FieldValue) -> Result<()>;

    /// Stages new content for the named XML field
    fn set_xml_field(&mut self, name: &str, xml: &str) -> Result<()>;

    /// Pushes all staged changes to the server
    fn update(&mut self) -> Result<()>;

    /// Releases the handle on the server
    fn close(&mut self) -> Result<()>;
}

/// A connection capable of opening process instances by ID.
pub trait WorkflowConnection {
    fn open_process_instance(&self, process_instance_id: i32) -> Result<Box<dyn ProcessInstance>>;
}

/// Scoped access to a process instance.
///
/// Opens the instance, runs `operation` against it and closes the handle
/// on every exit path. When the operation itself failed, a close failure
/// is only logged so the original error is the one that propagates.
pub fn with_process_instance<T>(
    connection: &dyn WorkflowConnection,
    process_instance_id: i32,
    operation: impl FnOnce(&mut dyn ProcessInstance) -> Result<T>,
) -> Result<T> {
    let mut instance = connection.open_process_instance(process_instance_id)?;
    let outcome = operation(instance.as_mut());
    let close_outcome = instance.close();

    match outcome {
        Ok(value) => {
            close_outcome?;
            Ok(value)
        }
        Err(error) => {
            if let Err(close_error) = close_outcome {
                warn!("Failed to close process instance {process_instance_id}: {close_error}");
            }
            Err(error)
        }
    }
}
