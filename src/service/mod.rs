//! Service description
//!
//! This module contains the declarative description of the operation
//! surface the host platform consumes: properties, methods and their
//! input/output flags. The description is built once at startup and is
//! read-only afterwards.

mod model;

pub mod metadata;

pub use metadata::{methods, process_instance_service, properties};
pub use model::{
    MethodDescriptor, MethodKind, MethodProperty, PropertyDescriptor, SemanticType,
    ServiceDescription,
};
