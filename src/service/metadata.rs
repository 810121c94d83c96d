//! Static metadata for the process-instance service object.
//!
//! The description is a plain value rather than a builder pipeline, so
//! ordering and flags are visible at a glance and testable without the
//! host platform.

use once_cell::sync::Lazy;

use crate::constants::SERVICE_OBJECT_NAME;

use super::model::{
    MethodDescriptor, MethodKind, MethodProperty, PropertyDescriptor, SemanticType,
    ServiceDescription,
};

/// Property names of the service object.
pub mod properties {
    pub const PROCESS_FOLIO: &str = "ProcessFolio";
    pub const PROCESS_NAME: &str = "ProcessName";
    pub const START_SYNC: &str = "StartSync";
    pub const PROCESS_INSTANCE_ID: &str = "ProcessInstanceId";
    pub const PROCESS_VERSION: &str = "ProcessVersion";
    pub const DATA_FIELD_NAME: &str = "DataFieldName";
    pub const DATA_FIELD_VALUE: &str = "DataFieldValue";
    pub const XML_FIELD_NAME: &str = "XmlFieldName";
    pub const XML_FIELD_VALUE: &str = "XmlFieldValue";
}

/// Method names of the service object.
pub mod methods {
    pub const UPDATE_FOLIO: &str = "UpdateFolio";
    pub const UPDATE_DATA_FIELD: &str = "UpdateDataField";
    pub const LIST_DATA_FIELDS: &str = "ListDataFields";
    pub const SET_XML_FIELD: &str = "SetXmlField";
}

static PROCESS_INSTANCE_SERVICE: Lazy<ServiceDescription> = Lazy::new(|| ServiceDescription {
    name: SERVICE_OBJECT_NAME,
    description: "Exposes functionality to work with running process instances.",
    properties: vec![
        PropertyDescriptor {
            name: properties::PROCESS_FOLIO,
            description: "The folio to use for the process.",
            semantic_type: SemanticType::Text,
        },
        PropertyDescriptor {
            name: properties::PROCESS_NAME,
            description: "The full name of the process.",
            semantic_type: SemanticType::Text,
        },
        PropertyDescriptor {
            name: properties::START_SYNC,
            description: "Start the process synchronously or not.",
            semantic_type: SemanticType::YesNo,
        },
        PropertyDescriptor {
            name: properties::PROCESS_INSTANCE_ID,
            description: "The process instance ID.",
            semantic_type: SemanticType::Number,
        },
        PropertyDescriptor {
            name: properties::PROCESS_VERSION,
            description: "The version number to start. Leave empty for default.",
            semantic_type: SemanticType::Number,
        },
        PropertyDescriptor {
            name: properties::DATA_FIELD_NAME,
            description: "The name of the DataField.",
            semantic_type: SemanticType::Text,
        },
        PropertyDescriptor {
            name: properties::DATA_FIELD_VALUE,
            description: "The value of the DataField.",
            semantic_type: SemanticType::Memo,
        },
        PropertyDescriptor {
            name: properties::XML_FIELD_NAME,
            description: "The name of the XML field.",
            semantic_type: SemanticType::Text,
        },
        PropertyDescriptor {
            name: properties::XML_FIELD_VALUE,
            description: "The value of the XML field.",
            semantic_type: SemanticType::Text,
        },
    ],
    methods: vec![
        MethodDescriptor {
            name: methods::UPDATE_FOLIO,
            description: "Updates the folio of a running process instance",
            kind: MethodKind::Update,
            properties: vec![
                MethodProperty::new(properties::PROCESS_INSTANCE_ID, true, true, false),
                MethodProperty::new(properties::PROCESS_FOLIO, true, true, false),
            ],
        },
        MethodDescriptor {
            name: methods::UPDATE_DATA_FIELD,
            description: "Updates the DataField of a running process instance",
            kind: MethodKind::Update,
            properties: vec![
                MethodProperty::new(properties::PROCESS_INSTANCE_ID, true, true, false),
                MethodProperty::new(properties::DATA_FIELD_NAME, true, true, false),
                MethodProperty::new(properties::DATA_FIELD_VALUE, true, true, false),
            ],
        },
        MethodDescriptor {
            name: methods::LIST_DATA_FIELDS,
            description: "Lists the data fields with values from the Process Instance",
            kind: MethodKind::List,
            properties: vec![
                MethodProperty::new(properties::PROCESS_INSTANCE_ID, true, true, false),
                MethodProperty::new(properties::DATA_FIELD_NAME, false, false, true),
                MethodProperty::new(properties::DATA_FIELD_VALUE, false, false, true),
            ],
        },
        MethodDescriptor {
            name: methods::SET_XML_FIELD,
            description: "Updates the XmlField of a running process instance",
            kind: MethodKind::Update,
            properties: vec![
                MethodProperty::new(properties::PROCESS_INSTANCE_ID, true, true, false),
                MethodProperty::new(properties::XML_FIELD_NAME, true, true, false),
                MethodProperty::new(properties::XML_FIELD_VALUE, true, true, false),
            ],
        },
    ],
});

/// The read-only description of the process-instance service object.
pub fn process_instance_service() -> &'static ServiceDescription {
    &PROCESS_INSTANCE_SERVICE
}
