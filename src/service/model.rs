use serde::Serialize;

/// Semantic type of a service property as presented to the host platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticType {
    Text,
    Memo,
    Number,
    YesNo,
}

/// Kind of a service method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Update,
    List,
}

/// A named, typed property of the service object.
#[derive(Debug, Clone, Serialize)]
pub struct PropertyDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub semantic_type: SemanticType,
}

/// How one property participates in one method.
#[derive(Debug, Clone, Serialize)]
pub struct MethodProperty {
    /// Name of the referenced property
    pub property: &'static str,
    pub is_input: bool,
    pub is_returned: bool,
    pub is_filter_only: bool,
}

impl MethodProperty {
    pub const fn new(
        property: &'static str,
        is_input: bool,
        is_returned: bool,
        is_filter_only: bool,
    ) -> Self {
        MethodProperty {
            property,
            is_input,
            is_returned,
            is_filter_only,
        }
    }
}

/// A method exposed by the service object.
#[derive(Debug, Clone, Serialize)]
pub struct MethodDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub kind: MethodKind,
    pub properties: Vec<MethodProperty>,
}

/// The full, ordered description of one service object.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub properties: Vec<PropertyDescriptor>,
    pub methods: Vec<MethodDescriptor>,
}

impl ServiceDescription {
    /// Looks up a method by name.
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|m| m.name == name)
    }

    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.properties.iter().find(|p| p.name == name)
    }
}
