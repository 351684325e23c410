use std::{borrow::Borrow, fmt};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::FieldType;

/// Opaque identifier assigned to a field when it is created.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct FieldId(String);

impl FieldId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for FieldId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl From<&str> for FieldId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl Borrow<str> for FieldId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One user-configured input slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    pub id: FieldId,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Field {
    pub fn new(id: FieldId, field_type: FieldType) -> Self {
        Self {
            id,
            field_type,
            label: field_type.default_label(),
            value: String::new(),
            error: None,
        }
    }

    pub fn has_value(&self) -> bool {
        !self.value.trim().is_empty()
    }

    /// Whether this field satisfies the form-level submission rule.
    pub fn is_complete(&self) -> bool {
        self.error.is_none() && self.has_value()
    }

    pub fn status(&self) -> FieldStatus {
        if self.error.is_some() {
            FieldStatus::Invalid
        } else if self.has_value() {
            FieldStatus::Valid
        } else {
            FieldStatus::Empty
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldStatus {
    Empty,
    Valid,
    Invalid,
}

impl fmt::Display for FieldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldStatus::Empty => "Empty",
            FieldStatus::Valid => "Valid",
            FieldStatus::Invalid => "Invalid",
        };
        f.pad(name)
    }
}
