use crate::domain::{FieldId, FieldType};

use super::state::FormState;

/// Every state transition a form can undergo.
#[derive(Debug, Clone)]
pub enum FormCommand {
    AddField { id: FieldId, field_type: FieldType },
    RemoveField { id: FieldId },
    UpdateField { id: FieldId, update: FieldUpdate },
    LoadState(FormState),
    ResetForm,
}

/// Partial edit of a field; `None` leaves that part untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldUpdate {
    pub label: Option<String>,
    pub value: Option<String>,
}

impl FieldUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(label: impl Into<String>) -> Self {
        Self::new().with_label(label)
    }

    pub fn value(value: impl Into<String>) -> Self {
        Self::new().with_value(value)
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.label.is_none() && self.value.is_none()
    }
}
