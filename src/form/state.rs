use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::domain::{Field, FieldId};

use super::error::SnapshotError;

/// Ordered collection of fields keyed by id.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    fields: IndexMap<FieldId, Field>,
}

/// Wire shape of a [`FormState`]: `{ "fields": [...] }` in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct FormSnapshot {
    pub fields: Vec<Field>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a state from fields in display order, rejecting repeated ids.
    pub fn from_fields(fields: impl IntoIterator<Item = Field>) -> Result<Self, SnapshotError> {
        let mut state = Self::new();
        for field in fields {
            if state.contains(field.id.as_str()) {
                return Err(SnapshotError::DuplicateId(field.id));
            }
            state.push(field);
        }
        Ok(state)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.fields.contains_key(id)
    }

    pub fn get(&self, id: &str) -> Option<&Field> {
        self.fields.get(id)
    }

    /// Zero-based display position of a field.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.fields.get_index_of(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &FieldId> {
        self.fields.keys()
    }

    /// True iff there is at least one field and every field has no error
    /// and a non-blank value.
    pub fn is_form_valid(&self) -> bool {
        !self.is_empty() && self.iter().all(Field::is_complete)
    }

    pub fn error_count(&self) -> usize {
        self.iter().filter(|field| field.error.is_some()).count()
    }

    pub fn to_snapshot(&self) -> FormSnapshot {
        FormSnapshot {
            fields: self.iter().cloned().collect(),
        }
    }

    pub(crate) fn get_mut(&mut self, id: &str) -> Option<&mut Field> {
        self.fields.get_mut(id)
    }

    pub(crate) fn push(&mut self, field: Field) {
        self.fields.insert(field.id.clone(), field);
    }

    pub(crate) fn remove(&mut self, id: &str) -> Option<Field> {
        self.fields.shift_remove(id)
    }

    pub(crate) fn clear(&mut self) {
        self.fields.clear();
    }
}

// IndexMap equality ignores order; display order matters here.
impl PartialEq for FormState {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for FormState {}

impl TryFrom<FormSnapshot> for FormState {
    type Error = SnapshotError;

    fn try_from(snapshot: FormSnapshot) -> Result<Self, Self::Error> {
        Self::from_fields(snapshot.fields)
    }
}

impl From<&FormState> for FormSnapshot {
    fn from(state: &FormState) -> Self {
        state.to_snapshot()
    }
}

impl<'a> IntoIterator for &'a FormState {
    type Item = &'a Field;
    type IntoIter = indexmap::map::Values<'a, FieldId, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}
