use crate::domain::FieldId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    DuplicateId(FieldId),
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotError::DuplicateId(id) => write!(f, "field id '{id}' appears more than once"),
        }
    }
}

impl std::error::Error for SnapshotError {}
