mod actions;
mod error;
mod reducers;
mod state;
mod store;

pub use actions::{FieldUpdate, FormCommand};
pub use error::SnapshotError;
pub use reducers::{CommandOutcome, apply_command};
pub use state::{FormSnapshot, FormState};
pub use store::FieldStore;
