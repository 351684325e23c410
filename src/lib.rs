#![deny(rust_2018_idioms)]

pub mod domain;
pub mod form;
pub mod io;
pub mod persistence;
pub mod preview;
pub mod validation;

mod options;

pub use domain::{Field, FieldId, FieldStatus, FieldType, ParseFieldTypeError};
pub use form::{FieldStore, FieldUpdate, FormSnapshot, FormState, SnapshotError};
pub use io::{DocumentFormat, OutputDestination, OutputOptions, emit};
pub use options::StoreOptions;
pub use persistence::{
    BlobStore, FileBlobStore, MemoryBlobStore, PersistenceBridge, STORAGE_KEY,
};
pub use preview::{PreviewEntry, SubmissionPreview, SubmitError};
pub use validation::{ValidationIssue, validate_field};

pub mod prelude {
    pub use super::{
        FieldStore, FieldType, FieldUpdate, FileBlobStore, FormState, MemoryBlobStore,
        StoreOptions,
    };
}
