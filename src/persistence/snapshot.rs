use anyhow::{Context, Result, bail};
use schemars::schema_for;
use serde_json::Value;

use crate::form::{FormSnapshot, FormState};

/// JSON Schema describing the persisted blob.
pub fn snapshot_schema() -> Result<Value> {
    serde_json::to_value(schema_for!(FormSnapshot)).context("failed to render form state schema")
}

pub fn encode_snapshot(state: &FormState) -> Result<String> {
    serde_json::to_string(&state.to_snapshot()).context("failed to serialize form state")
}

/// Parse a stored blob, checking its shape before trusting any of it.
pub fn decode_snapshot(blob: &str) -> Result<FormState> {
    let value: Value = serde_json::from_str(blob).context("stored form state is not valid JSON")?;
    let schema = snapshot_schema()?;
    let validator =
        jsonschema::validator_for(&schema).context("failed to compile form state schema")?;
    if let Some(error) = validator.iter_errors(&value).next() {
        let pointer = error.instance_path.to_string();
        let location = if pointer.is_empty() {
            "<root>".to_string()
        } else {
            pointer
        };
        bail!("stored form state has an unexpected shape at {location}: {error}");
    }
    let snapshot: FormSnapshot =
        serde_json::from_value(value).context("failed to decode form state")?;
    FormState::try_from(snapshot).context("stored form state is inconsistent")
}
