use tracing::{debug, info};

use crate::{
    domain::{FieldId, FieldType},
    options::StoreOptions,
    persistence::{BlobStore, PersistenceBridge},
    preview::{SubmissionPreview, SubmitError},
};

use super::{
    actions::{FieldUpdate, FormCommand},
    reducers::{CommandOutcome, apply_command},
    state::FormState,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Fresh,
    Hydrated,
    Active,
}

/// Owner of one form's fields.
///
/// Every mutating method applies its command, then saves the collection
/// through the bridge when autosave is on and the form is not empty.
/// Storage failures never undo the in-memory change.
#[derive(Debug)]
pub struct FieldStore<B> {
    state: FormState,
    bridge: PersistenceBridge<B>,
    autosave: bool,
    lifecycle: Lifecycle,
}

impl<B: BlobStore> FieldStore<B> {
    pub fn new(backend: B) -> Self {
        Self::with_options(backend, StoreOptions::default())
    }

    pub fn with_options(backend: B, options: StoreOptions) -> Self {
        Self {
            state: FormState::new(),
            bridge: PersistenceBridge::with_key(backend, options.storage_key),
            autosave: options.autosave,
            lifecycle: Lifecycle::Fresh,
        }
    }

    /// Create a store and rehydrate it from whatever was saved last.
    pub fn open(backend: B, options: StoreOptions) -> Self {
        let mut store = Self::with_options(backend, options);
        store.hydrate();
        store
    }

    /// Load the saved collection; it replaces the empty form only when it has fields.
    ///
    /// # Panics
    ///
    /// When called twice, or after the store has been mutated.
    pub fn hydrate(&mut self) -> bool {
        assert!(
            self.lifecycle == Lifecycle::Fresh,
            "FieldStore::hydrate must be called once, before any mutation"
        );
        self.lifecycle = Lifecycle::Hydrated;
        match self.bridge.load() {
            Some(saved) if !saved.is_empty() => {
                info!(fields = saved.len(), "restored saved form");
                apply_command(&mut self.state, FormCommand::LoadState(saved));
                true
            }
            _ => {
                debug!("no saved form to restore");
                false
            }
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn is_form_valid(&self) -> bool {
        self.state.is_form_valid()
    }

    pub fn add_field(&mut self, field_type: FieldType) -> FieldId {
        let id = FieldId::generate();
        self.commit(FormCommand::AddField {
            id: id.clone(),
            field_type,
        });
        id
    }

    /// Returns whether a field was removed; unknown ids leave the form as is.
    pub fn remove_field(&mut self, id: &FieldId) -> bool {
        self.commit(FormCommand::RemoveField { id: id.clone() }) == CommandOutcome::Applied
    }

    /// Returns whether the field exists. The error is recomputed from the
    /// current value even for label-only edits.
    pub fn update_field(&mut self, id: &FieldId, update: FieldUpdate) -> bool {
        self.commit(FormCommand::UpdateField {
            id: id.clone(),
            update,
        }) == CommandOutcome::Applied
    }

    /// Empty the form. The saved copy is left alone; see [`FieldStore::clear_saved`].
    pub fn reset_form(&mut self) {
        self.commit(FormCommand::ResetForm);
    }

    /// Replace the whole collection without re-validating it.
    pub fn load_state(&mut self, state: FormState) {
        self.commit(FormCommand::LoadState(state));
    }

    pub fn clear_saved(&mut self) {
        self.bridge.clear();
    }

    pub fn submission(&self) -> Result<SubmissionPreview, SubmitError> {
        if !self.is_form_valid() {
            return Err(SubmitError::FormInvalid);
        }
        Ok(SubmissionPreview::from_state(&self.state))
    }

    pub fn bridge(&self) -> &PersistenceBridge<B> {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut PersistenceBridge<B> {
        &mut self.bridge
    }

    pub fn into_state(self) -> FormState {
        self.state
    }

    fn commit(&mut self, command: FormCommand) -> CommandOutcome {
        self.lifecycle = Lifecycle::Active;
        let outcome = apply_command(&mut self.state, command);
        if self.autosave && !self.state.is_empty() {
            self.bridge.save(&self.state);
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{BlobStore, MemoryBlobStore, STORAGE_KEY, decode_snapshot};

    fn saved(store: &FieldStore<MemoryBlobStore>) -> Option<FormState> {
        store
            .bridge()
            .backend()
            .get(STORAGE_KEY)
            .map(|blob| decode_snapshot(blob).unwrap())
    }

    #[test]
    fn mutations_save_non_empty_forms() {
        let mut store = FieldStore::new(MemoryBlobStore::new());
        let id = store.add_field(FieldType::Text);
        assert_eq!(saved(&store).as_ref(), Some(store.state()));

        store.update_field(&id, FieldUpdate::value("hello"));
        assert_eq!(saved(&store).unwrap().get(id.as_str()).unwrap().value, "hello");
        assert_eq!(store.bridge().backend().write_count(), 2);
    }

    #[test]
    fn removing_unknown_id_still_persists_unchanged_form() {
        let mut store = FieldStore::new(MemoryBlobStore::new());
        let id = store.add_field(FieldType::Email);
        let before = store.state().clone();
        assert!(!store.remove_field(&FieldId::from("missing")));
        assert_eq!(store.state(), &before);
        assert_eq!(store.bridge().backend().write_count(), 2);
        assert!(store.remove_field(&id));
    }

    #[test]
    fn emptying_the_form_does_not_overwrite_saved_copy() {
        let mut store = FieldStore::new(MemoryBlobStore::new());
        let id = store.add_field(FieldType::Number);
        store.remove_field(&id);
        assert!(store.state().is_empty());
        // last non-empty snapshot is superseded only by the next non-empty one
        assert_eq!(saved(&store).unwrap().len(), 1);

        store.add_field(FieldType::Text);
        store.reset_form();
        assert!(store.state().is_empty());
        assert_eq!(saved(&store).unwrap().len(), 1);

        store.clear_saved();
        assert_eq!(saved(&store), None);
    }

    #[test]
    fn autosave_can_be_disabled() {
        let options = StoreOptions::default().with_autosave(false);
        let mut store = FieldStore::with_options(MemoryBlobStore::new(), options);
        store.add_field(FieldType::Text);
        assert_eq!(store.bridge().backend().write_count(), 0);
    }

    #[test]
    fn storage_failures_do_not_block_mutations() {
        let backend = MemoryBlobStore::new().with_failing_writes(true);
        let mut store = FieldStore::new(backend);
        let id = store.add_field(FieldType::Text);
        assert!(store.update_field(&id, FieldUpdate::value("kept")));
        assert_eq!(store.state().get(id.as_str()).unwrap().value, "kept");
        assert_eq!(saved(&store), None);
    }

    #[test]
    fn hydrate_restores_only_non_empty_saves() {
        let mut backend = MemoryBlobStore::new();
        backend.write(STORAGE_KEY, r#"{"fields":[]}"#).unwrap();
        let mut store = FieldStore::new(backend);
        assert!(!store.hydrate());
        assert!(store.state().is_empty());

        let mut backend = MemoryBlobStore::new();
        backend
            .write(
                STORAGE_KEY,
                r#"{"fields":[{"id":"a","type":"text","label":"Name","value":""}]}"#,
            )
            .unwrap();
        let store = FieldStore::open(backend, StoreOptions::default());
        assert_eq!(store.state().len(), 1);
        // hydration alone writes nothing back
        assert_eq!(store.bridge().backend().write_count(), 1);
    }

    #[test]
    fn hydrate_uses_configured_key() {
        let mut backend = MemoryBlobStore::new();
        backend
            .write(
                "other",
                r#"{"fields":[{"id":"a","type":"email","label":"Mail","value":"a@b.co"}]}"#,
            )
            .unwrap();
        let options = StoreOptions::default().with_storage_key("other");
        let store = FieldStore::open(backend, options);
        assert!(store.is_form_valid());
        assert_eq!(store.bridge().key(), "other");
    }

    #[test]
    #[should_panic(expected = "hydrate must be called once")]
    fn hydrating_twice_panics() {
        let mut store = FieldStore::new(MemoryBlobStore::new());
        store.hydrate();
        store.hydrate();
    }

    #[test]
    #[should_panic(expected = "before any mutation")]
    fn hydrating_after_mutation_panics() {
        let mut store = FieldStore::new(MemoryBlobStore::new());
        store.add_field(FieldType::Text);
        store.hydrate();
    }

    #[test]
    fn submission_requires_a_valid_form() {
        let mut store = FieldStore::new(MemoryBlobStore::new());
        assert_eq!(store.submission().unwrap_err(), SubmitError::FormInvalid);
        let id = store.add_field(FieldType::Text);
        assert!(store.submission().is_err());
        store.update_field(&id, FieldUpdate::value("hello"));
        let preview = store.submission().unwrap();
        assert_eq!(preview.len(), 1);
    }

    #[test]
    fn load_state_replaces_and_persists() {
        let mut source = FieldStore::new(MemoryBlobStore::new());
        let id = source.add_field(FieldType::Number);
        source.update_field(&id, FieldUpdate::value("-1"));
        let snapshot = source.into_state();

        let mut store = FieldStore::new(MemoryBlobStore::new());
        store.add_field(FieldType::Text);
        store.load_state(snapshot.clone());
        assert_eq!(store.state(), &snapshot);
        assert_eq!(saved(&store), Some(snapshot));
    }
}
