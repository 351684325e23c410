use crate::persistence::STORAGE_KEY;

#[derive(Debug, Clone)]
pub struct StoreOptions {
    pub storage_key: String,
    pub autosave: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            autosave: true,
        }
    }
}

impl StoreOptions {
    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// When disabled, mutations never write to storage.
    pub fn with_autosave(mut self, enabled: bool) -> Self {
        self.autosave = enabled;
        self
    }
}
