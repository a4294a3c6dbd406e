use std::collections::HashMap;

use crate::workout::Workout;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("storage backend failed: {0}")]
    Backend(String),
    #[error("failed to serialize workouts: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("stored workouts are not readable: {0}")]
    Parse(#[source] serde_json::Error),
}

/// String key/value storage with the shape of the browser's `localStorage`.
pub trait WorkoutStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&mut self, key: &str) -> Result<(), StoreError>;
}

/// Process local storage, used natively and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(key: &str, value: &str) -> Self {
        let mut items = HashMap::new();
        items.insert(key.to_owned(), value.to_owned());
        Self { items }
    }
}

impl WorkoutStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.items.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        self.items.remove(key);
        Ok(())
    }
}

/// Mirrors the full workout list under a single key as a JSON array.
#[derive(Debug)]
pub struct WorkoutStore<S> {
    storage: S,
    key: String,
}

impl<S: WorkoutStorage> WorkoutStore<S> {
    pub fn new(storage: S, key: impl Into<String>) -> Self {
        Self { storage, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Overwrites whatever was stored before.
    pub fn save(&mut self, workouts: &[Workout]) -> Result<(), StoreError> {
        let json = serde_json::to_string(workouts).map_err(StoreError::Serialize)?;
        self.storage.set_item(&self.key, &json)?;
        tracing::debug!(count = workouts.len(), key = %self.key, "Saved workouts");
        Ok(())
    }

    /// An absent key is an empty list.
    pub fn load(&self) -> Result<Vec<Workout>, StoreError> {
        let Some(json) = self.storage.get_item(&self.key)? else {
            tracing::debug!(key = %self.key, "No stored workouts");
            return Ok(Vec::new());
        };

        let mut workouts: Vec<Workout> = serde_json::from_str(&json).map_err(StoreError::Parse)?;
        for workout in workouts.iter_mut() {
            workout.rehydrate();
        }

        tracing::debug!(count = workouts.len(), key = %self.key, "Loaded workouts");
        Ok(workouts)
    }

    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.storage.remove_item(&self.key)
    }
}
