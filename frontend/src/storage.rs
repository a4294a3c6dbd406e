use gloo_console::error;
use wasm_bindgen::JsValue;
use web_sys::Storage;
use workout_lib::{MemoryStorage, StoreError, WorkoutStorage};

/// `window.localStorage`, or an in-memory map when the browser refuses
/// access (private mode, disabled storage). The latter does not survive a reload.
pub enum BrowserStorage {
    Local(Storage),
    Memory(MemoryStorage),
}

impl BrowserStorage {
    pub fn open() -> Self {
        match gloo_utils::window().local_storage() {
            Ok(Some(storage)) => Self::Local(storage),
            Ok(None) => {
                error!("localStorage is not available, workouts will not be kept");
                Self::Memory(MemoryStorage::new())
            }
            Err(e) => {
                error!("Cannot open localStorage:", e);
                Self::Memory(MemoryStorage::new())
            }
        }
    }
}

fn backend_error(e: JsValue) -> StoreError {
    StoreError::Backend(e.as_string().unwrap_or_else(|| format!("{e:?}")))
}

impl WorkoutStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::Local(storage) => storage.get_item(key).map_err(backend_error),
            Self::Memory(storage) => storage.get_item(key),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::Local(storage) => storage.set_item(key, value).map_err(backend_error),
            Self::Memory(storage) => storage.set_item(key, value),
        }
    }

    fn remove_item(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::Local(storage) => storage.remove_item(key).map_err(backend_error),
            Self::Memory(storage) => storage.remove_item(key),
        }
    }
}
