use crate::models::AppState;

use super::{KeyValueStore, StoreError};

/// Key under which the whole state is stored.
pub const STATE_KEY: &str = "calorieData";

/// Suffix of the key an unreadable record is copied to before it is replaced.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// Reads and writes the [`AppState`] as one JSON record of a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct StateStore<S> {
    store: S,
}

impl<S: KeyValueStore> StateStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    /// Loads the stored state, or an empty one if nothing was saved yet.
    ///
    /// A record that cannot be parsed is reported as [`StoreError::Corrupt`].
    pub fn load(&self) -> Result<AppState, StoreError> {
        match self.store.get(STATE_KEY)? {
            Some(raw) => {
                tracing::debug!("Loaded {} bytes from '{}'", raw.len(), STATE_KEY);
                serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
                    key: STATE_KEY.to_string(),
                    source,
                })
            }
            None => {
                tracing::debug!("No record under '{}', starting empty", STATE_KEY);
                Ok(AppState::new())
            }
        }
    }

    /// Serializes `state` and overwrites the stored record.
    pub fn save(&mut self, state: &AppState) -> Result<(), StoreError> {
        let raw = serde_json::to_string(state).map_err(StoreError::Serialize)?;
        self.store.set(STATE_KEY, &raw)?;
        tracing::debug!("Saved {} bytes to '{}'", raw.len(), STATE_KEY);
        Ok(())
    }

    /// Copies the raw record to `<key>.corrupt`, returning the backup key.
    ///
    /// Returns `None` when there is no record to back up.
    pub fn backup_raw(&mut self) -> Result<Option<String>, StoreError> {
        let Some(raw) = self.store.get(STATE_KEY)? else {
            return Ok(None);
        };
        let backup_key = format!("{}{}", STATE_KEY, CORRUPT_SUFFIX);
        self.store.set(&backup_key, &raw)?;
        Ok(Some(backup_key))
    }
}
