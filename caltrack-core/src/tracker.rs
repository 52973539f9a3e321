//! A logging session: the day log manager bound to its persistent store.
//!
//! Every successful mutation is written back immediately, so the store never
//! holds state from a rejected or failed operation.

use std::sync::Arc;

use chrono::NaiveDate;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

use crate::lookup::{FoodItem, LookupClient, LookupError};
use crate::manager::DayLogManager;
use crate::models::{AppState, Meal};
use crate::storage::{KeyValueStore, StateStore, StoreError};

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

/// Owns the in-memory state and persists it after each change.
#[derive(Debug)]
pub struct Tracker<S> {
    manager: DayLogManager,
    store: StateStore<S>,
    recovered_from: Option<String>,
}

impl<S: KeyValueStore> Tracker<S> {
    /// Loads the stored state and makes sure `today` has a log.
    ///
    /// An unreadable record is copied aside (see [`StateStore::backup_raw`])
    /// and the session starts from an empty state.
    pub fn open(store: S, today: NaiveDate, default_goal: f64) -> Result<Self, TrackerError> {
        let mut store = StateStore::new(store);
        let mut recovered_from = None;

        let state = match store.load() {
            Ok(state) => state,
            Err(e) if e.is_corrupt() => {
                let backup = store.backup_raw()?;
                tracing::warn!(
                    "{}; starting with an empty log (previous data kept under '{}')",
                    e,
                    backup.as_deref().unwrap_or("<none>")
                );
                recovered_from = backup;
                AppState::new()
            }
            Err(e) => return Err(e.into()),
        };

        let mut manager = DayLogManager::new(state).with_default_goal(default_goal);
        manager.ensure_day(today);

        Ok(Self {
            manager,
            store,
            recovered_from,
        })
    }

    pub fn manager(&self) -> &DayLogManager {
        &self.manager
    }

    pub fn state(&self) -> &AppState {
        self.manager.state()
    }

    /// Backup key of a corrupt record replaced when this session was opened.
    pub fn recovered_from(&self) -> Option<&str> {
        self.recovered_from.as_deref()
    }

    /// Adds a meal and saves. Invalid entries are dropped without saving.
    pub fn add_meal(
        &mut self,
        date: NaiveDate,
        name: &str,
        calories: f64,
    ) -> Result<Option<Meal>, TrackerError> {
        let Some(meal) = self.manager.add_meal(date, name, calories).cloned() else {
            return Ok(None);
        };
        self.save()?;
        Ok(Some(meal))
    }

    /// Adds a looked-up product exactly like a manual entry.
    pub fn add_food(
        &mut self,
        date: NaiveDate,
        food: &FoodItem,
    ) -> Result<Option<Meal>, TrackerError> {
        self.add_meal(date, &food.name, food.total_calories)
    }

    /// Deletes a meal by id and saves, whether or not the id matched.
    pub fn delete_meal(&mut self, date: NaiveDate, id: u64) -> Result<Option<Meal>, TrackerError> {
        let removed = self.manager.delete_meal(date, id);
        self.save()?;
        Ok(removed)
    }

    /// Sets the day's calorie goal and saves. Returns false for an invalid goal.
    pub fn set_goal(&mut self, date: NaiveDate, goal: f64) -> Result<bool, TrackerError> {
        if !self.manager.set_goal(date, goal) {
            return Ok(false);
        }
        self.save()?;
        Ok(true)
    }

    fn save(&mut self) -> Result<(), TrackerError> {
        self.store.save(self.manager.state())?;
        Ok(())
    }
}

/// A [`Tracker`] shared between concurrent tasks.
///
/// Lookups run without holding the lock; only the resulting mutation and
/// save are serialized.
#[derive(Debug)]
pub struct SharedTracker<S> {
    inner: Arc<Mutex<Tracker<S>>>,
}

impl<S> Clone for SharedTracker<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedTracker<S> {
    pub fn new(tracker: Tracker<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(tracker)),
        }
    }

    pub async fn lock(&self) -> MutexGuard<'_, Tracker<S>> {
        self.inner.lock().await
    }

    /// Looks up `product_id` and logs a `portion_grams` serving on `date`.
    pub async fn add_from_lookup(
        &self,
        client: &LookupClient,
        date: NaiveDate,
        product_id: &str,
        portion_grams: f64,
    ) -> Result<Option<Meal>, TrackerError> {
        let food = client.lookup(product_id, portion_grams).await?;
        self.lock().await.add_food(date, &food)
    }
}
