//! caltrack Core Library
//!
//! Day-keyed meal log, its JSON persistence and the nutrition database client.

pub mod chart;
pub mod lookup;
pub mod manager;
pub mod models;
pub mod storage;
pub mod tracker;

pub use lookup::{FoodItem, LookupClient, LookupError};
pub use manager::{DayLogManager, WEEK_LEN};
pub use models::{AppState, DayLog, Meal, DEFAULT_CALORIE_GOAL};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StateStore, StoreError};
pub use tracker::{SharedTracker, Tracker, TrackerError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
