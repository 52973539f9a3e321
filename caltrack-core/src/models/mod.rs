mod app_state;
mod day_log;
mod meal;

pub use app_state::AppState;
pub use day_log::{DayLog, DEFAULT_CALORIE_GOAL};
pub use meal::Meal;
