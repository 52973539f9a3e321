mod config_cmd;
mod meal;
mod scan;
mod week;

pub use config_cmd::ConfigCommand;
pub use meal::MealCommand;
pub use scan::ScanCommand;
pub use week::WeekCommand;

use chrono::{Local, NaiveDate};
use clap::ValueEnum;

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Today's date in local time.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parses a `--date` argument, defaulting to `today`.
pub fn resolve_date(date: &Option<String>, today: NaiveDate) -> Result<NaiveDate, String> {
    match date {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d")
            .map_err(|_| format!("Invalid date format '{}'. Use YYYY-MM-DD.", d)),
        None => Ok(today),
    }
}

/// Calories of a portion given the energy per 100 g.
pub fn portion_calories(kcal_per_100g: f64, grams: f64) -> f64 {
    kcal_per_100g * grams / 100.0
}
