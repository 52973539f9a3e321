use serde::{Deserialize, Serialize};
use std::fmt;

/// A single logged food entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: u64,
    pub name: String,
    pub calories: f64,
}

impl Meal {
    pub fn new(id: u64, name: impl Into<String>, calories: f64) -> Self {
        Self {
            id,
            name: name.into(),
            calories,
        }
    }

    /// Returns true if a meal with this name and calorie figure may be logged.
    ///
    /// Names must contain something besides whitespace; calories must be a
    /// finite, strictly positive number.
    pub fn is_valid_entry(name: &str, calories: f64) -> bool {
        !name.trim().is_empty() && calories.is_finite() && calories > 0.0
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {:.0} kcal", self.name, self.calories)
    }
}
