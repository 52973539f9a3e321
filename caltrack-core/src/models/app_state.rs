use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::day_log::DayLog;

/// The whole persisted application state: one [`DayLog`] per calendar day.
///
/// Days are keyed by typed dates, so iteration order is chronological and
/// the serialized keys keep the `YYYY-MM-DD` form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppState {
    #[serde(default)]
    pub days: BTreeMap<NaiveDate, DayLog>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DayLog> {
        self.days.get(&date)
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Number of distinct days recorded.
    pub fn len(&self) -> usize {
        self.days.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Meal;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_empty_state_json() {
        let state = AppState::new();
        assert_eq!(serde_json::to_string(&state).unwrap(), r#"{"days":{}}"#);
    }

    #[test]
    fn test_state_json_uses_iso_keys() {
        let mut state = AppState::new();
        let mut day = DayLog::default();
        day.meals.push(Meal::new(1, "Apple", 95.0));
        state.days.insert(date("2024-01-01"), day);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "days": {
                    "2024-01-01": {
                        "meals": [{"id": 1, "name": "Apple", "calories": 95.0}],
                        "calorieGoal": 2000.0
                    }
                }
            })
        );
    }

    #[test]
    fn test_parses_browser_record() {
        // integer calories and millisecond ids as written by the web widget
        let raw = r#"{"days":{"2024-03-09":{
            "meals":[{"id":1709978400123,"name":"Pasta","calories":540}],
            "calorieGoal":2000}}}"#;
        let state: AppState = serde_json::from_str(raw).unwrap();
        let day = state.day(date("2024-03-09")).unwrap();
        assert_eq!(day.meals[0].id, 1709978400123);
        assert_eq!(day.meals[0].calories, 540.0);
    }

    #[test]
    fn test_rejects_invalid_date_key() {
        let raw = r#"{"days":{"yesterday":{"meals":[],"calorieGoal":2000}}}"#;
        assert!(serde_json::from_str::<AppState>(raw).is_err());
    }

    #[test]
    fn test_days_iterate_chronologically() {
        let mut state = AppState::new();
        for d in ["2024-01-10", "2023-12-31", "2024-01-02"] {
            state.days.insert(date(d), DayLog::default());
        }
        let keys: Vec<String> = state.days.keys().map(|d| d.to_string()).collect();
        assert_eq!(keys, vec!["2023-12-31", "2024-01-02", "2024-01-10"]);
        assert_eq!(state.len(), 3);
    }
}
