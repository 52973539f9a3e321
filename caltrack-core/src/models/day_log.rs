use serde::{Deserialize, Serialize};

use super::meal::Meal;

/// Calorie goal assigned to a day when it is first created.
pub const DEFAULT_CALORIE_GOAL: f64 = 2000.0;

/// Everything logged for one calendar day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DayLog {
    #[serde(default)]
    pub meals: Vec<Meal>,
    #[serde(default = "default_goal")]
    pub calorie_goal: f64,
}

fn default_goal() -> f64 {
    DEFAULT_CALORIE_GOAL
}

impl Default for DayLog {
    fn default() -> Self {
        Self::with_goal(DEFAULT_CALORIE_GOAL)
    }
}

impl DayLog {
    pub fn with_goal(calorie_goal: f64) -> Self {
        Self {
            meals: Vec::new(),
            calorie_goal,
        }
    }

    /// Sum of calories over all meals of the day.
    pub fn total_calories(&self) -> f64 {
        self.meals.iter().fold(0.0, |acc, m| acc + m.calories)
    }

    /// Calories left before the goal is reached; negative once it is exceeded.
    pub fn remaining_calories(&self) -> f64 {
        self.calorie_goal - self.total_calories()
    }

    /// Picks an id for a meal created at `now_millis`.
    ///
    /// The timestamp is used unless it would collide with or precede an
    /// existing id, in which case the largest id plus one is used. If that
    /// overflows, the smallest id not taken on this day is used instead.
    pub fn next_id(&self, now_millis: u64) -> u64 {
        match self.meals.iter().map(|m| m.id).max() {
            Some(max) if now_millis <= max => match max.checked_add(1) {
                Some(next) => next,
                None => self.smallest_free_id(),
            },
            _ => now_millis,
        }
    }

    fn smallest_free_id(&self) -> u64 {
        let mut ids: Vec<u64> = self.meals.iter().map(|m| m.id).collect();
        ids.sort_unstable();
        ids.dedup();
        // ids are sorted and unique, so the first gap is the first index
        // whose id is larger than the index
        ids.iter()
            .zip(0u64..)
            .find(|(id, idx)| **id != *idx)
            .map(|(_, idx)| idx)
            .unwrap_or(ids.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_day_log() {
        let day = DayLog::default();
        assert!(day.meals.is_empty());
        assert_eq!(day.calorie_goal, 2000.0);
        assert_eq!(day.total_calories(), 0.0);
    }

    #[test]
    fn test_empty_day_total_is_positive_zero() {
        let total = DayLog::default().total_calories();
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
        assert_eq!(format!("{:.0}", total), "0");
        assert_eq!(serde_json::to_string(&total).unwrap(), "0.0");
    }

    #[test]
    fn test_remaining_calories() {
        let mut day = DayLog::with_goal(500.0);
        day.meals.push(Meal::new(1, "Toast", 200.0));
        day.meals.push(Meal::new(2, "Jam", 80.0));
        assert_eq!(day.remaining_calories(), 220.0);

        day.meals.push(Meal::new(3, "Cake", 400.0));
        assert_eq!(day.remaining_calories(), -180.0);
    }

    #[test]
    fn test_next_id_uses_timestamp() {
        let day = DayLog::default();
        assert_eq!(day.next_id(1_000), 1_000);
    }

    #[test]
    fn test_next_id_bumps_on_collision() {
        let mut day = DayLog::default();
        day.meals.push(Meal::new(1_000, "A", 1.0));
        assert_eq!(day.next_id(1_000), 1_001);
        // clock went backwards
        assert_eq!(day.next_id(500), 1_001);
        assert_eq!(day.next_id(2_000), 2_000);
    }

    #[test]
    fn test_next_id_after_max_id_picks_free_id() {
        let day: DayLog = serde_json::from_str(
            r#"{"meals":[{"id":18446744073709551615,"name":"A","calories":1},
                         {"id":0,"name":"B","calories":1},
                         {"id":1,"name":"C","calories":1},
                         {"id":3,"name":"D","calories":1}],
                "calorieGoal":2000}"#,
        )
        .unwrap();
        assert_eq!(day.next_id(1_000), 2);

        let mut only_max = DayLog::default();
        only_max.meals.push(Meal::new(u64::MAX, "A", 1.0));
        assert_eq!(only_max.next_id(5), 0);
    }

    #[test]
    fn test_camel_case_goal_field() {
        let day = DayLog::default();
        let json = serde_json::to_value(&day).unwrap();
        assert_eq!(json, serde_json::json!({"meals": [], "calorieGoal": 2000.0}));
    }

    #[test]
    fn test_missing_goal_defaults() {
        let day: DayLog = serde_json::from_str(r#"{"meals": []}"#).unwrap();
        assert_eq!(day.calorie_goal, DEFAULT_CALORIE_GOAL);
    }
}
