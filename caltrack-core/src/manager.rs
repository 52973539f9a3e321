//! In-memory day log: meal mutations and the derived daily/weekly aggregates.

use chrono::{NaiveDate, Utc};

use crate::models::{AppState, DayLog, Meal, DEFAULT_CALORIE_GOAL};

/// Number of most recent days covered by [`DayLogManager::weekly_totals`].
pub const WEEK_LEN: usize = 7;

/// Owns the [`AppState`] and applies every mutation to it.
#[derive(Debug, Clone)]
pub struct DayLogManager {
    state: AppState,
    default_goal: f64,
}

impl Default for DayLogManager {
    fn default() -> Self {
        Self::new(AppState::new())
    }
}

impl DayLogManager {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            default_goal: DEFAULT_CALORIE_GOAL,
        }
    }

    /// Sets the goal given to days created from now on. Existing days keep theirs.
    pub fn with_default_goal(mut self, goal: f64) -> Self {
        if goal.is_finite() && goal > 0.0 {
            self.default_goal = goal;
        }
        self
    }

    /// Goal given to days that have no log yet.
    pub fn default_goal(&self) -> f64 {
        self.default_goal
    }

    /// The log of `date`, or an empty one with the default goal if none exists.
    pub fn day_or_empty(&self, date: NaiveDate) -> DayLog {
        self.state
            .day(date)
            .cloned()
            .unwrap_or_else(|| DayLog::with_goal(self.default_goal))
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn into_state(self) -> AppState {
        self.state
    }

    /// Returns the log for `date`, creating an empty one first if needed.
    pub fn ensure_day(&mut self, date: NaiveDate) -> &mut DayLog {
        let goal = self.default_goal;
        self.state
            .days
            .entry(date)
            .or_insert_with(|| DayLog::with_goal(goal))
    }

    /// Meals logged on `date`, in insertion order.
    pub fn meals(&self, date: NaiveDate) -> &[Meal] {
        self.state
            .day(date)
            .map(|d| d.meals.as_slice())
            .unwrap_or(&[])
    }

    /// Appends a meal to `date`, using the current time for its id.
    ///
    /// Returns `None` without touching the state when the entry is invalid.
    pub fn add_meal(&mut self, date: NaiveDate, name: &str, calories: f64) -> Option<&Meal> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        self.add_meal_at(date, name, calories, now)
    }

    /// Same as [`add_meal`](Self::add_meal) with an explicit creation time.
    pub fn add_meal_at(
        &mut self,
        date: NaiveDate,
        name: &str,
        calories: f64,
        now_millis: u64,
    ) -> Option<&Meal> {
        if !Meal::is_valid_entry(name, calories) {
            tracing::warn!(
                "Ignoring meal {:?} with {} kcal: name must be non-empty and calories positive",
                name,
                calories
            );
            return None;
        }

        let day = self.ensure_day(date);
        let id = day.next_id(now_millis);
        day.meals.push(Meal::new(id, name, calories));
        tracing::debug!("Added meal {} on {}", id, date);
        day.meals.last()
    }

    /// Removes the meal with `id` from `date`, returning it if it was present.
    pub fn delete_meal(&mut self, date: NaiveDate, id: u64) -> Option<Meal> {
        let day = self.ensure_day(date);
        let pos = day.meals.iter().position(|m| m.id == id)?;
        tracing::debug!("Deleted meal {} on {}", id, date);
        Some(day.meals.remove(pos))
    }

    /// Changes the calorie goal of `date`. Returns false for a non-positive goal.
    pub fn set_goal(&mut self, date: NaiveDate, goal: f64) -> bool {
        if !goal.is_finite() || goal <= 0.0 {
            return false;
        }
        self.ensure_day(date).calorie_goal = goal;
        true
    }

    /// Sum of calories for `date`; zero for a day with no log.
    pub fn total_calories(&self, date: NaiveDate) -> f64 {
        self.state
            .day(date)
            .map(DayLog::total_calories)
            .unwrap_or(0.0)
    }

    /// Totals of the most recent recorded days, oldest first.
    pub fn weekly_series(&self) -> Vec<(NaiveDate, f64)> {
        let skip = self.state.days.len().saturating_sub(WEEK_LEN);
        self.state
            .days
            .iter()
            .skip(skip)
            .map(|(date, day)| (*date, day.total_calories()))
            .collect()
    }

    /// Daily totals of the last (up to) seven recorded days, oldest first.
    pub fn weekly_totals(&self) -> Vec<f64> {
        self.weekly_series().into_iter().map(|(_, t)| t).collect()
    }
}
