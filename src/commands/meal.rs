use caltrack_core::{DayLog, KeyValueStore, Tracker};
use chrono::NaiveDate;
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{portion_calories, resolve_date, today, OutputFormat};

#[derive(Args)]
pub struct MealCommand {
    #[command(subcommand)]
    pub command: MealSubcommand,
}

#[derive(Subcommand)]
pub enum MealSubcommand {
    /// Log a meal by name and energy density
    Add {
        /// Meal name
        name: String,

        /// Energy per 100 g (kcal)
        #[arg(long = "kcal-per-100g", value_name = "KCAL")]
        kcal_per_100g: f64,

        /// Portion size in grams
        #[arg(long, short, default_value_t = 100.0)]
        grams: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Delete a logged meal
    Delete {
        /// Meal ID
        id: u64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Show the meals and calorie total of a day
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },

    /// Set the calorie goal of a day
    Goal {
        /// Goal in kcal
        kcal: f64,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,
    },
}

/// A day as shown by `meal list --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DaySummary<'a> {
    date: NaiveDate,
    meals: &'a [caltrack_core::Meal],
    total_calories: f64,
    calorie_goal: f64,
    remaining_calories: f64,
}

impl MealCommand {
    pub fn run<S: KeyValueStore>(
        &self,
        tracker: &mut Tracker<S>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let today = today();
        match &self.command {
            MealSubcommand::Add {
                name,
                kcal_per_100g,
                grams,
                date,
            } => {
                let date = resolve_date(date, today)?;
                let calories = portion_calories(*kcal_per_100g, *grams);
                match tracker.add_meal(date, name, calories)? {
                    Some(meal) => println!("Logged {} on {} (ID: {})", meal, date, meal.id),
                    None => tracing::warn!("Nothing logged for '{}'", name),
                }
                Ok(())
            }
            MealSubcommand::Delete { id, date } => {
                let date = resolve_date(date, today)?;
                match tracker.delete_meal(date, *id)? {
                    Some(meal) => println!("Deleted {} from {}", meal, date),
                    None => println!("No meal with ID {} on {}", id, date),
                }
                Ok(())
            }
            MealSubcommand::List { format, date } => {
                let date = resolve_date(date, today)?;
                let day = tracker.manager().day_or_empty(date);
                match format {
                    OutputFormat::Json => {
                        let summary = DaySummary {
                            date,
                            meals: &day.meals,
                            total_calories: day.total_calories(),
                            calorie_goal: day.calorie_goal,
                            remaining_calories: day.remaining_calories(),
                        };
                        println!("{}", serde_json::to_string_pretty(&summary)?);
                    }
                    OutputFormat::Text => print!("{}", format_day(date, &day)),
                }
                Ok(())
            }
            MealSubcommand::Goal { kcal, date } => {
                let date = resolve_date(date, today)?;
                if !tracker.set_goal(date, *kcal)? {
                    return Err(
                        format!("Invalid goal '{}': must be a positive number", kcal).into(),
                    );
                }
                println!("Calorie goal for {} set to {:.0} kcal", date, kcal);
                Ok(())
            }
        }
    }
}

/// Renders a day's meals followed by the total against the goal.
fn format_day(date: NaiveDate, day: &DayLog) -> String {
    let mut out = format!("{}\n{}\n", date, "-".repeat(60));

    if day.meals.is_empty() {
        out.push_str("  No meals logged\n");
    }
    for meal in &day.meals {
        out.push_str(&format!("  {:<40} {:>6.0} kcal  [{}]\n", meal.name, meal.calories, meal.id));
    }

    out.push_str(&format!("{}\n", "-".repeat(60)));
    let remaining = day.remaining_calories();
    let status = if remaining >= 0.0 {
        format!("{:.0} remaining", remaining)
    } else {
        format!("{:.0} over", -remaining)
    };
    out.push_str(&format!(
        "  Total: {:.0} / {:.0} kcal ({})\n",
        day.total_calories(),
        day.calorie_goal,
        status
    ));
    out
}
