use caltrack_core::chart::bar_lengths;
use caltrack_core::DayLogManager;
use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;

use super::OutputFormat;

/// Width of the longest bar in cells.
const CHART_WIDTH: usize = 40;

#[derive(Args)]
pub struct WeekCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Serialize)]
struct DayTotal {
    date: NaiveDate,
    total_calories: f64,
}

impl WeekCommand {
    pub fn run(&self, manager: &DayLogManager) -> Result<(), Box<dyn std::error::Error>> {
        let series = manager.weekly_series();
        match self.format {
            OutputFormat::Json => {
                let days: Vec<DayTotal> = series
                    .into_iter()
                    .map(|(date, total_calories)| DayTotal {
                        date,
                        total_calories,
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&days)?);
            }
            OutputFormat::Text => print!("{}", render_chart(&series, CHART_WIDTH)),
        }
        Ok(())
    }
}

/// Horizontal bar chart of daily totals, one line per day.
fn render_chart(series: &[(NaiveDate, f64)], width: usize) -> String {
    if series.is_empty() {
        return "No days logged yet\n".to_string();
    }

    let totals: Vec<f64> = series.iter().map(|(_, t)| *t).collect();
    let bars = bar_lengths(&totals, width);

    let mut out = String::new();
    for ((date, total), len) in series.iter().zip(bars) {
        out.push_str(&format!(
            "{} | {:<width$} {:>6.0}\n",
            date,
            "#".repeat(len),
            total,
            width = width
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    #[test]
    fn test_render_chart() {
        let series = vec![(date(1), 1000.0), (date(2), 500.0), (date(3), 0.0)];
        let out = render_chart(&series, 10);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "2024-01-01 | ##########   1000");
        assert_eq!(lines[1], "2024-01-02 | #####         500");
        assert_eq!(lines[2], "2024-01-03 |                 0");
    }

    #[test]
    fn test_render_chart_for_empty_today() {
        let mut manager = DayLogManager::default();
        manager.ensure_day(date(1));

        let out = render_chart(&manager.weekly_series(), 10);
        assert_eq!(out, "2024-01-01 |                 0\n");
    }

    #[test]
    fn test_render_empty_chart() {
        assert_eq!(render_chart(&[], 10), "No days logged yet\n");
    }
}
