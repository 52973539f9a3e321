use caltrack_core::{KeyValueStore, LookupClient, SharedTracker};
use clap::Args;
use futures::future::join_all;

use super::{resolve_date, today};

#[derive(Args)]
pub struct ScanCommand {
    /// Product barcode(s) to look up
    #[arg(required = true, value_name = "BARCODE")]
    pub barcodes: Vec<String>,

    /// Portion size in grams (applies to every barcode)
    #[arg(long, short, default_value_t = 100.0)]
    pub grams: f64,

    /// Date (YYYY-MM-DD), defaults to today
    #[arg(long, short)]
    pub date: Option<String>,
}

impl ScanCommand {
    /// Looks up all barcodes concurrently and logs every product found.
    pub async fn run<S: KeyValueStore>(
        &self,
        tracker: &SharedTracker<S>,
        client: &LookupClient,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let date = resolve_date(&self.date, today())?;
        if !self.grams.is_finite() || self.grams <= 0.0 {
            return Err(format!("Invalid portion '{}': must be positive grams", self.grams).into());
        }

        let lookups = self
            .barcodes
            .iter()
            .map(|code| tracker.add_from_lookup(client, date, code, self.grams));
        let results = join_all(lookups).await;

        let mut failed = 0;
        for (code, result) in self.barcodes.iter().zip(results) {
            match result {
                Ok(Some(meal)) => println!("{}: logged {} (ID: {})", code, meal, meal.id),
                Ok(None) => println!("{}: nothing logged", code),
                Err(e) => {
                    failed += 1;
                    eprintln!("{}: {}", code, e);
                }
            }
        }

        if failed > 0 {
            return Err(format!("{} of {} lookup(s) failed", failed, self.barcodes.len()).into());
        }
        Ok(())
    }
}
