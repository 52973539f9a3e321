//! Scaling of daily totals into bar lengths for the weekly chart.

/// Scales each total to a bar of at most `width` cells.
///
/// Bars are relative to the largest total, which is taken to be at least 1
/// so an all-zero week draws empty bars instead of dividing by zero.
pub fn bar_lengths(totals: &[f64], width: usize) -> Vec<usize> {
    let max = totals.iter().copied().fold(1.0_f64, f64::max);
    totals
        .iter()
        .map(|total| {
            let ratio = (total.max(0.0) / max).min(1.0);
            (ratio * width as f64).round() as usize
        })
        .collect()
}
