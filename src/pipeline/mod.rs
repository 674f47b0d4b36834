pub mod align;
pub mod trend;
pub mod normalize;

pub use align::*;
pub use trend::*;
pub use normalize::*;

/// Mean of the trailing `period` values.
pub fn sma(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period {
        return None;
    }
    let sum: f64 = values.iter().rev().take(period).sum();
    Some(sum / period as f64)
}

/// `sma` evaluated at every index; undefined until `period` values exist.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<Option<f64>> {
    (0..values.len())
        .map(|i| sma(&values[..=i], period))
        .collect()
}
