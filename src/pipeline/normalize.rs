/// Rescale `values` so the first element is exactly 100.
///
/// Returns `None` for an empty series or one whose base is zero or non-finite.
pub fn normalize_base_100(values: &[f64]) -> Option<Vec<f64>> {
    let base = *values.first()?;
    if base == 0.0 || !base.is_finite() {
        return None;
    }
    // v / base first so the base row is 1.0 * 100 exactly.
    Some(values.iter().map(|v| v / base * 100.0).collect())
}
