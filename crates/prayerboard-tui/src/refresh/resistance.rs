//! Square-root damping of the raw drag distance

/// Resisted pull distance for a raw downward drag.
///
/// Grows quickly at first and flattens out, capped at `threshold`.
pub fn apply_resistance(distance: f64, threshold: f64, factor: f64) -> f64 {
    if distance <= 0.0 || threshold <= 0.0 || factor <= 0.0 {
        return 0.0;
    }
    let resisted = threshold * (distance / (threshold / factor)).sqrt();
    resisted.min(threshold)
}

/// Pull progress in [0, 1]
pub fn progress_for(distance: f64, threshold: f64) -> f64 {
    if threshold <= 0.0 {
        return 0.0;
    }
    (distance / threshold).clamp(0.0, 1.0)
}
