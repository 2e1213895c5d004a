//! L4 Atomic Layer: Time calculation utilities
//!
//! Every function takes the sampling instant explicitly so that state
//! machines built on top can be driven by a synthetic clock.

use std::time::{Duration, Instant};

/// Animation progress (0.0 to 1.0) at `now`
#[inline]
pub fn progress_at(start: Instant, duration: Duration, now: Instant) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    let elapsed = now.saturating_duration_since(start);
    let ratio = elapsed.as_secs_f64() / duration.as_secs_f64();
    ratio.clamp(0.0, 1.0)
}

/// Whether an animation started at `start` has finished at `now`
#[inline]
pub fn is_complete_at(start: Instant, duration: Duration, now: Instant) -> bool {
    now.saturating_duration_since(start) >= duration
}

/// Linear interpolation between two values
#[inline]
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// Linear interpolation for u16 values (scroll positions)
#[inline]
pub fn lerp_u16(from: u16, to: u16, t: f64) -> u16 {
    lerp(from as f64, to as f64, t).round() as u16
}

/// Map `value` from [in_lo, in_hi] into [out_lo, out_hi], clamped
#[inline]
pub fn interpolate_clamped(value: f64, in_lo: f64, in_hi: f64, out_lo: f64, out_hi: f64) -> f64 {
    if (in_hi - in_lo).abs() < f64::EPSILON {
        return out_hi;
    }
    let t = ((value - in_lo) / (in_hi - in_lo)).clamp(0.0, 1.0);
    lerp(out_lo, out_hi, t)
}
