//! Rounding helpers shared by the dilution policies.
//!
//! All reported figures use round-half-away-from-zero at 2 decimal places
//! (`f64::round` semantics). Ties are judged on the binary value, so
//! `3.845` (stored as 3.84499...) rounds to `3.84`.

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Clamps negative volumes (and `-0.0`) to exactly `0.0`.
pub fn non_negative(value: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        0.0
    }
}
