//! Quadratic damage function.

/// Damage fraction per squared degree of change (DICE-style).
pub const DAMAGE_COEFFICIENT: f64 = 0.00236;

/// Economic damage fraction for a mean change. NaN stays NaN.
#[inline]
pub fn damage(mean_change: f64) -> f64 {
    DAMAGE_COEFFICIENT * mean_change * mean_change
}
