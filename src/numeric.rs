//! Numeric helpers for reward arithmetic.
//!
//! All reward math is done in `f64`. Inputs coming from the presentation
//! layer are sanitised here so the calculators never see NaN, infinities
//! or negative durations.

/// Round to one decimal place.
///
/// Values are non-negative by the time they reach here, so rounding half
/// away from zero matches rounding half up.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::numeric::round_to_tenth;
///
/// assert_eq!(round_to_tenth(6.75), 6.8);
/// assert_eq!(round_to_tenth(22.5), 22.5);
/// ```
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Longest duration a single workout can count for: one full day.
pub const MAX_WORKOUT_MINUTES: f64 = 24.0 * 60.0;

/// Clamp a duration in minutes into `0..=MAX_WORKOUT_MINUTES`.
///
/// NaN and negative values count as zero, anything longer than a day
/// (infinity included) counts as a day.
pub fn sanitize_minutes(minutes: f64) -> f64 {
    if minutes.is_nan() || minutes <= 0.0 {
        0.0
    } else {
        minutes.min(MAX_WORKOUT_MINUTES)
    }
}

/// Clamp a raw intensity into the 1..=5 scale, rounding to the nearest step.
///
/// Non-finite input falls back to the lowest intensity.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::numeric::clamp_intensity;
///
/// assert_eq!(clamp_intensity(2.6), 3);
/// assert_eq!(clamp_intensity(9.0), 5);
/// assert_eq!(clamp_intensity(-1.0), 1);
/// ```
pub fn clamp_intensity(raw: f64) -> u8 {
    if !raw.is_finite() {
        return 1;
    }
    raw.round().clamp(1.0, 5.0) as u8
}
