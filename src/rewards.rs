//! Workout reward calculator.
//!
//! Converts a logged workout into stat gains and EXP:
//!
//! ```text
//! [type, minutes, intensity] → base gain → per-stat gains → EXP
//! ```
//!
//! 1. Intensity is clamped to 1..=5 and mapped to a multiplier.
//! 2. `base = minutes × multiplier × 0.5`
//! 3. Each stat gets `round₁(modifier × base)` using the workout type's
//!    modifier vector.
//! 4. `EXP = round(2 × Σ gains)`. EXP is always derived from stat gains.

use crate::numeric::{clamp_intensity, round_to_tenth, sanitize_minutes};
use crate::stats::{HunterStats, Stat};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Base stat units earned per minute at intensity 1.
const BASE_STAT_PER_MINUTE: f64 = 0.5;

/// EXP earned per point of stat gained.
const EXP_PER_STAT_POINT: f64 = 2.0;

/// Kind of logged workout.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutType {
    Strength,
    Cardio,
    Mobility,
}

impl WorkoutType {
    pub const ALL: [WorkoutType; 3] = [
        WorkoutType::Strength,
        WorkoutType::Cardio,
        WorkoutType::Mobility,
    ];

    /// Weight applied to the base gain for each stat.
    ///
    /// The primary stat is weighted 1.0; every type adds 0.3 to INT.
    pub fn modifiers(self) -> HunterStats {
        match self {
            WorkoutType::Strength => HunterStats::new(1.0, 0.2, 0.1, 0.3),
            WorkoutType::Cardio => HunterStats::new(0.1, 1.0, 0.2, 0.3),
            WorkoutType::Mobility => HunterStats::new(0.1, 0.2, 1.0, 0.3),
        }
    }

    /// The stat this workout type mainly trains.
    pub fn primary_stat(self) -> Stat {
        match self {
            WorkoutType::Strength => Stat::Str,
            WorkoutType::Cardio => Stat::Vit,
            WorkoutType::Mobility => Stat::Dex,
        }
    }
}

impl fmt::Display for WorkoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WorkoutType::Strength => "strength",
            WorkoutType::Cardio => "cardio",
            WorkoutType::Mobility => "mobility",
        };
        write!(f, "{name}")
    }
}

/// Multiplier for a clamped intensity step.
pub fn intensity_multiplier(intensity: u8) -> f64 {
    match intensity {
        0 | 1 => 0.5,
        2 => 1.0,
        3 => 1.5,
        4 => 2.0,
        _ => 2.5,
    }
}

/// Stat gains and EXP produced by one workout, with the intermediate
/// values that produced them.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::rewards::{compute_rewards, WorkoutType};
///
/// let rewards = compute_rewards(WorkoutType::Cardio, 20.0, 2.0);
/// assert_eq!(rewards.base_gain, 10.0);
/// assert_eq!(rewards.stat_gains.vit, 10.0);
/// assert_eq!(rewards.exp_gained, 32); // (1 + 10 + 2 + 3) × 2
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutRewards {
    /// Per-stat gains, rounded to one decimal.
    pub stat_gains: HunterStats,

    /// EXP derived from the stat gains.
    pub exp_gained: u64,

    /// Intensity after clamping to 1..=5.
    pub intensity: u8,

    /// `minutes × intensity multiplier × 0.5`, before type modifiers.
    pub base_gain: f64,
}

/// Stat gains for a workout, before EXP is derived.
pub fn stat_gains(workout_type: WorkoutType, minutes: f64, intensity: f64) -> (HunterStats, u8, f64) {
    let intensity = clamp_intensity(intensity);
    let base_gain = sanitize_minutes(minutes) * intensity_multiplier(intensity) * BASE_STAT_PER_MINUTE;
    let gains = workout_type
        .modifiers()
        .map(|modifier| round_to_tenth(modifier * base_gain));
    (gains, intensity, base_gain)
}

/// EXP earned for a set of stat gains: `round(2 × Σ gains)`.
pub fn exp_from_stats(gains: &HunterStats) -> u64 {
    let exp = (gains.total() * EXP_PER_STAT_POINT).round();
    if exp.is_finite() && exp > 0.0 {
        exp as u64
    } else {
        0
    }
}

/// Compute the full rewards for a workout.
///
/// Never fails: negative or NaN durations count as zero minutes, durations
/// are capped at one day and intensity is clamped into range.
pub fn compute_rewards(workout_type: WorkoutType, minutes: f64, intensity: f64) -> WorkoutRewards {
    let (stat_gains, intensity, base_gain) = stat_gains(workout_type, minutes, intensity);
    let exp_gained = exp_from_stats(&stat_gains);

    tracing::debug!(
        %workout_type,
        minutes,
        intensity,
        base_gain,
        exp_gained,
        "computed workout rewards"
    );

    WorkoutRewards {
        stat_gains,
        exp_gained,
        intensity,
        base_gain,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_strength_thirty_minutes_vigorous() {
        let rewards = compute_rewards(WorkoutType::Strength, 30.0, 3.0);
        assert!(approx(rewards.base_gain, 22.5));
        assert!(approx(rewards.stat_gains.str, 22.5));
        assert!(approx(rewards.stat_gains.vit, 4.5));
        assert!(approx(rewards.stat_gains.dex, 2.3));
        assert!(approx(rewards.stat_gains.int, 6.8));
        assert_eq!(rewards.exp_gained, 72);
    }

    #[test]
    fn test_mobility_favours_dex() {
        let rewards = compute_rewards(WorkoutType::Mobility, 10.0, 1.0);
        // 10 × 0.5 × 0.5 = 2.5 base
        assert!(approx(rewards.stat_gains.dex, 2.5));
        assert!(rewards.stat_gains.dex > rewards.stat_gains.str);
        assert!(rewards.stat_gains.dex > rewards.stat_gains.vit);
    }

    #[test]
    fn test_zero_and_negative_duration() {
        for minutes in [0.0, -30.0, f64::NAN] {
            let rewards = compute_rewards(WorkoutType::Cardio, minutes, 3.0);
            assert_eq!(rewards.stat_gains, HunterStats::default());
            assert_eq!(rewards.exp_gained, 0);
        }
    }

    #[test]
    fn test_huge_duration_counts_as_one_day() {
        let huge = compute_rewards(WorkoutType::Strength, 1e308, 5.0);
        let day = compute_rewards(WorkoutType::Strength, 1440.0, 5.0);
        assert_eq!(huge, day);
        assert!(huge.stat_gains.iter().all(|(_, value)| value.is_finite()));
        // 1440 × 2.5 × 0.5 = 1800 base, (1800 + 360 + 180 + 540) × 2
        assert_eq!(day.exp_gained, 5760);
    }

    #[test]
    fn test_intensity_out_of_range_is_clamped() {
        let high = compute_rewards(WorkoutType::Strength, 10.0, 12.0);
        let max = compute_rewards(WorkoutType::Strength, 10.0, 5.0);
        assert_eq!(high, max);

        let low = compute_rewards(WorkoutType::Strength, 10.0, -3.0);
        assert_eq!(low.intensity, 1);
    }

    #[test]
    fn test_primary_stat_has_full_weight() {
        for workout_type in WorkoutType::ALL {
            let modifiers = workout_type.modifiers();
            assert_eq!(modifiers.get(workout_type.primary_stat()), 1.0);
            assert_eq!(modifiers.int, 0.3);
        }
    }
}
