//! Level, EXP and rank arithmetic.
//!
//! Pure functions that every progression step is built from:
//!
//! ```text
//! level → EXP to next level   (level² × 100)
//! level → rank                (E < D < C < B < A < S)
//! level → level-up stat bonus (2 + ⌊level / 5⌋ on every stat)
//! ```

use crate::stats::HunterStats;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Flat stat bonus granted on every level-up.
const BASE_LEVEL_UP_INCREASE: u32 = 2;

/// Coarse progression tier derived from level.
///
/// Variants are declared in ascending order so the derived `Ord` gives
/// `E < D < C < B < A < S`.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::Rank;
///
/// assert!(Rank::E < Rank::S);
/// assert_eq!(Rank::for_level(15), Rank::C);
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    E,
    D,
    C,
    B,
    A,
    S,
}

impl Rank {
    /// Minimum level for each rank, checked from the top down.
    const THRESHOLDS: [(u32, Rank); 5] = [
        (50, Rank::S),
        (35, Rank::A),
        (25, Rank::B),
        (15, Rank::C),
        (5, Rank::D),
    ];

    /// Rank held at `level`. Anything below the D threshold is E.
    pub fn for_level(level: u32) -> Rank {
        Self::THRESHOLDS
            .iter()
            .find(|(min_level, _)| level >= *min_level)
            .map(|(_, rank)| *rank)
            .unwrap_or(Rank::E)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Rank::E => "E",
            Rank::D => "D",
            Rank::C => "C",
            Rank::B => "B",
            Rank::A => "A",
            Rank::S => "S",
        };
        write!(f, "{letter}")
    }
}

/// EXP needed to advance from `level` to the next one.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::calc::exp_for_level;
///
/// assert_eq!(exp_for_level(1), 100);
/// assert_eq!(exp_for_level(3), 900);
/// ```
pub fn exp_for_level(level: u32) -> u64 {
    let level = u64::from(level);
    level * level * 100
}

/// Cumulative EXP spent to climb from level 1 up to `target_level`.
pub fn total_exp_for_level(target_level: u32) -> u64 {
    (1..target_level).map(exp_for_level).sum()
}

/// Rank held at `level`.
pub fn rank_for_level(level: u32) -> Rank {
    Rank::for_level(level)
}

/// Stat bonus granted on reaching `new_level`, identical across all stats.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::calc::stat_increase_on_level_up;
///
/// assert_eq!(stat_increase_on_level_up(2).str, 2.0);
/// assert_eq!(stat_increase_on_level_up(10).int, 4.0);
/// ```
pub fn stat_increase_on_level_up(new_level: u32) -> HunterStats {
    HunterStats::uniform(f64::from(BASE_LEVEL_UP_INCREASE + new_level / 5))
}
