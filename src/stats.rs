//! Hunter stat module.
//!
//! Provides the `Stat` identifier and the `HunterStats` vector holding
//! one value per stat. Stats only ever grow: there is no decrease path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

/// One of the four hunter stats.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::Stat;
///
/// let str_stat: Stat = "STR".parse().unwrap();
/// assert_eq!(str_stat, Stat::Str);
/// assert_eq!(Stat::Vit.as_str(), "vit");
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stat {
    /// Strength, grown mostly by strength training.
    Str,
    /// Vitality, grown mostly by cardio.
    Vit,
    /// Dexterity, grown mostly by mobility work.
    Dex,
    /// Intelligence, grown a little by every workout.
    Int,
}

impl Stat {
    /// All stats in display order.
    pub const ALL: [Stat; 4] = [Stat::Str, Stat::Vit, Stat::Dex, Stat::Int];

    /// Lower-case short name, as used in persisted snapshots.
    pub fn as_str(self) -> &'static str {
        match self {
            Stat::Str => "str",
            Stat::Vit => "vit",
            Stat::Dex => "dex",
            Stat::Int => "int",
        }
    }
}

impl fmt::Display for Stat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

impl FromStr for Stat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "str" => Ok(Stat::Str),
            "vit" => Ok(Stat::Vit),
            "dex" => Ok(Stat::Dex),
            "int" => Ok(Stat::Int),
            other => Err(format!("unknown stat: {other}")),
        }
    }
}

/// A value for each of the four stats.
///
/// Used both for a hunter's current stats and for stat deltas (workout
/// gains, level-up bonuses).
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::{HunterStats, Stat};
///
/// let mut stats = HunterStats::uniform(10.0);
/// stats += HunterStats::new(2.0, 0.5, 0.0, 1.0);
///
/// assert_eq!(stats.get(Stat::Str), 12.0);
/// assert_eq!(stats.total(), 43.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HunterStats {
    pub str: f64,
    pub vit: f64,
    pub dex: f64,
    pub int: f64,
}

impl HunterStats {
    pub fn new(str: f64, vit: f64, dex: f64, int: f64) -> Self {
        Self { str, vit, dex, int }
    }

    /// Same value for every stat.
    pub fn uniform(value: f64) -> Self {
        Self::new(value, value, value, value)
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Str => self.str,
            Stat::Vit => self.vit,
            Stat::Dex => self.dex,
            Stat::Int => self.int,
        }
    }

    pub fn set(&mut self, stat: Stat, value: f64) {
        match stat {
            Stat::Str => self.str = value,
            Stat::Vit => self.vit = value,
            Stat::Dex => self.dex = value,
            Stat::Int => self.int = value,
        }
    }

    /// Apply `f` to every stat value.
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.str), f(self.vit), f(self.dex), f(self.int))
    }

    /// Sum of all four stats.
    pub fn total(&self) -> f64 {
        self.str + self.vit + self.dex + self.int
    }

    /// Smallest of the four stats.
    pub fn min(&self) -> f64 {
        self.str.min(self.vit).min(self.dex).min(self.int)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Stat, f64)> + '_ {
        Stat::ALL.into_iter().map(move |stat| (stat, self.get(stat)))
    }
}

impl Add for HunterStats {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.str + other.str,
            self.vit + other.vit,
            self.dex + other.dex,
            self.int + other.int,
        )
    }
}

impl AddAssign for HunterStats {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stat_parse() {
        assert_eq!("dex".parse::<Stat>(), Ok(Stat::Dex));
        assert_eq!("INT".parse::<Stat>(), Ok(Stat::Int));
        assert!("luck".parse::<Stat>().is_err());
    }

    #[test]
    fn test_stat_display() {
        assert_eq!(Stat::Str.to_string(), "STR");
    }

    #[test]
    fn test_stats_get_set() {
        let mut stats = HunterStats::default();
        for (i, stat) in Stat::ALL.into_iter().enumerate() {
            stats.set(stat, i as f64);
        }
        assert_eq!(stats.get(Stat::Str), 0.0);
        assert_eq!(stats.get(Stat::Int), 3.0);
        assert_eq!(stats.min(), 0.0);
    }

    #[test]
    fn test_stats_serialize_lowercase_keys() {
        let json = serde_json::to_string(&HunterStats::uniform(1.0)).unwrap();
        assert_eq!(json, r#"{"str":1.0,"vit":1.0,"dex":1.0,"int":1.0}"#);
    }
}
