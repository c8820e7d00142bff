//! Engine configuration.
//!
//! `ProgressionConfig` holds the few knobs the engine exposes. Every field
//! has a default, so a partial JSON document is enough to override one.

use crate::error::RegimenError;
use serde::{Deserialize, Serialize};

/// How level-up stat bonuses are granted when one EXP award crosses
/// several levels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LevelUpStatPolicy {
    /// Grant `stat_increase_on_level_up(L)` for every level `L` reached.
    #[default]
    PerLevel,
    /// Grant `stat_increase_on_level_up(final level)` once per award.
    FinalLevelOnce,
}

/// Engine configuration.
///
/// # Examples
///
/// ```rust
/// use shadow_regimen::config::{LevelUpStatPolicy, ProgressionConfig};
///
/// let config = ProgressionConfig::from_json(r#"{ "level_up_stats": "final_level_once" }"#).unwrap();
/// assert_eq!(config.level_up_stats, LevelUpStatPolicy::FinalLevelOnce);
/// assert_eq!(config.initial_stat, 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProgressionConfig {
    /// Starting value for every stat of a new hunter.
    pub initial_stat: f64,

    /// Name given to a hunter created without one.
    pub default_name: String,

    /// Stat bonus policy for multi-level jumps.
    pub level_up_stats: LevelUpStatPolicy,
}

impl Default for ProgressionConfig {
    fn default() -> Self {
        Self {
            initial_stat: 10.0,
            default_name: "Hunter".to_string(),
            level_up_stats: LevelUpStatPolicy::default(),
        }
    }
}

impl ProgressionConfig {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self, RegimenError> {
        let config: ProgressionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that every value is usable.
    pub fn validate(&self) -> Result<(), RegimenError> {
        if !self.initial_stat.is_finite() || self.initial_stat < 0.0 {
            return Err(RegimenError::InvalidConfig(format!(
                "initial_stat must be a non-negative number, got {}",
                self.initial_stat
            )));
        }
        if self.default_name.trim().is_empty() {
            return Err(RegimenError::InvalidConfig(
                "default_name must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
