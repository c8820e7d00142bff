//! Missed-quest detection and penalty quests.
//!
//! A penalty quest is an accountability task issued when the hunter let a
//! day pass with daily quests left open. While it stays incomplete its
//! `exp_penalty` is subtracted from every EXP award.

use crate::clock::days_between;
use crate::ids::record_id;
use crate::quest::DailyQuest;
use chrono::{NaiveDate, NaiveDateTime};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// EXP penalty per missed day.
pub const PENALTY_PER_MISSED_DAY: u64 = 10;

/// Upper bound on a single penalty.
pub const MAX_EXP_PENALTY: u64 = 50;

/// Remedial tasks a penalty quest may demand.
pub const MANDATORY_TASKS: &[&str] = &[
    "Complete 20 push-ups",
    "Complete 30 bodyweight squats",
    "Hold plank for 1 minute",
    "Complete 10 burpees",
    "Do 5 minutes of stretching",
    "Complete 15 jumping jacks",
];

/// An accountability task that reduces EXP gains until completed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PenaltyQuest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub mandatory_task: String,
    pub missed_days: u32,
    pub exp_penalty: u64,
    pub created_at: NaiveDateTime,
    pub completed: bool,
}

impl PenaltyQuest {
    /// Penalty currently being applied to EXP awards.
    pub fn active_penalty(&self) -> u64 {
        if self.completed {
            0
        } else {
            self.exp_penalty
        }
    }
}

/// Penalty for `missed_days`: `min(missed_days × 10, 50)`.
pub fn exp_penalty_for(missed_days: u32) -> u64 {
    (u64::from(missed_days) * PENALTY_PER_MISSED_DAY).min(MAX_EXP_PENALTY)
}

/// Number of days the hunter has missed, or 0 when no penalty is due.
///
/// Without any recorded activity there is nothing to judge. Otherwise
/// the result is the number of calendar days since the last activity,
/// provided at least one day passed and some current daily quest is
/// still incomplete.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use shadow_regimen::penalty::check_for_missed_quests;
///
/// let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
/// assert_eq!(check_for_missed_quests(None, &[], today), 0);
/// ```
pub fn check_for_missed_quests(
    last_activity: Option<NaiveDate>,
    daily_quests: &[DailyQuest],
    today: NaiveDate,
) -> u32 {
    let Some(last_activity) = last_activity else {
        return 0;
    };

    let days = days_between(last_activity, today);
    let has_incomplete = daily_quests.iter().any(|q| !q.completed);

    if days >= 1 && has_incomplete {
        u32::try_from(days).unwrap_or(u32::MAX)
    } else {
        0
    }
}

/// Create a penalty quest for `missed_days`, picking its task at random.
pub fn generate_penalty_quest<R: Rng + ?Sized>(
    missed_days: u32,
    now: NaiveDateTime,
    rng: &mut R,
) -> PenaltyQuest {
    let task = MANDATORY_TASKS.choose(rng).copied().unwrap_or(MANDATORY_TASKS[0]);
    let plural = if missed_days == 1 { "" } else { "s" };

    PenaltyQuest {
        id: record_id("penalty", rng),
        title: "Accountability Quest".to_string(),
        description: format!(
            "You missed {missed_days} day{plural} of quests. Complete this task to restore normal EXP gains."
        ),
        mandatory_task: task.to_string(),
        missed_days,
        exp_penalty: exp_penalty_for(missed_days),
        created_at: now,
        completed: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quest::generate_daily_quests;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    fn quests() -> Vec<DailyQuest> {
        let now = day(1).and_hms_opt(9, 0, 0).unwrap();
        generate_daily_quests(now, &mut ChaCha8Rng::seed_from_u64(1))
    }

    #[test]
    fn test_no_history_no_penalty() {
        assert_eq!(check_for_missed_quests(None, &quests(), day(20)), 0);
    }

    #[test]
    fn test_same_day_no_penalty() {
        assert_eq!(check_for_missed_quests(Some(day(3)), &quests(), day(3)), 0);
    }

    #[test]
    fn test_missed_days_counted() {
        assert_eq!(check_for_missed_quests(Some(day(3)), &quests(), day(4)), 1);
        assert_eq!(check_for_missed_quests(Some(day(3)), &quests(), day(8)), 5);
    }

    #[test]
    fn test_all_complete_no_penalty() {
        let mut quests = quests();
        quests.iter_mut().for_each(|q| q.completed = true);
        assert_eq!(check_for_missed_quests(Some(day(1)), &quests, day(9)), 0);
    }

    #[test]
    fn test_penalty_cap() {
        assert_eq!(exp_penalty_for(0), 0);
        assert_eq!(exp_penalty_for(1), 10);
        assert_eq!(exp_penalty_for(5), 50);
        assert_eq!(exp_penalty_for(30), 50);
    }

    #[test]
    fn test_generated_penalty() {
        let now = day(2).and_hms_opt(8, 0, 0).unwrap();
        let quest = generate_penalty_quest(2, now, &mut ChaCha8Rng::seed_from_u64(4));
        assert_eq!(quest.exp_penalty, 20);
        assert!(quest.description.contains("2 days"));
        assert!(MANDATORY_TASKS.contains(&quest.mandatory_task.as_str()));
        assert!(!quest.completed);
        assert_eq!(quest.active_penalty(), 20);
    }

    #[test]
    fn test_singular_description() {
        let now = day(2).and_hms_opt(8, 0, 0).unwrap();
        let quest = generate_penalty_quest(1, now, &mut ChaCha8Rng::seed_from_u64(4));
        assert!(quest.description.contains("1 day of"));
    }
}
