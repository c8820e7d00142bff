//! Change-log events and presentation notifications.
//!
//! Every engine mutator returns the `Event`s it produced. The engine never
//! talks to a UI; callers turn events into `Notification`s (or ignore
//! them) as they see fit.

use crate::calc::Rank;
use crate::stats::HunterStats;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Something that happened during a mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum Event {
    /// A new hunter was created.
    HunterCreated { id: String, name: String },

    /// Onboarding finished; the hunter is active.
    OnboardingCompleted,

    /// EXP was awarded. `applied` is what remained after penalties.
    ExpGained {
        requested: u64,
        penalty: u64,
        applied: u64,
    },

    /// The hunter reached a new level.
    LevelUp {
        from: u32,
        to: u32,
        stat_bonus: HunterStats,
    },

    /// The hunter's rank changed.
    RankUp { from: Rank, to: Rank },

    /// The streak was recomputed.
    StreakUpdated { streak: u32 },

    /// A workout was recorded.
    WorkoutLogged { id: String, exp_gained: u64 },

    /// A daily quest was completed.
    QuestCompleted {
        id: String,
        title: String,
        exp_reward: u64,
    },

    /// Every daily quest for the day is now complete.
    DailyQuestsCleared,

    /// The daily quest set was replaced.
    DailyQuestsReset { count: usize },

    /// A penalty quest was issued.
    PenaltyIssued {
        id: String,
        missed_days: u32,
        exp_penalty: u64,
    },

    /// A penalty quest was completed, lifting its penalty.
    PenaltyCleared { id: String },

    /// A dungeon was cleared.
    DungeonCleared {
        id: String,
        name: String,
        exp_reward: u64,
    },

    /// A catalog exercise was completed.
    ExerciseCompleted {
        id: String,
        name: String,
        exp_reward: u64,
    },

    /// An achievement unlocked.
    AchievementUnlocked { title: String },
}

/// How a notification should be presented.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NotificationKind {
    Exp,
    LevelUp,
    Achievement,
    Quest,
    Info,
    Warning,
}

/// A user-facing message derived from an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub kind: NotificationKind,
    pub timestamp: NaiveDateTime,
}

impl Event {
    /// Message for the presentation layer, if the event deserves one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chrono::NaiveDate;
    /// use shadow_regimen::events::{Event, NotificationKind};
    ///
    /// let now = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    /// let event = Event::AchievementUnlocked { title: "Awakened".into() };
    /// let note = event.notification(now).unwrap();
    ///
    /// assert_eq!(note.kind, NotificationKind::Achievement);
    /// assert!(note.message.contains("Awakened"));
    /// ```
    pub fn notification(&self, now: NaiveDateTime) -> Option<Notification> {
        let (message, kind) = match self {
            Event::HunterCreated { name, .. } => {
                (format!("Player registered: {name}"), NotificationKind::Info)
            }
            Event::OnboardingCompleted => {
                ("Awakening complete. The System recognizes you.".to_string(), NotificationKind::Info)
            }
            Event::ExpGained { applied, penalty, .. } if *penalty > 0 => (
                format!("+{applied} EXP ({penalty} withheld by penalty)"),
                NotificationKind::Warning,
            ),
            Event::ExpGained { applied, .. } => (format!("+{applied} EXP"), NotificationKind::Exp),
            Event::LevelUp { to, .. } => (format!("Level up! You are now level {to}"), NotificationKind::LevelUp),
            Event::RankUp { to, .. } => (format!("Rank up! You are now {to}-Rank"), NotificationKind::LevelUp),
            Event::QuestCompleted { title, .. } => {
                (format!("Quest Complete: {title}"), NotificationKind::Quest)
            }
            Event::DailyQuestsCleared => {
                ("All daily quests complete".to_string(), NotificationKind::Quest)
            }
            Event::PenaltyIssued { missed_days, exp_penalty, .. } => (
                format!("Penalty quest issued: {missed_days} missed day(s), -{exp_penalty} EXP per award"),
                NotificationKind::Warning,
            ),
            Event::PenaltyCleared { .. } => {
                ("Penalty lifted. Normal EXP gains restored.".to_string(), NotificationKind::Info)
            }
            Event::DungeonCleared { name, .. } => {
                (format!("Dungeon cleared: {name}"), NotificationKind::Quest)
            }
            Event::ExerciseCompleted { name, exp_reward, .. } => {
                (format!("Completed: {name}! +{exp_reward} EXP"), NotificationKind::Exp)
            }
            Event::AchievementUnlocked { title } => {
                (format!("Achievement unlocked: {title}"), NotificationKind::Achievement)
            }
            Event::WorkoutLogged { .. }
            | Event::StreakUpdated { .. }
            | Event::DailyQuestsReset { .. } => return None,
        };

        Some(Notification {
            message,
            kind,
            timestamp: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_penalised_exp_is_a_warning() {
        let event = Event::ExpGained {
            requested: 50,
            penalty: 20,
            applied: 30,
        };
        let note = event.notification(now()).unwrap();
        assert_eq!(note.kind, NotificationKind::Warning);
        assert!(note.message.starts_with("+30 EXP"));
    }

    #[test]
    fn test_plain_exp() {
        let event = Event::ExpGained {
            requested: 50,
            penalty: 0,
            applied: 50,
        };
        assert_eq!(event.notification(now()).unwrap().kind, NotificationKind::Exp);
    }

    #[test]
    fn test_silent_events() {
        assert!(Event::StreakUpdated { streak: 3 }.notification(now()).is_none());
    }

    #[test]
    fn test_event_serialization_tag() {
        let value = serde_json::to_value(Event::DailyQuestsCleared).unwrap();
        assert_eq!(value["event"], "daily_quests_cleared");
    }
}
