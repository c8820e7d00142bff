//! Daily quest templates and generator.
//!
//! A day's quest set always covers every `QuestCategory` once, then fills
//! up to a random total of four to six quests from the whole pool.

use crate::ids::record_id;
use chrono::NaiveDateTime;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fewest quests generated for a day.
pub const MIN_DAILY_QUESTS: usize = 4;

/// Most quests generated for a day.
pub const MAX_DAILY_QUESTS: usize = 6;

/// Category a daily quest belongs to.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestCategory {
    Strength,
    Cardio,
    Mobility,
    Consistency,
}

impl QuestCategory {
    /// Categories every daily set must cover.
    pub const REQUIRED: [QuestCategory; 4] = [
        QuestCategory::Strength,
        QuestCategory::Cardio,
        QuestCategory::Mobility,
        QuestCategory::Consistency,
    ];
}

/// Static text and reward for one quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestTemplate {
    pub category: QuestCategory,
    pub title: &'static str,
    pub description: &'static str,
    pub exp_reward: u64,
}

const fn template(
    category: QuestCategory,
    title: &'static str,
    description: &'static str,
    exp_reward: u64,
) -> QuestTemplate {
    QuestTemplate {
        category,
        title,
        description,
        exp_reward,
    }
}

/// The full quest pool.
pub const QUEST_TEMPLATES: &[QuestTemplate] = &[
    template(QuestCategory::Strength, "Iron Will", "Complete 3 sets of push-ups", 50),
    template(QuestCategory::Strength, "Mountain Breaker", "Perform 50 squats", 60),
    template(QuestCategory::Strength, "Steel Grip", "Hold plank for 2 minutes", 70),
    template(QuestCategory::Strength, "Titan's Resolve", "Complete 100 push-ups total", 100),
    template(QuestCategory::Cardio, "Wind Runner", "Run for 20 minutes", 80),
    template(QuestCategory::Cardio, "Endurance Trial", "Complete 30 minutes of cardio", 100),
    template(QuestCategory::Cardio, "Speed Demon", "Sprint intervals: 5 sets", 90),
    template(QuestCategory::Cardio, "Marathon Mindset", "Walk 10,000 steps", 70),
    template(
        QuestCategory::Mobility,
        "Flexibility Master",
        "Complete 15-minute stretching session",
        40,
    ),
    template(QuestCategory::Mobility, "Yoga Flow", "Practice yoga for 20 minutes", 50),
    template(QuestCategory::Mobility, "Range of Motion", "Full body mobility routine", 60),
    template(QuestCategory::Consistency, "Daily Ritual", "Log any workout today", 30),
    template(
        QuestCategory::Consistency,
        "Hunter's Discipline",
        "Complete 3 different quest types",
        150,
    ),
    template(
        QuestCategory::Consistency,
        "System Sync",
        "Check in for 3 consecutive days",
        200,
    ),
];

/// Templates belonging to `category`.
pub fn templates_for(category: QuestCategory) -> impl Iterator<Item = &'static QuestTemplate> {
    QUEST_TEMPLATES.iter().filter(move |t| t.category == category)
}

/// A quest issued for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyQuest {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: QuestCategory,
    pub exp_reward: u64,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl DailyQuest {
    /// Instantiate `template` as a fresh, incomplete quest.
    pub fn from_template<R: Rng + ?Sized>(
        template: &QuestTemplate,
        now: NaiveDateTime,
        rng: &mut R,
    ) -> Self {
        Self {
            id: record_id("quest", rng),
            title: template.title.to_string(),
            description: template.description.to_string(),
            category: template.category,
            exp_reward: template.exp_reward,
            completed: false,
            created_at: now,
        }
    }
}

/// Generate a fresh set of four to six daily quests.
///
/// The first four quests cover `QuestCategory::REQUIRED` in order, each
/// drawn uniformly from its category. Remaining slots are drawn uniformly
/// from the whole pool, so categories may repeat.
///
/// # Examples
///
/// ```rust
/// use chrono::NaiveDate;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
/// use shadow_regimen::quest::generate_daily_quests;
///
/// let now = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap().and_hms_opt(7, 0, 0).unwrap();
/// let quests = generate_daily_quests(now, &mut ChaCha8Rng::seed_from_u64(42));
///
/// assert!((4..=6).contains(&quests.len()));
/// assert!(quests.iter().all(|q| !q.completed && q.created_at == now));
/// ```
pub fn generate_daily_quests<R: Rng + ?Sized>(now: NaiveDateTime, rng: &mut R) -> Vec<DailyQuest> {
    let count = rng.gen_range(MIN_DAILY_QUESTS..=MAX_DAILY_QUESTS);
    let mut quests = Vec::with_capacity(count);

    for category in QuestCategory::REQUIRED {
        let pool: Vec<&QuestTemplate> = templates_for(category).collect();
        if let Some(template) = pool.choose(rng) {
            quests.push(DailyQuest::from_template(template, now, rng));
        }
    }

    while quests.len() < count {
        match QUEST_TEMPLATES.choose(rng) {
            Some(template) => quests.push(DailyQuest::from_template(template, now, rng)),
            None => break,
        }
    }

    quests
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn morning() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(7, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_every_category_has_templates() {
        for category in QuestCategory::REQUIRED {
            assert!(templates_for(category).count() >= 3);
        }
    }

    #[test]
    fn test_required_categories_come_first() {
        for seed in 0..50 {
            let quests = generate_daily_quests(morning(), &mut ChaCha8Rng::seed_from_u64(seed));
            let leading: Vec<QuestCategory> = quests.iter().take(4).map(|q| q.category).collect();
            assert_eq!(leading, QuestCategory::REQUIRED.to_vec());
        }
    }

    #[test]
    fn test_count_covers_full_range() {
        let mut seen = std::collections::HashSet::new();
        for seed in 0..200 {
            let quests = generate_daily_quests(morning(), &mut ChaCha8Rng::seed_from_u64(seed));
            assert!((MIN_DAILY_QUESTS..=MAX_DAILY_QUESTS).contains(&quests.len()));
            seen.insert(quests.len());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = generate_daily_quests(morning(), &mut ChaCha8Rng::seed_from_u64(9));
        let b = generate_daily_quests(morning(), &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn test_ids_are_unique() {
        let quests = generate_daily_quests(morning(), &mut ChaCha8Rng::seed_from_u64(5));
        let ids: std::collections::HashSet<&str> = quests.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), quests.len());
    }
}
