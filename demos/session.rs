//! A simulated week of training, persisted to a scratch directory.
//!
//! Run with `RUST_LOG=debug cargo run --example session` to see the
//! engine's own logging.

use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shadow_regimen::clock::{Clock, ManualClock};
use shadow_regimen::rewards::WorkoutType;
use shadow_regimen::*;

fn report(engine: &ProgressionEngine<ManualClock, ChaCha8Rng>, events: Vec<Event>) {
    let now = engine.clock().now();
    for note in events.iter().filter_map(|e| e.notification(now)) {
        println!("  [{:?}] {}", note.kind, note.message);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ProgressionConfig::from_json(r#"{ "default_name": "Hunter" }"#)?;
    let dir = tempfile::tempdir()?;
    let start = NaiveDate::from_ymd_opt(2024, 6, 3)
        .and_then(|d| d.and_hms_opt(7, 0, 0))
        .ok_or("invalid start date")?;

    let mut engine = ProgressionEngine::restore(
        PersistenceAdapter::new(FileStore::new(dir.path())),
        config.clone(),
        ManualClock::new(start),
        ChaCha8Rng::seed_from_u64(2024),
    );

    println!("Day 1");
    let events = engine.initialize_hunter(Some("Jinwoo"));
    report(&engine, events);
    let events = engine.complete_onboarding("Jinwoo", FitnessGoal::Balanced, DifficultyPreference::Normal);
    report(&engine, events);
    engine.set_has_booted(true);

    let quests: Vec<String> = engine
        .hunter()
        .map(|h| h.daily_quests.iter().map(|q| q.id.clone()).collect())
        .unwrap_or_default();
    for id in &quests {
        let events = engine.complete_quest(id);
        report(&engine, events);
    }
    let events = engine.log_workout(WorkoutType::Strength, 30.0, 3.0, Some("push day"));
    report(&engine, events);

    for day in 2..=7 {
        engine.clock_mut().advance_days(1);
        println!("Day {day}");

        // Skipping day 4 earns a penalty on day 5.
        if day == 4 {
            continue;
        }
        let events = engine.initialize_hunter(None);
        report(&engine, events);

        if let Some(penalty) = engine.hunter().and_then(|h| h.penalty_quests.iter().find(|p| !p.completed)) {
            println!("  penalty task: {}", penalty.mandatory_task);
        }

        let workout = WorkoutType::ALL[day % WorkoutType::ALL.len()];
        let events = engine.log_workout(workout, 25.0, 4.0, None);
        report(&engine, events);

        if let Some(penalty_id) = engine
            .hunter()
            .and_then(|h| h.penalty_quests.iter().find(|p| !p.completed))
            .map(|p| p.id.clone())
        {
            let events = engine.complete_penalty_quest(&penalty_id);
            report(&engine, events);
        }

        if let Some(exercise) = engine.recommend_exercise() {
            let events = engine.complete_exercise(exercise.id);
            report(&engine, events);
        }
    }

    if let Some(dungeon_id) = engine.available_dungeons().first().map(|d| d.id.clone()) {
        println!("Dungeon");
        let events = engine.complete_dungeon(&dungeon_id);
        report(&engine, events);
    }

    // Reload from disk to show the state round-trips.
    let reloaded = ProgressionEngine::restore(
        PersistenceAdapter::new(FileStore::new(dir.path())),
        config,
        ManualClock::new(engine.clock().now()),
        ChaCha8Rng::seed_from_u64(1),
    );

    if let Some(hunter) = reloaded.hunter() {
        println!();
        println!("{} ({}) - Level {} {}-Rank", hunter.name, hunter.id, hunter.level, hunter.rank);
        println!("  EXP {}/{}", hunter.exp, hunter.exp_to_next_level);
        for (stat, value) in hunter.stats.iter() {
            println!("  {stat}: {value:.1}");
        }
        println!("  streak {} | workouts {} | minutes {}", hunter.streak, hunter.total_workouts, hunter.total_minutes);
        println!("  achievements: {}", hunter.achievements.len());
    }

    Ok(())
}
