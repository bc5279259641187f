//! End-to-end demo of the practice loop.
//!
//! Run with: `cargo run --example session`
//!
//! 1. **One exercise per family**: the client view next to the correct
//!    submission, with fixed seeds so the output is reproducible.
//!
//! 2. **Adaptive session**: a simulated learner practices `g3-mul-tables`
//!    until mastery, missing every fourth of the first dozen exercises. The
//!    score, streak and tier are printed after each attempt.
//!
//! Set `LOG_LEVEL=practice_engine=debug` to see store misses and generation
//! logs. `PRACTICE_ENGINE_CONFIG` may name a TOML config file.

use math_drill_gen::practice_engine::models::NumberLineTarget;
use math_drill_gen::{
    client_view, generate, DifficultyTier, EngineConfig, Exercise, NoStore, Payload, Session,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let filter = EnvFilter::try_from_env("LOG_LEVEL")
        .unwrap_or_else(|_| EnvFilter::new("warn,practice_engine=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

/// What a learner who knows the answer would submit.
fn correct_submission(ex: &Exercise) -> String {
    match &ex.payload {
        Payload::Choice(p) => p.correct_option().map(|o| o.content.clone()).unwrap_or_default(),
        Payload::Ordering(p) => json!(p.correct_order).to_string(),
        Payload::BlankFill(p) => {
            let answers: serde_json::Map<String, serde_json::Value> =
                p.blanks.iter().map(|b| (b.id.clone(), json!(b.answer))).collect();
            serde_json::Value::Object(answers).to_string()
        }
        Payload::GridFill(p) => json!(p.expected).to_string(),
        Payload::PointPlot(p) => json!(p.correct_points).to_string(),
        Payload::Categorize(p) => json!(p.correct_mapping).to_string(),
        Payload::NumberLine(p) => match &p.target {
            NumberLineTarget::SingleSelect { value } => json!([value]).to_string(),
            NumberLineTarget::MultiSelect { values } => json!(values).to_string(),
        },
        Payload::FreeText(p) => p.answer.clone(),
    }
}

fn print_exercise(topic: &str, tier: DifficultyTier, seed: u64) {
    let ex = match generate(topic, tier, seed) {
        Ok(ex) => ex,
        Err(e) => {
            println!("  {topic}: {e}");
            return;
        }
    };
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  [{topic}]  {}  {}  ID: {}", ex.variant(), ex.difficulty, ex.id);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("  Q: {}", ex.prompt.text);
    println!("  View:   {}", client_view(&ex));
    println!("  Answer: {}", correct_submission(&ex));
    println!();
}

fn main() {
    init_tracing();

    println!();
    println!("══ One exercise per family ══");
    println!();
    for (topic, tier, seed) in [
        ("nl-find-integer", DifficultyTier::Easy, 1),
        ("nl-select-odd", DifficultyTier::Medium, 2),
        ("g2-even-odd-drag", DifficultyTier::Easy, 3),
        ("g4-mul-steps", DifficultyTier::Hard, 4),
        ("g5-graph-points", DifficultyTier::Hard, 5),
        ("g3-order-decimals", DifficultyTier::Medium, 6),
        ("fib-equation", DifficultyTier::Medium, 7),
        ("g2-add-two-2digit", DifficultyTier::Easy, 8),
        ("g2-mul-word", DifficultyTier::Medium, 9),
        ("g3-mul-properties", DifficultyTier::Hard, 10),
        ("npv-counting-backward", DifficultyTier::Medium, 11),
        ("g5-order-fractions-unlike", DifficultyTier::Easy, 12),
        ("g5-add-decimal", DifficultyTier::Medium, 13),
    ] {
        print_exercise(topic, tier, seed);
    }

    let config = EngineConfig::load_from_env().unwrap_or_default();
    let mut session = Session::with_seed("g3-mul-tables", NoStore, 2024).with_config(config);
    println!("══ Adaptive session: {} (seed {}) ══", session.topic_id(), session.seed());
    println!();
    let mut n = 0u32;
    loop {
        let answer = match session.next_exercise() {
            Ok(attempt) => {
                n += 1;
                if n % 4 == 0 && n <= 12 { "0".to_string() } else { correct_submission(&attempt.exercise) }
            }
            Err(e) => {
                println!("  {e}");
                break;
            }
        };
        match session.submit(&answer) {
            Ok(grade) => println!(
                "  #{n:<3} {:<5}  score {:>3}  streak {:>2}  next {}{}",
                if grade.correct { "ok" } else { "miss" },
                grade.score,
                grade.streak,
                grade.next_tier,
                if grade.challenge_zone { "  (challenge zone)" } else { "" },
            ),
            Err(e) => {
                println!("  {e}");
                break;
            }
        }
    }
    println!();
}
