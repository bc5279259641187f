//! Cross-module tests for the `math_drill_gen` crate.
//!
//! Included from `lib.rs` under `#[cfg(test)]`.
//!
//! | Group | What is tested |
//! |-------|----------------|
//! | Determinism | Same (topic, tier, seed) → byte-identical JSON; different seeds → different ids |
//! | Self-consistency | The ground truth of every topic at every tier validates |
//! | Exchange format | JSON round-trip is lossless; `variant` tag and flat fields |
//! | Negatives | Reversed ordering, one wrong blank, number-line omission |
//! | Window | `nl-find-integer` target strictly inside the window |
//! | Client view | No ground truth in the rendered JSON |

use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::practice_engine::{
    client_view, default_registry, generate, validate, DifficultyTier, EngineError, Exercise,
    Payload, Variant,
};
use crate::practice_engine::models::NumberLineTarget;

// ── helpers ──────────────────────────────────────────────────────────────────

/// Five seeds that span different RNG states.
const SEEDS: [u64; 5] = [1, 42, 999, 0xDEAD_BEEF, 7];

/// Every topic id in the standard table, aliases included.
fn all_topics() -> Vec<&'static str> {
    default_registry().topics().collect()
}

fn each_exercise(mut f: impl FnMut(&str, DifficultyTier, u64, Exercise)) {
    for topic in all_topics() {
        for tier in DifficultyTier::ALL {
            for seed in SEEDS {
                let ex = generate(topic, tier, seed)
                    .unwrap_or_else(|e| panic!("{topic} {tier} seed {seed}: {e}"));
                f(topic, tier, seed, ex);
            }
        }
    }
}

/// The submission a learner would send when answering correctly.
fn correct_submission(ex: &Exercise) -> String {
    match &ex.payload {
        Payload::Choice(p) => p.correct_option().unwrap().content.clone(),
        Payload::Ordering(p) => json!(p.correct_order).to_string(),
        Payload::BlankFill(p) => {
            let answers: BTreeMap<&str, &str> =
                p.blanks.iter().map(|b| (b.id.as_str(), b.answer.as_str())).collect();
            json!(answers).to_string()
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

fn collect_keys(v: &Value, out: &mut Vec<String>) {
    match v {
        Value::Object(map) => {
            for (k, child) in map {
                out.push(k.clone());
                collect_keys(child, out);
            }
        }
        Value::Array(items) => items.iter().for_each(|child| collect_keys(child, out)),
        _ => {}
    }
}

// ── determinism ──────────────────────────────────────────────────────────────

#[test]
fn same_seed_same_exercise() {
    each_exercise(|topic, tier, seed, ex| {
        let again = generate(topic, tier, seed).unwrap();
        assert_eq!(
            ex.to_json().unwrap(),
            again.to_json().unwrap(),
            "{topic} {tier} seed {seed} is not deterministic"
        );
    });
}

#[test]
fn different_seeds_give_different_ids() {
    for topic in all_topics() {
        let mut ids: Vec<String> = SEEDS
            .iter()
            .map(|&s| generate(topic, DifficultyTier::Medium, s).unwrap().id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SEEDS.len(), "{topic}: id collision across seeds");
    }
}

// ── structural ───────────────────────────────────────────────────────────────

#[test]
fn standard_table_size() {
    assert_eq!(all_topics().len(), 49);
}

#[test]
fn topic_ids_carry_their_family_prefix() {
    for (topic, prefix) in [
        ("npv-comparing", "NPV-"),
        ("g2-add-making-100", "ADD-"),
        ("g4-mul-numbers", "MUL-"),
        ("g5-order-fractions-unlike", "SORT-"),
        ("geo-plot-points", "GRAPH-"),
    ] {
        let ex = generate(topic, DifficultyTier::Easy, 1).unwrap();
        assert!(ex.id.starts_with(prefix), "{topic}: {}", ex.id);
    }
}

#[test]
fn exercise_carries_requested_topic_and_tier() {
    each_exercise(|topic, tier, _, ex| {
        assert_eq!(ex.topic_id, topic);
        assert_eq!(ex.difficulty, tier);
        assert!(ex.id.contains(&format!("-{topic}-")), "id {} lacks topic", ex.id);
        assert!(!ex.prompt.text.is_empty());
        assert!(ex.explanation.text.is_some() || !ex.explanation.steps.is_empty());
    });
}

#[test]
fn topics_produce_their_variant() {
    for (topic, variant) in [
        ("nl-find-integer", Variant::NumberLine),
        ("nl-select-odd", Variant::NumberLine),
        ("g2-even-odd-drag", Variant::Categorize),
        ("g4-mul-steps", Variant::GridFill),
        ("g5-graph-points", Variant::PointPlot),
        ("geo-plot-points", Variant::PointPlot),
        ("g3-order-decimals", Variant::Ordering),
        ("fib-equation", Variant::BlankFill),
        ("mul-pattern-powers", Variant::BlankFill),
        ("g2-add-two-2digit", Variant::FreeText),
        ("g1-add-word", Variant::Choice),
        ("g2-mul-word", Variant::Choice),
        ("g1-add-pictures", Variant::Choice),
        ("g2-add-making-100", Variant::BlankFill),
        ("g2-add-word", Variant::Choice),
        ("g3-add-estimate", Variant::Choice),
        ("g4-add-round-and-add", Variant::BlankFill),
        ("g5-add-decimal", Variant::FreeText),
        ("g5-add-fractions-like", Variant::FreeText),
        ("g3-mul-numbers", Variant::FreeText),
        ("g3-mul-properties", Variant::BlankFill),
        ("npv-number-recognition", Variant::Choice),
        ("npv-counting-forward", Variant::BlankFill),
        ("npv-comparing", Variant::Choice),
        ("npv-expanded-form", Variant::BlankFill),
        ("npv-even-odd", Variant::Choice),
        ("g4-order-fractions-like", Variant::Ordering),
    ] {
        for tier in DifficultyTier::ALL {
            assert_eq!(generate(topic, tier, 3).unwrap().variant(), variant, "{topic} {tier}");
        }
    }
}

#[test]
fn unknown_topic_is_not_found() {
    let err = generate("g9-calculus", DifficultyTier::Easy, 1).unwrap_err();
    assert_eq!(err, EngineError::TopicNotFound { topic_id: "g9-calculus".into() });
}

// ── self-consistency ─────────────────────────────────────────────────────────

#[test]
fn ground_truth_validates_for_every_topic() {
    each_exercise(|topic, tier, seed, ex| {
        let answer = correct_submission(&ex);
        assert!(validate(&ex, &answer), "{topic} {tier} seed {seed}: {answer} rejected");
    });
}

#[test]
fn choice_exercises_have_exactly_one_correct_option() {
    each_exercise(|topic, _, _, ex| {
        if let Payload::Choice(p) = &ex.payload {
            assert_eq!(p.options.iter().filter(|o| o.is_correct).count(), 1, "{topic}");
            assert!(p.options.len() >= 2, "{topic}");
        }
    });
}

#[test]
fn ordering_items_cover_the_canonical_order() {
    each_exercise(|topic, _, _, ex| {
        if let Payload::Ordering(p) = &ex.payload {
            let mut ids: Vec<&str> = p.items.iter().map(|i| i.id.as_str()).collect();
            let mut order: Vec<&str> = p.correct_order.iter().map(String::as_str).collect();
            ids.sort_unstable();
            order.sort_unstable();
            assert_eq!(ids, order, "{topic}");
        }
    });
}

// ── exchange format ──────────────────────────────────────────────────────────

#[test]
fn json_round_trip_is_lossless() {
    each_exercise(|topic, tier, seed, ex| {
        let record = ex.to_json().unwrap();
        let back = Exercise::from_json(&record).unwrap();
        assert_eq!(back, ex, "{topic} {tier} seed {seed}");
    });
}

#[test]
fn record_is_flat_and_tagged() {
    let ex = generate("g2-even-odd-drag", DifficultyTier::Easy, 1).unwrap();
    let v: Value = serde_json::from_str(&ex.to_json().unwrap()).unwrap();
    assert_eq!(v["variant"], "categorize");
    assert_eq!(v["difficulty"], "easy");
    assert!(v["correct_mapping"].is_object());
    assert!(v.get("payload").is_none());
}

// ── negatives ────────────────────────────────────────────────────────────────

#[test]
fn reversed_ordering_is_wrong() {
    for topic in [
        "g1-order-numbers", "g3-order-decimals", "g4-order-numbers-large",
        "g4-order-fractions-like", "g5-order-fractions-unlike", "g6-order-integers",
    ] {
        for seed in SEEDS {
            let ex = generate(topic, DifficultyTier::Medium, seed).unwrap();
            let Payload::Ordering(p) = &ex.payload else { panic!("{topic}") };
            let mut reversed = p.correct_order.clone();
            reversed.reverse();
            assert!(!validate(&ex, &json!(reversed).to_string()), "{topic} seed {seed}");
        }
    }
}

#[test]
fn one_wrong_blank_is_wrong() {
    for topic in ["g1-add-making-10", "g2-mul-repeated-addition", "g4-add-round-and-add", "npv-expanded-form"] {
        let ex = generate(topic, DifficultyTier::Hard, 42).unwrap();
        let Payload::BlankFill(p) = &ex.payload else { panic!("{topic}") };
        let mut answers: BTreeMap<String, String> =
            p.blanks.iter().map(|b| (b.id.clone(), b.answer.clone())).collect();
        let first = &p.blanks[0].id;
        answers.insert(first.clone(), format!("{}1", p.blanks[0].answer));
        assert!(!validate(&ex, &json!(answers).to_string()), "{topic}");
    }
}

#[test]
fn number_line_multi_select_order_free_but_complete() {
    let ex = generate("nl-select-odd", DifficultyTier::Medium, 42).unwrap();
    let Payload::NumberLine(p) = &ex.payload else { panic!("expected number-line") };
    let NumberLineTarget::MultiSelect { values } = &p.target else { panic!("expected multi-select") };

    let mut reversed = values.clone();
    reversed.reverse();
    assert!(validate(&ex, &json!(reversed).to_string()));

    let omitted = &values[..values.len() - 1];
    assert!(!validate(&ex, &json!(omitted).to_string()));
}

#[test]
fn grid_with_one_wrong_digit_is_wrong() {
    let ex = generate("g4-mul-steps", DifficultyTier::Hard, 7).unwrap();
    let Payload::GridFill(p) = &ex.payload else { panic!("expected grid-fill") };
    let mut answers = p.expected.clone();
    if let Some(d) = answers.get_mut("res-0") {
        *d = if d == "9" { "8".into() } else { "9".into() };
    }
    assert!(!validate(&ex, &json!(answers).to_string()));
}

#[test]
fn simplified_fraction_sum_is_accepted() {
    // Reduced and whole-number forms grade like the raw sum.
    for seed in 0..50u64 {
        let ex = generate("g5-add-fractions-like", DifficultyTier::Easy, seed).unwrap();
        let Payload::FreeText(p) = &ex.payload else { panic!("expected free-text") };
        for alt in &p.acceptable {
            assert!(validate(&ex, alt), "seed {seed}: {alt} rejected");
        }
        assert!(!validate(&ex, "0/1"), "seed {seed}");
    }
}

// ── window ───────────────────────────────────────────────────────────────────

#[test]
fn find_integer_target_is_strictly_inside_the_window() {
    for tier in DifficultyTier::ALL {
        for seed in 0..200u64 {
            let ex = generate("nl-find-integer", tier, seed).unwrap();
            let Payload::NumberLine(p) = &ex.payload else { panic!("expected number-line") };
            let NumberLineTarget::SingleSelect { value } = &p.target else { panic!("expected single-select") };
            let value = *value;
            assert!(p.min < value && value < p.max, "seed {seed}: {value} not in ({}, {})", p.min, p.max);
            let width = if tier == DifficultyTier::Easy { 10.0 } else { 20.0 };
            assert_eq!(p.max - p.min, width);
        }
    }
}

// ── client view ──────────────────────────────────────────────────────────────

#[test]
fn client_view_carries_no_ground_truth() {
    const FORBIDDEN: [&str; 9] = [
        "is_correct", "correct_order", "answer", "acceptable", "expected",
        "correct_points", "correct_mapping", "values", "explanation",
    ];
    each_exercise(|topic, _, _, ex| {
        let view = client_view(&ex);
        let mut keys = Vec::new();
        collect_keys(&view, &mut keys);
        for key in FORBIDDEN {
            assert!(!keys.iter().any(|k| k == key), "{topic}: `{key}` leaked");
        }
        if ex.variant() == Variant::NumberLine {
            assert!(view.get("target").is_none(), "{topic}: number-line target leaked");
        }
        assert_eq!(view["id"], ex.id.as_str());
        assert_eq!(view["variant"], json!(ex.variant()));
    });
}
