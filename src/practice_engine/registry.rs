//! Topic id → generator dispatch table.
//!
//! Families register one closure per topic with their parameters captured
//! (grade, sub-kind). Aliases point at another topic's entry but generate
//! under the alias's own id.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::debug;

use crate::practice_engine::{
    error::EngineError,
    generator::{make_exercise_id, GenerationContext},
    models::{DifficultyTier, Exercise},
    random::SeededRandom,
    topics::{
        addition::{self, AdditionKind},
        categorize,
        graphing,
        multiplication,
        number_line::{self, NumberLineKind},
        ordering::{self, OrderingKind},
        place_value::{self, PlaceValueKind},
        vertical,
    },
};

pub type GeneratorFn =
    Arc<dyn Fn(&mut SeededRandom, GenerationContext) -> Result<Exercise, EngineError> + Send + Sync>;

#[derive(Clone)]
struct TopicEntry {
    prefix: &'static str,
    generate: GeneratorFn,
}

#[derive(Clone, Default)]
pub struct TopicRegistry {
    topics: BTreeMap<String, TopicEntry>,
}

impl std::fmt::Debug for TopicRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TopicRegistry")
            .field("topics", &self.topics.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl TopicRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `generate` under `topic_id`, replacing any existing entry.
    pub fn register<F>(&mut self, topic_id: &str, prefix: &'static str, generate: F)
    where
        F: Fn(&mut SeededRandom, GenerationContext) -> Result<Exercise, EngineError>
            + Send + Sync + 'static,
    {
        self.topics.insert(
            topic_id.to_string(),
            TopicEntry { prefix, generate: Arc::new(generate) },
        );
    }

    /// Make `alias` share `target`'s generator.
    pub fn alias(&mut self, alias: &str, target: &str) -> Result<(), EngineError> {
        let entry = self
            .topics
            .get(target)
            .cloned()
            .ok_or_else(|| EngineError::TopicNotFound { topic_id: target.to_string() })?;
        self.topics.insert(alias.to_string(), entry);
        Ok(())
    }

    pub fn contains(&self, topic_id: &str) -> bool {
        self.topics.contains_key(topic_id)
    }

    /// Registered topic ids in sorted order.
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.topics.keys().map(String::as_str)
    }

    pub fn generate(
        &self, topic_id: &str, tier: DifficultyTier, seed: u64,
    ) -> Result<Exercise, EngineError> {
        let entry = self.topics.get(topic_id).ok_or_else(|| {
            debug!(target: "practice_engine", topic_id, "no generator registered");
            EngineError::TopicNotFound { topic_id: topic_id.to_string() }
        })?;

        let mut rng = SeededRandom::new(seed);
        let exercise_id = make_exercise_id(entry.prefix, topic_id, &mut rng);
        let ctx = GenerationContext { topic_id: topic_id.to_string(), tier, exercise_id };
        (entry.generate)(&mut rng, ctx)
    }

    /// The full topic table.
    pub fn standard() -> Self {
        let mut r = TopicRegistry::new();

        // Number line
        r.register("nl-find-integer", number_line::PREFIX, |rng, ctx| {
            number_line::generate(rng, ctx, NumberLineKind::FindInteger)
        });
        r.register("nl-select-odd", number_line::PREFIX, |rng, ctx| {
            number_line::generate(rng, ctx, NumberLineKind::SelectOdd)
        });

        // Categorize
        r.register("g2-even-odd-drag", categorize::PREFIX, categorize::generate_even_odd);

        // Grid fill
        r.register("g4-mul-steps", vertical::PREFIX, vertical::generate);

        // Point plot
        r.register("g5-graph-points", graphing::PREFIX, graphing::generate);

        // Ordering
        for (id, kind) in [
            ("g1-order-numbers", OrderingKind::SmallNumbers),
            ("g3-order-decimals", OrderingKind::Decimals),
            ("g4-order-numbers-large", OrderingKind::LargeNumbers),
            ("g4-order-fractions-like", OrderingKind::FractionsLike),
            ("g5-order-fractions-unlike", OrderingKind::FractionsUnlike),
            ("g6-order-integers", OrderingKind::Integers),
        ] {
            r.register(id, ordering::PREFIX, move |rng, ctx| ordering::generate(rng, ctx, kind));
        }

        // Addition
        for (id, kind) in [
            ("g1-add-pictures", AdditionKind::Pictures),
            ("g1-add-single-digit", AdditionKind::SingleDigit),
            ("g1-add-making-10", AdditionKind::MakingTen),
            ("g1-add-word", AdditionKind::WordProblem),
            ("g2-add-single-digit", AdditionKind::SingleDigit),
            ("g2-add-2digit-1digit", AdditionKind::TwoDigitOneDigit),
            ("g2-add-two-2digit", AdditionKind::TwoTwoDigit),
            ("g2-add-making-100", AdditionKind::MakingHundred),
            ("g2-add-word", AdditionKind::TwoDigitWordProblem),
            ("g3-add-3digit-3digit", AdditionKind::ThreeDigit),
            ("g3-add-with-regrouping", AdditionKind::WithRegrouping),
            ("g3-add-estimate", AdditionKind::Estimate),
            ("g4-add-multi-digit", AdditionKind::MultiDigit),
            ("g4-add-round-and-add", AdditionKind::RoundAndAdd),
            ("g5-add-decimal", AdditionKind::Decimal),
            ("g5-add-fractions-like", AdditionKind::FractionsLike),
        ] {
            r.register(id, addition::PREFIX, move |rng, ctx| addition::generate(rng, ctx, kind));
        }

        // Number sense and place value
        for (id, kind) in [
            ("npv-number-recognition", PlaceValueKind::NumberRecognition),
            ("npv-counting-forward", PlaceValueKind::CountingForward),
            ("npv-counting-backward", PlaceValueKind::CountingBackward),
            ("npv-comparing", PlaceValueKind::Comparing),
            ("npv-place-value", PlaceValueKind::PlaceValue),
            ("npv-expanded-form", PlaceValueKind::ExpandedForm),
            ("npv-even-odd", PlaceValueKind::EvenOdd),
        ] {
            r.register(id, place_value::PREFIX, move |rng, ctx| place_value::generate(rng, ctx, kind));
        }

        // Multiplication, parameterized by grade
        for grade in 2..=4u8 {
            r.register(&format!("g{grade}-mul-tables"), multiplication::PREFIX, move |rng, ctx| {
                multiplication::generate_times_table(rng, ctx, grade)
            });
        }
        for grade in 1..=4u8 {
            r.register(
                &format!("g{grade}-mul-repeated-addition"),
                multiplication::PREFIX,
                move |rng, ctx| multiplication::generate_repeated_addition(rng, ctx, grade),
            );
        }
        for grade in 2..=3u8 {
            r.register(&format!("g{grade}-mul-word"), multiplication::PREFIX, move |rng, ctx| {
                multiplication::generate_word_problem(rng, ctx, grade)
            });
        }
        for grade in 3..=4u8 {
            r.register(&format!("g{grade}-mul-numbers"), multiplication::PREFIX, move |rng, ctx| {
                multiplication::generate_multiplying_numbers(rng, ctx, grade)
            });
        }
        r.register("g3-mul-properties", multiplication::PREFIX, |rng, ctx| {
            multiplication::generate_properties(rng, ctx, 3)
        });

        // Aliases; every target is registered above.
        for (alias, target) in [
            ("geo-plot-points", "g5-graph-points"),
            ("fib-equation", "g1-add-making-10"),
            ("mul-pattern-powers", "g3-mul-repeated-addition"),
        ] {
            if let Err(e) = r.alias(alias, target) {
                debug!(target: "practice_engine", alias, error = %e, "alias target missing");
            }
        }

        r
    }
}
