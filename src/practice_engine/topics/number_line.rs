use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::{exercise, integer_labels},
    models::{DifficultyTier, Exercise, Explanation, NumberLinePayload, NumberLineTarget, Payload},
    random::SeededRandom,
};

pub const PREFIX: &str = "NL";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberLineKind {
    /// Single-select: place one integer strictly inside the window.
    FindInteger,
    /// Multi-select: pick every odd value in a 10-wide window.
    SelectOdd,
}

pub fn generate(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    kind: NumberLineKind,
) -> Result<Exercise, EngineError> {
    Ok(match kind {
        NumberLineKind::FindInteger => find_integer(rng, ctx),
        NumberLineKind::SelectOdd   => select_odd(rng, ctx),
    })
}

fn find_integer(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let width = match ctx.tier {
        DifficultyTier::Easy => 10,
        DifficultyTier::Medium | DifficultyTier::Hard => 20,
    };
    let start = rng.int(0, 50);
    let end = start + width;
    // Never on an endpoint.
    let target = rng.int(start + 1, end - 1);

    let payload = NumberLinePayload {
        min: start as f64,
        max: end as f64,
        step: 1.0,
        labels: integer_labels(start, end),
        target: NumberLineTarget::SingleSelect { value: target as f64 },
    };

    exercise(
        ctx,
        format!("Locate the number {target} on the number line."),
        Explanation::text(format!("{target} is located at the mark labeled {target}.")),
        Payload::NumberLine(payload),
    )
}

fn select_odd(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let start = rng.int(10, 30);
    let end = start + 10;
    let odds: Vec<f64> = (start..=end)
        .filter(|n| n % 2 != 0)
        .map(|n| n as f64)
        .collect();

    let payload = NumberLinePayload {
        min: start as f64,
        max: end as f64,
        step: 1.0,
        labels: integer_labels(start, end),
        target: NumberLineTarget::MultiSelect { values: odds },
    };

    exercise(
        ctx,
        "Select all the odd numbers on the number line.",
        Explanation::text("Odd numbers end in 1, 3, 5, 7, or 9."),
        Payload::NumberLine(payload),
    )
}
