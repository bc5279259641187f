//! Number sense: reading numbers, counting on and back, comparing, place
//! value, expanded form and parity.

use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::{choice_payload, digits, exercise, number_in_words, numeric_distractors},
    models::{Blank, BlankFillPayload, DifficultyTier, Exercise, Explanation, Payload},
    random::SeededRandom,
};

pub const PREFIX: &str = "NPV";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceValueKind {
    /// Pick the numeral for a number written in words.
    NumberRecognition,
    CountingForward,
    CountingBackward,
    /// Choose `<`, `>` or `=`.
    Comparing,
    PlaceValue,
    ExpandedForm,
    EvenOdd,
}

const PLACE_NAMES: [&str; 4] = ["ones", "tens", "hundreds", "thousands"];

const SEQUENCE_LEN: usize = 5;

pub fn generate(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    kind: PlaceValueKind,
) -> Result<Exercise, EngineError> {
    Ok(match kind {
        PlaceValueKind::NumberRecognition => number_recognition(rng, ctx),
        PlaceValueKind::CountingForward   => counting(rng, ctx, true),
        PlaceValueKind::CountingBackward  => counting(rng, ctx, false),
        PlaceValueKind::Comparing         => comparing(rng, ctx),
        PlaceValueKind::PlaceValue        => place_value(rng, ctx),
        PlaceValueKind::ExpandedForm      => expanded_form(rng, ctx),
        PlaceValueKind::EvenOdd           => even_odd(rng, ctx),
    })
}

/// Whole-number range for recognition, comparing and parity.
fn number_range(tier: DifficultyTier) -> (i64, i64) {
    match tier {
        DifficultyTier::Easy   => (0, 20),
        DifficultyTier::Medium => (10, 99),
        DifficultyTier::Hard   => (100, 999),
    }
}

fn number_recognition(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = number_range(ctx.tier);
    let spread = match ctx.tier {
        DifficultyTier::Easy   => 3,
        DifficultyTier::Medium => 10,
        DifficultyTier::Hard   => 50,
    };
    let n = rng.int(lo, hi);
    let words = number_in_words(n).unwrap_or_else(|| n.to_string());

    let distractors = numeric_distractors(rng, n, 3, spread, 0)
        .into_iter()
        .map(|d| d.to_string())
        .collect();
    let payload = choice_payload(rng, n.to_string(), distractors);

    exercise(
        ctx,
        format!("Which number is {words}?"),
        Explanation::text(format!("\"{words}\" is written {n}.")),
        Payload::Choice(payload),
    )
}

/// Five terms with two blanks; the first term is always shown.
fn counting(rng: &mut SeededRandom, ctx: GenerationContext, forward: bool) -> Exercise {
    let (step, lo, hi) = match ctx.tier {
        DifficultyTier::Easy => (1, 0, 15),
        DifficultyTier::Medium => ([2, 5, 10][rng.int(0, 2) as usize], 10, 60),
        DifficultyTier::Hard => ([10, 100][rng.int(0, 1) as usize], 100, 500),
    };
    let span = step * (SEQUENCE_LEN as i64 - 1);
    let start = if forward { rng.int(lo, hi) } else { rng.int(lo + span, hi + span) };
    let start = start - start % step;
    let terms: Vec<i64> = (0..SEQUENCE_LEN as i64)
        .map(|i| if forward { start + i * step } else { start - i * step })
        .collect();

    let mut hidden = rng.distinct_ints(2, 1, SEQUENCE_LEN as i64 - 1);
    hidden.sort_unstable();

    let template = terms
        .iter()
        .enumerate()
        .map(|(i, t)| {
            if hidden.contains(&(i as i64)) { format!("[n{i}]") } else { t.to_string() }
        })
        .collect::<Vec<_>>()
        .join(", ");
    let blanks = hidden
        .iter()
        .map(|&i| Blank { id: format!("n{i}"), answer: terms[i as usize].to_string(), hint: None })
        .collect();

    let (direction, op) = if forward { ("forward", "+") } else { ("backward", "-") };
    exercise(
        ctx,
        format!("Count {direction} by {step}s. Fill in the missing numbers."),
        Explanation::text(format!("Each number is {op}{step} from the one before it."))
            .with_steps(vec![terms.iter().map(i64::to_string).collect::<Vec<_>>().join(", ")]),
        Payload::BlankFill(BlankFillPayload { template, blanks }),
    )
}

fn comparing(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = number_range(ctx.tier);
    let equal = rng.int(0, 4) == 0;
    let pair = rng.distinct_ints(2, lo, hi);
    let a = pair[0];
    let b = if equal { a } else { pair[1] };

    let (sign, reason) = match a.cmp(&b) {
        std::cmp::Ordering::Less    => ("<", format!("{a} is less than {b}.")),
        std::cmp::Ordering::Greater => (">", format!("{a} is greater than {b}.")),
        std::cmp::Ordering::Equal   => ("=", format!("{a} and {b} are the same number.")),
    };
    let distractors = ["<", ">", "="]
        .into_iter()
        .filter(|s| *s != sign)
        .map(String::from)
        .collect();
    let payload = choice_payload(rng, sign.to_string(), distractors);

    exercise(
        ctx,
        format!("Compare the numbers: {a} ☐ {b}"),
        Explanation::text("Compare the digits from the largest place down.").with_steps(vec![reason]),
        Payload::Choice(payload),
    )
}

/// Two-digit at easy up to four-digit at hard.
fn place_range(tier: DifficultyTier) -> (i64, i64) {
    match tier {
        DifficultyTier::Easy   => (10, 99),
        DifficultyTier::Medium => (100, 999),
        DifficultyTier::Hard   => (1000, 9999),
    }
}

fn place_value(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = place_range(ctx.tier);
    let n = rng.int(lo, hi);
    let ds = digits(n);
    let nonzero: Vec<usize> = (0..ds.len()).filter(|&i| ds[i] != "0").collect();
    let idx = nonzero[rng.int(0, nonzero.len() as i64 - 1) as usize];
    let place = ds.len() - 1 - idx;
    let digit: i64 = ds[idx].parse().unwrap_or(0);
    let value = digit * 10_i64.pow(place as u32);

    // One option per place, so all four are distinct.
    let distractors = (0..PLACE_NAMES.len() as u32)
        .filter(|&p| p as usize != place)
        .map(|p| (digit * 10_i64.pow(p)).to_string())
        .collect();
    let payload = choice_payload(rng, value.to_string(), distractors);

    exercise(
        ctx,
        format!("In {n}, what is the value of the digit in the {} place?", PLACE_NAMES[place]),
        Explanation::text(format!(
            "The {} digit is {digit}, so it stands for {digit} {}: {value}.",
            PLACE_NAMES[place], PLACE_NAMES[place]
        )),
        Payload::Choice(payload),
    )
}

fn expanded_form(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = place_range(ctx.tier);
    let n = rng.int(lo, hi);
    let ds = digits(n);
    let width = ds.len();

    let blanks: Vec<Blank> = ds
        .iter()
        .enumerate()
        .map(|(i, d)| {
            let place = width - 1 - i;
            let value = d.parse::<i64>().unwrap_or(0) * 10_i64.pow(place as u32);
            Blank {
                id: PLACE_NAMES[place].to_string(),
                answer: value.to_string(),
                hint: Some(PLACE_NAMES[place].to_string()),
            }
        })
        .collect();
    let slots: Vec<String> = blanks.iter().map(|b| format!("[{}]", b.id)).collect();
    let parts: Vec<&str> = blanks.iter().map(|b| b.answer.as_str()).collect();

    exercise(
        ctx,
        format!("Write {n} in expanded form."),
        Explanation::text("Write each digit's value by its place and add them.")
            .with_steps(vec![format!("{n} = {}", parts.join(" + "))]),
        Payload::BlankFill(BlankFillPayload {
            template: format!("{n} = {}", slots.join(" + ")),
            blanks,
        }),
    )
}

fn even_odd(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = match ctx.tier {
        DifficultyTier::Easy   => (1, 20),
        DifficultyTier::Medium => (10, 99),
        DifficultyTier::Hard   => (100, 999),
    };
    let n = rng.int(lo, hi);
    let ones = n % 10;
    let (answer, other) = if n % 2 == 0 { ("Even", "Odd") } else { ("Odd", "Even") };
    let payload = choice_payload(rng, answer.to_string(), vec![other.to_string()]);

    exercise(
        ctx,
        format!("Is {n} even or odd?"),
        Explanation::text(format!(
            "Look at the ones digit. {ones} is {}, so {n} is {}.",
            answer.to_lowercase(),
            answer.to_lowercase()
        )),
        Payload::Choice(payload),
    )
}
