//! Shared builder functions used across topic generators.
//!
//! Every generator assembles the same pieces: option lists with distractors,
//! number-line labels, digit splits and the final [`Exercise`]. These helpers
//! keep topic files focused on the arithmetic.
//!
//! ## RNG ordering
//!
//! The exercise id is drawn first (in `generator.rs`), then the topic draws
//! its values, then `numeric_distractors()` and the `choice_payload()` shuffle.
//! Reordering these calls changes every seeded exercise.

use crate::practice_engine::{
    generator::GenerationContext,
    models::{ChoiceOption, ChoicePayload, Exercise, Explanation, Payload, Prompt},
    random::SeededRandom,
};

const OPTION_IDS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Assemble the final [`Exercise`] from its parts.
pub fn exercise(
    ctx: GenerationContext,
    prompt: impl Into<String>,
    explanation: Explanation,
    payload: Payload,
) -> Exercise {
    Exercise {
        id: ctx.exercise_id,
        topic_id: ctx.topic_id,
        difficulty: ctx.tier,
        prompt: Prompt::text(prompt),
        explanation,
        payload,
    }
}

/// Numeric distractors near `answer`: distinct, never equal to it and never
/// below `floor`.
pub fn numeric_distractors(
    rng: &mut SeededRandom, answer: i64, count: usize, spread: i64, floor: i64,
) -> Vec<i64> {
    let spread = spread.max(count as i64);
    let lo = (answer - spread).max(floor);
    let hi = answer + spread;
    let mut out = Vec::with_capacity(count);
    while out.len() < count {
        let n = rng.int(lo, hi);
        if n != answer && !out.contains(&n) {
            out.push(n);
        }
    }
    out
}

/// Shuffle the correct answer in with its distractors and label them A, B, ...
pub fn choice_payload(
    rng: &mut SeededRandom, correct: String, distractors: Vec<String>,
) -> ChoicePayload {
    let mut contents: Vec<(String, bool)> = Vec::with_capacity(distractors.len() + 1);
    contents.push((correct, true));
    contents.extend(distractors.into_iter().map(|d| (d, false)));
    rng.shuffle(&mut contents);

    let options = contents
        .into_iter()
        .zip(OPTION_IDS.iter())
        .map(|((content, is_correct), id)| ChoiceOption {
            id: id.to_string(),
            content,
            is_correct,
            image: None,
        })
        .collect();
    ChoicePayload { options }
}

/// Every integer in `start..=end` as a number-line label.
pub fn integer_labels(start: i64, end: i64) -> Vec<f64> {
    (start..=end).map(|n| n as f64).collect()
}

/// Decimal digits of a non-negative number, most significant first.
pub fn digits(n: i64) -> Vec<String> {
    n.to_string().chars().map(|c| c.to_string()).collect()
}

const ONES: [&str; 20] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen",
];

const TENS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// English words for `0..=999`, e.g. "three hundred forty-seven".
pub fn number_in_words(n: i64) -> Option<String> {
    let below_hundred = |m: usize| -> String {
        match m {
            0..=19 => ONES[m].to_string(),
            _ if m % 10 == 0 => TENS[m / 10].to_string(),
            _ => format!("{}-{}", TENS[m / 10], ONES[m % 10]),
        }
    };
    let n = usize::try_from(n).ok().filter(|n| *n <= 999)?;
    Some(match (n / 100, n % 100) {
        (0, rest) => below_hundred(rest),
        (h, 0) => format!("{} hundred", ONES[h]),
        (h, rest) => format!("{} hundred {}", ONES[h], below_hundred(rest)),
    })
}

pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.abs(), b.abs());
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}
