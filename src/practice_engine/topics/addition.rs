use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::{choice_payload, exercise, gcd, number_in_words, numeric_distractors},
    models::{Blank, BlankFillPayload, DifficultyTier, Exercise, Explanation, FreeTextPayload, Payload},
    random::SeededRandom,
};

pub const PREFIX: &str = "ADD";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdditionKind {
    /// Count two groups of pictures.
    Pictures,
    SingleDigit,
    TwoDigitOneDigit,
    /// Two 2-digit addends; regrouping only at hard.
    TwoTwoDigit,
    /// Missing addend to reach a round total.
    MakingTen,
    MakingHundred,
    WordProblem,
    TwoDigitWordProblem,
    /// Two 3-digit addends; regrouping from medium up.
    ThreeDigit,
    /// Ones always regroup; tens regroup too at hard.
    WithRegrouping,
    Estimate,
    MultiDigit,
    RoundAndAdd,
    Decimal,
    /// Fractions over a shared denominator.
    FractionsLike,
}

const WORD_THINGS: [&str; 5] = ["apples", "marbles", "stickers", "shells", "pencils"];

const PICTURES: [&str; 4] = ["🍎", "⭐", "🐟", "🌸"];

fn free_text(answer: i64) -> Payload {
    let acceptable = Some(answer)
        .filter(|n| *n <= 20)
        .and_then(number_in_words)
        .into_iter()
        .collect();
    Payload::FreeText(FreeTextPayload {
        answer: answer.to_string(),
        acceptable,
        unit: None,
        placeholder: Some("Type your answer".into()),
    })
}

pub fn generate(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    kind: AdditionKind,
) -> Result<Exercise, EngineError> {
    Ok(match kind {
        AdditionKind::Pictures            => pictures(rng, ctx),
        AdditionKind::SingleDigit         => single_digit(rng, ctx),
        AdditionKind::TwoDigitOneDigit    => two_digit_one_digit(rng, ctx),
        AdditionKind::TwoTwoDigit         => two_two_digit(rng, ctx),
        AdditionKind::MakingTen           => making_ten(rng, ctx),
        AdditionKind::MakingHundred       => making_hundred(rng, ctx),
        AdditionKind::WordProblem         => small_word_problem(rng, ctx),
        AdditionKind::TwoDigitWordProblem => two_digit_word_problem(rng, ctx),
        AdditionKind::ThreeDigit          => three_digit(rng, ctx),
        AdditionKind::WithRegrouping      => with_regrouping(rng, ctx),
        AdditionKind::Estimate            => estimate(rng, ctx),
        AdditionKind::MultiDigit          => multi_digit(rng, ctx),
        AdditionKind::RoundAndAdd         => round_and_add(rng, ctx),
        AdditionKind::Decimal             => decimal(rng, ctx),
        AdditionKind::FractionsLike       => fractions_like(rng, ctx),
    })
}

fn sum_exercise(ctx: GenerationContext, a: i64, b: i64) -> Exercise {
    let total = a + b;
    exercise(
        ctx,
        format!("What is {a} + {b}?"),
        Explanation::text(format!("Start at {a} and count on {b} more: {a} + {b} = {total}.")),
        free_text(total),
    )
}

/// Column addition explanation: one step per place, carries noted.
fn column_sum_exercise(ctx: GenerationContext, a: i64, b: i64) -> Exercise {
    const PLACES: [&str; 6] = ["ones", "tens", "hundreds", "thousands", "ten-thousands", "hundred-thousands"];
    let total = a + b;
    let mut steps = Vec::new();
    let (mut x, mut y, mut carry) = (a, b, 0);
    for place in PLACES {
        if x == 0 && y == 0 && carry == 0 {
            break;
        }
        let column = x % 10 + y % 10 + carry;
        let note = if column >= 10 { format!(", write {} and carry 1", column % 10) } else { String::new() };
        steps.push(format!("Add the {place}: {} + {}{} = {column}{note}",
            x % 10, y % 10, if carry > 0 { " + 1" } else { "" }));
        carry = column / 10;
        x /= 10;
        y /= 10;
    }
    steps.push(format!("{a} + {b} = {total}"));
    exercise(
        ctx,
        format!("What is {a} + {b}?"),
        Explanation::text("Line the numbers up by place value and add each column, starting with the ones.")
            .with_steps(steps),
        free_text(total),
    )
}

fn pictures(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let hi = match ctx.tier {
        DifficultyTier::Easy   => 3,
        DifficultyTier::Medium => 5,
        DifficultyTier::Hard   => 9,
    };
    let a = rng.int(1, hi);
    let b = rng.int(1, hi);
    let picture = PICTURES[rng.int(0, PICTURES.len() as i64 - 1) as usize];
    let total = a + b;
    let group = |n: i64| vec![picture; n as usize].join(" ");

    let distractors = numeric_distractors(rng, total, 3, 2, 1)
        .into_iter()
        .map(|n| n.to_string())
        .collect();
    let payload = choice_payload(rng, total.to_string(), distractors);

    exercise(
        ctx,
        format!("How many in all? {}  +  {}", group(a), group(b)),
        Explanation::text(format!("Count the first group ({a}), then keep counting the second group: {a} + {b} = {total}.")),
        Payload::Choice(payload),
    )
}

fn single_digit(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = match ctx.tier {
        DifficultyTier::Easy   => (0, 5),
        DifficultyTier::Medium => (0, 9),
        DifficultyTier::Hard   => (5, 9),
    };
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    sum_exercise(ctx, a, b)
}

fn two_digit_one_digit(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (a, b) = match ctx.tier {
        DifficultyTier::Easy => {
            // No regrouping: ones digits stay below ten.
            let tens = rng.int(1, 8);
            let ones = rng.int(0, 8);
            (tens * 10 + ones, rng.int(1, 9 - ones))
        }
        DifficultyTier::Medium | DifficultyTier::Hard => (rng.int(10, 89), rng.int(1, 9)),
    };
    sum_exercise(ctx, a, b)
}

fn two_two_digit(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (a, b) = match ctx.tier {
        DifficultyTier::Hard => (rng.int(10, 89), rng.int(10, 89)),
        DifficultyTier::Easy | DifficultyTier::Medium => {
            let max_tens = if ctx.tier == DifficultyTier::Easy { 4 } else { 8 };
            let ta = rng.int(1, max_tens);
            let tb = rng.int(1, 9 - ta);
            let oa = rng.int(0, 9);
            let ob = rng.int(0, 9 - oa);
            (ta * 10 + oa, tb * 10 + ob)
        }
    };
    sum_exercise(ctx, a, b)
}

/// `[blank1]` completes `known + [blank1] = target`; the blank may lead from
/// medium up.
fn missing_addend(rng: &mut SeededRandom, ctx: GenerationContext, known: i64, target: i64) -> Exercise {
    let missing = target - known;
    let blank_first = ctx.tier != DifficultyTier::Easy && rng.int(0, 1) == 1;

    let template = if blank_first {
        format!("[blank1] + {known} = {target}")
    } else {
        format!("{known} + [blank1] = {target}")
    };

    exercise(
        ctx,
        "Fill in the missing number:",
        Explanation::text("Subtract the known part from the total to find the missing part.")
            .with_steps(vec![format!("{target} - {known} = {missing}")]),
        Payload::BlankFill(BlankFillPayload {
            template,
            blanks: vec![Blank { id: "blank1".into(), answer: missing.to_string(), hint: None }],
        }),
    )
}

fn making_ten(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let target = match ctx.tier {
        DifficultyTier::Hard => 20,
        DifficultyTier::Easy | DifficultyTier::Medium => 10,
    };
    let known = rng.int(1, target - 1);
    missing_addend(rng, ctx, known, target)
}

/// Easy uses whole tens, medium multiples of five, hard any part.
fn making_hundred(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let known = match ctx.tier {
        DifficultyTier::Easy   => rng.int(1, 9) * 10,
        DifficultyTier::Medium => rng.int(1, 19) * 5,
        DifficultyTier::Hard   => rng.int(1, 99),
    };
    missing_addend(rng, ctx, known, 100)
}

fn word_problem(rng: &mut SeededRandom, ctx: GenerationContext, lo: i64, hi: i64, spread: i64) -> Exercise {
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    let things = WORD_THINGS[rng.int(0, WORD_THINGS.len() as i64 - 1) as usize];
    let total = a + b;

    let distractors = numeric_distractors(rng, total, 3, spread, 0)
        .into_iter()
        .map(|n| format!("{n} {things}"))
        .collect();
    let payload = choice_payload(rng, format!("{total} {things}"), distractors);

    exercise(
        ctx,
        format!(
            "There are {a} {things} in a basket. Someone puts in {b} more. \
             How many {things} are in the basket now?"
        ),
        Explanation::text(format!(
            "Putting more in means adding: {a} + {b} = {total} {things}."
        )),
        Payload::Choice(payload),
    )
}

fn small_word_problem(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let hi = match ctx.tier {
        DifficultyTier::Easy   => 5,
        DifficultyTier::Medium => 9,
        DifficultyTier::Hard   => 15,
    };
    word_problem(rng, ctx, 1, hi, 3)
}

fn two_digit_word_problem(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi) = match ctx.tier {
        DifficultyTier::Easy   => (10, 30),
        DifficultyTier::Medium => (10, 50),
        DifficultyTier::Hard   => (20, 99),
    };
    word_problem(rng, ctx, lo, hi, 10)
}

/// Two numbers of `places` digits whose column sums all stay below ten.
fn no_carry_pair(rng: &mut SeededRandom, places: u32) -> (i64, i64) {
    let (mut a, mut b) = (0, 0);
    for place in (0..places).rev() {
        let lead = place == places - 1;
        let da = if lead { rng.int(1, 8) } else { rng.int(0, 9) };
        let db = rng.int(if lead { 1 } else { 0 }, 9 - da);
        let unit = 10_i64.pow(place);
        a += da * unit;
        b += db * unit;
    }
    (a, b)
}

fn three_digit(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (a, b) = match ctx.tier {
        DifficultyTier::Easy => no_carry_pair(rng, 3),
        DifficultyTier::Medium => (rng.int(100, 499), rng.int(100, 499)),
        DifficultyTier::Hard => (rng.int(100, 999), rng.int(100, 999)),
    };
    column_sum_exercise(ctx, a, b)
}

fn with_regrouping(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let oa = rng.int(1, 9);
    let ob = rng.int(10 - oa, 9);
    let (ta, tb) = match ctx.tier {
        // Tens plus the carried one reach ten or more.
        DifficultyTier::Hard => {
            let ta = rng.int(1, 9);
            (ta, rng.int(9 - ta, 9))
        }
        // Tens plus the carried one stay below ten.
        DifficultyTier::Easy | DifficultyTier::Medium => {
            let ta = rng.int(1, 8);
            (ta, rng.int(0, 8 - ta))
        }
    };
    let (ha, hb) = match ctx.tier {
        DifficultyTier::Easy => (0, 0),
        DifficultyTier::Medium | DifficultyTier::Hard => (rng.int(1, 4), rng.int(1, 4)),
    };
    let a = ha * 100 + ta * 10 + oa;
    let b = hb * 100 + tb * 10 + ob;
    column_sum_exercise(ctx, a, b)
}

/// Round half up to a multiple of `unit`.
fn round_to(n: i64, unit: i64) -> i64 {
    (n + unit / 2) / unit * unit
}

fn estimate(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi, unit, unit_name) = match ctx.tier {
        DifficultyTier::Easy   => (11, 49, 10, "ten"),
        DifficultyTier::Medium => (11, 99, 10, "ten"),
        DifficultyTier::Hard   => (101, 999, 100, "hundred"),
    };
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    let (ra, rb) = (round_to(a, unit), round_to(b, unit));
    let estimate = ra + rb;

    let mut wrong = Vec::with_capacity(3);
    for candidate in [a + b, estimate + unit, estimate - unit, estimate + 2 * unit, estimate - 2 * unit] {
        if wrong.len() < 3 && candidate > 0 && candidate != estimate && !wrong.contains(&candidate) {
            wrong.push(candidate);
        }
    }
    let payload = choice_payload(rng, estimate.to_string(), wrong.iter().map(i64::to_string).collect());

    exercise(
        ctx,
        format!("Estimate {a} + {b} by rounding each number to the nearest {unit_name}."),
        Explanation::text("Round each number first, then add the rounded numbers.")
            .with_steps(vec![
                format!("{a} rounds to {ra}"),
                format!("{b} rounds to {rb}"),
                format!("{ra} + {rb} = {estimate}"),
            ]),
        Payload::Choice(payload),
    )
}

fn multi_digit(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (a, b) = match ctx.tier {
        DifficultyTier::Easy   => (rng.int(1000, 4999), rng.int(100, 999)),
        DifficultyTier::Medium => (rng.int(1000, 9999), rng.int(1000, 9999)),
        DifficultyTier::Hard   => (rng.int(10000, 99999), rng.int(1000, 99999)),
    };
    column_sum_exercise(ctx, a, b)
}

fn round_and_add(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (lo, hi, unit, unit_name) = match ctx.tier {
        DifficultyTier::Easy   => (100, 949, 100, "hundred"),
        DifficultyTier::Medium => (1000, 9949, 100, "hundred"),
        DifficultyTier::Hard   => (10000, 94999, 1000, "thousand"),
    };
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    let (ra, rb) = (round_to(a, unit), round_to(b, unit));
    let total = ra + rb;

    exercise(
        ctx,
        format!("Round each number to the nearest {unit_name}, then add."),
        Explanation::text(format!("Look at the digit right of the {unit_name}s place: 5 or more rounds up."))
            .with_steps(vec![
                format!("{a} rounds to {ra}"),
                format!("{b} rounds to {rb}"),
                format!("{ra} + {rb} = {total}"),
            ]),
        Payload::BlankFill(BlankFillPayload {
            template: format!("{a} + {b} ≈ [first] + [second] = [sum]"),
            blanks: vec![
                Blank { id: "first".into(), answer: ra.to_string(), hint: None },
                Blank { id: "second".into(), answer: rb.to_string(), hint: None },
                Blank { id: "sum".into(), answer: total.to_string(), hint: None },
            ],
        }),
    )
}

/// `n` hundredths (or tenths) written with exactly `places` decimals.
fn fixed(n: i64, places: u32) -> String {
    let scale = 10_i64.pow(places);
    format!("{}.{:0width$}", n / scale, n % scale, width = places as usize)
}

fn decimal(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let (places, lo, hi) = match ctx.tier {
        DifficultyTier::Easy   => (1, 1, 99),
        DifficultyTier::Medium => (2, 1, 999),
        DifficultyTier::Hard   => (2, 100, 9999),
    };
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    let answer = fixed(a + b, places);
    let trimmed = answer.trim_end_matches('0').trim_end_matches('.').to_string();
    let acceptable = if trimmed != answer { vec![trimmed] } else { Vec::new() };
    let (sa, sb) = (fixed(a, places), fixed(b, places));

    exercise(
        ctx,
        format!("What is {sa} + {sb}?"),
        Explanation::text("Line up the decimal points and add as with whole numbers.")
            .with_steps(vec![format!("{sa} + {sb} = {answer}")]),
        Payload::FreeText(FreeTextPayload {
            answer,
            acceptable,
            unit: None,
            placeholder: Some("Type a decimal".into()),
        }),
    )
}

fn fractions_like(rng: &mut SeededRandom, ctx: GenerationContext) -> Exercise {
    let max_den = match ctx.tier {
        DifficultyTier::Easy   => 6,
        DifficultyTier::Medium => 10,
        DifficultyTier::Hard   => 12,
    };
    let d = rng.int(2, max_den);
    let a = rng.int(1, d - 1);
    // Sums stay at or below one whole until hard.
    let b = match ctx.tier {
        DifficultyTier::Hard => rng.int(1, d - 1),
        DifficultyTier::Easy | DifficultyTier::Medium => rng.int(1, d - a),
    };
    let n = a + b;
    let answer = format!("{n}/{d}");

    let g = gcd(n, d);
    let mut acceptable = Vec::new();
    if n % d == 0 {
        acceptable.push((n / d).to_string());
    }
    if g > 1 && d / g != 1 {
        acceptable.push(format!("{}/{}", n / g, d / g));
    }

    exercise(
        ctx,
        format!("What is {a}/{d} + {b}/{d}?"),
        Explanation::text("The denominators match, so add the numerators and keep the denominator.")
            .with_steps(vec![format!("{a}/{d} + {b}/{d} = {}/{d}", n)]),
        Payload::FreeText(FreeTextPayload {
            answer,
            acceptable,
            unit: None,
            placeholder: Some("Type a fraction like 3/4".into()),
        }),
    )
}
