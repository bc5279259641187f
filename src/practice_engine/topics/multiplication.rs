//! Multiplication family, parameterized by grade.
//!
//! The registry binds one closure per `g{grade}-mul-*` topic. A grade
//! outside a generator's documented range is `TopicNotSupported`.

use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::{choice_payload, exercise, numeric_distractors},
    models::{Blank, BlankFillPayload, DifficultyTier, Exercise, Explanation, FreeTextPayload, Payload},
    random::SeededRandom,
};

pub const PREFIX: &str = "MUL";

/// (template, unit): `{a}` groups of `{b}` units.
const WORD_TEMPLATES: [(&str, &str); 3] = [
    ("A bus makes {a} trips and carries {b} passengers each time. How many passengers in all?", "passengers"),
    ("There are {a} boxes with {b} crayons in each box. How many crayons are there?", "crayons"),
    ("{a} friends each pick {b} flowers. How many flowers did they pick altogether?", "flowers"),
];

fn table_range(grade: u8, tier: DifficultyTier) -> Option<(i64, i64)> {
    let cap = match grade {
        2 => 5,
        3 => 10,
        4 => 12,
        _ => return None,
    };
    Some(match tier {
        DifficultyTier::Easy   => (1, cap.min(5)),
        DifficultyTier::Medium => (2, cap),
        DifficultyTier::Hard   => ((cap / 2).max(2), cap),
    })
}

/// Times-table fact as a four-option choice.
pub fn generate_times_table(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    grade: u8,
) -> Result<Exercise, EngineError> {
    let (lo, hi) = table_range(grade, ctx.tier).ok_or_else(|| {
        EngineError::not_supported(&ctx.topic_id, ctx.tier, format!("times tables are not defined for grade {grade}"))
    })?;
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    let product = a * b;

    let distractors = numeric_distractors(rng, product, 3, a.max(b), 0)
        .into_iter()
        .map(|n| n.to_string())
        .collect();
    let payload = choice_payload(rng, product.to_string(), distractors);

    Ok(exercise(
        ctx,
        format!("What is {a} × {b}?"),
        Explanation::text(format!("{a} groups of {b} make {product}, so {a} × {b} = {product}.")),
        Payload::Choice(payload),
    ))
}

/// Repeated addition rewritten as a product: two blanks, group count and
/// total.
pub fn generate_repeated_addition(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    grade: u8,
) -> Result<Exercise, EngineError> {
    let (max_groups, max_size) = match grade {
        1 => (3, 5),
        2 => (5, 5),
        3 => (6, 10),
        4 => (8, 12),
        _ => {
            return Err(EngineError::not_supported(
                &ctx.topic_id,
                ctx.tier,
                format!("repeated addition is not defined for grade {grade}"),
            ))
        }
    };
    let (groups_hi, size_lo) = match ctx.tier {
        DifficultyTier::Easy   => (max_groups.min(3), 1),
        DifficultyTier::Medium => (max_groups, 2),
        DifficultyTier::Hard   => (max_groups, (max_size / 2).max(2)),
    };
    let groups = rng.int(2, groups_hi);
    let size = rng.int(size_lo, max_size);
    let product = groups * size;

    let sum = vec![size.to_string(); groups as usize].join(" + ");
    let template = format!("{sum} = [groups] × {size} = [product]");

    Ok(exercise(
        ctx,
        "Write the repeated addition as a multiplication.",
        Explanation::text(format!(
            "{size} is added {groups} times, so it is {groups} groups of {size}: {groups} × {size} = {product}."
        )),
        Payload::BlankFill(BlankFillPayload {
            template,
            blanks: vec![
                Blank { id: "groups".into(), answer: groups.to_string(), hint: Some("How many times is the number added?".into()) },
                Blank { id: "product".into(), answer: product.to_string(), hint: None },
            ],
        }),
    ))
}

/// Equal-groups story problem as a four-option choice.
pub fn generate_word_problem(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    grade: u8,
) -> Result<Exercise, EngineError> {
    let cap = match grade {
        2 => 5,
        3 => 10,
        _ => {
            return Err(EngineError::not_supported(
                &ctx.topic_id,
                ctx.tier,
                format!("multiplication word problems are not defined for grade {grade}"),
            ))
        }
    };
    let lo = match ctx.tier {
        DifficultyTier::Easy | DifficultyTier::Medium => 2,
        DifficultyTier::Hard => (cap / 2).max(3),
    };
    let hi = if ctx.tier == DifficultyTier::Easy { cap.min(5) } else { cap };

    let (template, unit) = WORD_TEMPLATES[rng.int(0, WORD_TEMPLATES.len() as i64 - 1) as usize];
    let a = rng.int(lo, hi);
    let b = rng.int(lo, hi);
    let product = a * b;

    // a + b is the classic wrong operation; keep it among the distractors.
    let mut wrong: Vec<i64> = Vec::with_capacity(3);
    if a + b != product {
        wrong.push(a + b);
    }
    for n in numeric_distractors(rng, product, 3, a.max(b), 1) {
        if wrong.len() < 3 && !wrong.contains(&n) {
            wrong.push(n);
        }
    }
    let distractors = wrong.into_iter().map(|n| format!("{n} {unit}")).collect();
    let payload = choice_payload(rng, format!("{product} {unit}"), distractors);

    let prompt = template.replace("{a}", &a.to_string()).replace("{b}", &b.to_string());

    Ok(exercise(
        ctx,
        prompt,
        Explanation::text(format!(
            "We have {a} groups of {b} {unit}. So we multiply: {a} × {b} = {product} {unit}."
        )),
        Payload::Choice(payload),
    ))
}

/// Multi-digit product typed as free text. Grade 3 multiplies by a
/// multiple of ten, grade 4 works with two-digit factors.
pub fn generate_multiplying_numbers(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    grade: u8,
) -> Result<Exercise, EngineError> {
    let (a, b) = match (grade, ctx.tier) {
        (3, DifficultyTier::Easy)   => (rng.int(2, 5), rng.int(1, 5) * 10),
        (3, DifficultyTier::Medium) => (rng.int(2, 9), rng.int(1, 9) * 10),
        (3, DifficultyTier::Hard)   => (rng.int(6, 9), rng.int(5, 9) * 10),
        (4, DifficultyTier::Easy)   => (rng.int(12, 49), rng.int(2, 5)),
        (4, DifficultyTier::Medium) => (rng.int(12, 99), rng.int(2, 9)),
        (4, DifficultyTier::Hard)   => (rng.int(11, 99), rng.int(11, 99)),
        _ => {
            return Err(EngineError::not_supported(
                &ctx.topic_id,
                ctx.tier,
                format!("multiplying numbers is not defined for grade {grade}"),
            ))
        }
    };
    let product = a * b;
    let (tens, ones) = (b / 10 * 10, b % 10);
    let steps = if b % 10 == 0 {
        vec![
            format!("{a} × {} = {}", b / 10, a * (b / 10)),
            format!("Multiply by ten: {} × 10 = {product}", a * (b / 10)),
        ]
    } else if b >= 10 {
        vec![
            format!("{a} × {tens} = {}", a * tens),
            format!("{a} × {ones} = {}", a * ones),
            format!("{} + {} = {product}", a * tens, a * ones),
        ]
    } else {
        let (at, ao) = (a / 10 * 10, a % 10);
        vec![
            format!("{at} × {b} = {}", at * b),
            format!("{ao} × {b} = {}", ao * b),
            format!("{} + {} = {product}", at * b, ao * b),
        ]
    };

    Ok(exercise(
        ctx,
        format!("What is {a} × {b}?"),
        Explanation::text("Break a factor into tens and ones, multiply each part, then add.").with_steps(steps),
        Payload::FreeText(FreeTextPayload {
            answer: product.to_string(),
            acceptable: Vec::new(),
            unit: None,
            placeholder: Some("Type the product".into()),
        }),
    ))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Property {
    Identity,
    Zero,
    Commutative,
    Associative,
    Distributive,
}

impl Property {
    fn name(self) -> &'static str {
        match self {
            Property::Identity     => "identity",
            Property::Zero         => "zero",
            Property::Commutative  => "commutative",
            Property::Associative  => "associative",
            Property::Distributive => "distributive",
        }
    }
}

/// Fill the blank that a named property of multiplication determines.
/// Harder tiers add associative and distributive forms.
pub fn generate_properties(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    grade: u8,
) -> Result<Exercise, EngineError> {
    if grade != 3 {
        return Err(EngineError::not_supported(
            &ctx.topic_id,
            ctx.tier,
            format!("properties of multiplication are not defined for grade {grade}"),
        ));
    }
    let pool: &[Property] = match ctx.tier {
        DifficultyTier::Easy => &[Property::Identity, Property::Zero, Property::Commutative],
        DifficultyTier::Medium => &[Property::Identity, Property::Zero, Property::Commutative, Property::Associative],
        DifficultyTier::Hard => &[Property::Commutative, Property::Associative, Property::Distributive],
    };
    let property = pool[rng.int(0, pool.len() as i64 - 1) as usize];
    let a = rng.int(2, 9);
    let b = rng.int(2, 9);
    let c = rng.int(2, 9);

    let (template, blank, answer, rule) = match property {
        Property::Identity => (
            format!("{a} × 1 = [product]"), "product", a,
            "Any number times 1 is that number.",
        ),
        Property::Zero => (
            format!("{a} × 0 = [product]"), "product", 0,
            "Any number times 0 is 0.",
        ),
        Property::Commutative => (
            format!("{a} × {b} = [factor] × {a}"), "factor", b,
            "Changing the order of the factors does not change the product.",
        ),
        Property::Associative => (
            format!("({a} × {b}) × {c} = {a} × ([factor] × {c})"), "factor", b,
            "Changing how the factors are grouped does not change the product.",
        ),
        Property::Distributive => (
            format!("{a} × ({b} + {c}) = {a} × {b} + {a} × [factor]"), "factor", c,
            "Multiplying a sum is the same as multiplying each addend and adding the products.",
        ),
    };

    Ok(exercise(
        ctx,
        format!("Use the {} property of multiplication to fill in the blank.", property.name()),
        Explanation::text(rule).with_steps(vec![template.replace(&format!("[{blank}]"), &answer.to_string())]),
        Payload::BlankFill(BlankFillPayload {
            template,
            blanks: vec![Blank { id: blank.into(), answer: answer.to_string(), hint: None }],
        }),
    ))
}
