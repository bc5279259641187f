use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::exercise,
    models::{DifficultyTier, Exercise, Explanation, OrderItem, OrderingPayload, Payload},
    random::SeededRandom,
};

pub const PREFIX: &str = "SORT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderingKind {
    /// Two-digit whole numbers.
    SmallNumbers,
    /// Tenths between 0.1 and 9.9.
    Decimals,
    /// Three- and four-digit whole numbers.
    LargeNumbers,
    /// Positive and negative integers.
    Integers,
    /// Proper fractions over one denominator.
    FractionsLike,
    /// Proper fractions, each over a different denominator.
    FractionsUnlike,
}

/// `num / den` with `den > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Value {
    num: i64,
    den: i64,
}

impl Value {
    fn same_as(self, other: Value) -> bool {
        self.num * other.den == other.num * self.den
    }
}

fn over(den: i64, nums: Vec<i64>) -> Vec<Value> {
    nums.into_iter().map(|num| Value { num, den }).collect()
}

/// Distinct values and distinct denominators up to `max_den`.
fn unlike_fractions(rng: &mut SeededRandom, count: usize, max_den: i64) -> Vec<Value> {
    let mut out: Vec<Value> = Vec::with_capacity(count);
    while out.len() < count {
        let den = rng.int(2, max_den);
        let v = Value { num: rng.int(1, den - 1), den };
        if out.iter().all(|o| o.den != den && !o.same_as(v)) {
            out.push(v);
        }
    }
    out
}

impl OrderingKind {
    fn draw(self, rng: &mut SeededRandom, tier: DifficultyTier, count: usize) -> Vec<Value> {
        use DifficultyTier::{Easy, Hard};
        match (self, tier) {
            (OrderingKind::SmallNumbers, Easy) => over(1, rng.distinct_ints(count, 1, 20)),
            (OrderingKind::SmallNumbers, _)    => over(1, rng.distinct_ints(count, 10, 99)),
            (OrderingKind::Decimals, Hard)     => over(10, rng.distinct_ints(count, 1, 99)),
            (OrderingKind::Decimals, _)        => over(10, rng.distinct_ints(count, 1, 50)),
            (OrderingKind::LargeNumbers, Hard) => over(1, rng.distinct_ints(count, 1000, 9999)),
            (OrderingKind::LargeNumbers, _)    => over(1, rng.distinct_ints(count, 100, 999)),
            (OrderingKind::Integers, Easy)     => over(1, rng.distinct_ints(count, -10, 10)),
            (OrderingKind::Integers, _)        => over(1, rng.distinct_ints(count, -50, 50)),
            (OrderingKind::FractionsLike, _) => {
                let den = match tier {
                    Easy => rng.int(6, 8),
                    Hard => rng.int(8, 12),
                    DifficultyTier::Medium => rng.int(6, 10),
                };
                over(den, rng.distinct_ints(count, 1, den - 1))
            }
            (OrderingKind::FractionsUnlike, _) => {
                let max_den = match tier {
                    Easy => 6,
                    Hard => 12,
                    DifficultyTier::Medium => 10,
                };
                unlike_fractions(rng, count, max_den)
            }
        }
    }

    fn label(self, v: Value) -> String {
        match self {
            OrderingKind::Decimals => format!("{}.{}", v.num / 10, v.num % 10),
            OrderingKind::FractionsLike | OrderingKind::FractionsUnlike => format!("{}/{}", v.num, v.den),
            OrderingKind::SmallNumbers | OrderingKind::LargeNumbers | OrderingKind::Integers => v.num.to_string(),
        }
    }

    fn noun(self) -> &'static str {
        match self {
            OrderingKind::FractionsLike | OrderingKind::FractionsUnlike => "fractions",
            _ => "numbers",
        }
    }
}

/// Arrange distinct values from least to greatest.
pub fn generate(
    rng: &mut SeededRandom,
    ctx: GenerationContext,
    kind: OrderingKind,
) -> Result<Exercise, EngineError> {
    let count = match ctx.tier {
        DifficultyTier::Hard => 5,
        DifficultyTier::Easy | DifficultyTier::Medium => 4,
    };
    let mut values = kind.draw(rng, ctx.tier, count);

    let items: Vec<OrderItem> = values
        .iter()
        .map(|&v| {
            let content = kind.label(v);
            OrderItem { id: format!("item-{content}"), content }
        })
        .collect();

    values.sort_unstable_by(|a, b| (a.num * b.den).cmp(&(b.num * a.den)));
    let sorted_labels: Vec<String> = values.iter().map(|&v| kind.label(v)).collect();
    let correct_order = sorted_labels.iter().map(|l| format!("item-{l}")).collect();

    Ok(exercise(
        ctx,
        format!("Arrange these {} from least to greatest.", kind.noun()),
        Explanation::text("The items should be arranged in the following order:")
            .with_steps(sorted_labels),
        Payload::Ordering(OrderingPayload { items, correct_order }),
    ))
}
