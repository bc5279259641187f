use std::collections::BTreeMap;

use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::exercise,
    models::{CategorizePayload, CategoryItem, DifficultyTier, Exercise, Explanation, Payload, Zone},
    random::SeededRandom,
};

pub const PREFIX: &str = "DND";

const ITEM_COUNT: usize = 6;
const ZONE_EVEN: &str = "zone-even";
const ZONE_ODD: &str = "zone-odd";

/// Sort six distinct numbers into an even zone and an odd zone.
pub fn generate_even_odd(rng: &mut SeededRandom, ctx: GenerationContext) -> Result<Exercise, EngineError> {
    let max = match ctx.tier {
        DifficultyTier::Hard => 99,
        DifficultyTier::Easy | DifficultyTier::Medium => 20,
    };
    let numbers = rng.distinct_ints(ITEM_COUNT, 1, max);

    let zones = vec![
        Zone { id: ZONE_EVEN.into(), label: "Even Numbers".into() },
        Zone { id: ZONE_ODD.into(), label: "Odd Numbers".into() },
    ];

    let mut items = Vec::with_capacity(numbers.len());
    let mut correct_mapping = BTreeMap::new();
    for n in numbers {
        let id = format!("item-{n}");
        let zone = if n % 2 == 0 { ZONE_EVEN } else { ZONE_ODD };
        correct_mapping.insert(id.clone(), zone.to_string());
        items.push(CategoryItem { id, content: n.to_string() });
    }

    Ok(exercise(
        ctx,
        "Sort the numbers into Even and Odd.",
        Explanation::text(
            "Even numbers end in 0, 2, 4, 6, or 8. Odd numbers end in 1, 3, 5, 7, or 9.",
        ),
        Payload::Categorize(CategorizePayload { items, zones, correct_mapping }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_item_is_mapped_by_parity() {
        for tier in DifficultyTier::ALL {
            let mut rng = SeededRandom::new(21);
            let ctx = GenerationContext {
                topic_id: "g2-even-odd-drag".into(),
                tier,
                exercise_id: "DND-x".into(),
            };
            let ex = generate_even_odd(&mut rng, ctx).unwrap();
            let Payload::Categorize(p) = &ex.payload else {
                panic!("expected categorize payload");
            };
            assert_eq!(p.items.len(), ITEM_COUNT);
            assert_eq!(p.correct_mapping.len(), ITEM_COUNT, "items must be distinct");
            for item in &p.items {
                let n: i64 = item.content.parse().unwrap();
                let zone = &p.correct_mapping[&item.id];
                assert_eq!(zone == ZONE_EVEN, n % 2 == 0, "{n} mapped to {zone}");
            }
        }
    }
}
