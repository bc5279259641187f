use std::collections::BTreeMap;

use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::{digits, exercise},
    models::{
        DifficultyTier, Exercise, Explanation, GridCell, GridFillPayload, GridRow, Payload, RowKind,
    },
    random::SeededRandom,
};

pub const PREFIX: &str = "VM";

fn given_row(kind: RowKind, operator: Option<&str>, n: i64) -> GridRow {
    GridRow {
        kind,
        operator: operator.map(str::to_string),
        cells: digits(n).into_iter().map(|value| GridCell::Given { value }).collect(),
    }
}

/// Input cells `{prefix}-0..` for the digits of `n`; records the expected
/// digit for each.
fn input_cells(prefix: &str, n: i64, expected: &mut BTreeMap<String, String>) -> Vec<GridCell> {
    digits(n)
        .into_iter()
        .enumerate()
        .map(|(idx, d)| {
            let id = format!("{prefix}-{idx}");
            expected.insert(id.clone(), d);
            GridCell::Input { id }
        })
        .collect()
}

/// Long multiplication scaffold: 2-digit × 1-digit, or 2-digit × 2-digit
/// with partial products at hard.
pub fn generate(rng: &mut SeededRandom, ctx: GenerationContext) -> Result<Exercise, EngineError> {
    let a = rng.int(12, 89);
    let b = match ctx.tier {
        DifficultyTier::Hard => rng.int(11, 19),
        DifficultyTier::Easy | DifficultyTier::Medium => rng.int(2, 9),
    };
    let total = a * b;

    let mut expected = BTreeMap::new();
    let mut rows = vec![
        given_row(RowKind::Factor, None, a),
        given_row(RowKind::FactorOperator, Some("×"), b),
    ];
    let mut steps = Vec::new();

    if b > 9 {
        let ones = b % 10;
        let tens = b / 10;
        let p0 = a * ones;
        let p1 = a * tens;

        rows.push(GridRow {
            kind: RowKind::Partial,
            operator: None,
            cells: input_cells("p0", p0, &mut expected),
        });
        // Shifted one place: the trailing zero is given.
        let mut shifted = input_cells("p1", p1, &mut expected);
        shifted.push(GridCell::Given { value: "0".into() });
        rows.push(GridRow {
            kind: RowKind::PartialOperator,
            operator: Some("+".into()),
            cells: shifted,
        });

        steps.push(format!("Multiply {a} by the ones digit {ones}: {a} × {ones} = {p0}."));
        steps.push(format!(
            "Multiply {a} by the tens digit {tens}: {a} × {tens} = {p1}, written one place left as {}.",
            p1 * 10
        ));
        steps.push(format!("Add the partial products: {p0} + {} = {total}.", p1 * 10));
    }

    rows.push(GridRow {
        kind: RowKind::Result,
        operator: None,
        cells: input_cells("res", total, &mut expected),
    });

    let max_length = rows.iter().map(|r| r.cells.len()).max().unwrap_or(0);

    Ok(exercise(
        ctx,
        "Fill in the missing numbers to complete the multiplication.",
        Explanation::text(format!("Multiply {a} by {b}. {a} × {b} = {total}.")).with_steps(steps),
        Payload::GridFill(GridFillPayload { rows, max_length, expected }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(tier: DifficultyTier, seed: u64) -> GridFillPayload {
        let mut rng = SeededRandom::new(seed);
        let ctx = GenerationContext {
            topic_id: "g4-mul-steps".into(),
            tier,
            exercise_id: "VM-x".into(),
        };
        match generate(&mut rng, ctx).unwrap().payload {
            Payload::GridFill(p) => p,
            other => panic!("expected grid-fill, got {:?}", other.variant()),
        }
    }

    fn row_number(row: &GridRow, expected: &BTreeMap<String, String>) -> i64 {
        let text: String = row
            .cells
            .iter()
            .map(|c| match c {
                GridCell::Given { value } => value.clone(),
                GridCell::Input { id } => expected[id].clone(),
            })
            .collect();
        text.parse().unwrap()
    }

    #[test]
    fn result_row_holds_the_product() {
        for tier in DifficultyTier::ALL {
            for seed in 0..20u64 {
                let p = grid(tier, seed);
                let a = row_number(&p.rows[0], &p.expected);
                let b = row_number(&p.rows[1], &p.expected);
                let result = row_number(p.rows.last().unwrap(), &p.expected);
                assert_eq!(result, a * b, "{tier} seed={seed}");
                assert!(p.rows.iter().all(|r| r.cells.len() <= p.max_length));
            }
        }
    }

    #[test]
    fn hard_adds_two_partial_product_rows() {
        let p = grid(DifficultyTier::Hard, 8);
        assert_eq!(p.rows.len(), 5);
        assert_eq!(p.rows[2].kind, RowKind::Partial);
        assert_eq!(p.rows[3].kind, RowKind::PartialOperator);
        let a = row_number(&p.rows[0], &p.expected);
        let b = row_number(&p.rows[1], &p.expected);
        let p0 = row_number(&p.rows[2], &p.expected);
        let p1 = row_number(&p.rows[3], &p.expected);
        assert_eq!(p0, a * (b % 10));
        assert_eq!(p1, a * (b / 10) * 10);
    }

    #[test]
    fn easy_has_no_partial_rows() {
        let p = grid(DifficultyTier::Easy, 8);
        assert_eq!(p.rows.len(), 3);
        assert!(p.expected.keys().all(|k| k.starts_with("res-")));
    }
}
