//! Answer validation dispatched on the exercise variant.
//!
//! Each payload type implements [`AnswerCheck`] with its own comparison rule;
//! [`checker`] picks the implementation from the discriminant. A new variant
//! adds one impl and one match arm without touching existing rules.
//!
//! Submissions arrive as text: a bare string for choice / free-text, JSON
//! for every structured variant. Anything that fails to decode is graded
//! incorrect.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::practice_engine::models::{
    BlankFillPayload, CategorizePayload, ChoicePayload, Exercise, FreeTextPayload,
    GridFillPayload, NumberLinePayload, NumberLineTarget, OrderingPayload, Payload, Point,
    PointPlotPayload,
};

/// Absolute per-axis tolerance for plotted points.
pub const POINT_TOLERANCE: f64 = 0.001;

/// Outcome of checking one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The submission did not decode to the shape this variant expects.
    Malformed(String),
}

impl Verdict {
    fn from_bool(correct: bool) -> Self {
        if correct { Verdict::Correct } else { Verdict::Incorrect }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Verdict::Correct)
    }
}

pub trait AnswerCheck {
    fn check(&self, submitted: &str) -> Verdict;
}

fn decode<T: DeserializeOwned>(submitted: &str) -> Result<T, Verdict> {
    serde_json::from_str(submitted).map_err(|e| Verdict::Malformed(e.to_string()))
}

fn normalize(s: &str) -> String {
    s.trim().to_lowercase()
}

/// Text form of a JSON scalar; numbers keep their JSON spelling.
fn scalar_text(v: &Value) -> Option<String> {
    match v {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl AnswerCheck for ChoicePayload {
    fn check(&self, submitted: &str) -> Verdict {
        Verdict::from_bool(
            self.correct_option()
                .is_some_and(|o| o.content == submitted),
        )
    }
}

impl AnswerCheck for OrderingPayload {
    fn check(&self, submitted: &str) -> Verdict {
        match decode::<Vec<String>>(submitted) {
            Ok(order) => Verdict::from_bool(order == self.correct_order),
            Err(v) => v,
        }
    }
}

impl AnswerCheck for BlankFillPayload {
    fn check(&self, submitted: &str) -> Verdict {
        let answers = match decode::<BTreeMap<String, Value>>(submitted) {
            Ok(a) => a,
            Err(v) => return v,
        };
        Verdict::from_bool(self.blanks.iter().all(|blank| {
            answers
                .get(&blank.id)
                .and_then(Value::as_str)
                .is_some_and(|given| normalize(given) == normalize(&blank.answer))
        }))
    }
}

impl AnswerCheck for GridFillPayload {
    fn check(&self, submitted: &str) -> Verdict {
        let answers = match decode::<BTreeMap<String, Value>>(submitted) {
            Ok(a) => a,
            Err(v) => return v,
        };
        Verdict::from_bool(self.expected.iter().all(|(id, want)| {
            answers
                .get(id)
                .and_then(scalar_text)
                .is_some_and(|given| given.trim() == want.trim())
        }))
    }
}

fn by_x_then_y(a: &Point, b: &Point) -> Ordering {
    a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y))
}

impl AnswerCheck for PointPlotPayload {
    // Line targets are graded on their defining points, same as point targets.
    fn check(&self, submitted: &str) -> Verdict {
        let mut given = match decode::<Vec<Point>>(submitted) {
            Ok(p) => p,
            Err(v) => return v,
        };
        if given.len() != self.correct_points.len() {
            return Verdict::Incorrect;
        }
        let mut want = self.correct_points.clone();
        given.sort_by(by_x_then_y);
        want.sort_by(by_x_then_y);
        Verdict::from_bool(given.iter().zip(&want).all(|(g, w)| {
            (g.x - w.x).abs() < POINT_TOLERANCE && (g.y - w.y).abs() < POINT_TOLERANCE
        }))
    }
}

impl AnswerCheck for CategorizePayload {
    fn check(&self, submitted: &str) -> Verdict {
        let placed = match decode::<BTreeMap<String, Value>>(submitted) {
            Ok(p) => p,
            Err(v) => return v,
        };
        Verdict::from_bool(self.correct_mapping.iter().all(|(item, zone)| {
            placed.get(item).and_then(Value::as_str) == Some(zone.as_str())
        }))
    }
}

fn sorted_set(values: &[f64]) -> Vec<f64> {
    let mut v = values.to_vec();
    v.sort_by(f64::total_cmp);
    v.dedup();
    v
}

impl AnswerCheck for NumberLinePayload {
    fn check(&self, submitted: &str) -> Verdict {
        let selection = match decode::<Vec<f64>>(submitted) {
            Ok(s) => s,
            Err(v) => return v,
        };
        Verdict::from_bool(match &self.target {
            NumberLineTarget::MultiSelect { values } => sorted_set(&selection) == sorted_set(values),
            NumberLineTarget::SingleSelect { value } => selection.len() == 1 && selection[0] == *value,
        })
    }
}

impl AnswerCheck for FreeTextPayload {
    fn check(&self, submitted: &str) -> Verdict {
        let given = normalize(submitted);
        Verdict::from_bool(
            given == normalize(&self.answer)
                || self.acceptable.iter().any(|a| normalize(a) == given),
        )
    }
}

/// The comparison rule registered for a payload's variant.
pub fn checker(payload: &Payload) -> &dyn AnswerCheck {
    match payload {
        Payload::Choice(p)     => p,
        Payload::Ordering(p)   => p,
        Payload::BlankFill(p)  => p,
        Payload::GridFill(p)   => p,
        Payload::PointPlot(p)  => p,
        Payload::Categorize(p) => p,
        Payload::NumberLine(p) => p,
        Payload::FreeText(p)   => p,
    }
}

/// Full verdict, distinguishing malformed submissions from wrong ones.
pub fn judge(exercise: &Exercise, submitted: &str) -> Verdict {
    checker(&exercise.payload).check(submitted)
}

/// Grade a submission. Never fails: malformed input is simply incorrect.
pub fn validate(exercise: &Exercise, submitted: &str) -> bool {
    let verdict = judge(exercise, submitted);
    if let Verdict::Malformed(reason) = &verdict {
        debug!(
            target: "practice_engine",
            id = %exercise.id, variant = %exercise.variant(), %reason,
            "malformed submission graded incorrect"
        );
    }
    verdict.is_correct()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice_engine::models::{
        Blank, CategoryItem, ChoiceOption, DifficultyTier, Explanation, OrderItem, Prompt,
        TargetShape, Zone,
    };

    fn ex(payload: Payload) -> Exercise {
        Exercise {
            id: "t".into(),
            topic_id: "t".into(),
            difficulty: DifficultyTier::Medium,
            prompt: Prompt::text("q"),
            explanation: Explanation::default(),
            payload,
        }
    }

    fn choice() -> Exercise {
        ex(Payload::Choice(ChoicePayload {
            options: vec![
                ChoiceOption { id: "A".into(), content: "5 passengers".into(), is_correct: false, image: None },
                ChoiceOption { id: "B".into(), content: "10 passengers".into(), is_correct: true, image: None },
            ],
        }))
    }

    fn ordering() -> Exercise {
        ex(Payload::Ordering(OrderingPayload {
            items: ["44", "25", "82", "38"]
                .iter()
                .map(|c| OrderItem { id: format!("item-{c}"), content: c.to_string() })
                .collect(),
            correct_order: vec!["item-25".into(), "item-38".into(), "item-44".into(), "item-82".into()],
        }))
    }

    fn blanks() -> Exercise {
        ex(Payload::BlankFill(BlankFillPayload {
            template: "[a] + [b] = [c]".into(),
            blanks: vec![
                Blank { id: "a".into(), answer: "Three".into(), hint: None },
                Blank { id: "b".into(), answer: "4".into(), hint: None },
                Blank { id: "c".into(), answer: "7".into(), hint: None },
            ],
        }))
    }

    fn grid() -> Exercise {
        let expected = [("res-0", "1"), ("res-1", "0"), ("res-2", "8")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ex(Payload::GridFill(GridFillPayload { rows: vec![], max_length: 3, expected }))
    }

    fn plot(points: &[(f64, f64)]) -> Exercise {
        ex(Payload::PointPlot(PointPlotPayload {
            x_range: [-10.0, 10.0],
            y_range: [-10.0, 10.0],
            grid_step: 1.0,
            target: TargetShape::Point,
            correct_points: points.iter().map(|&(x, y)| Point { x, y }).collect(),
        }))
    }

    fn categorize() -> Exercise {
        ex(Payload::Categorize(CategorizePayload {
            items: vec![
                CategoryItem { id: "item-4".into(), content: "4".into() },
                CategoryItem { id: "item-7".into(), content: "7".into() },
            ],
            zones: vec![
                Zone { id: "zone-even".into(), label: "Even".into() },
                Zone { id: "zone-odd".into(), label: "Odd".into() },
            ],
            correct_mapping: [("item-4", "zone-even"), ("item-7", "zone-odd")]
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }))
    }

    fn number_line(target: NumberLineTarget) -> Exercise {
        ex(Payload::NumberLine(NumberLinePayload {
            min: 18.0,
            max: 28.0,
            step: 1.0,
            labels: vec![],
            target,
        }))
    }

    fn free_text() -> Exercise {
        ex(Payload::FreeText(FreeTextPayload {
            answer: "Seven".into(),
            acceptable: vec!["7".into()],
            unit: None,
            placeholder: None,
        }))
    }

    #[test]
    fn choice_matches_correct_content_exactly() {
        let e = choice();
        assert!(validate(&e, "10 passengers"));
        assert!(!validate(&e, "5 passengers"));
        assert!(!validate(&e, "B"));
    }

    #[test]
    fn ordering_requires_exact_sequence() {
        let e = ordering();
        assert!(validate(&e, r#"["item-25","item-38","item-44","item-82"]"#));
        assert!(!validate(&e, r#"["item-82","item-44","item-38","item-25"]"#));
        assert!(!validate(&e, r#"["item-25","item-38","item-44"]"#));
    }

    #[test]
    fn blank_fill_is_trimmed_and_case_insensitive() {
        let e = blanks();
        assert!(validate(&e, r#"{"a":"  three ","b":"4","c":" 7"}"#));
    }

    #[test]
    fn blank_fill_single_mismatch_or_omission_fails() {
        let e = blanks();
        assert!(!validate(&e, r#"{"a":"three","b":"4","c":"8"}"#));
        assert!(!validate(&e, r#"{"a":"three","b":"4"}"#));
        assert!(!validate(&e, r#"{"a":"three","b":4,"c":"7"}"#));
    }

    #[test]
    fn grid_fill_compares_trimmed_text_and_accepts_numbers() {
        let e = grid();
        assert!(validate(&e, r#"{"res-0":"1","res-1":" 0 ","res-2":"8"}"#));
        assert!(validate(&e, r#"{"res-0":1,"res-1":0,"res-2":8}"#));
        assert!(!validate(&e, r#"{"res-0":"1","res-1":"00","res-2":"8"}"#));
        assert!(!validate(&e, r#"{"res-0":"1","res-2":"8"}"#));
    }

    #[test]
    fn point_plot_ignores_order_and_respects_tolerance() {
        let e = plot(&[(-8.0, 1.0), (4.0, -3.0)]);
        assert!(validate(&e, r#"[{"x":4,"y":-3},{"x":-8,"y":1}]"#));
        assert!(validate(&e, r#"[{"x":-8.0005,"y":1.0005},{"x":4.0005,"y":-2.9995}]"#));
        assert!(!validate(&e, r#"[{"x":-8.002,"y":1.002},{"x":4,"y":-3}]"#));
        assert!(!validate(&e, r#"[{"x":-8,"y":1}]"#));
    }

    #[test]
    fn categorize_ignores_extra_items_only() {
        let e = categorize();
        assert!(validate(&e, r#"{"item-4":"zone-even","item-7":"zone-odd","item-99":"zone-odd"}"#));
        assert!(!validate(&e, r#"{"item-4":"zone-even"}"#));
        assert!(!validate(&e, r#"{"item-4":"zone-odd","item-7":"zone-odd"}"#));
    }

    #[test]
    fn number_line_multi_select_is_a_set() {
        let e = number_line(NumberLineTarget::MultiSelect { values: vec![19.0, 21.0, 23.0, 25.0, 27.0] });
        assert!(validate(&e, "[27,25,23,21,19]"));
        assert!(!validate(&e, "[19,21,23,25]"));
        assert!(!validate(&e, "[19,21,23,25,27,28]"));
    }

    #[test]
    fn number_line_single_select_needs_exactly_one_value() {
        let e = number_line(NumberLineTarget::SingleSelect { value: 24.0 });
        assert!(validate(&e, "[24]"));
        assert!(!validate(&e, "[24,25]"));
        assert!(!validate(&e, "[]"));
        assert!(!validate(&e, "[23]"));
    }

    #[test]
    fn free_text_accepts_normalized_alternates() {
        let e = free_text();
        assert!(validate(&e, "  SEVEN "));
        assert!(validate(&e, "7"));
        assert!(!validate(&e, "six"));
    }

    #[test]
    fn malformed_payloads_are_incorrect_not_errors() {
        for (e, bad) in [
            (ordering(), "item-25,item-38"),
            (blanks(), "[1,2,3]"),
            (grid(), "not json"),
            (plot(&[(1.0, 1.0)]), r#"{"x":1,"y":1}"#),
            (categorize(), "\"zone-even\""),
            (number_line(NumberLineTarget::SingleSelect { value: 1.0 }), r#"["one"]"#),
        ] {
            assert!(matches!(judge(&e, bad), Verdict::Malformed(_)), "{bad}");
            assert!(!validate(&e, bad));
        }
    }

    #[test]
    fn only_a_correct_verdict_is_correct() {
        assert!(Verdict::Correct.is_correct());
        assert!(!Verdict::Incorrect.is_correct());
        assert!(!Verdict::Malformed("bad json".into()).is_correct());
        let e = ordering();
        assert_eq!(judge(&e, "nope").is_correct(), validate(&e, "nope"));
    }
}
