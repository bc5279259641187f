//! Client-facing projection of an exercise.
//!
//! The presentation layer renders from this view only. It keeps everything
//! needed to draw the widget and drops every field that would reveal the
//! answer: correct flags, canonical order, blank answers, expected grid
//! digits, target points, the categorize mapping, number-line targets and
//! free-text answers. The explanation is withheld too; it is returned with
//! the grade after a wrong attempt.

use serde_json::{json, Map, Value};

use crate::practice_engine::models::{
    BlankFillPayload, CategorizePayload, ChoicePayload, Exercise, FreeTextPayload,
    GridFillPayload, NumberLinePayload, OrderingPayload, Payload, PointPlotPayload,
};

fn choice(p: &ChoicePayload) -> Value {
    let options: Vec<Value> = p
        .options
        .iter()
        .map(|o| {
            let mut v = json!({ "id": o.id, "content": o.content });
            if let Some(image) = &o.image {
                v["image"] = json!(image);
            }
            v
        })
        .collect();
    json!({ "options": options })
}

fn ordering(p: &OrderingPayload) -> Value {
    json!({ "items": p.items })
}

fn blank_fill(p: &BlankFillPayload) -> Value {
    let blanks: Vec<Value> = p
        .blanks
        .iter()
        .map(|b| json!({ "id": b.id, "hint": b.hint }))
        .collect();
    json!({ "template": p.template, "blanks": blanks })
}

/// Rows carry only given digits and input slot ids, so they pass through.
fn grid_fill(p: &GridFillPayload) -> Value {
    json!({ "rows": p.rows, "max_length": p.max_length })
}

fn point_plot(p: &PointPlotPayload) -> Value {
    json!({
        "x_range": p.x_range,
        "y_range": p.y_range,
        "grid_step": p.grid_step,
        "target": p.target,
        "point_count": p.correct_points.len(),
    })
}

fn categorize(p: &CategorizePayload) -> Value {
    json!({ "items": p.items, "zones": p.zones })
}

fn number_line(p: &NumberLinePayload) -> Value {
    json!({
        "min": p.min,
        "max": p.max,
        "step": p.step,
        "labels": p.labels,
        "mode": p.target.mode(),
    })
}

fn free_text(p: &FreeTextPayload) -> Value {
    json!({ "unit": p.unit, "placeholder": p.placeholder })
}

/// Ground-truth-free JSON for rendering `exercise`.
pub fn client_view(exercise: &Exercise) -> Value {
    let body = match &exercise.payload {
        Payload::Choice(p)     => choice(p),
        Payload::Ordering(p)   => ordering(p),
        Payload::BlankFill(p)  => blank_fill(p),
        Payload::GridFill(p)   => grid_fill(p),
        Payload::PointPlot(p)  => point_plot(p),
        Payload::Categorize(p) => categorize(p),
        Payload::NumberLine(p) => number_line(p),
        Payload::FreeText(p)   => free_text(p),
    };

    let mut view = Map::new();
    view.insert("id".into(), json!(exercise.id));
    view.insert("topic_id".into(), json!(exercise.topic_id));
    view.insert("variant".into(), json!(exercise.variant()));
    view.insert("difficulty".into(), json!(exercise.difficulty));
    view.insert("prompt".into(), json!(exercise.prompt));
    if let Value::Object(fields) = body {
        view.extend(fields);
    }
    Value::Object(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::practice_engine::{generator::generate, models::DifficultyTier};

    fn view(topic: &str) -> Value {
        client_view(&generate(topic, DifficultyTier::Hard, 7).unwrap())
    }

    #[test]
    fn choice_view_has_no_correct_flags() {
        let v = view("g3-mul-tables");
        assert_eq!(v["variant"], "choice");
        let options = v["options"].as_array().unwrap();
        assert_eq!(options.len(), 4);
        assert!(options.iter().all(|o| o.get("is_correct").is_none()));
    }

    #[test]
    fn number_line_view_keeps_mode_only() {
        let v = view("nl-select-odd");
        assert_eq!(v["mode"], "multi-select");
        assert!(v.get("target").is_none());
    }

    #[test]
    fn grid_view_drops_expected_digits() {
        let v = view("g4-mul-steps");
        assert!(v.get("expected").is_none());
        assert!(v["rows"].as_array().is_some_and(|r| !r.is_empty()));
    }

    #[test]
    fn explanation_is_withheld() {
        let v = view("g1-order-numbers");
        assert!(v.get("explanation").is_none());
        assert!(v.get("correct_order").is_none());
        assert_eq!(v["prompt"]["text"], "Arrange these numbers from least to greatest.");
    }
}
