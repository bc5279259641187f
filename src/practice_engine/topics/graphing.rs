use crate::practice_engine::{
    error::EngineError,
    generator::GenerationContext,
    helpers::exercise,
    models::{DifficultyTier, Exercise, Explanation, Payload, Point, PointPlotPayload, TargetShape},
    random::SeededRandom,
};

pub const PREFIX: &str = "GRAPH";

fn directions(x: i64, y: i64) -> Vec<String> {
    vec![
        "Start at the origin (0, 0).".to_string(),
        format!(
            "Move {} units {} along the x-axis.",
            x.abs(),
            if x >= 0 { "right" } else { "left" }
        ),
        format!(
            "Move {} units {} along the y-axis.",
            y.abs(),
            if y >= 0 { "up" } else { "down" }
        ),
        "Place a point at that location.".to_string(),
    ]
}

/// Plot one point on a -10..=10 grid: quadrant I below hard, any quadrant
/// at hard.
pub fn generate(rng: &mut SeededRandom, ctx: GenerationContext) -> Result<Exercise, EngineError> {
    let min = match ctx.tier {
        DifficultyTier::Hard => -9,
        DifficultyTier::Easy | DifficultyTier::Medium => 0,
    };
    let x = rng.int(min, 9);
    let y = rng.int(min, 9);

    let prompt = format!("Plot the point ({x}, {y}) on the coordinate plane.");
    let explanation = Explanation::text(format!("To plot the point ({x}, {y}):"))
        .with_steps(directions(x, y));

    let payload = PointPlotPayload {
        x_range: [-10.0, 10.0],
        y_range: [-10.0, 10.0],
        grid_step: 1.0,
        target: TargetShape::Point,
        correct_points: vec![Point { x: x as f64, y: y as f64 }],
    };

    Ok(exercise(ctx, prompt, explanation, Payload::PointPlot(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(tier: DifficultyTier, seed: u64) -> Vec<Point> {
        let mut rng = SeededRandom::new(seed);
        let ctx = GenerationContext {
            topic_id: "g5-graph-points".into(),
            tier,
            exercise_id: "GRAPH-x".into(),
        };
        match generate(&mut rng, ctx).unwrap().payload {
            Payload::PointPlot(p) => p.correct_points,
            other => panic!("expected point-plot, got {:?}", other.variant()),
        }
    }

    #[test]
    fn easy_points_stay_in_first_quadrant() {
        for seed in 0..40u64 {
            let pts = points(DifficultyTier::Easy, seed);
            assert_eq!(pts.len(), 1);
            assert!(pts[0].x >= 0.0 && pts[0].y >= 0.0 && pts[0].x <= 9.0 && pts[0].y <= 9.0);
        }
    }

    #[test]
    fn hard_is_a_single_point_in_any_quadrant() {
        let mut saw_negative = false;
        for seed in 0..40u64 {
            let pts = points(DifficultyTier::Hard, seed);
            assert_eq!(pts.len(), 1, "seed {seed}");
            assert!(pts[0].x.abs() <= 9.0 && pts[0].y.abs() <= 9.0);
            saw_negative |= pts[0].x < 0.0 || pts[0].y < 0.0;
        }
        assert!(saw_negative, "hard never left quadrant I");
    }

    #[test]
    fn explanation_walks_to_the_target() {
        let mut rng = SeededRandom::new(1);
        let ctx = GenerationContext {
            topic_id: "g5-graph-points".into(),
            tier: DifficultyTier::Hard,
            exercise_id: "GRAPH-x".into(),
        };
        let ex = generate(&mut rng, ctx).unwrap();
        let Payload::PointPlot(p) = &ex.payload else { panic!("expected point-plot") };
        let Point { x, y } = p.correct_points[0];
        assert_eq!(ex.prompt.text, format!("Plot the point ({x}, {y}) on the coordinate plane."));
        assert_eq!(ex.explanation.steps.len(), 4);
        assert!(ex.explanation.steps[1].contains(&format!("Move {} units", x.abs())));
    }
}
