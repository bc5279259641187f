use std::collections::BTreeMap;
use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Difficulty / variant metadata
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyTier {
    Easy,
    Medium,
    Hard,
}

impl DifficultyTier {
    pub const ALL: [DifficultyTier; 3] =
        [DifficultyTier::Easy, DifficultyTier::Medium, DifficultyTier::Hard];

    pub fn as_str(self) -> &'static str {
        match self {
            DifficultyTier::Easy   => "easy",
            DifficultyTier::Medium => "medium",
            DifficultyTier::Hard   => "hard",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for DifficultyTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy"   => Ok(DifficultyTier::Easy),
            "medium" => Ok(DifficultyTier::Medium),
            "hard"   => Ok(DifficultyTier::Hard),
            other    => Err(format!("unknown difficulty tier: {other}")),
        }
    }
}

/// Structural shape of an exercise and of the answer it expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    Choice,
    Ordering,
    BlankFill,
    GridFill,
    PointPlot,
    Categorize,
    NumberLine,
    FreeText,
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Variant::Choice     => "choice",
            Variant::Ordering   => "ordering",
            Variant::BlankFill  => "blank-fill",
            Variant::GridFill   => "grid-fill",
            Variant::PointPlot  => "point-plot",
            Variant::Categorize => "categorize",
            Variant::NumberLine => "number-line",
            Variant::FreeText   => "free-text",
        };
        write!(f, "{}", s)
    }
}

// ---------------------------------------------------------------------------
// Prompt / explanation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
}

impl Prompt {
    pub fn text(text: impl Into<String>) -> Self {
        Prompt { text: text.into(), image: None, audio: None }
    }
}

/// Shown to the learner after an incorrect attempt.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<String>,
}

impl Explanation {
    pub fn text(text: impl Into<String>) -> Self {
        Explanation { text: Some(text.into()), steps: Vec::new() }
    }

    pub fn with_steps(mut self, steps: Vec<String>) -> Self {
        self.steps = steps;
        self
    }
}

// ---------------------------------------------------------------------------
// Variant payloads
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub content: String,
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoicePayload {
    pub options: Vec<ChoiceOption>,
}

impl ChoicePayload {
    /// The option flagged correct. Generators always emit exactly one.
    pub fn correct_option(&self) -> Option<&ChoiceOption> {
        self.options.iter().find(|o| o.is_correct)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderingPayload {
    /// Items in display order.
    pub items: Vec<OrderItem>,
    /// Item ids in canonical order.
    pub correct_order: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blank {
    pub id: String,
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlankFillPayload {
    /// Text with `[id]` placeholders, one per entry in `blanks`.
    pub template: String,
    pub blanks: Vec<Blank>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RowKind {
    Factor,
    FactorOperator,
    Partial,
    PartialOperator,
    Result,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum GridCell {
    Given { value: String },
    Input { id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRow {
    pub kind: RowKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridFillPayload {
    pub rows: Vec<GridRow>,
    /// Widest row, in cells.
    pub max_length: usize,
    /// Expected text per input cell id.
    pub expected: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetShape {
    Point,
    Line,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointPlotPayload {
    pub x_range: [f64; 2],
    pub y_range: [f64; 2],
    pub grid_step: f64,
    pub target: TargetShape,
    pub correct_points: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryItem {
    pub id: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorizePayload {
    pub items: Vec<CategoryItem>,
    pub zones: Vec<Zone>,
    /// item id -> zone id
    pub correct_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectMode {
    SingleSelect,
    MultiSelect,
}

/// Canonical answer of a number-line exercise; the tag doubles as the
/// interaction mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "kebab-case")]
pub enum NumberLineTarget {
    SingleSelect { value: f64 },
    MultiSelect { values: Vec<f64> },
}

impl NumberLineTarget {
    pub fn mode(&self) -> SelectMode {
        match self {
            NumberLineTarget::SingleSelect { .. } => SelectMode::SingleSelect,
            NumberLineTarget::MultiSelect { .. }  => SelectMode::MultiSelect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberLinePayload {
    pub min: f64,
    pub max: f64,
    pub step: f64,
    #[serde(default)]
    pub labels: Vec<f64>,
    pub target: NumberLineTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FreeTextPayload {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub acceptable: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Exactly one variant payload; the `variant` tag is written into the flat
/// exercise record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum Payload {
    Choice(ChoicePayload),
    Ordering(OrderingPayload),
    BlankFill(BlankFillPayload),
    GridFill(GridFillPayload),
    PointPlot(PointPlotPayload),
    Categorize(CategorizePayload),
    NumberLine(NumberLinePayload),
    FreeText(FreeTextPayload),
}

impl Payload {
    pub fn variant(&self) -> Variant {
        match self {
            Payload::Choice(_)     => Variant::Choice,
            Payload::Ordering(_)   => Variant::Ordering,
            Payload::BlankFill(_)  => Variant::BlankFill,
            Payload::GridFill(_)   => Variant::GridFill,
            Payload::PointPlot(_)  => Variant::PointPlot,
            Payload::Categorize(_) => Variant::Categorize,
            Payload::NumberLine(_) => Variant::NumberLine,
            Payload::FreeText(_)   => Variant::FreeText,
        }
    }
}

// ---------------------------------------------------------------------------
// Exercise
// ---------------------------------------------------------------------------

/// One generated (or stored) exercise together with its ground truth.
///
/// Serializes to a flat record: the payload's fields sit beside `id`,
/// `topic_id` and friends, keyed by the `variant` tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub topic_id: String,
    pub difficulty: DifficultyTier,
    pub prompt: Prompt,
    #[serde(default)]
    pub explanation: Explanation,
    #[serde(flatten)]
    pub payload: Payload,
}

impl Exercise {
    pub fn variant(&self) -> Variant {
        self.payload.variant()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(record: &str) -> Result<Exercise, serde_json::Error> {
        serde_json::from_str(record)
    }

    /// Placeholder used when no generator can serve a topic.
    pub fn stub(topic_id: &str, difficulty: DifficultyTier, answer: &str) -> Exercise {
        Exercise {
            id: "stub".to_string(),
            topic_id: topic_id.to_string(),
            difficulty,
            prompt: Prompt::text(format!(
                "Generator not found. Type '{answer}' to continue."
            )),
            explanation: Explanation::text("Missing generator configuration."),
            payload: Payload::FreeText(FreeTextPayload {
                answer: answer.to_string(),
                acceptable: Vec::new(),
                unit: None,
                placeholder: None,
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Session score
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreState {
    /// Mastery score, 0..=100.
    pub score: u8,
    pub streak: u32,
    pub attempt_count: u32,
}

impl ScoreState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_score(score: u8) -> Self {
        ScoreState { score: score.min(100), ..Self::default() }
    }
}
