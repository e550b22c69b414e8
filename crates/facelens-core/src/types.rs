use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Descriptor length emitted by the reference embedding model.
///
/// Advisory only: the runtime length check in
/// [`Descriptor::distance`](crate::matcher) is the actual guard, so a
/// provider swap to a different embedding size keeps working as long as it
/// is consistent with the stored gallery.
pub const DESCRIPTOR_LEN: usize = 128;

/// Face embedding vector produced by an external recognition model.
///
/// Opaque to this crate beyond its length; serializes as a plain JSON
/// array of numbers for portability of the durable gallery format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Descriptor {
    pub values: Vec<f32>,
}

impl Descriptor {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f32>> for Descriptor {
    fn from(values: Vec<f32>) -> Self {
        Self { values }
    }
}

/// A named face committed to the gallery.
///
/// Immutable once created; the only lifecycle operation is deletion.
/// `id` is unique for the lifetime of the store, `name` is trimmed and
/// non-empty (enforced at registration, before construction).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredFace {
    pub id: String,
    pub name: String,
    pub descriptor: Descriptor,
    pub created_at: DateTime<Utc>,
}

/// Result of ranking one gallery entry against a query descriptor.
///
/// Derived per query, never stored. `confidence` is `max(0, 1 - distance)`:
/// a display score, not a calibrated probability.
#[derive(Debug, Clone, PartialEq)]
pub struct FaceMatch {
    pub face: RegisteredFace,
    pub distance: f32,
    pub confidence: f32,
}

/// Axis-aligned face bounding box in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// 2D landmark point in frame pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Expression labels of the seven-class face expression model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expression {
    Neutral,
    Happy,
    Sad,
    Angry,
    Fearful,
    Disgusted,
    Surprised,
}

impl Expression {
    pub const ALL: [Expression; 7] = [
        Expression::Neutral,
        Expression::Happy,
        Expression::Sad,
        Expression::Angry,
        Expression::Fearful,
        Expression::Disgusted,
        Expression::Surprised,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Expression::Neutral => "neutral",
            Expression::Happy => "happy",
            Expression::Sad => "sad",
            Expression::Angry => "angry",
            Expression::Fearful => "fearful",
            Expression::Disgusted => "disgusted",
            Expression::Surprised => "surprised",
        }
    }
}

/// Per-label expression probabilities for one detection.
///
/// Softmax output in practice, but independent thresholding upstream means
/// the scores need not sum to exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ExpressionScores {
    pub neutral: f32,
    pub happy: f32,
    pub sad: f32,
    pub angry: f32,
    pub fearful: f32,
    pub disgusted: f32,
    pub surprised: f32,
}

impl ExpressionScores {
    pub fn score(&self, expression: Expression) -> f32 {
        match expression {
            Expression::Neutral => self.neutral,
            Expression::Happy => self.happy,
            Expression::Sad => self.sad,
            Expression::Angry => self.angry,
            Expression::Fearful => self.fearful,
            Expression::Disgusted => self.disgusted,
            Expression::Surprised => self.surprised,
        }
    }

    /// The highest-probability label and its score.
    pub fn dominant(&self) -> (Expression, f32) {
        let mut best = Expression::Neutral;
        let mut best_score = self.neutral;
        for expression in Expression::ALL {
            let score = self.score(expression);
            if score > best_score {
                best = expression;
                best_score = score;
            }
        }
        (best, best_score)
    }
}

/// Gender label from the age/gender model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

/// Age estimate plus gender label with its own confidence.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgeGender {
    pub age: f32,
    pub gender: Gender,
    pub gender_confidence: f32,
}

/// One detected face in a frame, as delivered by the provider.
///
/// The bounding box and score are always present; every other attribute is
/// there only if it was requested for the session. Matching uses
/// `descriptor` and ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Detection {
    pub bounding_box: BoundingBox,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landmarks: Option<Vec<Point>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expressions: Option<ExpressionScores>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_gender: Option<AgeGender>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descriptor: Option<Descriptor>,
}

impl Detection {
    /// Minimal detection carrying only the mandatory attributes.
    pub fn new(bounding_box: BoundingBox, score: f32) -> Self {
        Self {
            bounding_box,
            score,
            landmarks: None,
            expressions: None,
            age_gender: None,
            descriptor: None,
        }
    }

    pub fn with_descriptor(mut self, descriptor: Descriptor) -> Self {
        self.descriptor = Some(descriptor);
        self
    }
}
