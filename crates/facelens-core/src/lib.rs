//! facelens-core — Face descriptor data model and matching engine.
//!
//! Descriptors are produced by an external recognition model (128-dim
//! embeddings); this crate only stores, compares, and ranks them. All
//! neural inference sits behind the [`provider::DetectionProvider`] trait.

pub mod matcher;
pub mod provider;
pub mod types;

pub use matcher::{find_matches, MatchError, MatchOptions};
pub use provider::{DetectionProvider, DetectionRequest};
pub use types::{
    AgeGender, BoundingBox, Descriptor, Detection, Expression, ExpressionScores, FaceMatch,
    Gender, Point, RegisteredFace, DESCRIPTOR_LEN,
};
