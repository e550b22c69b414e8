//! Gallery matching: Euclidean distance, threshold filter, ranked results.
//!
//! A linear scan over the full gallery per query. Galleries are
//! human-scale (tens to low hundreds of entries), so no index structure
//! is warranted.

use crate::types::{Descriptor, FaceMatch, RegisteredFace};
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchError {
    #[error("descriptor length mismatch: query has {query} values, gallery entry has {stored}")]
    DimensionMismatch { query: usize, stored: usize },
}

/// Tunables for a single match query.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Accept/reject boundary on distance, inclusive. Anything above is
    /// "not a match", not merely low confidence.
    pub threshold: f32,
    /// Maximum number of matches returned after filtering and sorting.
    pub max_results: usize,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: 0.6,
            max_results: 5,
        }
    }
}

impl Descriptor {
    /// Euclidean distance to another descriptor.
    ///
    /// Descriptors of different length are never comparable; that means a
    /// provider/model mismatch upstream, so it is checked, not assumed.
    pub fn distance(&self, other: &Descriptor) -> Result<f32, MatchError> {
        if self.values.len() != other.values.len() {
            return Err(MatchError::DimensionMismatch {
                query: self.values.len(),
                stored: other.values.len(),
            });
        }

        let sum: f32 = self
            .values
            .iter()
            .zip(other.values.iter())
            .map(|(a, b)| (a - b) * (a - b))
            .sum();
        Ok(sum.sqrt())
    }
}

/// Rank gallery entries by similarity to `query`.
///
/// Candidates with `distance <= threshold` are kept, sorted ascending by
/// distance (ties keep gallery order), and truncated to `max_results`.
/// An empty gallery short-circuits to an empty result before any length
/// check, so a malformed query cannot fail against nothing.
pub fn find_matches(
    gallery: &[RegisteredFace],
    query: &Descriptor,
    options: &MatchOptions,
) -> Result<Vec<FaceMatch>, MatchError> {
    if gallery.is_empty() {
        return Ok(Vec::new());
    }

    let mut matches = Vec::new();
    for face in gallery {
        let distance = query.distance(&face.descriptor)?;
        if distance <= options.threshold {
            matches.push(FaceMatch {
                face: face.clone(),
                distance,
                confidence: (1.0 - distance).max(0.0),
            });
        }
    }

    // sort_by is stable: equal distances keep insertion order.
    matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    matches.truncate(options.max_results);
    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn face(id: &str, name: &str, values: Vec<f32>) -> RegisteredFace {
        RegisteredFace {
            id: id.to_string(),
            name: name.to_string(),
            descriptor: Descriptor::new(values),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_distance_identical_is_zero() {
        let a = Descriptor::new(vec![0.3, -0.2, 0.9]);
        assert_eq!(a.distance(&a).unwrap(), 0.0);
    }

    #[test]
    fn test_distance_known_value() {
        let a = Descriptor::new(vec![0.0, 0.0, 0.0]);
        let b = Descriptor::new(vec![0.0, 0.0, 0.5]);
        assert!((a.distance(&b).unwrap() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_distance_dimension_mismatch() {
        let a = Descriptor::new(vec![0.0, 0.0]);
        let b = Descriptor::new(vec![0.0, 0.0, 0.0]);
        assert_eq!(
            a.distance(&b),
            Err(MatchError::DimensionMismatch { query: 2, stored: 3 })
        );
    }

    #[test]
    fn test_threshold_accepts_single_match() {
        // Gallery {A: [0,0,0]}, query [0,0,0.5]: distance 0.5, confidence 0.5.
        let gallery = vec![face("a", "A", vec![0.0, 0.0, 0.0])];
        let query = Descriptor::new(vec![0.0, 0.0, 0.5]);

        let matches = find_matches(&gallery, &query, &MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].face.name, "A");
        assert!((matches[0].distance - 0.5).abs() < 1e-6);
        assert!((matches[0].confidence - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_tighter_threshold_rejects() {
        let gallery = vec![face("a", "A", vec![0.0, 0.0, 0.0])];
        let query = Descriptor::new(vec![0.0, 0.0, 0.5]);

        let options = MatchOptions { threshold: 0.4, ..Default::default() };
        assert!(find_matches(&gallery, &query, &options).unwrap().is_empty());
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        let gallery = vec![face("a", "A", vec![0.0])];

        let at = find_matches(
            &gallery,
            &Descriptor::new(vec![0.6]),
            &MatchOptions { threshold: 0.6, ..Default::default() },
        )
        .unwrap();
        assert_eq!(at.len(), 1);

        let above = find_matches(
            &gallery,
            &Descriptor::new(vec![0.6001]),
            &MatchOptions { threshold: 0.6, ..Default::default() },
        )
        .unwrap();
        assert!(above.is_empty());
    }

    #[test]
    fn test_results_sorted_ascending_by_distance() {
        let gallery = vec![
            face("a", "A", vec![0.3, 0.0]),
            face("b", "B", vec![0.1, 0.0]),
            face("c", "C", vec![0.2, 0.0]),
        ];
        let query = Descriptor::new(vec![0.0, 0.0]);

        let matches = find_matches(&gallery, &query, &MatchOptions::default()).unwrap();
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].distance <= pair[1].distance);
        }
        assert_eq!(matches[0].face.name, "B");
    }

    #[test]
    fn test_max_results_truncates_to_best() {
        // A at distance 0.3, B at distance 0.1; max_results = 1 keeps B.
        let gallery = vec![
            face("a", "A", vec![0.3]),
            face("b", "B", vec![0.1]),
        ];
        let query = Descriptor::new(vec![0.0]);

        let options = MatchOptions { max_results: 1, ..Default::default() };
        let matches = find_matches(&gallery, &query, &options).unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].face.name, "B");
    }

    #[test]
    fn test_ties_keep_gallery_order() {
        let gallery = vec![
            face("first", "First", vec![0.2]),
            face("second", "Second", vec![0.2]),
        ];
        let query = Descriptor::new(vec![0.0]);

        let matches = find_matches(&gallery, &query, &MatchOptions::default()).unwrap();
        assert_eq!(matches[0].face.id, "first");
        assert_eq!(matches[1].face.id, "second");
    }

    #[test]
    fn test_empty_gallery_short_circuits() {
        // Even a zero-length query succeeds against an empty gallery.
        let query = Descriptor::new(vec![]);
        let matches = find_matches(&[], &query, &MatchOptions::default()).unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_deterministic_for_fixed_inputs() {
        let gallery = vec![
            face("a", "A", vec![0.1, 0.1]),
            face("b", "B", vec![0.2, 0.2]),
        ];
        let query = Descriptor::new(vec![0.0, 0.0]);

        let first = find_matches(&gallery, &query, &MatchOptions::default()).unwrap();
        let second = find_matches(&gallery, &query, &MatchOptions::default()).unwrap();
        let ids = |m: &[FaceMatch]| m.iter().map(|x| x.face.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(&first), ids(&second));
    }

    #[test]
    fn test_confidence_clamped_at_zero() {
        let gallery = vec![face("a", "A", vec![0.0])];
        let query = Descriptor::new(vec![1.5]);

        let options = MatchOptions { threshold: 2.0, ..Default::default() };
        let matches = find_matches(&gallery, &query, &options).unwrap();
        assert_eq!(matches[0].confidence, 0.0);
    }
}
