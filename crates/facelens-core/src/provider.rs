//! Interface to the external inference provider.
//!
//! Detection, landmarks, expressions, age/gender, and descriptor
//! extraction all happen outside this workspace. The host wraps its
//! inference library in [`DetectionProvider`]; the engine only ever sees
//! the typed [`Detection`] values that come out.

use crate::types::Detection;

/// Which attributes the provider should compute per frame.
///
/// Each attribute is independently toggleable; descriptor extraction is
/// the only one matching depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionRequest {
    pub landmarks: bool,
    pub expressions: bool,
    pub age_gender: bool,
    pub descriptor: bool,
    /// Minimum detection confidence; lower-scoring faces are dropped by
    /// the provider before they reach the core.
    pub min_confidence: f32,
}

impl Default for DetectionRequest {
    fn default() -> Self {
        Self {
            landmarks: true,
            expressions: true,
            age_gender: true,
            descriptor: true,
            min_confidence: 0.5,
        }
    }
}

/// External inference collaborator.
///
/// The core has no control over latency or accuracy; it consumes whatever
/// the provider yields for each frame, in the provider's own ordering.
pub trait DetectionProvider {
    type Frame;

    fn detect(&mut self, frame: &Self::Frame, request: &DetectionRequest) -> Vec<Detection>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BoundingBox, Descriptor};

    /// Replays canned frames; stands in for a real inference backend.
    struct Scripted {
        frames: Vec<Vec<Detection>>,
    }

    impl DetectionProvider for Scripted {
        type Frame = usize;

        fn detect(&mut self, frame: &usize, request: &DetectionRequest) -> Vec<Detection> {
            let mut detections = self.frames.get(*frame).cloned().unwrap_or_default();
            if !request.descriptor {
                for d in &mut detections {
                    d.descriptor = None;
                }
            }
            detections
        }
    }

    #[test]
    fn test_request_toggles_descriptor() {
        let detection = Detection::new(
            BoundingBox { x: 0.0, y: 0.0, width: 10.0, height: 10.0 },
            0.8,
        )
        .with_descriptor(Descriptor::new(vec![0.0; 128]));
        let mut provider = Scripted { frames: vec![vec![detection]] };

        let with = provider.detect(&0, &DetectionRequest::default());
        assert!(with[0].descriptor.is_some());

        let without = provider.detect(
            &0,
            &DetectionRequest { descriptor: false, ..Default::default() },
        );
        assert!(without[0].descriptor.is_none());
    }
}
