//! End-to-end demo with a scripted provider standing in for the real
//! inference backend: register a face, stream a few frames through the
//! live matcher, print what it publishes.
//!
//! Run with: `RUST_LOG=debug cargo run -p facelens-live --example live_demo`

use anyhow::Result;
use facelens_core::{BoundingBox, Descriptor, Detection, DetectionProvider, DetectionRequest};
use facelens_live::{spawn_live_matcher, Config};
use facelens_store::{FaceRegistry, FaceStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Replays canned detections per frame index.
struct ScriptedProvider {
    frames: Vec<Vec<Detection>>,
}

impl DetectionProvider for ScriptedProvider {
    type Frame = usize;

    fn detect(&mut self, frame: &usize, request: &DetectionRequest) -> Vec<Detection> {
        let mut detections = self.frames.get(*frame).cloned().unwrap_or_default();
        detections.retain(|d| d.score >= request.min_confidence);
        if !request.descriptor {
            for d in &mut detections {
                d.descriptor = None;
            }
        }
        detections
    }
}

fn face_at(offset: f32) -> Detection {
    let mut values = vec![0.0f32; 128];
    values[0] = offset;
    Detection::new(
        BoundingBox { x: 120.0, y: 80.0, width: 96.0, height: 96.0 },
        0.97,
    )
    .with_descriptor(Descriptor::new(values))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env();
    let gallery_path = tempfile::tempdir()?.keep().join("gallery.json");
    let registry = FaceRegistry::new(Arc::new(FaceStore::open(&gallery_path)));

    let id = registry.register_face("Alice", &Descriptor::new(vec![0.0; 128]))?;
    println!("registered Alice as {id}");

    let mut provider = ScriptedProvider {
        frames: vec![
            vec![face_at(0.1)], // close to Alice
            vec![],             // nobody in frame
            vec![face_at(0.9)], // too far to match
        ],
    };

    let (handle, frames) = spawn_live_matcher(registry, config.match_options());
    let request = config.detection_request();
    let mut matches_rx = handle.matches();

    for frame_index in 0..3 {
        let detections = provider.detect(&frame_index, &request);
        frames.send(detections).await?;
        matches_rx.changed().await?;

        let matches = matches_rx.borrow_and_update().clone();
        match matches.first() {
            Some(best) => println!(
                "frame {frame_index}: {} (distance {:.3}, confidence {:.1}%)",
                best.face.name,
                best.distance,
                best.confidence * 100.0
            ),
            None => println!("frame {frame_index}: no match"),
        }
    }

    let stats = handle.stats();
    println!(
        "processed {} frames, {} with detections",
        stats.total_frames, stats.detected_frames
    );
    Ok(())
}
