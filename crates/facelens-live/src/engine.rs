use facelens_core::{Detection, FaceMatch, MatchError, MatchOptions};
use facelens_store::FaceRegistry;
use tokio::sync::{mpsc, watch};

/// Bounds the frame backlog if the sender outpaces the loop; in practice
/// the provider's cadence (display refresh, throttled by inference cost)
/// is the real pacing.
const FRAME_CHANNEL_CAPACITY: usize = 4;

/// Running counters over the frame stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames received from the provider.
    pub total_frames: u64,
    /// Frames carrying at least one detection.
    pub detected_frames: u64,
}

/// Match the gallery against one frame's detections.
///
/// The first descriptor-bearing detection is the query; with multiple
/// faces visible, only the first is matched (there is no cross-frame
/// identity tracking, each frame stands alone). Frames with no
/// descriptor-bearing detection yield an empty result, as does an empty
/// gallery.
pub fn match_frame(
    registry: &FaceRegistry,
    detections: &[Detection],
    options: &MatchOptions,
) -> Result<Vec<FaceMatch>, MatchError> {
    let Some(query) = detections.iter().find_map(|d| d.descriptor.as_ref()) else {
        return Ok(Vec::new());
    };
    registry.find_matches(query, options)
}

/// Clone-safe view of the live matcher's outputs.
#[derive(Clone)]
pub struct LiveMatcherHandle {
    matches: watch::Receiver<Vec<FaceMatch>>,
    stats: watch::Receiver<FrameStats>,
}

impl LiveMatcherHandle {
    /// Subscribe to the published result stream. Each frame replaces the
    /// previous result set entirely.
    pub fn matches(&self) -> watch::Receiver<Vec<FaceMatch>> {
        self.matches.clone()
    }

    /// Snapshot of the most recent frame's matches.
    pub fn current_matches(&self) -> Vec<FaceMatch> {
        self.matches.borrow().clone()
    }

    pub fn stats(&self) -> FrameStats {
        *self.stats.borrow()
    }
}

/// Spawn the live matcher task.
///
/// Returns the handle plus the sender the host wires to its provider
/// callback: one `send` per delivered frame, zero or more detections
/// each. Dropping the sender ends the task cleanly.
///
/// A `DimensionMismatch` inside the loop (provider/model changed under a
/// stale gallery) is logged and degrades that frame to an empty result;
/// it never kills the task.
pub fn spawn_live_matcher(
    registry: FaceRegistry,
    options: MatchOptions,
) -> (LiveMatcherHandle, mpsc::Sender<Vec<Detection>>) {
    let (frames_tx, mut frames_rx) = mpsc::channel::<Vec<Detection>>(FRAME_CHANNEL_CAPACITY);
    let (matches_tx, matches_rx) = watch::channel(Vec::new());
    let (stats_tx, stats_rx) = watch::channel(FrameStats::default());

    tokio::spawn(async move {
        tracing::debug!(
            threshold = options.threshold,
            max_results = options.max_results,
            "live matcher started"
        );
        let mut stats = FrameStats::default();

        while let Some(detections) = frames_rx.recv().await {
            stats.total_frames += 1;
            if !detections.is_empty() {
                stats.detected_frames += 1;
            }

            let results = match match_frame(&registry, &detections, &options) {
                Ok(results) => results,
                Err(err) => {
                    tracing::warn!(error = %err, "frame match failed; clearing results");
                    Vec::new()
                }
            };

            if matches_tx.send(results).is_err() {
                break;
            }
            let _ = stats_tx.send(stats);
        }

        tracing::debug!(
            total_frames = stats.total_frames,
            "frame channel closed; live matcher exiting"
        );
    });

    (
        LiveMatcherHandle {
            matches: matches_rx,
            stats: stats_rx,
        },
        frames_tx,
    )
}
