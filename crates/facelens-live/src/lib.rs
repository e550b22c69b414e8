//! facelens-live — Frame-driven match orchestration.
//!
//! Bridges the provider's per-frame detection stream to the matching
//! engine: frames go in over an mpsc channel, ranked match results come
//! out over a watch channel. Matching is synchronous within each frame,
//! so the engine never queues or overlaps work.

pub mod config;
pub mod engine;

pub use config::Config;
pub use engine::{match_frame, spawn_live_matcher, FrameStats, LiveMatcherHandle};
