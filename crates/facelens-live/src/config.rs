use facelens_core::{DetectionRequest, MatchOptions};
use std::path::PathBuf;

/// Host configuration, loaded from environment variables.
pub struct Config {
    /// Path to the durable gallery record.
    pub gallery_path: PathBuf,
    /// Match accept/reject distance boundary (inclusive).
    pub match_threshold: f32,
    /// Maximum ranked matches returned per query.
    pub max_results: usize,
    /// Minimum detection confidence forwarded to the provider.
    pub min_confidence: f32,
    /// Whether the provider should compute landmarks per frame.
    pub detect_landmarks: bool,
    /// Whether the provider should compute expression probabilities.
    pub detect_expressions: bool,
    /// Whether the provider should estimate age and gender.
    pub detect_age_gender: bool,
    /// Whether the provider should extract descriptors (required for
    /// registration and matching).
    pub detect_descriptor: bool,
}

impl Config {
    /// Load configuration from `FACELENS_*` environment variables with
    /// defaults.
    pub fn from_env() -> Self {
        let data_dir = std::env::var("XDG_DATA_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| {
                let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
                PathBuf::from(home).join(".local/share")
            })
            .join("facelens");

        let gallery_path = std::env::var("FACELENS_GALLERY_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("gallery.json"));

        Self {
            gallery_path,
            match_threshold: env_f32("FACELENS_MATCH_THRESHOLD", 0.6),
            max_results: env_usize("FACELENS_MAX_RESULTS", 5),
            min_confidence: env_f32("FACELENS_MIN_CONFIDENCE", 0.5),
            detect_landmarks: env_bool("FACELENS_DETECT_LANDMARKS", true),
            detect_expressions: env_bool("FACELENS_DETECT_EXPRESSIONS", true),
            detect_age_gender: env_bool("FACELENS_DETECT_AGE_GENDER", true),
            detect_descriptor: env_bool("FACELENS_DETECT_DESCRIPTOR", true),
        }
    }

    pub fn match_options(&self) -> MatchOptions {
        MatchOptions {
            threshold: self.match_threshold,
            max_results: self.max_results,
        }
    }

    /// The per-frame attribute request handed to the provider.
    pub fn detection_request(&self) -> DetectionRequest {
        DetectionRequest {
            landmarks: self.detect_landmarks,
            expressions: self.detect_expressions,
            age_gender: self.detect_age_gender,
            descriptor: self.detect_descriptor,
            min_confidence: self.min_confidence,
        }
    }
}

fn env_f32(key: &str, default: f32) -> f32 {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key).map(|v| v != "0").unwrap_or(default)
}
