//! Registration workflow and the caller-facing gallery surface.

use crate::store::FaceStore;
use chrono::Utc;
use facelens_core::{
    find_matches, Descriptor, FaceMatch, MatchError, MatchOptions, RegisteredFace,
};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegisterError {
    #[error("face name is empty after trimming whitespace")]
    InvalidName,
}

/// Validates and commits named faces, and answers match queries against
/// the current gallery.
///
/// A thin facade over a shared [`FaceStore`]; clone-cheap via the inner
/// `Arc`, so the host can hand one to the UI and one to the live engine.
#[derive(Clone)]
pub struct FaceRegistry {
    store: Arc<FaceStore>,
}

impl FaceRegistry {
    pub fn new(store: Arc<FaceStore>) -> Self {
        Self { store }
    }

    /// Access to the underlying store, e.g. for event subscription.
    pub fn store(&self) -> &Arc<FaceStore> {
        &self.store
    }

    /// Register a new named face and return its fresh id.
    ///
    /// The name is trimmed before storage; empty-after-trim is rejected
    /// without touching the store. Duplicate display names are allowed;
    /// they are distinct entities with distinct ids.
    pub fn register_face(
        &self,
        name: &str,
        descriptor: &Descriptor,
    ) -> Result<String, RegisterError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RegisterError::InvalidName);
        }

        let id = Uuid::new_v4().to_string();
        let face = RegisteredFace {
            id: id.clone(),
            name: name.to_string(),
            descriptor: descriptor.clone(),
            created_at: Utc::now(),
        };

        tracing::info!(id = %id, name, "face registered");
        self.store.add(face);
        Ok(id)
    }

    /// Delete by id. Unknown ids return `false`, not an error.
    pub fn delete_face(&self, id: &str) -> bool {
        let removed = self.store.remove(id);
        if removed {
            tracing::info!(id, "face deleted");
        }
        removed
    }

    /// Remove every registered face.
    pub fn clear_all_faces(&self) {
        tracing::info!(count = self.store.len(), "clearing all registered faces");
        self.store.clear();
    }

    /// Current gallery snapshot, insertion order.
    pub fn list_registered_faces(&self) -> Vec<RegisteredFace> {
        self.store.list()
    }

    /// Rank the gallery against `query`.
    pub fn find_matches(
        &self,
        query: &Descriptor,
        options: &MatchOptions,
    ) -> Result<Vec<FaceMatch>, MatchError> {
        find_matches(&self.store.list(), query, options)
    }
}
