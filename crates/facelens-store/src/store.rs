//! JSON-file-backed gallery store.
//!
//! The durable format is a single JSON array of face records with the
//! descriptor as a plain number sequence and `createdAt` as ISO-8601.
//! Verbose, but portable and human-inspectable; galleries are tens to
//! low hundreds of entries, not a database workload.

use facelens_core::RegisteredFace;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 64;

#[derive(Error, Debug)]
enum StoreError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed gallery record: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Change notification emitted after each successful mutation.
///
/// Replaces polling: collaborators subscribe instead of re-reading the
/// gallery on a timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    Registered { id: String },
    Removed { id: String },
    Cleared,
}

/// In-memory gallery bound to a durable JSON file.
///
/// Constructed once by the host and shared via `Arc`; the in-memory copy
/// is authoritative for the life of the process. Load failures degrade to
/// an empty gallery and write failures are logged but never surfaced:
/// the gallery is a convenience cache of locally registered faces, and a
/// corrupt cache must not take the host down.
pub struct FaceStore {
    path: PathBuf,
    faces: Mutex<Vec<RegisteredFace>>,
    events: broadcast::Sender<StoreEvent>,
}

impl FaceStore {
    /// Open the store at `path`, loading any existing gallery.
    ///
    /// An absent file is a normal first run; a corrupt one is logged and
    /// treated as empty.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let faces = match load_gallery(&path) {
            Ok(faces) => {
                tracing::debug!(path = %path.display(), count = faces.len(), "gallery loaded");
                faces
            }
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to load gallery; starting empty"
                );
                Vec::new()
            }
        };

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            path,
            faces: Mutex::new(faces),
            events,
        }
    }

    /// Subscribe to change events. Receivers created after a mutation do
    /// not see it; subscribe before mutating.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Append a face and persist the full gallery.
    pub fn add(&self, face: RegisteredFace) {
        let id = face.id.clone();
        {
            let mut faces = self.faces.lock().expect("gallery lock poisoned");
            faces.push(face);
            self.persist(&faces);
        }
        let _ = self.events.send(StoreEvent::Registered { id });
    }

    /// Remove the face with `id`. Persists only if something was removed;
    /// returns whether it was.
    pub fn remove(&self, id: &str) -> bool {
        let removed = {
            let mut faces = self.faces.lock().expect("gallery lock poisoned");
            let before = faces.len();
            faces.retain(|face| face.id != id);
            let removed = faces.len() < before;
            if removed {
                self.persist(&faces);
            }
            removed
        };
        if removed {
            let _ = self.events.send(StoreEvent::Removed { id: id.to_string() });
        }
        removed
    }

    /// Snapshot of the gallery in insertion order. A defensive copy:
    /// caller mutation never touches store state.
    pub fn list(&self) -> Vec<RegisteredFace> {
        self.faces.lock().expect("gallery lock poisoned").clone()
    }

    /// Empty the gallery and persist the empty state unconditionally.
    pub fn clear(&self) {
        {
            let mut faces = self.faces.lock().expect("gallery lock poisoned");
            faces.clear();
            self.persist(&faces);
        }
        let _ = self.events.send(StoreEvent::Cleared);
    }

    pub fn len(&self) -> usize {
        self.faces.lock().expect("gallery lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rewrite the durable record. A failed write leaves the in-memory
    /// state current and the operation logically successful; the change
    /// would be lost on restart (availability over durability).
    fn persist(&self, faces: &[RegisteredFace]) {
        if let Err(err) = write_gallery(&self.path, faces) {
            tracing::error!(
                path = %self.path.display(),
                error = %err,
                "failed to persist gallery; in-memory state unaffected"
            );
        }
    }
}

fn load_gallery(path: &Path) -> Result<Vec<RegisteredFace>, StoreError> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let data = std::fs::read(path)?;
    if data.is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_slice(&data)?)
}

fn write_gallery(path: &Path, faces: &[RegisteredFace]) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let data = serde_json::to_vec_pretty(faces)?;
    std::fs::write(path, data)?;
    Ok(())
}
