//! facelens-store — Durable face gallery and registration workflow.
//!
//! [`FaceStore`] owns the persisted gallery: a single JSON record of
//! registered faces, loaded once and rewritten after every mutation.
//! [`FaceRegistry`] is the caller-facing surface built on top of it
//! (register / delete / clear / list / match).

mod registry;
mod store;

pub use registry::{FaceRegistry, RegisterError};
pub use store::{FaceStore, StoreEvent};
