//! Storage layer for findash
//!
//! Per-user document collections behind the [`DocumentBackend`] trait, a
//! JSON-file implementation with atomic writes, an in-memory implementation
//! for demo data, and the write-behind queue that feeds them.

pub mod backend;
pub mod file_io;
pub mod json_backend;
pub mod memory_backend;
pub mod preferences;
pub mod sync;

pub use backend::DocumentBackend;
pub use file_io::{read_json, write_json_atomic};
pub use json_backend::JsonFileBackend;
pub use memory_backend::{FailureMode, MemoryBackend};
pub use preferences::{load_preferences, save_preferences, PreferenceSave};
pub use sync::{FlushReport, PendingWrite, WriteBehind};
