//! Hot-reload support for style modules.
//!
//! This module is only available with the `hot-reload` feature.

mod watcher;

pub use watcher::{ChangeKind, SourceChangeEvent, SourceWatcher};
