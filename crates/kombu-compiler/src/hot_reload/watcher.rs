//! File watching for style-module hot-reload.

use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind, Debouncer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::Duration;

use crate::compiler::Compiler;
use crate::error::{Error, Result};

/// Event indicating a watched source file changed.
#[derive(Debug, Clone)]
pub struct SourceChangeEvent {
    /// Path to the changed file.
    pub path: PathBuf,
    /// Type of change.
    pub kind: ChangeKind,
}

/// Type of file change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// File was modified.
    Modified,
    /// File was created.
    Created,
    /// File was removed.
    Removed,
}

/// Watches style-module sources for changes.
///
/// # Example
///
/// ```ignore
/// let mut watcher = SourceWatcher::new()?;
/// watcher.watch("src/button.css.rs")?;
///
/// // In your dev-server loop:
/// let changes = watcher.poll();
/// if !changes.is_empty() {
///     watcher.apply_changes(&mut compiler, &changes)?;
/// }
/// ```
pub struct SourceWatcher {
    debouncer: Debouncer<RecommendedWatcher>,
    rx: Receiver<std::result::Result<Vec<notify_debouncer_mini::DebouncedEvent>, notify::Error>>,
    watched_paths: HashSet<PathBuf>,
}

impl SourceWatcher {
    /// Create a new source watcher.
    pub fn new() -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let debouncer = new_debouncer(Duration::from_millis(100), tx)
            .map_err(|e| Error::HotReload(e.to_string()))?;

        Ok(Self {
            debouncer,
            rx,
            watched_paths: HashSet::new(),
        })
    }

    /// Start watching a source file.
    pub fn watch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path
            .as_ref()
            .canonicalize()
            .map_err(|e| Error::io(path.as_ref(), e))?;

        if !self.watched_paths.contains(&path) {
            self.debouncer
                .watcher()
                .watch(&path, RecursiveMode::NonRecursive)
                .map_err(|e| Error::HotReload(e.to_string()))?;

            self.watched_paths.insert(path.clone());
            tracing::info!("Watching style source: {}", path.display());
        }

        Ok(())
    }

    /// Stop watching a source file.
    pub fn unwatch(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = match path.as_ref().canonicalize() {
            Ok(p) => p,
            Err(_) => return Ok(()), // File doesn't exist, nothing to unwatch
        };

        if self.watched_paths.remove(&path) {
            let _ = self.debouncer.watcher().unwatch(&path);
            tracing::info!("Stopped watching style source: {}", path.display());
        }

        Ok(())
    }

    /// Poll for source changes.
    ///
    /// Returns a list of changed files. Call this in your dev-server
    /// loop.
    pub fn poll(&mut self) -> Vec<SourceChangeEvent> {
        let mut changes = vec![];

        loop {
            match self.rx.try_recv() {
                Ok(Ok(events)) => {
                    for event in events {
                        if event.kind == DebouncedEventKind::Any {
                            let kind = if event.path.exists() {
                                ChangeKind::Modified
                            } else {
                                ChangeKind::Removed
                            };

                            // Only report changes for files we're watching
                            if self.watched_paths.contains(&event.path) {
                                changes.push(SourceChangeEvent {
                                    path: event.path,
                                    kind,
                                });
                            }
                        }
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!("File watcher error: {}", e);
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("File watcher disconnected");
                    break;
                }
            }
        }

        // Deduplicate changes (same file may have multiple events)
        changes.sort_by(|a, b| a.path.cmp(&b.path));
        changes.dedup_by(|a, b| a.path == b.path);

        changes
    }

    /// Apply changes to the compiler.
    ///
    /// Invalidates the cache entries for each changed file (and its
    /// dependents) and recompiles the modules that are registered for
    /// the changed paths. Recompile failures are logged and do not
    /// abort the remaining changes.
    pub fn apply_changes(
        &self,
        compiler: &mut Compiler,
        changes: &[SourceChangeEvent],
    ) -> Result<()> {
        for change in changes {
            compiler.invalidate(&change.path);

            match change.kind {
                ChangeKind::Modified | ChangeKind::Created => {
                    if !compiler.is_registered(&change.path) {
                        continue;
                    }
                    tracing::info!("Recompiling style module: {}", change.path.display());

                    match compiler.compile(&change.path) {
                        Ok(result) => {
                            tracing::info!(
                                "Recompiled {} ({} bytes of CSS)",
                                change.path.display(),
                                result.css.len()
                            );
                        }
                        Err(e) => {
                            tracing::error!(
                                "Failed to recompile style module {}: {}",
                                change.path.display(),
                                e
                            );
                        }
                    }
                }
                ChangeKind::Removed => {
                    tracing::info!("Style source removed: {}", change.path.display());
                }
            }
        }

        Ok(())
    }

    /// Get the number of watched files.
    pub fn watched_count(&self) -> usize {
        self.watched_paths.len()
    }

    /// Get the watched paths.
    pub fn watched_paths(&self) -> impl Iterator<Item = &Path> {
        self.watched_paths.iter().map(|p| p.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::module::StyleModule;
    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn watcher_creation() {
        let watcher = SourceWatcher::new();
        assert!(watcher.is_ok());
    }

    #[test]
    fn watch_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("app.css.rs");

        // Create test file
        fs::write(&file_path, "// style module").unwrap();

        let mut watcher = SourceWatcher::new().unwrap();
        let result = watcher.watch(&file_path);
        assert!(result.is_ok());
        assert_eq!(watcher.watched_count(), 1);

        // Watching the same file twice is a no-op.
        watcher.watch(&file_path).unwrap();
        assert_eq!(watcher.watched_count(), 1);
    }

    #[test]
    fn unwatch_file() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("app.css.rs");
        fs::write(&file_path, "// style module").unwrap();

        let mut watcher = SourceWatcher::new().unwrap();
        watcher.watch(&file_path).unwrap();
        assert_eq!(watcher.watched_count(), 1);

        watcher.unwatch(&file_path).unwrap();
        assert_eq!(watcher.watched_count(), 0);
    }

    #[test]
    fn apply_changes_invalidates_and_recompiles() {
        let mut compiler = Compiler::new();
        compiler.register(StyleModule::new("src/app.css.rs", |sheet| {
            sheet.select(".app")?.style([("margin", "0")]);
            Ok(())
        }));
        compiler.compile("src/app.css.rs").unwrap();
        assert!(compiler.cached("src/app.css.rs").is_some());

        let watcher = SourceWatcher::new().unwrap();
        watcher
            .apply_changes(
                &mut compiler,
                &[SourceChangeEvent {
                    path: "src/app.css.rs".into(),
                    kind: ChangeKind::Modified,
                }],
            )
            .unwrap();

        // The entry was rebuilt by the recompile.
        assert!(compiler.cached("src/app.css.rs").is_some());
    }

    #[test]
    fn removed_files_only_invalidate() {
        let mut compiler = Compiler::new();
        compiler.register(StyleModule::new("src/app.css.rs", |sheet| {
            sheet.select(".app")?.style([("margin", "0")]);
            Ok(())
        }));
        compiler.compile("src/app.css.rs").unwrap();

        let watcher = SourceWatcher::new().unwrap();
        watcher
            .apply_changes(
                &mut compiler,
                &[SourceChangeEvent {
                    path: "src/app.css.rs".into(),
                    kind: ChangeKind::Removed,
                }],
            )
            .unwrap();

        assert!(compiler.cached("src/app.css.rs").is_none());
    }
}
