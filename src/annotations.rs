// Annotation bookkeeping across checked files
//
// An explicit store object owned by whoever manages view lifecycles,
// looked up by file path. Nothing here is process-global.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::diagnostics::FileAnnotations;

/// Per-file annotations, keyed by file path.
///
/// Entries are created on first check, wholly replaced on re-check, and
/// removed when the consumer discards the file. Nothing persists across
/// process restarts.
#[derive(Debug, Default)]
pub struct AnnotationStore {
    files: HashMap<PathBuf, FileAnnotations>,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all annotations for `path` with a fresh check result.
    /// Prior annotations for the file are discarded, never merged.
    pub fn replace(&mut self, path: impl Into<PathBuf>, annotations: FileAnnotations) {
        self.files.insert(path.into(), annotations);
    }

    pub fn get(&self, path: &Path) -> Option<&FileAnnotations> {
        self.files.get(path)
    }

    /// Message for a single line, for status-bar style lookups.
    pub fn message_at(&self, path: &Path, line: usize) -> Option<&str> {
        self.files.get(path).and_then(|a| a.message_at(line))
    }

    /// Drop the annotations for a file but keep the entry, mirroring a
    /// cleared view that is still open.
    pub fn clear(&mut self, path: &Path) {
        if let Some(annotations) = self.files.get_mut(path) {
            *annotations = FileAnnotations::new();
        }
    }

    /// Forget a file entirely (its view was closed).
    pub fn remove(&mut self, path: &Path) {
        self.files.remove(path);
    }

    pub fn files(&self) -> impl Iterator<Item = &Path> {
        self.files.keys().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
