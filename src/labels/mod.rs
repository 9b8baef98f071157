//! Label resolution: maps classpath artifacts to the build targets that own them.
//!
//! Jars produced by the build carry a `Target-Label` attribute in their
//! manifest. Jars without one (or that can't be read at all) resolve to their
//! own path so the checks stay total.

pub mod attributes;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use crate::ports::archive::ArchiveInspector;

/// Manifest attribute naming the owning build target.
pub const TARGET_LABEL_ATTRIBUTE: &str = "Target-Label";

/// Suffix of entries the compiler can actually resolve symbols from.
const COMPILED_ENTRY_SUFFIX: &str = ".class";

/// Resolves and memoizes artifact labels for one enforcement run.
///
/// Lookups are read-only, so results are cached per path, failures included.
/// The caches are mutex-guarded; a resolver can be shared across threads.
pub struct LabelResolver<'a> {
    archives: &'a dyn ArchiveInspector,
    labels: Mutex<HashMap<String, String>>,
    usable: Mutex<HashMap<String, bool>>,
}

impl<'a> LabelResolver<'a> {
    /// Creates a resolver reading archives through `archives`.
    #[must_use]
    pub fn new(archives: &'a dyn ArchiveInspector) -> Self {
        Self { archives, labels: Mutex::new(HashMap::new()), usable: Mutex::new(HashMap::new()) }
    }

    /// Returns the owning target label of the artifact at `path`, or `path`
    /// itself when the archive is unreadable or carries no label.
    #[must_use]
    pub fn resolve_label(&self, path: &str) -> String {
        if let Some(label) = self.labels.lock().unwrap_or_else(PoisonError::into_inner).get(path) {
            return label.clone();
        }
        let label = self.read_label(path).unwrap_or_else(|| path.to_string());
        self.labels
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path.to_string(), label.clone());
        label
    }

    /// Returns `true` if the artifact holds at least one compiled class.
    ///
    /// Resource-only and metadata-only jars can never show up as explicitly
    /// used, so unused-deps accounting skips them. Unreadable archives count
    /// as having no usable contents.
    #[must_use]
    pub fn has_usable_contents(&self, path: &str) -> bool {
        if let Some(usable) = self.usable.lock().unwrap_or_else(PoisonError::into_inner).get(path) {
            return *usable;
        }
        let usable = self
            .archives
            .entry_names(Path::new(path))
            .map(|names| names.iter().any(|n| n.ends_with(COMPILED_ENTRY_SUFFIX)))
            .unwrap_or(false);
        self.usable.lock().unwrap_or_else(PoisonError::into_inner).insert(path.to_string(), usable);
        usable
    }

    fn read_label(&self, path: &str) -> Option<String> {
        let bytes = self.archives.manifest(Path::new(path)).ok()??;
        let manifest = String::from_utf8_lossy(&bytes);
        attributes::main_attribute(&manifest, TARGET_LABEL_ATTRIBUTE)
            .map(|label| label.trim().to_string())
            .filter(|label| !label.is_empty())
    }
}
