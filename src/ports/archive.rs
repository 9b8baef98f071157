//! Archive port for reading classpath jar metadata.

use std::path::Path;

/// Read-only access to the contents of a classpath archive.
///
/// Errors are reported to the caller; deciding whether an unreadable
/// archive is fatal is the label resolver's job, not the adapter's.
pub trait ArchiveInspector: Send + Sync {
    /// Returns the raw bytes of `META-INF/MANIFEST.MF`, or `None` when the
    /// archive has no manifest entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or read.
    fn manifest(&self, path: &Path)
        -> Result<Option<Vec<u8>>, Box<dyn std::error::Error + Send + Sync>>;

    /// Lists the names of all file entries (directories excluded).
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be opened or read.
    fn entry_names(&self, path: &Path)
        -> Result<Vec<String>, Box<dyn std::error::Error + Send + Sync>>;
}
