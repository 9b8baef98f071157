//! Service context bundling all port trait objects.

use crate::adapters::live::archive::LiveArchiveInspector;
use crate::adapters::live::filesystem::LiveFileSystem;
use crate::ports::archive::ArchiveInspector;
use crate::ports::filesystem::FileSystem;

/// Bundles all port trait objects into a single context.
///
/// Each field provides access to one external boundary. Tests build a
/// context from in-memory fakes with [`ServiceContext::new`].
pub struct ServiceContext {
    /// Filesystem for manifest and config I/O.
    pub fs: Box<dyn FileSystem>,
    /// Archive reader used for label resolution.
    pub archives: Box<dyn ArchiveInspector>,
}

impl ServiceContext {
    /// Creates a context from explicit adapters.
    #[must_use]
    pub fn new(fs: Box<dyn FileSystem>, archives: Box<dyn ArchiveInspector>) -> Self {
        Self { fs, archives }
    }

    /// Creates a live context reading the real disk.
    #[must_use]
    pub fn live() -> Self {
        Self::new(Box::new(LiveFileSystem), Box::new(LiveArchiveInspector))
    }
}
