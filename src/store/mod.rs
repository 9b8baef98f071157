//! Manifest store: reads unit traces and writes the merged manifest.
//!
//! All I/O goes through the `FileSystem` port so the commands can be tested
//! against an in-memory filesystem.

use std::path::Path;

use crate::context::ServiceContext;
use crate::error::{DepsError, Result};
use crate::manifest::{proto, MergedManifest, UnitManifest};

/// Reads and writes encoded dependency manifests.
pub struct ManifestStore<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ManifestStore<'a> {
    /// Creates a store backed by the context's filesystem.
    #[must_use]
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Loads and decodes one manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::Read`] or [`DepsError::Decode`]; either is fatal
    /// for the run.
    pub fn load(&self, path: &Path) -> Result<UnitManifest> {
        let bytes = self
            .ctx
            .fs
            .read(path)
            .map_err(|e| DepsError::Read { path: path.to_path_buf(), message: e.to_string() })?;
        proto::decode_unit(&bytes, path)
    }

    /// Loads every manifest in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first read or decode error.
    pub fn load_all<P: AsRef<Path>>(&self, paths: &[P]) -> Result<Vec<UnitManifest>> {
        paths.iter().map(|p| self.load(p.as_ref())).collect()
    }

    /// Encodes and writes the merged manifest.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::Write`] if the file cannot be written.
    pub fn save_merged(&self, path: &Path, merged: &MergedManifest) -> Result<()> {
        self.ctx
            .fs
            .write(path, &proto::encode_merged(merged))
            .map_err(|e| DepsError::Write { path: path.to_path_buf(), message: e.to_string() })
    }
}
