//! Port traits defining external boundaries.
//!
//! Each trait represents a boundary between the enforcement core and the
//! outside world (files on disk, archives on the classpath).
//! Implementations live in `src/adapters/`.

pub mod archive;
pub mod filesystem;

pub use archive::ArchiveInspector;
pub use filesystem::FileSystem;
