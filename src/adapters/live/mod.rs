//! Live adapters for real external interactions.

pub mod archive;
pub mod filesystem;
