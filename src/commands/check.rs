//! `strictdeps check` command.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::Path;

use crate::cli::EnforcementArgs;
use crate::context::ServiceContext;
use crate::manifest;
use crate::store::ManifestStore;

/// Execute the `check` command.
///
/// Enforces deps policy against an already merged (or single-unit) manifest.
/// The manifest is passed through the merger so its records are ordered and
/// de-duplicated the same way as in `merge`.
///
/// # Errors
///
/// Returns an error string on configuration or read failure, or when a check
/// in error mode reports violations.
pub fn run(
    ctx: &ServiceContext,
    deps: &Path,
    enforcement: &EnforcementArgs,
    diagnostics: &mut dyn Write,
) -> Result<(), String> {
    let unit = ManifestStore::new(ctx).load(deps).map_err(|e| e.to_string())?;
    let merged = manifest::merge(std::slice::from_ref(&unit), &BTreeSet::new());
    let (config, aliases) = super::load_config(ctx, enforcement, &merged.rule_label)?;
    super::enforce_manifest(ctx, &merged, &config, &aliases, diagnostics)
}
