//! Strict deps: every explicitly used artifact must be declared.

use std::collections::BTreeSet;

use super::Violation;
use crate::alias::AliasGraph;
use crate::config::EnforcementConfig;
use crate::labels::LabelResolver;
use crate::manifest::{Kind, MergedManifest};

/// Reports explicitly used artifacts whose label (or an alias of it) is not a
/// declared direct dependency.
///
/// Only explicit usage is checked; implicit and unused artifacts are visible
/// transitively and are fine. Jars that are direct or ignored are skipped
/// without resolving their label. One violation is produced per recommended
/// label, in artifact path order. Nothing is checked when the mode is off.
#[must_use]
pub fn check_strict_deps(
    manifest: &MergedManifest,
    config: &EnforcementConfig,
    aliases: &AliasGraph,
    resolver: &LabelResolver<'_>,
) -> Vec<Violation> {
    if !config.strict_mode.is_enabled() {
        return Vec::new();
    }
    let mut reported = BTreeSet::new();
    let mut violations = Vec::new();

    for path in manifest.paths_of_kind(Kind::Explicit) {
        if config.strict_ignored_jars.contains(path) || config.direct_jars.contains(path) {
            continue;
        }
        let label = resolver.resolve_label(path);
        if aliases.is_label_or_alias_in(&label, &config.direct_labels) {
            continue;
        }
        let suggested = aliases.suggested_replacement(&label);
        if reported.insert(suggested.to_string()) {
            violations.push(Violation::strict(suggested, &config.current_target, path));
        }
    }

    violations
}
