//! Unused deps: every declared label must be used, directly or via an alias.

use std::collections::BTreeSet;

use super::Violation;
use crate::alias::AliasGraph;
use crate::config::EnforcementConfig;
use crate::labels::LabelResolver;
use crate::manifest::{Kind, MergedManifest};

/// Labels the compiler explicitly used, each together with its aliases.
///
/// Artifacts without compiled classes are left out.
#[must_use]
pub fn used_labels(
    manifest: &MergedManifest,
    aliases: &AliasGraph,
    resolver: &LabelResolver<'_>,
) -> BTreeSet<String> {
    manifest
        .paths_of_kind(Kind::Explicit)
        .filter(|path| resolver.has_usable_contents(path))
        .map(|path| resolver.resolve_label(path))
        .flat_map(|label| aliases.label_with_aliases(&label).map(str::to_string).collect::<Vec<_>>())
        .collect()
}

/// Reports declared direct labels that neither they nor any alias were used
/// or ignored. One violation per label, in label order. Nothing is checked
/// when the mode is off.
#[must_use]
pub fn check_unused_deps(
    manifest: &MergedManifest,
    config: &EnforcementConfig,
    aliases: &AliasGraph,
    resolver: &LabelResolver<'_>,
) -> Vec<Violation> {
    if !config.unused_mode.is_enabled() {
        return Vec::new();
    }
    let used = used_labels(manifest, aliases, resolver);

    config
        .direct_labels
        .iter()
        .filter(|label| {
            !used.contains(*label)
                && !config.unused_ignored_labels.contains(*label)
                && !aliases.any_alias_in(label, &used)
                && !aliases.any_alias_in(label, &config.unused_ignored_labels)
        })
        .map(|label| Violation::unused(label, &config.current_target))
        .collect()
}
