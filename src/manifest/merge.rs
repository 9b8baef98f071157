//! Merging per-unit traces into one manifest for the target.

use std::collections::{BTreeMap, BTreeSet};

use super::{Kind, MergedManifest, UnitManifest};

/// Merges unit traces into a single manifest.
///
/// Artifacts listed in `own_outputs` are the target's own per-language
/// outputs and are dropped. When units disagree about an artifact the
/// strongest kind wins (see [`Kind::priority`]). The rule label is the
/// smallest non-empty unit label, so the result does not depend on the
/// order of `units`.
#[must_use]
pub fn merge(units: &[UnitManifest], own_outputs: &BTreeSet<String>) -> MergedManifest {
    let mut success = true;
    let mut records: BTreeMap<String, Kind> = BTreeMap::new();
    let mut contained_packages = BTreeSet::new();
    let mut rule_labels = BTreeSet::new();

    for unit in units {
        success &= unit.success;
        contained_packages.extend(unit.contained_packages.iter().cloned());
        if !unit.rule_label.is_empty() {
            rule_labels.insert(unit.rule_label.as_str());
        }
        for record in &unit.records {
            if own_outputs.contains(&record.artifact_path) {
                continue;
            }
            records
                .entry(record.artifact_path.clone())
                .and_modify(|kind| *kind = kind.strongest(record.kind))
                .or_insert(record.kind);
        }
    }

    MergedManifest {
        success,
        rule_label: rule_labels.first().map(|l| (*l).to_string()).unwrap_or_default(),
        records,
        contained_packages,
    }
}
