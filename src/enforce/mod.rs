//! Strict-deps and unused-deps enforcement.
//!
//! Both checks are pure queries over the merged manifest, the configuration
//! and the alias graph. [`run_checks`] runs the enabled ones and collects an
//! [`EnforcementReport`]; whether the report fails the build is decided by
//! the per-check [`EnforcementMode`].

pub mod strict;
pub mod unused;
pub mod violation;

use std::io::{self, Write};

pub use strict::check_strict_deps;
pub use unused::check_unused_deps;
pub use violation::{Check, Violation};

use crate::alias::AliasGraph;
use crate::config::{EnforcementConfig, EnforcementMode};
use crate::labels::LabelResolver;
use crate::manifest::MergedManifest;

/// Findings of one enforcement run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementReport {
    /// Severity applied to strict-deps findings.
    pub strict_mode: EnforcementMode,
    /// Severity applied to unused-deps findings.
    pub unused_mode: EnforcementMode,
    /// Strict-deps findings.
    pub strict: Vec<Violation>,
    /// Unused-deps findings.
    pub unused: Vec<Violation>,
}

impl EnforcementReport {
    /// `true` if a check in error mode found anything.
    #[must_use]
    pub fn failed(&self) -> bool {
        (self.strict_mode == EnforcementMode::Error && !self.strict.is_empty())
            || (self.unused_mode == EnforcementMode::Error && !self.unused.is_empty())
    }

    /// `true` when neither check found anything.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.strict.is_empty() && self.unused.is_empty()
    }

    /// Writes one diagnostic block per violation, strict deps first.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to `out` fails.
    pub fn emit(&self, out: &mut dyn Write) -> io::Result<()> {
        for violation in &self.strict {
            write_block(out, self.strict_mode, violation)?;
        }
        for violation in &self.unused {
            write_block(out, self.unused_mode, violation)?;
        }
        Ok(())
    }

    /// Summary line naming the checks that failed the run.
    #[must_use]
    pub fn failure_summary(&self) -> String {
        let mut failed = Vec::new();
        if self.strict_mode == EnforcementMode::Error && !self.strict.is_empty() {
            failed.push(format!("{} strict deps violation(s)", self.strict.len()));
        }
        if self.unused_mode == EnforcementMode::Error && !self.unused.is_empty() {
            failed.push(format!("{} unused deps violation(s)", self.unused.len()));
        }
        format!("dependency enforcement failed: {}", failed.join(", "))
    }
}

fn write_block(out: &mut dyn Write, mode: EnforcementMode, violation: &Violation) -> io::Result<()> {
    let severity = if mode == EnforcementMode::Error { "error" } else { "warning" };
    writeln!(out, "{severity}: [{}] {}", violation.check, violation.message)
}

/// Runs both checks; a check in [`EnforcementMode::Off`] reports nothing and
/// resolves no labels.
#[must_use]
pub fn run_checks(
    manifest: &MergedManifest,
    config: &EnforcementConfig,
    aliases: &AliasGraph,
    resolver: &LabelResolver<'_>,
) -> EnforcementReport {
    EnforcementReport {
        strict_mode: config.strict_mode,
        unused_mode: config.unused_mode,
        strict: check_strict_deps(manifest, config, aliases, resolver),
        unused: check_unused_deps(manifest, config, aliases, resolver),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::labels::testing::FakeArchives;
    use crate::manifest::{merge, DependencyRecord, Kind, UnitManifest};

    fn unit(records: &[(&str, Kind)]) -> UnitManifest {
        UnitManifest {
            success: true,
            rule_label: "//a:b".to_string(),
            records: records.iter().map(|(p, k)| DependencyRecord::new(*p, *k)).collect(),
            contained_packages: vec![],
        }
    }

    fn offending_manifest() -> MergedManifest {
        merge(&[unit(&[("p.jar", Kind::Explicit)])], &BTreeSet::new())
    }

    #[test]
    fn off_modes_skip_resolution() {
        let archives = FakeArchives::default().with_jar("p.jar", "//l");
        let resolver = LabelResolver::new(&archives);
        let config = EnforcementConfig {
            direct_labels: BTreeSet::from(["//declared".to_string()]),
            current_target: "//a:b".to_string(),
            ..EnforcementConfig::default()
        };
        let report = run_checks(&offending_manifest(), &config, &AliasGraph::default(), &resolver);
        assert!(report.is_clean());
        assert!(!report.failed());
        assert_eq!(archives.call_count(), 0);
    }

    #[test]
    fn unused_off_does_not_touch_usable_contents() {
        let archives = FakeArchives::default().with_jar("p.jar", "//l");
        let resolver = LabelResolver::new(&archives);
        let config = EnforcementConfig {
            strict_mode: EnforcementMode::Warn,
            current_target: "//a:b".to_string(),
            ..EnforcementConfig::default()
        };
        let report = run_checks(&offending_manifest(), &config, &AliasGraph::default(), &resolver);
        assert_eq!(report.strict.len(), 1);
        // Only the label lookup for the strict check.
        assert_eq!(archives.call_count(), 1);
    }

    #[test]
    fn warn_mode_prints_but_does_not_fail() {
        let archives = FakeArchives::default().with_jar("p.jar", "//l");
        let resolver = LabelResolver::new(&archives);
        let config = EnforcementConfig {
            strict_mode: EnforcementMode::Warn,
            unused_mode: EnforcementMode::Warn,
            direct_labels: BTreeSet::from(["//declared".to_string()]),
            current_target: "//a:b".to_string(),
            ..EnforcementConfig::default()
        };
        let report = run_checks(&offending_manifest(), &config, &AliasGraph::default(), &resolver);
        assert!(!report.failed());

        let mut out = Vec::new();
        report.emit(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("warning: [strict deps] Target '//l'"));
        assert!(text.contains("warning: [unused deps] Unused dependency '//declared'"));
    }

    #[test]
    fn error_mode_fails_after_reporting_both_checks() {
        let archives = FakeArchives::default().with_jar("p.jar", "//l");
        let resolver = LabelResolver::new(&archives);
        let config = EnforcementConfig {
            strict_mode: EnforcementMode::Error,
            unused_mode: EnforcementMode::Warn,
            direct_labels: BTreeSet::from(["//declared".to_string()]),
            current_target: "//a:b".to_string(),
            ..EnforcementConfig::default()
        };
        let report = run_checks(&offending_manifest(), &config, &AliasGraph::default(), &resolver);
        assert!(report.failed());
        assert_eq!(report.unused.len(), 1);
        assert_eq!(report.failure_summary(), "dependency enforcement failed: 1 strict deps violation(s)");

        let mut out = Vec::new();
        report.emit(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("error: [strict deps]"));
        assert!(text.contains("warning: [unused deps]"));
    }

    #[test]
    fn mixed_language_target_end_to_end() {
        let merged = merge(
            &[
                unit(&[("p1", Kind::Explicit)]),
                unit(&[("p1", Kind::Unused), ("p2", Kind::Implicit)]),
            ],
            &BTreeSet::new(),
        );
        assert_eq!(merged.kind_of("p1"), Some(Kind::Explicit));
        assert_eq!(merged.kind_of("p2"), Some(Kind::Implicit));

        let archives = FakeArchives::default().with_jar("p1", "//dep:one").with_jar("p2", "//dep:two");
        let resolver = LabelResolver::new(&archives);
        let config = EnforcementConfig {
            strict_mode: EnforcementMode::Error,
            unused_mode: EnforcementMode::Error,
            direct_jars: BTreeSet::from(["p1".to_string(), "p2".to_string()]),
            direct_labels: ["p1", "p2"].iter().map(|p| resolver.resolve_label(p)).collect(),
            current_target: merged.rule_label.clone(),
            ..EnforcementConfig::default()
        };

        let report = run_checks(&merged, &config, &AliasGraph::default(), &resolver);
        assert!(report.strict.is_empty());
        assert_eq!(report.unused.len(), 1);
        assert_eq!(report.unused[0].subject_label, "//dep:two");
        assert!(report.unused[0].message.contains("buildozer 'remove deps //dep:two' //a:b"));
        assert!(report.failed());
    }
}
