//! Dependency manifest model.
//!
//! A [`UnitManifest`] is the trace one compilation unit produced; a
//! [`MergedManifest`] is the combined view for the whole target. Both are
//! read from and written to the binary format in [`proto`].

pub mod merge;
pub mod proto;

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

pub use merge::merge;

/// How the compiler used an artifact during one compilation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Needed to resolve symbols in the unit's own sources.
    Explicit,
    /// Reached transitively through another artifact.
    Implicit,
    /// On the classpath but never touched.
    Unused,
    /// Not classified by any unit.
    Incomplete,
}

impl Kind {
    /// Rank used when the same artifact is classified differently by
    /// several units. Higher wins.
    #[must_use]
    pub fn priority(self) -> u8 {
        match self {
            Self::Explicit => 3,
            Self::Implicit => 2,
            Self::Unused => 1,
            Self::Incomplete => 0,
        }
    }

    /// Returns whichever of the two kinds has the higher priority.
    #[must_use]
    pub fn strongest(self, other: Self) -> Self {
        if other.priority() > self.priority() {
            other
        } else {
            self
        }
    }

    /// Decodes the wire enum value.
    #[must_use]
    pub fn from_wire(value: i32) -> Option<Self> {
        match value {
            0 => Some(Self::Explicit),
            1 => Some(Self::Implicit),
            2 => Some(Self::Unused),
            3 => Some(Self::Incomplete),
            _ => None,
        }
    }

    /// Encodes to the wire enum value.
    #[must_use]
    pub fn to_wire(self) -> i32 {
        match self {
            Self::Explicit => 0,
            Self::Implicit => 1,
            Self::Unused => 2,
            Self::Incomplete => 3,
        }
    }

    /// Lowercase name used in text output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::Implicit => "implicit",
            Self::Unused => "unused",
            Self::Incomplete => "incomplete",
        }
    }
}

/// One artifact as seen by one trace.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DependencyRecord {
    /// Path of the artifact (usually a jar).
    pub artifact_path: String,
    /// How it was used.
    pub kind: Kind,
}

impl DependencyRecord {
    /// Convenience constructor.
    #[must_use]
    pub fn new(artifact_path: impl Into<String>, kind: Kind) -> Self {
        Self { artifact_path: artifact_path.into(), kind }
    }
}

/// The dependency trace of a single compilation unit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitManifest {
    /// Whether the unit compiled successfully. Missing on the wire means `true`.
    pub success: bool,
    /// Label of the rule being compiled.
    pub rule_label: String,
    /// Artifacts touched by the unit.
    pub records: Vec<DependencyRecord>,
    /// Packages defined by the unit's sources.
    #[serde(default)]
    pub contained_packages: Vec<String>,
}

/// The combined trace for a target.
///
/// Records are keyed and ordered by artifact path; packages are sorted. The
/// ordering is part of the output contract so written manifests are
/// reproducible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedManifest {
    /// AND of every unit's success flag.
    pub success: bool,
    /// Label of the rule being compiled.
    pub rule_label: String,
    /// Strongest kind per artifact path.
    pub records: BTreeMap<String, Kind>,
    /// Union of contained packages.
    pub contained_packages: BTreeSet<String>,
}

impl MergedManifest {
    /// Replaces the rule label, e.g. with the one passed on the command line.
    #[must_use]
    pub fn with_rule_label(mut self, rule_label: impl Into<String>) -> Self {
        self.rule_label = rule_label.into();
        self
    }

    /// Paths of records with the given kind, in path order.
    pub fn paths_of_kind(&self, kind: Kind) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().filter(move |(_, k)| **k == kind).map(|(path, _)| path.as_str())
    }

    /// Kind recorded for a path, if any.
    #[must_use]
    pub fn kind_of(&self, path: &str) -> Option<Kind> {
        self.records.get(path).copied()
    }
}

impl From<MergedManifest> for UnitManifest {
    fn from(merged: MergedManifest) -> Self {
        Self {
            success: merged.success,
            rule_label: merged.rule_label,
            records: merged
                .records
                .into_iter()
                .map(|(path, kind)| DependencyRecord::new(path, kind))
                .collect(),
            contained_packages: merged.contained_packages.into_iter().collect(),
        }
    }
}
