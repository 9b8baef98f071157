//! Enforcement configuration.
//!
//! Options arrive from command-line flags and, optionally, a YAML file with
//! the same option names. [`EnforcementOptions`] is that raw, mergeable shape;
//! [`EnforcementOptions::resolve`] turns it into the read-only
//! [`EnforcementConfig`] and the [`AliasGraph`] used for one run.

use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use clap::ValueEnum;
use serde::Deserialize;

use crate::alias::{AliasGraph, ALIAS_DELIMITER};
use crate::error::{DepsError, Result};
use crate::ports::filesystem::FileSystem;

/// How a check's findings are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(try_from = "String")]
pub enum EnforcementMode {
    /// The check does not run.
    #[default]
    Off,
    /// Findings are printed but the run succeeds.
    Warn,
    /// Findings are printed and the run fails.
    Error,
}

impl EnforcementMode {
    /// `true` unless the mode is [`EnforcementMode::Off`].
    #[must_use]
    pub fn is_enabled(self) -> bool {
        self != Self::Off
    }
}

impl fmt::Display for EnforcementMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Off => "off",
            Self::Warn => "warn",
            Self::Error => "error",
        })
    }
}

impl FromStr for EnforcementMode {
    type Err = DepsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "warn" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            _ => Err(DepsError::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for EnforcementMode {
    type Error = DepsError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

/// Read-only inputs of one enforcement run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnforcementConfig {
    /// Severity of the strict-deps check.
    pub strict_mode: EnforcementMode,
    /// Severity of the unused-deps check.
    pub unused_mode: EnforcementMode,
    /// Jars declared as direct dependencies.
    pub direct_jars: BTreeSet<String>,
    /// Labels declared as direct dependencies.
    pub direct_labels: BTreeSet<String>,
    /// Jars the strict-deps check never reports.
    pub strict_ignored_jars: BTreeSet<String>,
    /// Labels the unused-deps check never reports.
    pub unused_ignored_labels: BTreeSet<String>,
    /// Target being checked; named in remediation commands.
    pub current_target: String,
}

/// Raw enforcement options as given by flags or a config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EnforcementOptions {
    /// `strict_deps_mode`.
    pub strict_deps_mode: Option<EnforcementMode>,
    /// `unused_deps_mode`.
    pub unused_deps_mode: Option<EnforcementMode>,
    /// `direct_jars`; entries may be joined with the platform path separator.
    pub direct_jars: Vec<String>,
    /// `direct_labels`; entries may be `::`-joined.
    pub direct_labels: Vec<String>,
    /// `strict_deps_ignored_jars`; entries may be path-separator joined.
    pub strict_deps_ignored_jars: Vec<String>,
    /// `unused_deps_ignored_labels`; entries may be `::`-joined.
    pub unused_deps_ignored_labels: Vec<String>,
    /// `aliased_labels`, in the order supplied.
    pub aliased_labels: Vec<String>,
    /// `current_target`.
    pub current_target: Option<String>,
}

impl EnforcementOptions {
    /// Loads options from a YAML file through the filesystem port.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::Read`] if the file can't be read and
    /// [`DepsError::Config`] if it isn't a valid option set (unknown keys and
    /// unknown modes included).
    pub fn from_yaml_file(fs: &dyn FileSystem, path: &Path) -> Result<Self> {
        let contents = fs
            .read_to_string(path)
            .map_err(|e| DepsError::Read { path: path.to_path_buf(), message: e.to_string() })?;
        serde_yaml::from_str(&contents)
            .map_err(|e| DepsError::Config { path: path.to_path_buf(), message: e.to_string() })
    }

    /// Layers `overrides` on top of `self`.
    ///
    /// Modes and the current target are replaced when set in `overrides`;
    /// lists are concatenated with `self`'s entries first.
    #[must_use]
    pub fn overlay(mut self, overrides: Self) -> Self {
        self.strict_deps_mode = overrides.strict_deps_mode.or(self.strict_deps_mode);
        self.unused_deps_mode = overrides.unused_deps_mode.or(self.unused_deps_mode);
        self.current_target = overrides.current_target.or(self.current_target);
        self.direct_jars.extend(overrides.direct_jars);
        self.direct_labels.extend(overrides.direct_labels);
        self.strict_deps_ignored_jars.extend(overrides.strict_deps_ignored_jars);
        self.unused_deps_ignored_labels.extend(overrides.unused_deps_ignored_labels);
        self.aliased_labels.extend(overrides.aliased_labels);
        self
    }

    /// Builds the run configuration and alias graph.
    ///
    /// `manifest_rule_label` is used as the current target when none was
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::MissingOption`] when no current target is known
    /// and [`DepsError::MalformedAlias`] for a bad alias declaration.
    pub fn resolve(&self, manifest_rule_label: &str) -> Result<(EnforcementConfig, AliasGraph)> {
        let current_target = self
            .current_target
            .clone()
            .filter(|t| !t.is_empty())
            .or_else(|| Some(manifest_rule_label.to_string()).filter(|t| !t.is_empty()))
            .ok_or(DepsError::MissingOption("current_target"))?;

        let graph = AliasGraph::build(&self.aliased_labels)?;
        let config = EnforcementConfig {
            strict_mode: self.strict_deps_mode.unwrap_or_default(),
            unused_mode: self.unused_deps_mode.unwrap_or_default(),
            direct_jars: split_paths(&self.direct_jars),
            direct_labels: split_labels(&self.direct_labels),
            strict_ignored_jars: split_paths(&self.strict_deps_ignored_jars),
            unused_ignored_labels: split_labels(&self.unused_deps_ignored_labels),
            current_target,
        };
        Ok((config, graph))
    }
}

fn split_paths(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .flat_map(std::env::split_paths)
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.to_string_lossy().into_owned())
        .collect()
}

fn split_labels(values: &[String]) -> BTreeSet<String> {
    values
        .iter()
        .flat_map(|v| v.split(ALIAS_DELIMITER))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}
