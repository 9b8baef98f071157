//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::{EnforcementMode, EnforcementOptions};

/// Top-level CLI parser for `strictdeps`.
#[derive(Debug, Parser)]
#[command(name = "strictdeps", version, about = "Merge dependency manifests and enforce deps policy")]
pub struct Cli {
    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Merge per-unit dependency manifests, write the result, then enforce.
    Merge {
        /// Label of the rule being built.
        #[arg(long)]
        rule_label: String,
        /// Dependency manifest of one compilation unit.
        #[arg(long = "input-deps", value_name = "FILE", required = true, num_args = 1..)]
        input_deps: Vec<PathBuf>,
        /// The target's own output jar; never counted as a dependency.
        #[arg(long = "own-output", value_name = "JAR", num_args = 1..)]
        own_outputs: Vec<String>,
        /// Where to write the merged manifest.
        #[arg(long, value_name = "FILE")]
        output_deps: PathBuf,
        /// Enforcement options.
        #[command(flatten)]
        enforcement: EnforcementArgs,
    },
    /// Enforce deps policy against an existing manifest.
    Check {
        /// Dependency manifest to check.
        #[arg(long, value_name = "FILE")]
        deps: PathBuf,
        /// Enforcement options.
        #[command(flatten)]
        enforcement: EnforcementArgs,
    },
    /// Print a dependency manifest.
    Show {
        /// Manifest file.
        file: PathBuf,
        /// Print as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

/// Flags controlling strict-deps and unused-deps enforcement.
#[derive(Debug, Clone, Default, Args)]
pub struct EnforcementArgs {
    /// Severity of the strict deps check.
    #[arg(long, value_enum, ignore_case = true)]
    pub strict_deps_mode: Option<EnforcementMode>,
    /// Severity of the unused deps check.
    #[arg(long, value_enum, ignore_case = true)]
    pub unused_deps_mode: Option<EnforcementMode>,
    /// Jars declared as direct deps (path-list separated values allowed).
    #[arg(long, value_name = "JARS", num_args = 1..)]
    pub direct_jars: Vec<String>,
    /// Labels declared as direct deps (`::`-joined values allowed).
    #[arg(long, value_name = "LABELS", num_args = 1..)]
    pub direct_labels: Vec<String>,
    /// Jars never reported by the strict deps check.
    #[arg(long, value_name = "JARS", num_args = 1..)]
    pub strict_deps_ignored_jars: Vec<String>,
    /// Labels never reported by the unused deps check.
    #[arg(long, value_name = "LABELS", num_args = 1..)]
    pub unused_deps_ignored_labels: Vec<String>,
    /// Alias declaration `alias::label1::...`; repeat in build-graph order.
    #[arg(long, value_name = "DECLARATION", action = ArgAction::Append)]
    pub aliased_labels: Vec<String>,
    /// Target named in remediation commands (defaults to the manifest's rule label).
    #[arg(long, value_name = "LABEL")]
    pub current_target: Option<String>,
    /// YAML file with enforcement options; flags take precedence.
    #[arg(long, value_name = "FILE", env = "STRICTDEPS_CONFIG")]
    pub config: Option<PathBuf>,
}

impl EnforcementArgs {
    /// The flag values as an option layer.
    #[must_use]
    pub fn to_options(&self) -> EnforcementOptions {
        EnforcementOptions {
            strict_deps_mode: self.strict_deps_mode,
            unused_deps_mode: self.unused_deps_mode,
            direct_jars: self.direct_jars.clone(),
            direct_labels: self.direct_labels.clone(),
            strict_deps_ignored_jars: self.strict_deps_ignored_jars.clone(),
            unused_deps_ignored_labels: self.unused_deps_ignored_labels.clone(),
            aliased_labels: self.aliased_labels.clone(),
            current_target: self.current_target.clone(),
        }
    }
}
