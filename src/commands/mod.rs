//! Command dispatch and handlers.

pub mod check;
pub mod merge;
pub mod show;

use std::io::Write;

use crate::alias::AliasGraph;
use crate::cli::{Command, EnforcementArgs};
use crate::config::{EnforcementConfig, EnforcementOptions};
use crate::context::ServiceContext;
use crate::enforce;
use crate::labels::LabelResolver;
use crate::manifest::MergedManifest;

/// Dispatch a parsed command to its handler using live adapters.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let ctx = ServiceContext::live();
    dispatch_with_context(command, &ctx, &mut std::io::stdout(), &mut std::io::stderr())
}

/// Dispatch a command with the given service context and output streams.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(
    command: &Command,
    ctx: &ServiceContext,
    out: &mut dyn Write,
    diagnostics: &mut dyn Write,
) -> Result<(), String> {
    match command {
        Command::Merge { rule_label, input_deps, own_outputs, output_deps, enforcement } => {
            merge::run(ctx, rule_label, input_deps, own_outputs, output_deps, enforcement, diagnostics)
        }
        Command::Check { deps, enforcement } => check::run(ctx, deps, enforcement, diagnostics),
        Command::Show { file, json } => show::run(ctx, file, *json, out),
    }
}

/// Layers the config file (if any) under the flags and resolves the result.
fn load_config(
    ctx: &ServiceContext,
    args: &EnforcementArgs,
    rule_label: &str,
) -> Result<(EnforcementConfig, AliasGraph), String> {
    let base = match &args.config {
        Some(path) => {
            EnforcementOptions::from_yaml_file(ctx.fs.as_ref(), path).map_err(|e| e.to_string())?
        }
        None => EnforcementOptions::default(),
    };
    base.overlay(args.to_options()).resolve(rule_label).map_err(|e| e.to_string())
}

/// Runs both checks against `manifest`, prints every violation, and fails
/// if a check in error mode found anything.
fn enforce_manifest(
    ctx: &ServiceContext,
    manifest: &MergedManifest,
    config: &EnforcementConfig,
    aliases: &AliasGraph,
    diagnostics: &mut dyn Write,
) -> Result<(), String> {
    let resolver = LabelResolver::new(ctx.archives.as_ref());
    let report = enforce::run_checks(manifest, config, aliases, &resolver);

    report
        .emit(diagnostics)
        .map_err(|e| format!("Failed to write diagnostics: {e}"))?;

    if report.failed() {
        Err(report.failure_summary())
    } else {
        Ok(())
    }
}
