//! `strictdeps show` command.

use std::io::Write;
use std::path::Path;

use crate::context::ServiceContext;
use crate::manifest::UnitManifest;
use crate::store::ManifestStore;

/// Execute the `show` command.
///
/// Prints the manifest as a readable listing, or as pretty JSON with `json`.
///
/// # Errors
///
/// Returns an error string if the manifest cannot be read, decoded or printed.
pub fn run(ctx: &ServiceContext, file: &Path, json: bool, out: &mut dyn Write) -> Result<(), String> {
    let manifest = ManifestStore::new(ctx).load(file).map_err(|e| e.to_string())?;
    let rendered = if json {
        serde_json::to_string_pretty(&manifest)
            .map_err(|e| format!("Failed to serialize manifest: {e}"))?
    } else {
        render_text(&manifest)
    };
    writeln!(out, "{rendered}").map_err(|e| format!("Failed to write output: {e}"))
}

fn render_text(manifest: &UnitManifest) -> String {
    let mut lines = Vec::new();
    let label = if manifest.rule_label.is_empty() { "(none)" } else { manifest.rule_label.as_str() };
    lines.push(format!("Rule: {label}"));
    lines.push(format!("Success: {}", manifest.success));

    if !manifest.contained_packages.is_empty() {
        lines.push(format!("Packages: {}", manifest.contained_packages.join(", ")));
    }

    lines.push(format!("\nDependencies ({}):", manifest.records.len()));
    let width = manifest.records.iter().map(|r| r.kind.as_str().len()).max().unwrap_or(0);
    for record in &manifest.records {
        lines.push(format!("  {:<width$}  {}", record.kind.as_str(), record.artifact_path));
    }

    lines.join("\n")
}
