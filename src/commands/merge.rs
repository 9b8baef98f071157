//! `strictdeps merge` command.

use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::cli::EnforcementArgs;
use crate::context::ServiceContext;
use crate::manifest;
use crate::store::ManifestStore;

/// Execute the `merge` command.
///
/// Reads every unit manifest, merges them with the target's own outputs
/// elided, writes the merged manifest, and then enforces deps policy on it.
/// Configuration errors abort before anything is read.
///
/// # Errors
///
/// Returns an error string on configuration, read, decode or write failure,
/// or when a check in error mode reports violations.
pub fn run(
    ctx: &ServiceContext,
    rule_label: &str,
    input_deps: &[PathBuf],
    own_outputs: &[String],
    output_deps: &Path,
    enforcement: &EnforcementArgs,
    diagnostics: &mut dyn Write,
) -> Result<(), String> {
    // Surface bad options before touching any input.
    let (config, aliases) = super::load_config(ctx, enforcement, rule_label)?;

    let store = ManifestStore::new(ctx);
    let units = store.load_all(input_deps).map_err(|e| e.to_string())?;
    let own: BTreeSet<String> = own_outputs.iter().cloned().collect();
    let merged = manifest::merge(&units, &own).with_rule_label(rule_label);

    store.save_merged(output_deps, &merged).map_err(|e| e.to_string())?;
    writeln!(
        diagnostics,
        "Merged {} manifest(s) into {} ({} dependencies)",
        units.len(),
        output_deps.display(),
        merged.records.len()
    )
    .map_err(|e| format!("Failed to write diagnostics: {e}"))?;

    super::enforce_manifest(ctx, &merged, &config, &aliases, diagnostics)
}

#[cfg(test)]
mod tests {
    use prost::Message;

    use super::*;
    use crate::config::EnforcementMode;
    use crate::labels::testing::FakeArchives;
    use crate::manifest::proto::{Dependencies, Dependency};
    use crate::manifest::Kind;
    use crate::store::testing::MemFs;

    fn encoded(deps: &[(&str, Kind)]) -> Vec<u8> {
        Dependencies {
            dependency: deps
                .iter()
                .map(|(path, kind)| Dependency { path: (*path).to_string(), kind: kind.to_wire() })
                .collect(),
            rule_label: Some("//a:b".to_string()),
            success: Some(true),
            contained_package: vec![],
        }
        .encode_to_vec()
    }

    fn context() -> ServiceContext {
        let fs = MemFs::new()
            .with_file("/scala.jdeps", encoded(&[("p1", Kind::Explicit), ("b_java.jar", Kind::Explicit)]))
            .with_file("/java.jdeps", encoded(&[("p1", Kind::Unused), ("p2", Kind::Implicit)]));
        let archives = FakeArchives::default().with_jar("p1", "//dep:one").with_jar("p2", "//dep:two");
        ServiceContext::new(Box::new(fs), Box::new(archives))
    }

    fn inputs() -> Vec<PathBuf> {
        vec![PathBuf::from("/scala.jdeps"), PathBuf::from("/java.jdeps")]
    }

    #[test]
    fn writes_merged_manifest_and_passes_when_clean() {
        let ctx = context();
        let args = EnforcementArgs {
            strict_deps_mode: Some(EnforcementMode::Error),
            direct_jars: vec!["p1".to_string()],
            ..EnforcementArgs::default()
        };
        let mut diagnostics = Vec::new();
        run(
            &ctx,
            "//a:b",
            &inputs(),
            &["b_java.jar".to_string()],
            Path::new("/out.jdeps"),
            &args,
            &mut diagnostics,
        )
        .unwrap();

        let merged = ManifestStore::new(&ctx).load(Path::new("/out.jdeps")).unwrap();
        let paths: Vec<(&str, Kind)> =
            merged.records.iter().map(|r| (r.artifact_path.as_str(), r.kind)).collect();
        assert_eq!(paths, vec![("p1", Kind::Explicit), ("p2", Kind::Implicit)]);
        assert_eq!(merged.rule_label, "//a:b");
    }

    #[test]
    fn unused_error_fails_after_writing_output() {
        let ctx = context();
        let args = EnforcementArgs {
            strict_deps_mode: Some(EnforcementMode::Error),
            unused_deps_mode: Some(EnforcementMode::Error),
            direct_jars: vec!["p1".to_string(), "p2".to_string()],
            direct_labels: vec!["//dep:one:://dep:two".to_string()],
            ..EnforcementArgs::default()
        };
        let mut diagnostics = Vec::new();
        let err = run(
            &ctx,
            "//a:b",
            &inputs(),
            &["b_java.jar".to_string()],
            Path::new("/out.jdeps"),
            &args,
            &mut diagnostics,
        )
        .unwrap_err();

        assert!(err.contains("1 unused deps violation(s)"));
        let text = String::from_utf8(diagnostics).unwrap();
        assert!(text.contains("buildozer 'remove deps //dep:two' //a:b"));
        assert!(!text.contains("[strict deps]"));
        assert!(ctx.fs.exists(Path::new("/out.jdeps")));
    }

    #[test]
    fn malformed_alias_aborts_before_reading_inputs() {
        let ctx = context();
        let args = EnforcementArgs {
            aliased_labels: vec!["no_labels".to_string()],
            ..EnforcementArgs::default()
        };
        let mut diagnostics = Vec::new();
        let err = run(
            &ctx,
            "//a:b",
            &inputs(),
            &[],
            Path::new("/out.jdeps"),
            &args,
            &mut diagnostics,
        )
        .unwrap_err();
        assert!(err.contains("no_labels"));
        assert!(!ctx.fs.exists(Path::new("/out.jdeps")));
    }

    #[test]
    fn unreadable_input_is_fatal() {
        let ctx = context();
        let mut diagnostics = Vec::new();
        let err = run(
            &ctx,
            "//a:b",
            &[PathBuf::from("/missing.jdeps")],
            &[],
            Path::new("/out.jdeps"),
            &EnforcementArgs::default(),
            &mut diagnostics,
        )
        .unwrap_err();
        assert!(err.contains("/missing.jdeps"));
    }

    struct ClosedStream;

    impl Write for ClosedStream {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stream closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn diagnostics_write_failure_is_reported() {
        let ctx = context();
        let err = run(
            &ctx,
            "//a:b",
            &inputs(),
            &["b_java.jar".to_string()],
            Path::new("/out.jdeps"),
            &EnforcementArgs::default(),
            &mut ClosedStream,
        )
        .unwrap_err();
        assert!(err.contains("Failed to write diagnostics"));
        assert!(err.contains("stream closed"));
    }
}
