//! Binary manifest format.
//!
//! Mirrors the build tool's `Dependencies` proto2 message:
//!
//! ```text
//! message Dependency   { required string path = 1; required Kind kind = 2; }
//! message Dependencies { repeated Dependency dependency = 1;
//!                        optional string rule_label = 2;
//!                        optional bool success = 3;
//!                        repeated string contained_package = 4; }
//! ```
//!
//! `kind` is carried as a plain `int32`, which is wire-identical to the enum.

use std::path::Path;

use prost::Message;

use super::{DependencyRecord, Kind, MergedManifest, UnitManifest};
use crate::error::{DepsError, Result};

/// Wire form of a single dependency.
#[derive(Clone, PartialEq, Message)]
pub struct Dependency {
    /// Artifact path.
    #[prost(string, required, tag = "1")]
    pub path: String,
    /// `Kind` enum value.
    #[prost(int32, required, tag = "2")]
    pub kind: i32,
}

/// Wire form of a whole manifest.
#[derive(Clone, PartialEq, Message)]
pub struct Dependencies {
    /// Every artifact the unit touched.
    #[prost(message, repeated, tag = "1")]
    pub dependency: Vec<Dependency>,
    /// Rule that produced the trace.
    #[prost(string, optional, tag = "2")]
    pub rule_label: Option<String>,
    /// Compilation outcome; absent means success.
    #[prost(bool, optional, tag = "3")]
    pub success: Option<bool>,
    /// Packages defined by the unit.
    #[prost(string, repeated, tag = "4")]
    pub contained_package: Vec<String>,
}

/// Decodes one unit manifest. `origin` is only used in error messages.
///
/// # Errors
///
/// Returns [`DepsError::Decode`] when the bytes are not a valid message or a
/// dependency carries an unknown kind.
pub fn decode_unit(bytes: &[u8], origin: &Path) -> Result<UnitManifest> {
    let wire = Dependencies::decode(bytes).map_err(|e| DepsError::Decode {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;

    let records = wire
        .dependency
        .into_iter()
        .map(|dep| {
            let kind = Kind::from_wire(dep.kind).ok_or_else(|| DepsError::Decode {
                path: origin.to_path_buf(),
                message: format!("unknown dependency kind {} for {}", dep.kind, dep.path),
            })?;
            Ok(DependencyRecord::new(dep.path, kind))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(UnitManifest {
        success: wire.success.unwrap_or(true),
        rule_label: wire.rule_label.unwrap_or_default(),
        records,
        contained_packages: wire.contained_package,
    })
}

/// Encodes a merged manifest, records and packages in sorted order.
#[must_use]
pub fn encode_merged(merged: &MergedManifest) -> Vec<u8> {
    let wire = Dependencies {
        dependency: merged
            .records
            .iter()
            .map(|(path, kind)| Dependency { path: path.clone(), kind: kind.to_wire() })
            .collect(),
        rule_label: Some(merged.rule_label.clone()),
        success: Some(merged.success),
        contained_package: merged.contained_packages.iter().cloned().collect(),
    };
    wire.encode_to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::merge;

    fn wire(deps: &[(&str, i32)], success: Option<bool>) -> Vec<u8> {
        Dependencies {
            dependency: deps
                .iter()
                .map(|(path, kind)| Dependency { path: (*path).to_string(), kind: *kind })
                .collect(),
            rule_label: Some("//a:b".to_string()),
            success,
            contained_package: vec!["com.example".to_string()],
        }
        .encode_to_vec()
    }

    #[test]
    fn missing_success_flag_decodes_as_success() {
        let unit = decode_unit(&wire(&[("x.jar", 0)], None), Path::new("u.jdeps")).unwrap();
        assert!(unit.success);
        assert_eq!(unit.rule_label, "//a:b");
        assert_eq!(unit.records, vec![DependencyRecord::new("x.jar", Kind::Explicit)]);
        assert_eq!(unit.contained_packages, vec!["com.example"]);
    }

    #[test]
    fn explicit_failure_is_preserved() {
        let unit = decode_unit(&wire(&[], Some(false)), Path::new("u.jdeps")).unwrap();
        assert!(!unit.success);
    }

    #[test]
    fn unknown_kind_is_a_decode_error() {
        let err = decode_unit(&wire(&[("x.jar", 9)], None), Path::new("bad.jdeps")).unwrap_err();
        assert!(matches!(err, DepsError::Decode { .. }));
        assert!(err.to_string().contains("bad.jdeps"));
    }

    #[test]
    fn garbage_bytes_are_a_decode_error() {
        let err = decode_unit(&[0xff, 0xff, 0xff], Path::new("junk")).unwrap_err();
        assert!(matches!(err, DepsError::Decode { .. }));
    }

    #[test]
    fn encoded_merge_reads_back_as_unit() {
        let merged = merge(
            &[UnitManifest {
                success: true,
                rule_label: "//a:b".to_string(),
                records: vec![
                    DependencyRecord::new("b.jar", Kind::Unused),
                    DependencyRecord::new("a.jar", Kind::Explicit),
                ],
                contained_packages: vec!["p".to_string()],
            }],
            &std::collections::BTreeSet::new(),
        );
        let unit = decode_unit(&encode_merged(&merged), Path::new("out")).unwrap();
        let paths: Vec<&str> = unit.records.iter().map(|r| r.artifact_path.as_str()).collect();
        assert_eq!(paths, vec!["a.jar", "b.jar"]);
        assert_eq!(unit.rule_label, "//a:b");
    }
}
