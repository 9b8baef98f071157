//! Violation records and their diagnostic text.

use std::fmt;

/// Which check produced a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// A used artifact was not declared.
    StrictDeps,
    /// A declared label was never used.
    UnusedDeps,
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StrictDeps => "strict deps",
            Self::UnusedDeps => "unused deps",
        })
    }
}

/// A single policy finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Check that fired.
    pub check: Check,
    /// Label to add (strict deps) or remove (unused deps).
    pub subject_label: String,
    /// Human-readable explanation including the remediation command.
    pub message: String,
}

impl Violation {
    /// A used-but-undeclared dependency on `label`.
    #[must_use]
    pub fn strict(label: &str, current_target: &str, artifact_path: &str) -> Self {
        Self {
            check: Check::StrictDeps,
            subject_label: label.to_string(),
            message: format!(
                "Target '{label}' is used but isn't explicitly declared, please add it to the deps.\n\
                 Used through: {artifact_path}\n\
                 You can use the following buildozer command:\n\
                 {}",
                remediation("add", label, current_target),
            ),
        }
    }

    /// A declared-but-unused dependency on `label`.
    #[must_use]
    pub fn unused(label: &str, current_target: &str) -> Self {
        Self {
            check: Check::UnusedDeps,
            subject_label: label.to_string(),
            message: format!(
                "Unused dependency '{label}' found for {current_target}.\n\
                 You can use the following buildozer command to remove it:\n\
                 {}",
                remediation("remove", label, current_target),
            ),
        }
    }
}

fn remediation(action: &str, label: &str, current_target: &str) -> String {
    format!("buildozer '{action} deps {label}' {current_target}")
}
