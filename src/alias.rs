//! Label aliasing for re-exporting targets.
//!
//! A declaration `A::X::Y` says that depending on `A` is as good as depending
//! on `X` or `Y` directly (typically `A` exports them). Declarations nearer to
//! the target being checked are supplied later, so they are consumed in
//! reverse, and the first suggestion recorded for a label wins. Chains such as
//! `A::X` then `X::Y` are closed afterwards, so `Y` is covered by both `X` and
//! `A` and is suggested as `A` whatever order the declarations came in.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{DepsError, Result};

/// Separator between the fields of an alias declaration.
pub const ALIAS_DELIMITER: &str = "::";

/// Equivalences between labels, built once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AliasGraph {
    aliases_of: BTreeMap<String, BTreeSet<String>>,
    suggested_replacement: BTreeMap<String, String>,
}

impl AliasGraph {
    /// Builds the graph from declarations in the order they were supplied.
    ///
    /// # Errors
    ///
    /// Returns [`DepsError::MalformedAlias`] for a declaration with no aliased
    /// labels or with an empty field.
    pub fn build<S: AsRef<str>>(declarations: &[S]) -> Result<Self> {
        let mut graph = Self::default();

        for declaration in declarations.iter().rev() {
            let declaration = declaration.as_ref();
            let parts: Vec<&str> = declaration.split(ALIAS_DELIMITER).collect();
            if parts.len() < 2 || parts.iter().any(|p| p.is_empty()) {
                return Err(DepsError::MalformedAlias { declaration: declaration.to_string() });
            }

            let alias = parts[0];
            let suggested = graph.suggested_replacement(alias).to_string();
            let inherited = graph.aliases_of.get(alias).cloned().unwrap_or_default();

            for label in &parts[1..] {
                graph
                    .suggested_replacement
                    .entry((*label).to_string())
                    .or_insert_with(|| suggested.clone());
                let aliases = graph.aliases_of.entry((*label).to_string()).or_default();
                aliases.extend(
                    std::iter::once(alias)
                        .chain(inherited.iter().map(String::as_str))
                        .filter(|a| a != label)
                        .map(str::to_string),
                );
            }
        }

        graph.close_chains();
        Ok(graph)
    }

    /// Adds the aliases of every alias until nothing changes, then points each
    /// suggestion at the end of its chain.
    fn close_chains(&mut self) {
        let mut changed = true;
        while changed {
            changed = false;
            let snapshot = self.aliases_of.clone();
            for (label, aliases) in &mut self.aliases_of {
                let inherited: Vec<&String> = aliases
                    .iter()
                    .filter_map(|alias| snapshot.get(alias))
                    .flatten()
                    .filter(|a| *a != label)
                    .collect();
                for alias in inherited {
                    changed |= aliases.insert(alias.clone());
                }
            }
        }

        let direct = self.suggested_replacement.clone();
        for suggested in self.suggested_replacement.values_mut() {
            let mut seen = BTreeSet::new();
            while let Some(next) = direct.get(suggested.as_str()) {
                if !seen.insert(suggested.clone()) || next == suggested {
                    break;
                }
                suggested.clone_from(next);
            }
        }
    }

    /// Labels that stand in for `label`.
    #[must_use]
    pub fn aliases_of(&self, label: &str) -> Option<&BTreeSet<String>> {
        self.aliases_of.get(label)
    }

    /// Nearest alias to recommend instead of `label`, or `label` itself.
    #[must_use]
    pub fn suggested_replacement<'a>(&'a self, label: &'a str) -> &'a str {
        self.suggested_replacement.get(label).map_or(label, String::as_str)
    }

    /// `label` followed by all of its aliases.
    pub fn label_with_aliases<'a>(&'a self, label: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        std::iter::once(label)
            .chain(self.aliases_of.get(label).into_iter().flatten().map(String::as_str))
    }

    /// `true` if `label` or any of its aliases is in `candidates`.
    #[must_use]
    pub fn is_label_or_alias_in(&self, label: &str, candidates: &BTreeSet<String>) -> bool {
        self.label_with_aliases(label).any(|l| candidates.contains(l))
    }

    /// `true` if any alias of `label` (excluding the label) is in `candidates`.
    #[must_use]
    pub fn any_alias_in(&self, label: &str, candidates: &BTreeSet<String>) -> bool {
        self.aliases_of
            .get(label)
            .is_some_and(|aliases| aliases.iter().any(|a| candidates.contains(a)))
    }

    /// `true` when no declarations were supplied.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases_of.is_empty()
    }
}
