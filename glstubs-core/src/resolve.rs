//! Joins deprecated names against the glew lookup table.

use std::collections::HashSet;

use crate::deprecated::EnumAlias;
use crate::glew::GlewLookup;

/// Outcome of the join, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Stub declarations for names glew.h knows about.
    pub resolved: Vec<String>,
    /// Names with no `GLAPI` prototype.
    pub unresolved: Vec<String>,
}

/// Partitions `functions` into resolved stub declarations and unresolved names.
pub fn resolve<S: AsRef<str>>(functions: &[S], lookup: &GlewLookup) -> Resolution {
    let mut out = Resolution::default();
    for name in functions {
        let name = name.as_ref();
        match lookup.get(name) {
            Some(decl) => out.resolved.push(decl.to_string()),
            None => out.unresolved.push(name.to_string()),
        }
    }
    tracing::info!(
        resolved = out.resolved.len(),
        unresolved = out.unresolved.len(),
        "resolved deprecated functions"
    );
    out
}

/// Redirect targets of `enums`, first occurrence wins.
pub fn enum_targets(enums: &[EnumAlias]) -> Vec<String> {
    let mut seen = HashSet::new();
    enums
        .iter()
        .filter(|e| seen.insert(e.target.as_str()))
        .map(|e| e.target.clone())
        .collect()
}
