//! Parsing of `gl-deprecated.h`.
//!
//! The header is a flat list of redirects:
//!
//! ```c
//! #define glAccum DO_NOT_USE_glAccum
//! #define GL_SOURCE2_RGB DO_NOT_USE_GL_SOURCE2_RGB
//! ```
//!
//! Only the fixed `#define` prefix is recognised; this is not a C parser.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{GlstubsResult, IoResultExt};

const DEFINE: &str = "#define";

/// An enum macro and the token it is redirected to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumAlias {
    /// `GL_SOURCE2_RGB`
    pub name: String,
    /// `DO_NOT_USE_GL_SOURCE2_RGB`
    pub target: String,
}

/// Everything `gl-deprecated.h` redirects, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeprecatedSymbols {
    /// Function macro names (`glAccum`).
    pub functions: Vec<String>,
    pub enums: Vec<EnumAlias>,
}

impl DeprecatedSymbols {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.enums.is_empty()
    }
}

/// Parses the contents of `gl-deprecated.h`.
///
/// Fields are split on single spaces. The second field decides the kind:
/// `gl*` is a function, `GL_*` an enum whose target is the third field.
/// Lines too short to classify are skipped with a warning. Repeated names
/// keep their first occurrence.
pub fn parse_deprecated(text: &str) -> DeprecatedSymbols {
    let mut out = DeprecatedSymbols::default();
    let mut seen_functions = HashSet::new();
    let mut seen_enums = HashSet::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        let mut parts = line.split(' ');

        if parts.next() != Some(DEFINE) {
            continue;
        }

        let Some(name) = parts.next() else {
            tracing::warn!(line = idx + 1, "#define without a name, skipped");
            continue;
        };

        if name.starts_with("gl") {
            if seen_functions.insert(name) {
                out.functions.push(name.to_string());
            }
        } else if name.starts_with("GL_") {
            match parts.next() {
                Some(target) if !target.is_empty() => {
                    if seen_enums.insert(name) {
                        out.enums.push(EnumAlias {
                            name: name.to_string(),
                            target: target.to_string(),
                        });
                    }
                }
                _ => {
                    tracing::warn!(line = idx + 1, symbol = name, "enum #define without a target, skipped");
                }
            }
        }
    }

    tracing::debug!(
        functions = out.functions.len(),
        enums = out.enums.len(),
        "parsed gl-deprecated.h"
    );
    out
}

/// Reads and parses `gl-deprecated.h` from disk.
pub fn read_deprecated(path: &Path) -> GlstubsResult<DeprecatedSymbols> {
    let text = fs::read_to_string(path).with_path(path)?;
    Ok(parse_deprecated(&text))
}
