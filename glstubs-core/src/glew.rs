//! Parsing of `glew.h` into the stub lookup table.
//!
//! Only `GLAPI` prototypes are considered:
//!
//! ```c
//! GLAPI void GLAPIENTRY glAccum (GLenum op, GLfloat value);
//! ```
//!
//! becomes the entry `glAccum -> "_GL_VOID DO_NOT_USE_glAccum (GLenum op, GLfloat value) _GL_VOID_RET"`.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{GlstubsError, GlstubsResult, IoResultExt};

const GLAPI: &str = "GLAPI";
const GLAPIENTRY: &str = "GLAPIENTRY";

/// Prefix given to every stubbed function name.
pub const STUB_PREFIX: &str = "DO_NOT_USE_";

/// Return types we know how to stub, and the macro each one becomes.
const TYPE_TABLE: &[(&str, &str)] = &[
    ("GLboolean", "_GL_BOOL"),
    ("GLenum", "_GL_ENUM"),
    ("GLint", "_GL_INT"),
    ("GLuint", "_GL_UINT"),
    ("void", "_GL_VOID"),
    ("const", "NOT_IMPLEMENTED"),
];

/// Translates a C return type into its stub macro.
pub fn stub_type(c_type: &str) -> Option<&'static str> {
    TYPE_TABLE
        .iter()
        .find(|(name, _)| *name == c_type)
        .map(|(_, macro_name)| *macro_name)
}

/// Formats a stub declaration: `{T} DO_NOT_USE_{rest} {T}_RET`.
pub fn stub_declaration(stub_type: &str, rest: &str) -> String {
    format!("{stub_type} {STUB_PREFIX}{rest} {stub_type}_RET")
}

/// Function name to stub declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlewLookup {
    entries: HashMap<String, String>,
}

impl GlewLookup {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Adds or replaces an entry.
    pub fn insert(&mut self, name: impl Into<String>, declaration: impl Into<String>) {
        self.entries.insert(name.into(), declaration.into());
    }
}

impl FromIterator<(String, String)> for GlewLookup {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// One parsed `GLAPI` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prototype<'a> {
    pub return_type: &'a str,
    pub name: &'a str,
    /// Name plus parameter list, without the trailing `;`.
    pub rest: String,
}

/// Splits a `GLAPI` line into its return type, name and remainder.
///
/// The name is the token after `GLAPIENTRY`, or the fourth field when that
/// marker is absent. Returns `None` when the line is too short.
pub fn split_prototype(line: &str) -> Option<Prototype<'_>> {
    let parts: Vec<&str> = line.split(' ').collect();
    if parts.len() < 4 {
        return None;
    }

    let name_idx = parts
        .iter()
        .position(|p| *p == GLAPIENTRY)
        .map(|i| i + 1)
        .filter(|i| *i < parts.len())
        .unwrap_or(3);

    let joined = parts[name_idx..].join(" ");
    let trimmed = joined.trim_end();
    let rest = trimmed.strip_suffix(';').unwrap_or(trimmed).to_string();

    Some(Prototype {
        return_type: parts[1],
        name: parts[name_idx],
        rest,
    })
}

/// Parses `glew.h` text. `source` is only used for error locations.
///
/// An unknown return type fails the parse unless `skip_unknown_types` is
/// set, in which case the line is logged and dropped.
pub fn parse_glew(text: &str, source: &Path, skip_unknown_types: bool) -> GlstubsResult<GlewLookup> {
    let mut lookup = GlewLookup::default();
    let mut skipped = 0usize;

    for (idx, raw) in text.lines().enumerate() {
        if !raw.starts_with(GLAPI) {
            continue;
        }
        let line_no = idx + 1;
        let line = raw.strip_suffix('\r').unwrap_or(raw);

        let proto = split_prototype(line)
            .ok_or_else(|| GlstubsError::parse(source, line_no, "truncated GLAPI prototype"))?;

        let Some(t) = stub_type(proto.return_type) else {
            if skip_unknown_types {
                tracing::warn!(line = line_no, return_type = proto.return_type, "unknown return type, skipped");
                skipped += 1;
                continue;
            }
            return Err(GlstubsError::unknown_type(source, line_no, proto.return_type));
        };

        lookup.insert(proto.name, stub_declaration(t, &proto.rest));
    }

    tracing::debug!(entries = lookup.len(), skipped, "parsed glew.h");
    Ok(lookup)
}

/// Reads and parses `glew.h` from disk.
pub fn read_glew(path: &Path, skip_unknown_types: bool) -> GlstubsResult<GlewLookup> {
    let text = fs::read_to_string(path).with_path(path)?;
    parse_glew(&text, path, skip_unknown_types)
}
