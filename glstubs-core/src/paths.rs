//! Input discovery inside a Blender source checkout.
//!
//! The two headers live at fixed locations relative to the checkout root:
//! - `intern/glew-mx/intern/gl-deprecated.h`
//! - `extern/glew/include/GL/glew.h`
//!
//! The usage scan walks `source/blender`.

use std::path::{Path, PathBuf};

use crate::config::GlstubsConfig;
use crate::error::{GlstubsError, GlstubsResult, InputKind};

const GL_DEPRECATED_PATH: &[&str] = &["intern", "glew-mx", "intern", "gl-deprecated.h"];
const GLEW_PATH: &[&str] = &["extern", "glew", "include", "GL", "glew.h"];
const SOURCE_PATH: &[&str] = &["source", "blender"];

/// Resolved locations of everything the pipeline reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputPaths {
    pub base: PathBuf,
    pub gl_deprecated: PathBuf,
    pub glew: PathBuf,
    /// Root of the usage scan. May not exist.
    pub source_root: PathBuf,
}

fn join_all(base: &Path, parts: &[&str]) -> PathBuf {
    parts.iter().fold(base.to_path_buf(), |acc, p| acc.join(p))
}

/// Applies a config override. Absolute overrides are used as-is.
fn with_override(base: &Path, default: &[&str], custom: Option<&str>) -> PathBuf {
    match custom {
        Some(p) => base.join(p),
        None => join_all(base, default),
    }
}

/// Validates `base` and locates both headers.
///
/// Fails in the same order the checks are made: base directory, then
/// `gl-deprecated.h`, then `glew.h`.
pub fn resolve_inputs(base: &Path, config: &GlstubsConfig) -> GlstubsResult<InputPaths> {
    if !base.is_dir() {
        return Err(GlstubsError::not_a_directory(base));
    }

    let gl_deprecated = with_override(base, GL_DEPRECATED_PATH, config.gl_deprecated.as_deref());
    if !gl_deprecated.exists() {
        return Err(GlstubsError::missing_input(InputKind::GlDeprecated, gl_deprecated));
    }

    let glew = with_override(base, GLEW_PATH, config.glew.as_deref());
    if !glew.exists() {
        return Err(GlstubsError::missing_input(InputKind::Glew, glew));
    }

    let source_root = with_override(base, SOURCE_PATH, config.source_dir.as_deref());
    if !source_root.is_dir() {
        tracing::warn!(
            path = %source_root.display(),
            "source tree not found, usage scan will see no files"
        );
    }

    Ok(InputPaths {
        base: base.to_path_buf(),
        gl_deprecated,
        glew,
        source_root,
    })
}
