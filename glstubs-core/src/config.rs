//! Configuration loading from glstubs.toml.

use crate::error::{GlstubsError, GlstubsResult, IoResultExt};
use serde::Deserialize;
use std::{fs, path::Path};

/// Default file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "glstubs.toml";

/// Main configuration structure for glstubs.toml.
///
/// Input paths are relative to the Blender source directory unless absolute.
/// `output.dir` is relative to the working directory, like `--output-dir`.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GlstubsConfig {
    /// Override for `intern/glew-mx/intern/gl-deprecated.h`.
    pub gl_deprecated: Option<String>,
    /// Override for `extern/glew/include/GL/glew.h`.
    pub glew: Option<String>,
    /// Root of the usage scan, default `source/blender`.
    pub source_dir: Option<String>,
    /// File-name globs to scan, replaces the defaults.
    pub includes: Option<Vec<String>>,
    /// Directory/file-name globs to skip, replaces the defaults.
    pub excludes: Option<Vec<String>>,
    /// Drop symbols the source tree never mentions.
    pub filter_unused: Option<bool>,
    /// Skip `GLAPI` lines with an untranslatable return type instead of failing.
    pub skip_unknown_types: Option<bool>,
    /// Output configuration.
    pub output: Option<OutputConfig>,
}

/// Output file configuration.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Directory both files are written to, relative to the working directory.
    pub dir: Option<String>,
    /// Name of the generated C snippet, default `stubs.c`.
    pub stubs: Option<String>,
    /// Name of the unresolved-name report, default `stubs.err`.
    pub errors: Option<String>,
}

/// Loads `glstubs.toml` from `dir` if it exists.
pub fn load_config(dir: &Path) -> GlstubsResult<Option<GlstubsConfig>> {
    let path = dir.join(CONFIG_FILE_NAME);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// Loads an explicitly named config file. Missing files are an error here.
pub fn load_config_file(path: &Path) -> GlstubsResult<GlstubsConfig> {
    let content = fs::read_to_string(path).with_path(path)?;
    toml::from_str(&content).map_err(|e| GlstubsError::config(path, e.to_string()))
}
