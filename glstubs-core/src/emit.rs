//! Rendering and writing of `stubs.c` and `stubs.err`.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GlstubsResult, IoResultExt};
use crate::report::StubReport;

pub const DEFAULT_STUBS_FILE: &str = "stubs.c";
pub const DEFAULT_ERRORS_FILE: &str = "stubs.err";

const PREAMBLE: &str = "
/**
 * List automatically generated from `gl-deprecated.h` and `glew.h`
 */
 ";

const ENUMS: &str = "

/**
 * ENUM values
 */
";

const FUNCTIONS: &str = "

/**
 * Functions
 */
";

const END: &str = "

/**
 * End of automatically generated list
 */
";

/// Where the two output files go.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputPaths {
    pub stubs: PathBuf,
    pub errors: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path, stubs: &str, errors: &str) -> Self {
        Self {
            stubs: dir.join(stubs),
            errors: dir.join(errors),
        }
    }
}

impl Default for OutputPaths {
    /// `stubs.c` and `stubs.err` in the working directory.
    fn default() -> Self {
        Self {
            stubs: PathBuf::from(DEFAULT_STUBS_FILE),
            errors: PathBuf::from(DEFAULT_ERRORS_FILE),
        }
    }
}

/// Renders the generated C snippet. Empty sections are left out.
pub fn render_stubs<E: AsRef<str>, F: AsRef<str>>(enum_targets: &[E], functions: &[F]) -> String {
    let mut out = String::from(PREAMBLE);

    if !enum_targets.is_empty() {
        out.push_str(ENUMS);
        let defines: Vec<String> = enum_targets
            .iter()
            .map(|e| format!("#define {} 0", e.as_ref()))
            .collect();
        out.push_str(&defines.join("\n"));
    }

    if !functions.is_empty() {
        out.push_str(FUNCTIONS);
        let decls: Vec<&str> = functions.iter().map(AsRef::as_ref).collect();
        out.push_str(&decls.join("\n"));
    }

    out.push_str(END);
    out
}

/// Renders the unresolved-name report, one name per line, no trailing newline.
pub fn render_errors<S: AsRef<str>>(unresolved: &[S]) -> String {
    let names: Vec<&str> = unresolved.iter().map(AsRef::as_ref).collect();
    names.join("\n")
}

/// Writes both files, creating parent directories as needed. The error file
/// is always written, even when empty.
pub fn write_outputs(paths: &OutputPaths, report: &StubReport) -> GlstubsResult<()> {
    for path in [&paths.stubs, &paths.errors] {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_path(parent)?;
        }
    }

    fs::write(&paths.stubs, render_stubs(&report.enum_targets, &report.resolved))
        .with_path(&paths.stubs)?;
    fs::write(&paths.errors, render_errors(&report.unresolved)).with_path(&paths.errors)?;

    tracing::info!(
        stubs = %paths.stubs.display(),
        errors = %paths.errors.display(),
        "wrote outputs"
    );
    Ok(())
}
