//! Run results and console summaries - plaintext and JSON.

use serde::Serialize;
use serde_json::json;

use crate::emit::OutputPaths;

/// Counts gathered along the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StubStats {
    /// Function names parsed from gl-deprecated.h.
    pub deprecated_functions: usize,
    /// Enum names parsed from gl-deprecated.h.
    pub deprecated_enums: usize,
    /// `GLAPI` prototypes in glew.h.
    pub glew_prototypes: usize,
    /// Files searched by the usage filter, `None` when it was disabled.
    pub scanned_files: Option<usize>,
    /// Functions surviving the usage filter.
    pub used_functions: usize,
    /// Enums surviving the usage filter.
    pub used_enums: usize,
}

/// Everything one run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StubReport {
    /// `DO_NOT_USE_GL_*` tokens to define as `0`.
    pub enum_targets: Vec<String>,
    /// Stub declarations for resolved functions.
    pub resolved: Vec<String>,
    /// Function names glew.h has no prototype for.
    pub unresolved: Vec<String>,
    pub stats: StubStats,
    pub outputs: OutputPaths,
}

impl StubReport {
    pub fn has_unresolved(&self) -> bool {
        !self.unresolved.is_empty()
    }

    /// The closing console line.
    pub fn summary_line(&self) -> String {
        if self.has_unresolved() {
            format!(
                "Results written to {} and {}",
                self.outputs.errors.display(),
                self.outputs.stubs.display()
            )
        } else {
            format!("Results written to {}", self.outputs.stubs.display())
        }
    }
}

/// Prints a human-readable summary.
pub fn print_plain(report: &StubReport) {
    let s = &report.stats;
    println!(
        "Deprecated: {} functions, {} enums ({} glew prototypes)",
        s.deprecated_functions, s.deprecated_enums, s.glew_prototypes
    );
    if let Some(files) = s.scanned_files {
        println!(
            "Used in {} files: {} functions, {} enums",
            files, s.used_functions, s.used_enums
        );
    }
    println!(
        "Stubs: {} enums, {} functions, {} unresolved",
        report.enum_targets.len(),
        report.resolved.len(),
        report.unresolved.len()
    );
    if report.has_unresolved() {
        println!("UNRESOLVED ({}):", report.unresolved.len());
        for name in &report.unresolved {
            println!("- {}", name);
        }
    }
    println!("{}", report.summary_line());
}

/// Prints the summary as JSON.
///
/// Falls back to a minimal object if serialization fails.
pub fn print_json(report: &StubReport) {
    let value = json!({
        "stats": report.stats,
        "enums": report.enum_targets.len(),
        "functions": report.resolved.len(),
        "unresolved": report.unresolved,
        "outputs": report.outputs,
    });
    match serde_json::to_string_pretty(&value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("[WARN] JSON serialization failed: {}", e);
            println!("{{\"unresolved\": {:?}}}", report.unresolved);
        }
    }
}
