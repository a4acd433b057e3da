//! Builder pattern API for stub generation.
//!
//! ```rust,ignore
//! use glstubs_core::prelude::*;
//!
//! let report = Glstubs::new("/path/to/blender")
//!     .filter_unused(true)
//!     .output_dir("build")
//!     .run()?;
//!
//! println!("{}", report.summary_line());
//! ```

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::config::GlstubsConfig;
use crate::deprecated::read_deprecated;
use crate::emit::{write_outputs, OutputPaths, DEFAULT_ERRORS_FILE, DEFAULT_STUBS_FILE};
use crate::glew::read_glew;
use crate::paths::resolve_inputs;
use crate::report::{StubReport, StubStats};
use crate::resolve::{enum_targets, resolve};
use crate::scan::{gather_source_files, FileFilter, DEFAULT_EXCLUDES, DEFAULT_INCLUDES};
use crate::usage::{filter_used, SourceCorpus};

/// Pipeline milestones reported to a progress callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    GreppingEnums,
    GreppingFunctions,
    WritingOutput,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GreppingEnums => f.write_str("Grepping the enums"),
            Self::GreppingFunctions => f.write_str("Grepping the functions"),
            Self::WritingOutput => f.write_str("Writing output"),
        }
    }
}

type ProgressFn = Arc<dyn Fn(Stage) + Send + Sync>;

/// Builder for configuring a stub generation run.
///
/// Explicit setters take precedence over the config file, which takes
/// precedence over built-in defaults.
#[derive(Clone)]
pub struct Glstubs {
    /// Blender source checkout
    base: PathBuf,

    config: GlstubsConfig,

    filter_unused: Option<bool>,

    skip_unknown_types: Option<bool>,

    output_dir: Option<PathBuf>,

    /// Replaces configured/default include globs when non-empty
    includes: Vec<String>,

    /// Replaces configured/default exclude globs when non-empty
    excludes: Vec<String>,

    progress: Option<ProgressFn>,
}

impl fmt::Debug for Glstubs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Glstubs")
            .field("base", &self.base)
            .field("config", &self.config)
            .field("filter_unused", &self.filter_unused)
            .field("skip_unknown_types", &self.skip_unknown_types)
            .field("output_dir", &self.output_dir)
            .field("includes", &self.includes)
            .field("excludes", &self.excludes)
            .finish_non_exhaustive()
    }
}

impl Glstubs {
    /// Create a new builder for the given Blender source directory.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self {
            base: base.into(),
            config: GlstubsConfig::default(),
            filter_unused: None,
            skip_unknown_types: None,
            output_dir: None,
            includes: Vec::new(),
            excludes: Vec::new(),
            progress: None,
        }
    }

    /// Use settings from a loaded `glstubs.toml`.
    pub fn with_config(mut self, config: GlstubsConfig) -> Self {
        self.config = config;
        self
    }

    /// Enable or disable the "is this symbol actually used" filter.
    pub fn filter_unused(mut self, enabled: bool) -> Self {
        self.filter_unused = Some(enabled);
        self
    }

    /// Skip glew prototypes with untranslatable return types.
    pub fn skip_unknown_types(mut self, enabled: bool) -> Self {
        self.skip_unknown_types = Some(enabled);
        self
    }

    /// Directory for `stubs.c` and `stubs.err`.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// File-name globs for the usage scan.
    pub fn includes(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.includes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Directory/file-name globs the usage scan skips.
    pub fn excludes(mut self, patterns: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.excludes.extend(patterns.into_iter().map(Into::into));
        self
    }

    /// Called as each stage starts.
    pub fn on_progress(mut self, f: impl Fn(Stage) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(f));
        self
    }

    fn report_stage(&self, stage: Stage) {
        tracing::info!(stage = %stage, "stage started");
        if let Some(progress) = &self.progress {
            progress(stage);
        }
    }

    fn is_filtering(&self) -> bool {
        self.filter_unused
            .or(self.config.filter_unused)
            .unwrap_or(true)
    }

    fn is_skipping_unknown(&self) -> bool {
        self.skip_unknown_types
            .or(self.config.skip_unknown_types)
            .unwrap_or(false)
    }

    fn file_filter(&self) -> Result<FileFilter> {
        let includes: Vec<String> = if !self.includes.is_empty() {
            self.includes.clone()
        } else if let Some(cfg) = &self.config.includes {
            cfg.clone()
        } else {
            DEFAULT_INCLUDES.iter().map(|s| s.to_string()).collect()
        };
        let excludes: Vec<String> = if !self.excludes.is_empty() {
            self.excludes.clone()
        } else if let Some(cfg) = &self.config.excludes {
            cfg.clone()
        } else {
            DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect()
        };
        Ok(FileFilter::new(&includes, &excludes)?)
    }

    /// Resolved output file locations.
    pub fn output_paths(&self) -> OutputPaths {
        let output = self.config.output.clone().unwrap_or_default();
        let dir = self
            .output_dir
            .clone()
            .or_else(|| output.dir.map(PathBuf::from))
            .unwrap_or_default();
        OutputPaths::in_dir(
            &dir,
            output.stubs.as_deref().unwrap_or(DEFAULT_STUBS_FILE),
            output.errors.as_deref().unwrap_or(DEFAULT_ERRORS_FILE),
        )
    }

    /// Parse, filter and join. Nothing is written.
    pub fn generate(&self) -> Result<StubReport> {
        // 1. Locate inputs
        let inputs = resolve_inputs(&self.base, &self.config)?;

        // 2. Parse both headers
        let deprecated = read_deprecated(&inputs.gl_deprecated)
            .with_context(|| format!("Failed to read {}", inputs.gl_deprecated.display()))?;
        let lookup = read_glew(&inputs.glew, self.is_skipping_unknown())
            .with_context(|| format!("Failed to read {}", inputs.glew.display()))?;

        let mut stats = StubStats {
            deprecated_functions: deprecated.functions.len(),
            deprecated_enums: deprecated.enums.len(),
            glew_prototypes: lookup.len(),
            ..Default::default()
        };

        // 3. Drop symbols the source tree never mentions
        let (enums, functions) = if self.is_filtering() {
            let filter = self.file_filter()?;
            let files = gather_source_files(&inputs.source_root, &filter)?;
            let corpus = SourceCorpus::load(&files);
            stats.scanned_files = Some(corpus.len());

            self.report_stage(Stage::GreppingEnums);
            let enums = filter_used(deprecated.enums, &corpus, |e| e.name.as_str());
            self.report_stage(Stage::GreppingFunctions);
            let functions = filter_used(deprecated.functions, &corpus, |f| f.as_str());
            (enums, functions)
        } else {
            (deprecated.enums, deprecated.functions)
        };
        stats.used_enums = enums.len();
        stats.used_functions = functions.len();

        // 4. Join against glew.h
        let resolution = resolve(&functions, &lookup);

        Ok(StubReport {
            enum_targets: enum_targets(&enums),
            resolved: resolution.resolved,
            unresolved: resolution.unresolved,
            stats,
            outputs: self.output_paths(),
        })
    }

    /// Generate and write `stubs.c` / `stubs.err`.
    pub fn run(&self) -> Result<StubReport> {
        let report = self.generate()?;
        self.report_stage(Stage::WritingOutput);
        write_outputs(&report.outputs, &report)?;
        Ok(report)
    }
}
