//! glstubs-core: stub generator for deprecated OpenGL symbols.
//!
//! Reads Blender's `gl-deprecated.h` and GLEW's `glew.h`, works out which
//! deprecated calls and enums the source tree still uses, and emits a C
//! snippet that redefines each of them to an unusable `DO_NOT_USE_*` stub.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use glstubs_core::prelude::*;
//!
//! let report = Glstubs::new("/path/to/blender").run()?;
//! for name in &report.unresolved {
//!     println!("No glew prototype for {}", name);
//! }
//! ```
//!
//! # Module Organization
//!
//! - [`paths`]: Locating both headers inside a checkout
//! - [`deprecated`]: `gl-deprecated.h` parsing
//! - [`glew`]: `glew.h` parsing and the return-type table
//! - [`scan`]: Parallel source file discovery with glob filters
//! - [`usage`]: "Is this symbol actually used" filter
//! - [`resolve`]: Joining names against the lookup table
//! - [`emit`]: Rendering and writing `stubs.c` / `stubs.err`
//! - [`report`]: Run results and console summaries
//! - [`builder`]: Fluent builder API tying the stages together
//! - [`error`]: Typed error handling

pub mod builder;
pub mod config;
pub mod deprecated;
pub mod emit;
pub mod error;
pub mod glew;
pub mod logging;
pub mod paths;
pub mod prelude;
pub mod report;
pub mod resolve;
pub mod scan;
pub mod usage;

// Error types
pub use error::{GlstubsError, GlstubsResult, InputKind, IoResultExt};

// Builder API
pub use builder::{Glstubs, Stage};

// Configuration
pub use config::{load_config, load_config_file, GlstubsConfig, OutputConfig, CONFIG_FILE_NAME};

// Header parsing
pub use deprecated::{parse_deprecated, read_deprecated, DeprecatedSymbols, EnumAlias};
pub use glew::{parse_glew, read_glew, split_prototype, stub_declaration, stub_type, GlewLookup, Prototype};

// Input discovery
pub use paths::{resolve_inputs, InputPaths};

// File scanning and usage filtering
pub use scan::{gather_source_files, FileFilter, DEFAULT_EXCLUDES, DEFAULT_INCLUDES};
pub use usage::{filter_used, SourceCorpus};

// Join and output
pub use emit::{render_errors, render_stubs, write_outputs, OutputPaths};
pub use resolve::{enum_targets, resolve, Resolution};

// Reporting
pub use report::{print_json, print_plain, StubReport, StubStats};

// Logging
pub use logging::{init_plain_logging, init_structured_logging, log_error, log_warn};

#[cfg(test)]
mod tests;
