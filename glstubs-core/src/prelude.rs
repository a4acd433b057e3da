//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use glstubs_core::prelude::*;
//! ```

pub use crate::error::{GlstubsError, GlstubsResult};

// Builder API
pub use crate::builder::{Glstubs, Stage};

// Configuration
pub use crate::config::{load_config, GlstubsConfig};

// Pipeline stages
pub use crate::deprecated::{read_deprecated, DeprecatedSymbols};
pub use crate::emit::{write_outputs, OutputPaths};
pub use crate::glew::{read_glew, GlewLookup};
pub use crate::resolve::{resolve, Resolution};
pub use crate::scan::{gather_source_files, FileFilter};
pub use crate::usage::SourceCorpus;

// Results
pub use crate::report::StubReport;
