//! Typed error handling for glstubs.
//!
//! Library consumers can match on these; the CLI maps them to exit codes.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which of the two required headers an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// `intern/glew-mx/intern/gl-deprecated.h`
    GlDeprecated,
    /// `extern/glew/include/GL/glew.h`
    Glew,
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GlDeprecated => f.write_str("gl-deprecated.h"),
            Self::Glew => f.write_str("glew.h"),
        }
    }
}

/// Main error type for glstubs operations.
#[derive(Error, Debug)]
pub enum GlstubsError {
    /// I/O error when reading/writing files
    #[error("I/O error at {path}: {message}")]
    Io {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// The base path given on the command line is not a directory
    #[error("Path is not a directory: \"{path}\"")]
    NotADirectory { path: PathBuf },

    /// One of the two input headers does not exist
    #[error("Could not find {kind}: \"{path}\"")]
    MissingInput { kind: InputKind, path: PathBuf },

    /// Malformed header line
    #[error("Parse error in {path}:{line}: {message}")]
    Parse {
        path: PathBuf,
        /// Line number (1-indexed)
        line: usize,
        message: String,
    },

    /// A `GLAPI` prototype whose return type has no stub translation
    #[error("Unknown return type `{type_name}` in {path}:{line}")]
    UnknownType {
        path: PathBuf,
        line: usize,
        type_name: String,
    },

    /// Configuration file errors
    #[error("Config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// Include/exclude glob that does not compile
    #[error("Invalid pattern `{pattern}`: {message}")]
    Pattern { pattern: String, message: String },

    /// Invalid argument provided
    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },
}

impl GlstubsError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: err.to_string(),
            source: Some(err),
        }
    }

    pub fn not_a_directory(path: impl Into<PathBuf>) -> Self {
        Self::NotADirectory { path: path.into() }
    }

    pub fn missing_input(kind: InputKind, path: impl Into<PathBuf>) -> Self {
        Self::MissingInput {
            kind,
            path: path.into(),
        }
    }

    /// Create a parse error at a 1-indexed line.
    pub fn parse(path: impl Into<PathBuf>, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            line,
            message: message.into(),
        }
    }

    pub fn unknown_type(path: impl Into<PathBuf>, line: usize, type_name: impl Into<String>) -> Self {
        Self::UnknownType {
            path: path.into(),
            line,
            type_name: type_name.into(),
        }
    }

    /// Create a config error.
    pub fn config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Pattern {
            pattern: pattern.into(),
            message: message.into(),
        }
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotADirectory { .. } => 2,
            Self::MissingInput {
                kind: InputKind::GlDeprecated,
                ..
            } => 3,
            Self::MissingInput {
                kind: InputKind::Glew,
                ..
            } => 4,
            Self::Parse { .. } | Self::UnknownType { .. } | Self::Config { .. } => 5,
            _ => 1,
        }
    }

    /// Get the path associated with this error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::Io { path, .. } => Some(path),
            Self::NotADirectory { path } => Some(path),
            Self::MissingInput { path, .. } => Some(path),
            Self::Parse { path, .. } => Some(path),
            Self::UnknownType { path, .. } => Some(path),
            Self::Config { path, .. } => Some(path),
            _ => None,
        }
    }
}

/// Convenience type alias for glstubs results.
pub type GlstubsResult<T> = Result<T, GlstubsError>;

/// Extension trait for converting std::io::Error with path context.
pub trait IoResultExt<T> {
    /// Add path context to an I/O error.
    fn with_path(self, path: impl Into<PathBuf>) -> GlstubsResult<T>;
}

impl<T> IoResultExt<T> for std::io::Result<T> {
    fn with_path(self, path: impl Into<PathBuf>) -> GlstubsResult<T> {
        self.map_err(|e| GlstubsError::io(path, e))
    }
}
