//! Error handling for the voxel simulation core
//!
//! The geometry, octree and motion code is total and never fails. Errors only
//! come from the ambient layers around it: configuration loading and the
//! optional device mirror.

use thiserror::Error;

/// Main error type for the simulation core
#[derive(Debug, Error)]
pub enum EngineError {
    // Configuration Errors
    #[error("Invalid config: {field} = {value} ({reason})")]
    InvalidConfig {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error for {path}: {error}")]
    IoError { path: String, error: String },

    #[error("Parse error in {context}: {error}")]
    ParseError { context: String, error: String },

    // Level Errors
    #[error("Invalid level dimensions {width}x{height}x{depth}")]
    InvalidDimensions { width: i32, height: i32, depth: i32 },

    // GPU Errors
    #[error("GPU device not found")]
    DeviceNotFound,

    #[error("GPU device request failed: {error}")]
    DeviceRequestFailed { error: String },

    #[error("Buffer creation failed: size={size}, usage={usage}")]
    BufferCreationFailed { size: u64, usage: String },

    #[error("Mirror size mismatch: expected {expected} bytes, got {found}")]
    MirrorSizeMismatch { expected: usize, found: usize },

    // Generic fallback for unexpected errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Type alias for Results in the simulation core
pub type EngineResult<T> = Result<T, EngineError>;

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            path: String::new(),
            error: error.to_string(),
        }
    }
}

impl From<toml::de::Error> for EngineError {
    fn from(error: toml::de::Error) -> Self {
        EngineError::ParseError {
            context: "toml".to_string(),
            error: error.to_string(),
        }
    }
}

/// Convert Option to Result with context
pub trait OptionExt<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_engine<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> EngineError,
    {
        self.ok_or_else(f)
    }
}

/// Extension trait for adding context to errors
pub trait ErrorContext<T> {
    fn context(self, msg: &str) -> EngineResult<T>;
    fn with_context<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> EngineResult<T> {
        self.map_err(|e| EngineError::Internal {
            message: format!("{}: {}", msg, e),
        })
    }

    fn with_context<F>(self, f: F) -> EngineResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| EngineError::Internal {
            message: format!("{}: {}", f(), e),
        })
    }
}
