//! Error types for capturelist.
//!
//! This module defines all error types used throughout the capturelist crate.
//! Store failures never reach the caller of a mutating operation directly; they
//! are published through [`Loadable::Error`](crate::Loadable::Error) instead.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for capturelist operations.
#[derive(Error, Debug)]
pub enum Error {
    // === Store Errors ===
    /// The backing record exists but could not be parsed.
    #[error("failed to decode record at {path}: {source}")]
    Decode {
        /// Path (or name) of the backing record.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The candidate collection could not be serialized.
    #[error("failed to encode record for {path}: {source}")]
    Encode {
        /// Path (or name) of the backing record.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The backing record could not be read.
    #[error("failed to read record at {path}: {source}")]
    RecordRead {
        /// Path of the backing record.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The backing record could not be replaced.
    #[error("failed to write record at {path}: {source}")]
    RecordWrite {
        /// Path of the backing record.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The store worker is gone and can no longer accept operations.
    #[error("store for '{type_description}' is closed")]
    StoreClosed {
        /// Type description of the store's items.
        type_description: &'static str,
    },

    // === Form Errors ===
    /// A field name was not part of the capture form.
    #[error("unknown field '{name}' in form '{form}'")]
    UnknownField {
        /// Title of the form.
        form: String,
        /// The requested field name.
        name: String,
    },

    // === Configuration Errors ===
    /// Failed to load configuration.
    #[error("failed to load configuration: {0}")]
    ConfigLoad(Box<figment::Error>),

    /// Configuration validation failed.
    #[error("invalid configuration: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    // === I/O Errors ===
    /// Failed to create a required directory.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        /// Path that couldn't be created.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    // === Generic Errors ===
    /// An internal error occurred (bug).
    #[error("internal error: {0}")]
    Internal(String),
}

/// A specialized Result type for capturelist operations.
pub type Result<T> = std::result::Result<T, Error>;

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigLoad(Box::new(err))
    }
}

impl Error {
    /// Create a new internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Create an unknown field error.
    #[must_use]
    pub fn unknown_field(form: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownField {
            form: form.into(),
            name: name.into(),
        }
    }

    /// Check if this error means the backing record could not be parsed.
    #[must_use]
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// Check if this error is a read or write failure on the backing record.
    #[must_use]
    pub fn is_io_error(&self) -> bool {
        matches!(
            self,
            Self::RecordRead { .. }
                | Self::RecordWrite { .. }
                | Self::DirectoryCreate { .. }
        )
    }
}
