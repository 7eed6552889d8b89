//! `capturelist` - File-backed list stores and capture forms
//!
//! This library keeps ordered collections of identifiable records in one JSON
//! file per record type, and provides capture forms that turn validated text
//! fields into new records.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod form;
pub mod listable;
pub mod logging;
pub mod sample;
pub mod storage;
pub mod store;

pub use config::Config;
pub use error::{Error, Result};
pub use form::{Capturable, CaptureField, CaptureForm};
pub use listable::{Listable, Loadable};
pub use logging::init_logging;
pub use sample::SampleEntry;
pub use storage::{FileRecord, MemoryRecord, RecordBackend};
pub use store::{ListState, ListStore, RecordFormat};
