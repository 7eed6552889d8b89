//! Core capability types for capturelist.
//!
//! This module defines the [`Listable`] trait that every stored record type
//! implements, and the [`Loadable`] state published by a
//! [`ListStore`](crate::ListStore).

use std::fmt::Debug;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Error;

/// A uniquely identified record that can live in a [`ListStore`](crate::ListStore).
///
/// Identity is assigned when the record is created and never reassigned.
/// Records are values: updating one means replacing it, by identity, in the
/// owning collection.
pub trait Listable: Clone + Debug + Send + Sync + Serialize + DeserializeOwned + 'static {
    /// The identity type of this record.
    type Id: PartialEq + Clone + Debug + Send + Sync;

    /// The identity of this record.
    fn id(&self) -> &Self::Id;

    /// Name of the record type, used to derive the backing record's file name.
    fn type_description() -> &'static str;

    /// A human-readable summary built from the record's attributes.
    fn object_description(&self) -> String;

    /// Whether the record's attributes satisfy the type's own rules.
    fn is_valid(&self) -> bool;

    /// Whether presentation layers should show [`Listable::placeholder`]
    /// until real data is available.
    fn use_placeholder() -> bool {
        false
    }

    /// An empty stand-in record, if the type provides one.
    fn placeholder() -> Option<Self> {
        None
    }

    /// File name of the backing record for this type.
    #[must_use]
    fn record_filename() -> String {
        format!("{}.json", Self::type_description())
    }
}

/// The observable state of a [`ListStore`](crate::ListStore).
///
/// Transitions are `None → Loading → Loaded | Error`. `Loaded` and `Error`
/// are re-entered by every later operation.
#[derive(Debug, Clone)]
pub enum Loadable<T> {
    /// Nothing has been loaded yet.
    None,
    /// A load is in progress.
    Loading,
    /// The last operation succeeded with this value.
    Loaded(T),
    /// The last operation failed.
    Error(Arc<Error>),
}

impl<T> Default for Loadable<T> {
    fn default() -> Self {
        Self::None
    }
}

impl<T> Loadable<T> {
    /// The loaded value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Loaded(value) => Some(value),
            _ => None,
        }
    }

    /// The failure, if the state is an error.
    #[must_use]
    pub fn error(&self) -> Option<&Arc<Error>> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }

    /// Check if the state holds a loaded value.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Check if a load is in progress.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if the state is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    /// Check if the state is final for the last operation (loaded or error).
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.is_loaded() || self.is_error()
    }

    /// Short lowercase name of the state.
    #[must_use]
    pub fn status(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Error(_) => "error",
        }
    }
}

impl<T> std::fmt::Display for Loadable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error(err) => write!(f, "error: {err}"),
            other => write!(f, "{}", other.status()),
        }
    }
}
