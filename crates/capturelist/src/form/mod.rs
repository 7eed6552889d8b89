//! Capture forms.
//!
//! A [`CaptureForm`] holds an ordered set of [`CaptureField`]s. The
//! presentation layer edits field text in place, checks
//! [`CaptureForm::is_valid`], and calls [`CaptureForm::submit`], which maps the
//! fields to one record and hands it on (usually to
//! [`ListStore::insert`](crate::ListStore::insert)).
//!
//! # Example
//!
//! ```
//! use capturelist::form::{field_text, CaptureField, CaptureForm};
//!
//! let mut form = CaptureForm::new(
//!     "Greeting",
//!     vec![CaptureField::new("name", "Name", "required: Name")],
//!     |fields| format!("Hello, {}", field_text(fields, "name")),
//!     |greeting| println!("{greeting}"),
//! );
//!
//! assert!(!form.is_valid());
//! form.set_text("name", "Daisy").unwrap();
//! assert!(form.is_valid());
//! form.submit();
//! ```

mod engine;
mod field;

pub use engine::{Capturable, CaptureForm};
pub use field::{field_text, CaptureField};
