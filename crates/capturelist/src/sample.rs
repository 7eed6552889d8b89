//! The sample record type.
//!
//! [`SampleEntry`] is a small record used by the `caplist` binary and as a
//! template for new record types: it implements [`Listable`] for storage and
//! [`Capturable`] for its capture form.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::form::{field_text, Capturable, CaptureField};
use crate::listable::Listable;

/// Field name for [`SampleEntry::password_hint`].
pub const PASSWORD_HINT: &str = "passwordHint";
/// Field name for [`SampleEntry::favorite_color`].
pub const FAVORITE_COLOR: &str = "favoriteColor";
/// Field name for [`SampleEntry::dog_name`].
pub const DOG_NAME: &str = "dogName";

/// A sample record with three text attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleEntry {
    /// Identity, assigned at creation.
    pub id: Uuid,
    /// Optional password hint.
    pub password_hint: String,
    /// Favorite color (required).
    pub favorite_color: String,
    /// Dog's name (required).
    pub dog_name: String,
}

impl SampleEntry {
    /// Create an entry with a fresh identity.
    #[must_use]
    pub fn new(
        password_hint: impl Into<String>,
        favorite_color: impl Into<String>,
        dog_name: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            password_hint: password_hint.into(),
            favorite_color: favorite_color.into(),
            dog_name: dog_name.into(),
        }
    }
}

impl Listable for SampleEntry {
    type Id = Uuid;

    fn id(&self) -> &Uuid {
        &self.id
    }

    fn type_description() -> &'static str {
        "SampleEntry"
    }

    fn object_description(&self) -> String {
        format!(
            "Hint: {}, Color: {}, Dog: {}",
            self.password_hint, self.favorite_color, self.dog_name
        )
    }

    fn is_valid(&self) -> bool {
        let valid = !self.favorite_color.trim().is_empty() && !self.dog_name.trim().is_empty();
        if !valid {
            tracing::debug!("SampleEntry {} failed validation", self.id);
        }
        valid
    }

    fn placeholder() -> Option<Self> {
        Some(Self {
            id: Uuid::nil(),
            password_hint: String::new(),
            favorite_color: String::new(),
            dog_name: String::new(),
        })
    }
}

impl Capturable for SampleEntry {
    fn form_title() -> &'static str {
        "Sample Form"
    }

    fn capture_fields() -> Vec<CaptureField> {
        vec![
            CaptureField::new(PASSWORD_HINT, "Password Hint", "optional: Password Hint")
                .optional()
                .without_auto_capitalize()
                .without_word_list_check(),
            CaptureField::new(FAVORITE_COLOR, "Favorite Color", "required: Favorite Color"),
            CaptureField::new(DOG_NAME, "Dog's Name", "required: Your Dog's Name"),
        ]
    }

    fn from_fields(fields: &[CaptureField]) -> Self {
        Self::new(
            field_text(fields, PASSWORD_HINT),
            field_text(fields, FAVORITE_COLOR),
            field_text(fields, DOG_NAME),
        )
    }
}
