//! Capture fields.

/// A named text input slot in a capture form.
///
/// The presentation layer edits `text` in place; the remaining attributes are
/// fixed when the form is defined. `auto_capitalize` and
/// `check_restricted_word_list` are hints for the presentation layer only and
/// never affect validity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureField {
    /// Field name, unique within its form.
    pub name: String,
    /// Label shown next to the input.
    pub label_text: String,
    /// Prompt shown inside an empty input.
    pub prompt_text: String,
    /// Current text.
    pub text: String,
    /// Whether the field must be filled in.
    pub required: bool,
    /// Whether input should be auto-capitalized.
    pub auto_capitalize: bool,
    /// Whether input should be checked against a restricted word list.
    pub check_restricted_word_list: bool,
}

impl CaptureField {
    /// Create an empty required field with both presentation hints enabled.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        label_text: impl Into<String>,
        prompt_text: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            label_text: label_text.into(),
            prompt_text: prompt_text.into(),
            text: String::new(),
            required: true,
            auto_capitalize: true,
            check_restricted_word_list: true,
        }
    }

    /// Mark the field as not required.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Disable auto-capitalization.
    #[must_use]
    pub fn without_auto_capitalize(mut self) -> Self {
        self.auto_capitalize = false;
        self
    }

    /// Disable the restricted word list check.
    #[must_use]
    pub fn without_word_list_check(mut self) -> Self {
        self.check_restricted_word_list = false;
        self
    }

    /// Set the initial text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Check if the text is empty after trimming whitespace.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// A field is valid if it has non-blank text or is not required.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.is_blank() || !self.required
    }
}

/// Text of the field called `name`, or `""` if the form has no such field.
#[must_use]
pub fn field_text<'a>(fields: &'a [CaptureField], name: &str) -> &'a str {
    fields
        .iter()
        .find(|field| field.name == name)
        .map_or("", |field| field.text.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_field_defaults() {
        let field = CaptureField::new("dogName", "Dog's Name", "required: Your Dog's Name");
        assert!(field.required);
        assert!(field.auto_capitalize);
        assert!(field.check_restricted_word_list);
        assert!(field.text.is_empty());
    }

    #[test]
    fn test_builder_flags() {
        let field = CaptureField::new("hint", "Hint", "optional: Hint")
            .optional()
            .without_auto_capitalize()
            .without_word_list_check();
        assert!(!field.required);
        assert!(!field.auto_capitalize);
        assert!(!field.check_restricted_word_list);
    }

    #[test]
    fn test_required_field_validity() {
        let mut field = CaptureField::new("color", "Color", "required: Color");
        assert!(!field.is_valid());

        field.text = "   \n\t".to_string();
        assert!(!field.is_valid());

        field.text = " Blue ".to_string();
        assert!(field.is_valid());
    }

    #[test]
    fn test_optional_empty_field_is_valid() {
        let field = CaptureField::new("hint", "Hint", "optional: Hint").optional();
        assert!(field.is_blank());
        assert!(field.is_valid());
    }

    #[test]
    fn test_hints_do_not_affect_validity() {
        let field = CaptureField::new("color", "Color", "Color")
            .without_auto_capitalize()
            .without_word_list_check();
        assert!(!field.is_valid());
        assert!(field.clone().with_text("red").is_valid());
    }

    #[test]
    fn test_field_text_lookup() {
        let fields = vec![
            CaptureField::new("a", "A", "A").with_text("alpha"),
            CaptureField::new("b", "B", "B"),
        ];
        assert_eq!(field_text(&fields, "a"), "alpha");
        assert_eq!(field_text(&fields, "b"), "");
        assert_eq!(field_text(&fields, "missing"), "");
    }
}
