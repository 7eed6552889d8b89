//! The capture form engine.

use tracing::debug;

use crate::error::{Error, Result};
use crate::listable::Listable;
use crate::store::ListStore;

use super::field::CaptureField;

type MakeItem<T> = Box<dyn Fn(&[CaptureField]) -> T + Send + Sync>;
type OnSubmit<T> = Box<dyn Fn(T) + Send + Sync>;

/// A record type that can be captured through a [`CaptureForm`].
pub trait Capturable: Listable {
    /// Title shown above the form.
    fn form_title() -> &'static str;

    /// The form's fields, in display order, with empty text.
    fn capture_fields() -> Vec<CaptureField>;

    /// Build a new record (with a fresh identity) from field values.
    fn from_fields(fields: &[CaptureField]) -> Self;
}

/// An ordered set of fields that turns into one record on submit.
pub struct CaptureForm<T> {
    title: String,
    fields: Vec<CaptureField>,
    make_item: MakeItem<T>,
    on_submit: OnSubmit<T>,
}

impl<T> std::fmt::Debug for CaptureForm<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureForm")
            .field("title", &self.title)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl<T> CaptureForm<T> {
    /// Create a form.
    ///
    /// `make_item` maps the current fields to a record; `on_submit` receives
    /// every record built by [`CaptureForm::submit`].
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        fields: Vec<CaptureField>,
        make_item: impl Fn(&[CaptureField]) -> T + Send + Sync + 'static,
        on_submit: impl Fn(T) + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            fields,
            make_item: Box::new(make_item),
            on_submit: Box::new(on_submit),
        }
    }

    /// The form's title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The fields in display order.
    #[must_use]
    pub fn fields(&self) -> &[CaptureField] {
        &self.fields
    }

    /// Mutable access to the fields, for editing text in place.
    pub fn fields_mut(&mut self) -> &mut [CaptureField] {
        &mut self.fields
    }

    /// The field called `name`.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&CaptureField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Mutable access to the field called `name`.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut CaptureField> {
        self.fields.iter_mut().find(|field| field.name == name)
    }

    /// Current text of the field called `name`.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.field(name).map(|field| field.text.as_str())
    }

    /// Set the text of the field called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownField`] if the form has no such field.
    pub fn set_text(&mut self, name: &str, text: impl Into<String>) -> Result<()> {
        let title = self.title.clone();
        let field = self
            .field_mut(name)
            .ok_or_else(|| Error::unknown_field(title, name))?;
        field.text = text.into();
        Ok(())
    }

    /// Whether every field is valid.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(CaptureField::is_valid)
    }

    /// The fields that are currently invalid.
    #[must_use]
    pub fn invalid_fields(&self) -> Vec<&CaptureField> {
        self.fields.iter().filter(|field| !field.is_valid()).collect()
    }

    /// Build a record from the current fields and hand it to the submit hook.
    ///
    /// Validity is not re-checked here; gate calls on [`CaptureForm::is_valid`].
    /// Field text is left as it is.
    pub fn submit(&self) {
        let item = (self.make_item)(&self.fields);
        debug!("Submitting form '{}'", self.title);
        (self.on_submit)(item);
    }

    /// Clear the text of every field.
    pub fn reset(&mut self) {
        for field in &mut self.fields {
            field.text.clear();
        }
    }
}

impl<T: Capturable> CaptureForm<T> {
    /// Create the type's form with a custom submit hook.
    #[must_use]
    pub fn for_type(on_submit: impl Fn(T) + Send + Sync + 'static) -> Self {
        Self::new(T::form_title(), T::capture_fields(), T::from_fields, on_submit)
    }

    /// Create the type's form, inserting submitted records into `store`.
    #[must_use]
    pub fn for_store(store: &ListStore<T>) -> Self {
        let store = store.clone();
        Self::for_type(move |item| store.insert(item))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::field_text;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Pair {
        left: String,
        right: String,
    }

    fn pair_form(sink: Arc<Mutex<Vec<Pair>>>) -> CaptureForm<Pair> {
        CaptureForm::new(
            "Pair",
            vec![
                CaptureField::new("left", "Left", "required: Left"),
                CaptureField::new("right", "Right", "optional: Right").optional(),
            ],
            |fields| Pair {
                left: field_text(fields, "left").to_string(),
                right: field_text(fields, "right").to_string(),
            },
            move |pair| sink.lock().unwrap().push(pair),
        )
    }

    #[test]
    fn test_is_valid_requires_every_field() {
        let mut form = pair_form(Arc::default());
        assert!(!form.is_valid());
        assert_eq!(form.invalid_fields().len(), 1);
        assert_eq!(form.invalid_fields()[0].name, "left");

        form.set_text("left", "x").unwrap();
        assert!(form.is_valid());
        assert!(form.invalid_fields().is_empty());
    }

    #[test]
    fn test_submit_builds_and_commits() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let mut form = pair_form(sink.clone());
        form.set_text("left", "l").unwrap();
        form.set_text("right", "r").unwrap();

        form.submit();

        let submitted = sink.lock().unwrap();
        assert_eq!(
            *submitted,
            vec![Pair {
                left: "l".to_string(),
                right: "r".to_string()
            }]
        );
    }

    #[test]
    fn test_submit_keeps_field_text() {
        let mut form = pair_form(Arc::default());
        form.set_text("left", "stays").unwrap();
        form.submit();
        assert_eq!(form.value("left"), Some("stays"));
    }

    #[test]
    fn test_submit_does_not_check_validity() {
        let sink = Arc::new(Mutex::new(Vec::new()));
        let form = pair_form(sink.clone());
        assert!(!form.is_valid());

        form.submit();
        assert_eq!(sink.lock().unwrap().len(), 1);
        assert!(sink.lock().unwrap()[0].left.is_empty());
    }

    #[test]
    fn test_fields_edited_in_place() {
        let mut form = pair_form(Arc::default());
        form.fields_mut()[0].text = "direct".to_string();
        assert_eq!(form.value("left"), Some("direct"));
        assert!(form.is_valid());

        form.field_mut("left").unwrap().text = "   ".to_string();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_set_text_unknown_field() {
        let mut form = pair_form(Arc::default());
        let err = form.set_text("middle", "x").unwrap_err();
        assert!(matches!(err, Error::UnknownField { .. }));
        assert!(err.to_string().contains("middle"));
    }

    #[test]
    fn test_reset_clears_text() {
        let mut form = pair_form(Arc::default());
        form.set_text("left", "a").unwrap();
        form.set_text("right", "b").unwrap();

        form.reset();
        assert!(form.fields().iter().all(|field| field.text.is_empty()));
        assert_eq!(form.title(), "Pair");
    }

    #[test]
    fn test_debug_shows_title() {
        let form = pair_form(Arc::default());
        assert!(format!("{form:?}").contains("Pair"));
    }
}
