//! Editable paste form state.
//!
//! All fields live behind one owner so the submission path reads a single
//! snapshot instead of mixing bound fields with side state.

use crate::constants::{LANGUAGE_NONE, TITLE_MAX_CHARS};
use crate::error::AppError;
use crate::expiry::ExpirySelection;
use tracing::debug;

/// Addressable form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Body,
    Language,
    Expiry,
}

/// Point-in-time copy of every form field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub title: String,
    pub body: String,
    pub language: String,
    pub expiry: ExpirySelection,
}

impl Default for FormSnapshot {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            language: LANGUAGE_NONE.to_string(),
            expiry: ExpirySelection::Never,
        }
    }
}

/// Mutable form model backing the create-paste page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PasteFormModel {
    fields: FormSnapshot,
}

impl PasteFormModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write one field.
    ///
    /// Expiry values go through [`ExpirySelection::from_value`], so the literal
    /// `"never"` clears the expiry.
    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        let value = value.into();
        match field {
            FormField::Title => self.fields.title = value,
            FormField::Body => self.fields.body = value,
            FormField::Language => self.fields.language = value,
            FormField::Expiry => self.fields.expiry = ExpirySelection::from_value(&value),
        }
    }

    pub fn set_expiry(&mut self, selection: ExpirySelection) {
        self.fields.expiry = selection;
    }

    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Title => &self.fields.title,
            FormField::Body => &self.fields.body,
            FormField::Language => &self.fields.language,
            FormField::Expiry => self.fields.expiry.as_value(),
        }
    }

    pub fn snapshot(&self) -> FormSnapshot {
        self.fields.clone()
    }

    /// The body must be non-empty. Whitespace counts as content.
    pub fn is_valid(&self) -> bool {
        !self.fields.body.is_empty()
    }

    /// Run the submit-time validation rule.
    ///
    /// # Errors
    /// Returns [`AppError::BodyRequired`] when the body is empty. Fields are
    /// left untouched either way.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(AppError::BodyRequired)
        }
    }

    /// Advisory title length check; titles are never truncated or rejected.
    pub fn title_exceeds_limit(&self) -> bool {
        self.fields.title.chars().count() > TITLE_MAX_CHARS
    }

    /// Restore every field to its initial value.
    pub fn reset(&mut self) {
        debug!("resetting paste form");
        self.fields = FormSnapshot::default();
    }
}
