//! Draft editing and validate-on-submit.
//!
//! A [`Form`] owns one transient draft plus the field-keyed errors from the
//! last submit attempt. Fields are stored raw and unvalidated as the user
//! sets them; every submit re-validates the whole draft from scratch, so an
//! invalid state is never sticky.
//!
//! State machine: `Idle -> Editing -> (Invalid -> Editing | Valid -> Idle)`.

use crate::id::RecordId;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Field-keyed validation messages, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Record a rule failure against `field`, or pass the value through.
    /// The fallback keeps validation running so one submit reports every
    /// broken field at once.
    pub fn check<T>(&mut self, field: &'static str, result: Result<T, String>, fallback: T) -> T {
        match result {
            Ok(value) => value,
            Err(message) => {
                self.push(field, message);
                fallback
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (field, message) in &self.0 {
            writeln!(f, "{field}: {message}")?;
        }
        Ok(())
    }
}

/// Raised when a draft is asked to set a field it does not have.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

/// A raw, string-backed draft of one record shape.
///
/// `set_field` stores without validating; `validate` parses and checks every
/// rule, returning either the validated field bundle or per-field errors.
pub trait DraftModel: Default + Clone {
    type Output;

    fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField>;

    /// Current raw value of a field, for prefilled edit forms.
    fn field(&self, name: &str) -> Option<String>;

    fn validate(&self) -> Result<Self::Output, FieldErrors>;
}

/// Whether a submission routes to create or update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditTarget {
    New,
    Existing(RecordId),
}

/// Result of one submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome<O> {
    /// Nothing was being edited.
    Idle,
    /// Validation failed; the form stays in Editing with errors exposed.
    Rejected,
    /// The draft validated. The owner routes the output to create or update.
    Accepted { target: EditTarget, output: O },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormState {
    Idle,
    Editing(EditTarget),
}

/// One transient draft plus the errors from its last submit.
#[derive(Debug, Clone)]
pub struct Form<D: DraftModel> {
    state: FormState,
    draft: D,
    errors: FieldErrors,
}

impl<D: DraftModel> Default for Form<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: DraftModel> Form<D> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: FormState::Idle,
            draft: D::default(),
            errors: FieldErrors::new(),
        }
    }

    /// Start a fresh create draft.
    pub fn begin_create(&mut self) {
        self.state = FormState::Editing(EditTarget::New);
        self.draft = D::default();
        self.errors = FieldErrors::new();
    }

    /// Start editing an existing record from its prefilled draft.
    pub fn begin_edit(&mut self, id: RecordId, draft: D) {
        self.state = FormState::Editing(EditTarget::Existing(id));
        self.draft = draft;
        self.errors = FieldErrors::new();
    }

    /// Set one raw field. An idle form implicitly begins a create draft.
    pub fn set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        if self.state == FormState::Idle {
            self.begin_create();
        }
        self.draft.set_field(name, raw)
    }

    #[must_use]
    pub fn is_editing(&self) -> bool {
        matches!(self.state, FormState::Editing(_))
    }

    #[must_use]
    pub fn target(&self) -> Option<EditTarget> {
        match self.state {
            FormState::Idle => None,
            FormState::Editing(target) => Some(target),
        }
    }

    #[must_use]
    pub fn draft(&self) -> &D {
        &self.draft
    }

    #[must_use]
    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Abandon the draft and return to idle.
    pub fn cancel(&mut self) {
        self.state = FormState::Idle;
        self.draft = D::default();
        self.errors = FieldErrors::new();
    }

    /// Re-validate the draft from scratch and either hand the validated
    /// output to the caller (returning to idle) or stay in Editing with the
    /// errors exposed. A rejected submit never mutates any store.
    pub fn submit(&mut self) -> SubmitOutcome<D::Output> {
        let FormState::Editing(target) = self.state else {
            return SubmitOutcome::Idle;
        };
        match self.draft.validate() {
            Ok(output) => {
                self.cancel();
                SubmitOutcome::Accepted { target, output }
            }
            Err(errors) => {
                self.errors = errors;
                SubmitOutcome::Rejected
            }
        }
    }
}
