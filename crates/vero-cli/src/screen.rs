//! The generic view engine.
//!
//! A [`Screen`] wires one record shape through the whole stack: store,
//! form, table binding, summary, chart series, export. Concrete views
//! configure a `Screen` (seeds, columns, field specs, summary function)
//! and get every operation of [`ViewModule`] for free — no view
//! reimplements CRUD, validation plumbing, or rendering.

use crate::config::Thresholds;
use chrono::NaiveDate;
use tracing::warn;
use vero_analytics::ViewSummary;
use vero_core::{
    DraftModel, EditTarget, FieldErrors, FieldSpec, Form, IdGenerator, Record, RecordId,
    RecordStore, StoreError, SubmitOutcome, TableSpec, UnknownField, to_csv, to_printable,
};

/// Per-pass inputs to summaries: one consistent `today` plus the
/// user-configured at-risk cutoffs.
#[derive(Debug, Clone)]
pub struct ViewContext {
    pub today: NaiveDate,
    pub thresholds: Thresholds,
}

/// What happened to a form submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormResult {
    /// No draft was being edited.
    Idle,
    /// Validation failed; errors are exposed on the form.
    Rejected,
    Created(RecordId),
    Updated(RecordId),
    /// The edit target vanished; the store is untouched.
    Missing(RecordId),
}

/// A record shape that can live inside a [`Screen`].
pub trait ViewRecord: Record + Clone + serde::Serialize {
    /// Validated field bundle produced by the draft.
    type Fields;
    /// Raw string-backed draft driving the form.
    type Draft: DraftModel<Output = Self::Fields>;

    fn from_fields(id: RecordId, fields: Self::Fields) -> Self;

    /// Prefilled draft for editing this record.
    fn draft(&self) -> Self::Draft;
}

type SummarizeFn<T> = fn(&[T], &ViewContext) -> ViewSummary;
type ChartFn<T> = fn(&[T], &ViewContext) -> Vec<(String, u64)>;

/// One configured view: the store plus everything needed to drive it.
pub struct Screen<T: ViewRecord> {
    key: &'static str,
    title: &'static str,
    store: RecordStore<T>,
    table: TableSpec<T>,
    fields: &'static [FieldSpec],
    form: Form<T::Draft>,
    ids: IdGenerator,
    summarize: SummarizeFn<T>,
    chart: ChartFn<T>,
}

impl<T: ViewRecord> Screen<T> {
    pub fn new(
        key: &'static str,
        title: &'static str,
        seeds: Vec<T>,
        table: TableSpec<T>,
        fields: &'static [FieldSpec],
        summarize: SummarizeFn<T>,
        chart: ChartFn<T>,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            key,
            title,
            store: RecordStore::seeded(seeds)?,
            table,
            fields,
            form: Form::new(),
            ids: IdGenerator::new(),
            summarize,
            chart,
        })
    }

    fn route_submit(&mut self) -> FormResult {
        match self.form.submit() {
            SubmitOutcome::Idle => FormResult::Idle,
            SubmitOutcome::Rejected => FormResult::Rejected,
            SubmitOutcome::Accepted { target, output } => match target {
                EditTarget::New => {
                    let id = self
                        .store
                        .create_with(&self.ids, |id| T::from_fields(id, output));
                    FormResult::Created(id)
                }
                EditTarget::Existing(id) => {
                    if self.store.update(id, |record| *record = T::from_fields(id, output)) {
                        FormResult::Updated(id)
                    } else {
                        FormResult::Missing(id)
                    }
                }
            },
        }
    }
}

/// The object-safe surface every view exposes to commands and the board.
pub trait ViewModule {
    fn key(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn field_specs(&self) -> &'static [FieldSpec];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;

    fn headers(&self) -> Vec<&'static str>;
    fn column_widths(&self) -> Vec<u16>;
    fn rows(&self) -> Vec<Vec<String>>;
    fn render_table(&self) -> String;
    fn records_json(&self) -> serde_json::Value;
    fn record_label(&self, id: RecordId) -> Option<String>;
    fn row_ids(&self) -> Vec<RecordId>;

    /// Drive the form through a full create: set every field, submit.
    fn create(&mut self, fields: &[(String, String)]) -> Result<FormResult, UnknownField>;
    /// Prefill from the existing record, overlay the given fields, submit.
    fn update(&mut self, id: RecordId, fields: &[(String, String)])
    -> Result<FormResult, UnknownField>;
    fn delete(&mut self, id: RecordId) -> bool;

    fn summary(&self, ctx: &ViewContext) -> ViewSummary;
    fn chart_series(&self, ctx: &ViewContext) -> Vec<(String, u64)>;
    fn csv(&self) -> String;
    fn printable(&self) -> String;

    // Incremental form surface for the board overlay.
    fn form_begin_create(&mut self);
    fn form_begin_edit(&mut self, id: RecordId) -> bool;
    fn form_set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField>;
    fn form_field(&self, name: &str) -> Option<String>;
    fn form_errors(&self) -> &FieldErrors;
    fn form_is_editing(&self) -> bool;
    fn form_target(&self) -> Option<EditTarget>;
    fn form_cancel(&mut self);
    fn form_submit(&mut self) -> FormResult;
}

impl<T: ViewRecord> ViewModule for Screen<T> {
    fn key(&self) -> &'static str {
        self.key
    }

    fn title(&self) -> &'static str {
        self.title
    }

    fn field_specs(&self) -> &'static [FieldSpec] {
        self.fields
    }

    fn len(&self) -> usize {
        self.store.len()
    }

    fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    fn headers(&self) -> Vec<&'static str> {
        self.table.headers()
    }

    fn column_widths(&self) -> Vec<u16> {
        self.table.columns().iter().map(|c| c.width).collect()
    }

    fn rows(&self) -> Vec<Vec<String>> {
        self.store
            .records()
            .iter()
            .map(|r| self.table.row(r))
            .collect()
    }

    fn render_table(&self) -> String {
        self.table.render_text(self.store.records())
    }

    fn records_json(&self) -> serde_json::Value {
        serde_json::to_value(self.store.records()).unwrap_or(serde_json::Value::Null)
    }

    fn record_label(&self, id: RecordId) -> Option<String> {
        self.store
            .get(id)
            .map(|r| self.table.row(r).first().cloned().unwrap_or_default())
    }

    fn row_ids(&self) -> Vec<RecordId> {
        self.store.records().iter().map(Record::id).collect()
    }

    fn create(&mut self, fields: &[(String, String)]) -> Result<FormResult, UnknownField> {
        self.form.begin_create();
        for (name, raw) in fields {
            if let Err(unknown) = self.form.set_field(name, raw) {
                self.form.cancel();
                return Err(unknown);
            }
        }
        Ok(self.route_submit())
    }

    fn update(
        &mut self,
        id: RecordId,
        fields: &[(String, String)],
    ) -> Result<FormResult, UnknownField> {
        let Some(existing) = self.store.get(id) else {
            warn!(view = self.key, %id, "edit miss: no record with this id");
            return Ok(FormResult::Missing(id));
        };
        self.form.begin_edit(id, existing.draft());
        for (name, raw) in fields {
            if let Err(unknown) = self.form.set_field(name, raw) {
                self.form.cancel();
                return Err(unknown);
            }
        }
        Ok(self.route_submit())
    }

    fn delete(&mut self, id: RecordId) -> bool {
        self.store.delete(id)
    }

    fn summary(&self, ctx: &ViewContext) -> ViewSummary {
        (self.summarize)(self.store.records(), ctx)
    }

    fn chart_series(&self, ctx: &ViewContext) -> Vec<(String, u64)> {
        (self.chart)(self.store.records(), ctx)
    }

    fn csv(&self) -> String {
        to_csv(&self.table, self.store.records())
    }

    fn printable(&self) -> String {
        to_printable(self.title, &self.table, self.store.records())
    }

    fn form_begin_create(&mut self) {
        self.form.begin_create();
    }

    fn form_begin_edit(&mut self, id: RecordId) -> bool {
        match self.store.get(id) {
            Some(record) => {
                let draft = record.draft();
                self.form.begin_edit(id, draft);
                true
            }
            None => false,
        }
    }

    fn form_set_field(&mut self, name: &str, raw: &str) -> Result<(), UnknownField> {
        self.form.set_field(name, raw)
    }

    fn form_field(&self, name: &str) -> Option<String> {
        self.form.draft().field(name)
    }

    fn form_errors(&self) -> &FieldErrors {
        self.form.errors()
    }

    fn form_is_editing(&self) -> bool {
        self.form.is_editing()
    }

    fn form_target(&self) -> Option<EditTarget> {
        self.form.target()
    }

    fn form_cancel(&mut self) {
        self.form.cancel();
    }

    fn form_submit(&mut self) -> FormResult {
        self.route_submit()
    }
}
