//! Core record machinery for CourtEvo Vero.
//!
//! Every board view is the same machine wearing a different record shape:
//! an ordered in-memory [`RecordStore`] seeded from literal rows, a
//! [`Form`] holding one transient draft plus its validation errors, and a
//! [`TableSpec`] binding records to tables, CSV, and printable documents.
//! This crate owns that machine; views only configure it.
//!
//! # Conventions
//!
//! - **Errors**: `thiserror` enums here, `anyhow::Result` at I/O edges.
//! - **Logging**: `tracing` macros (`warn!` on reference misses).

pub mod export;
pub mod fields;
pub mod form;
pub mod id;
pub mod store;
pub mod table;
pub mod validate;

pub use export::{to_csv, to_printable, write_export};
pub use fields::{FieldKind, FieldSpec};
pub use form::{DraftModel, EditTarget, FieldErrors, Form, SubmitOutcome, UnknownField};
pub use id::{IdGenerator, RecordId};
pub use store::{Record, RecordStore, StoreError};
pub use table::{Align, Column, TableSpec};
