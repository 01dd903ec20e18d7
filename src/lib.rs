//! carebook: terminal viewer for personal medical records.
//!
//! The record model, fuzzy matcher, filter, store, and export live in
//! `carebook-core`; the interactive shell lives in `carebook-tui`. This crate
//! ties them together behind the `carebook` binary and exposes the headless
//! subcommands so integration tests can drive them directly.
//!
//! # Architecture
//!
//! ```text
//! Dataset ──► Store ──► Filter ──► TUI / headless
//!                         │
//!                         └──► Export
//! ```

pub mod headless;

pub use carebook_core::{
    config, dataset, draft, export, filter, matcher, store, types, Category, Error,
    MedicalRecord, RecordDraft, RecordFilter, RecordId, RecordStore, Result, SortOrder,
};
