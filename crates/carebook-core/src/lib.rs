//! carebook-core: record model, fuzzy matcher, and filter pipeline.
//!
//! # Architecture
//!
//! ```text
//! Dataset ──► Store ──► Filter ──► UI / CLI
//!                         │  ▲
//!                         │  └── Matcher (edit distance + fuzzy tokens)
//!                         └──► Export
//! ```
//!
//! Everything here is synchronous and in-memory. The TUI crate and the
//! `carebook` binary drive it from a single event loop.

pub mod config;
pub mod dataset;
pub mod draft;
pub mod error;
pub mod export;
pub mod filter;
pub mod matcher;
pub mod store;
pub mod types;

pub use draft::RecordDraft;
pub use error::{Error, Result};
pub use filter::{RecordFilter, SortOrder};
pub use store::RecordStore;
pub use types::{Category, MedicalRecord, RecordId};
