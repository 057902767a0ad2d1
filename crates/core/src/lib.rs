//! # VisitLog Core
//!
//! Core business logic for the VisitLog patient-visit logging system.
//!
//! This crate contains pure data operations and file management:
//! - Visit records persisted to a flat CSV file with a fixed column set
//! - Filtering and diagnosis aggregation over loaded record sets
//! - Runtime configuration resolved once at startup
//!
//! **No API concerns**: HTTP servers, chart markup, or CLI parsing belong in
//! `api-rest`, `visitlog-chart`, or `visitlog-cli`.

pub mod config;
pub mod constants;
pub mod pipeline;
pub mod record;
pub mod store;

pub use config::CoreConfig;
pub use constants::{ALL_SENTINEL, COLUMN_HEADERS, DEFAULT_DATA_FILE};
pub use pipeline::{aggregate, filter, DiagnosisCount, VisitFilter};
pub use record::VisitRecord;
pub use store::VisitStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read visit data file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to write visit data file: {0}")]
    FileWrite(std::io::Error),
    #[error("failed to parse visit data: {0}")]
    Csv(#[from] csv::Error),
    #[error("visit data file has unexpected columns: expected {expected:?}, found {found:?}")]
    SchemaMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
