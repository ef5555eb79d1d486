//! DIDScope Report - presentation of checked records.
//!
//! CSV export and import, bulk summaries with user-facing notices, and
//! plain-text tables for terminal output.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod error;
pub mod export;
pub mod import;
pub mod summary;
pub mod table;

// Re-export commonly used types
pub use error::{ReportError, Result};
pub use export::{export_filename, to_csv, write_csv, CSV_HEADERS};
pub use import::{extract_phone_numbers, parse_rows, read_phone_numbers, require_phone_numbers};
pub use summary::{single_notice, BulkSummary, GradeCounts, Notice, NoticeLevel};
pub use table::{render_health, render_table};
