//! dissect-report — Export of session history.
//!
//! Turns a session's round history into a CSV document and writes it out
//! as a downloadable file.

pub mod csv;

pub use csv::{export_history, write_csv_export, CsvDownload};
