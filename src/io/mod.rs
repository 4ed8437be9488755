//! Dataset persistence
//!
//! The persisted dataset form is a UTF-8 CSV with one header row and the
//! full twelve-column set, including the derived columns. Conversion to
//! and from Arrow record batches lives in [`convert`], the CSV read and
//! write paths in [`csv`].

pub mod convert;
pub mod csv;

pub use convert::{dataset_schema, from_record_batch, to_record_batch};
pub use csv::{load_csv, save_csv};
