// src/lib.rs

pub mod charts;
pub mod error;
pub mod export;
pub mod process;
pub mod schema;
pub mod table;

pub use error::SourceError;
pub use process::{load_payroll_csv, load_payroll_csv_with_report, NormalizeReport, Normalized};
pub use table::CanonicalTable;
