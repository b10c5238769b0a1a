// src/process/mod.rs

pub mod backfill;
pub mod convert;
pub mod header;
pub mod raw_table;
pub mod schema;
pub mod utils;

use serde::Serialize;
use std::{fs, path::Path};
use tracing::info;

use crate::error::{Result, SourceError};
use crate::schema::{ColumnLayout, PositionalLayout};
use crate::table::CanonicalTable;

pub use header::HeaderStrategy;
pub use raw_table::RawTable;
pub use utils::{clean_number, clean_number_str};

/// What the normalizer had to do to get a clean table out of the source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizeReport {
    pub strategy: HeaderStrategy,
    /// The header row was data and was reinserted as row 0.
    pub recovered_spurious_header: bool,
    /// Columns synthesized because the source lacked them.
    pub backfilled_columns: Vec<String>,
    /// Null cells replaced in `EMPLOYEE`, `DIVISION` and `STATUS`.
    pub filled_null_cells: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub table: CanonicalTable,
    pub report: NormalizeReport,
}

/// Read a payroll export from disk and normalize it.
pub fn load_payroll_csv<P: AsRef<Path>>(path: P) -> Result<CanonicalTable> {
    load_payroll_csv_with_report(path).map(|n| n.table)
}

/// Like [`load_payroll_csv`], also returning the normalization report.
///
/// Only a source that cannot be read at all is an error.
#[tracing::instrument(level = "info", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_payroll_csv_with_report<P: AsRef<Path>>(path: P) -> Result<Normalized> {
    let path = path.as_ref();
    let data = fs::read(path).map_err(|source| SourceError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    normalize_bytes(&data)
}

pub fn normalize_text(text: &str) -> Result<Normalized> {
    normalize_bytes(text.as_bytes())
}

pub fn normalize_bytes(data: &[u8]) -> Result<Normalized> {
    normalize_with_layout(data, &PositionalLayout)
}

/// The whole pipeline: header discovery → column naming (recovery or
/// normalization) → backfill → numeric coercion.
pub fn normalize_with_layout(data: &[u8], layout: &dyn ColumnLayout) -> Result<Normalized> {
    let (strategy, mut raw) = header::discover(data)?;

    let recovered_spurious_header = schema::resolve_column_names(&mut raw, layout);
    let backfilled_columns = backfill::backfill_missing_columns(&mut raw);
    let filled_null_cells = backfill::backfill_null_cells(&mut raw);
    let table = convert::coerce_numeric_columns(raw);

    let report = NormalizeReport {
        strategy,
        recovered_spurious_header,
        backfilled_columns,
        filled_null_cells,
    };
    info!(
        rows = table.num_rows(),
        columns = table.columns().len(),
        strategy = ?report.strategy,
        recovered = report.recovered_spurious_header,
        backfilled = ?report.backfilled_columns,
        "normalized payroll table"
    );

    Ok(Normalized { table, report })
}
