use tracing::debug;

use crate::process::raw_table::RawTable;
use crate::process::utils::clean_number;
use crate::schema::{is_numeric_column, Value};
use crate::table::{CanonicalTable, Column, ColumnData};

/// Final pass: coerce the amount columns to `f64` and freeze the table.
pub fn coerce_numeric_columns(table: RawTable) -> CanonicalTable {
    let RawTable {
        headers,
        columns,
        num_rows,
        ..
    } = table;

    let columns = headers
        .into_iter()
        .zip(columns)
        .map(|(name, cells)| {
            let data = if is_numeric_column(&name) {
                let text_cells = cells.iter().filter(|c| matches!(c, Value::Text(_))).count();
                debug!(column = %name, text_cells, "coercing amount column");
                ColumnData::Float64(cells.iter().map(clean_number).collect())
            } else {
                ColumnData::Values(cells)
            };
            Column::new(name, data)
        })
        .collect();

    CanonicalTable::new(columns, num_rows)
}
