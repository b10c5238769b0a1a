use tracing::debug;

use crate::process::raw_table::RawTable;
use crate::schema::{
    Value, DIVISION, EMPLOYEE, EMPLOYEE_ID, GROSS_PAY, HIRE_DATE, HOURLY_RATE, HRS, LOCATION,
    STATUS, UNKNOWN,
};

/// What to put in a required column the source did not provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnDefault {
    /// Copy of the second positional column, or `"0", "1", …` if there is none.
    SecondColumnOrRowIndex,
    Text(&'static str),
    Zero,
}

/// Columns every consumer relies on, in backfill order.
pub const REQUIRED_COLUMNS: [(&str, ColumnDefault); 6] = [
    (EMPLOYEE, ColumnDefault::SecondColumnOrRowIndex),
    (DIVISION, ColumnDefault::Text(UNKNOWN)),
    (STATUS, ColumnDefault::Text(UNKNOWN)),
    (HRS, ColumnDefault::Zero),
    (HOURLY_RATE, ColumnDefault::Zero),
    (GROSS_PAY, ColumnDefault::Zero),
];

/// Canonical columns nobody computes on; added empty so the schema is complete.
pub const OPTIONAL_COLUMNS: [&str; 3] = [EMPLOYEE_ID, LOCATION, HIRE_DATE];

fn row_index_labels(n: usize) -> Vec<Value> {
    (0..n).map(|i| Value::Text(i.to_string())).collect()
}

/// Append every absent required column, then every absent optional one.
/// Returns the names that were added, in order.
pub fn backfill_missing_columns(table: &mut RawTable) -> Vec<String> {
    let n = table.num_rows;
    let mut added = Vec::new();

    for (name, default) in REQUIRED_COLUMNS {
        if table.has_column(name) {
            continue;
        }
        let cells = match default {
            ColumnDefault::SecondColumnOrRowIndex if table.width() > 1 => table.columns[1].clone(),
            ColumnDefault::SecondColumnOrRowIndex => row_index_labels(n),
            ColumnDefault::Text(s) => vec![Value::from(s); n],
            ColumnDefault::Zero => vec![Value::Number(0.0); n],
        };
        debug!(column = name, default = ?default, "backfilling missing column");
        table.push_column(name, cells);
        added.push(name.to_string());
    }

    for name in OPTIONAL_COLUMNS {
        if !table.has_column(name) {
            table.push_column(name, vec![Value::Null; n]);
            added.push(name.to_string());
        }
    }

    added
}

/// Fill null cells of the non-null text columns. `EMPLOYEE` gets the row
/// index, `DIVISION` and `STATUS` get `UNKNOWN`. Returns cells filled.
pub fn backfill_null_cells(table: &mut RawTable) -> usize {
    let mut filled = 0;

    if let Some(col) = table.column_mut(EMPLOYEE) {
        for (i, cell) in col.iter_mut().enumerate().filter(|(_, c)| c.is_null()) {
            *cell = Value::Text(i.to_string());
            filled += 1;
        }
    }
    for name in [DIVISION, STATUS] {
        if let Some(col) = table.column_mut(name) {
            for cell in col.iter_mut().filter(|c| c.is_null()) {
                *cell = Value::from(UNKNOWN);
                filled += 1;
            }
        }
    }

    if filled > 0 {
        debug!(filled, "filled null cells in required text columns");
    }
    filled
}
