// src/schema/mod.rs

pub mod arrow;
pub mod types;

pub use arrow::{build_arrow_schema, map_to_arrow_type};
pub use types::Value;

pub const EMPLOYEE_ID: &str = "EMPLOYEE ID";
pub const EMPLOYEE: &str = "EMPLOYEE";
pub const LOCATION: &str = "LOCATION";
pub const DIVISION: &str = "DIVISION";
pub const HIRE_DATE: &str = "HIRE DATE";
pub const HRS: &str = "HRS";
pub const HOURLY_RATE: &str = "HOURLY RATE";
pub const GROSS_PAY: &str = "GROSS PAY";
pub const STATUS: &str = "STATUS";

/// Placeholder written into text columns the source did not provide.
pub const UNKNOWN: &str = "UNKNOWN";

/// Canonical column order of a well-formed export.
pub const CANONICAL_COLUMNS: [&str; 9] = [
    EMPLOYEE_ID,
    EMPLOYEE,
    LOCATION,
    DIVISION,
    HIRE_DATE,
    HRS,
    HOURLY_RATE,
    GROSS_PAY,
    STATUS,
];

/// Columns holding locale-formatted amounts; always `f64` on the canonical table.
pub const NUMERIC_COLUMNS: [&str; 3] = [HRS, HOURLY_RATE, GROSS_PAY];

/// Case-insensitive substrings that mark a row as a genuine header.
pub const HEADER_KEYWORDS: [&str; 6] = ["EMPLOYEE", "GROSS", "DIVISION", "STATUS", "HOURLY", "HRS"];

/// Assigns canonical names to columns when the header row cannot be trusted.
pub trait ColumnLayout {
    /// Name for the column at `position`.
    fn column_name(&self, position: usize) -> String;

    fn column_names(&self, width: usize) -> Vec<String> {
        (0..width).map(|i| self.column_name(i)).collect()
    }
}

/// Fixed-position layout of the payroll export:
/// 0 → EMPLOYEE ID … 8 → STATUS, anything further → `EXTRA_<n>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PositionalLayout;

impl ColumnLayout for PositionalLayout {
    fn column_name(&self, position: usize) -> String {
        CANONICAL_COLUMNS
            .get(position)
            .map(|name| name.to_string())
            .unwrap_or_else(|| format!("EXTRA_{}", position))
    }
}

/// Positional name used when the source has no header at all.
pub fn headerless_column_name(position: usize) -> String {
    format!("COL_{}", position)
}

pub fn is_numeric_column(name: &str) -> bool {
    NUMERIC_COLUMNS.contains(&name)
}
