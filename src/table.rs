// src/table.rs

use anyhow::{Context, Result};
use arrow::{
    array::{ArrayRef, Float64Array, StringArray},
    record_batch::RecordBatch,
};
use serde_json::{Map, Value as JsonValue};
use std::sync::Arc;

use crate::schema::{build_arrow_schema, Value};

/// Storage for one canonical column.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    /// Coerced amount column (`HRS`, `HOURLY RATE`, `GROSS PAY`).
    Float64(Vec<f64>),
    /// Any other column, cells kept as read (or as backfilled).
    Values(Vec<Value>),
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Float64(v) => v.len(),
            ColumnData::Values(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, row: usize) -> Option<Value> {
        match self {
            ColumnData::Float64(v) => v.get(row).map(|n| Value::Number(*n)),
            ColumnData::Values(v) => v.get(row).cloned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    pub(crate) fn new(name: String, data: ColumnData) -> Self {
        Self { name, data }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }
}

/// The normalized payroll dataset.
///
/// Built once by [`crate::process`]; there is no API to rename, reorder or
/// mutate columns afterwards. Consumers only ever see `&CanonicalTable`.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalTable {
    columns: Vec<Column>,
    num_rows: usize,
}

impl CanonicalTable {
    /// All columns must have `num_rows` cells and unique names.
    pub(crate) fn new(columns: Vec<Column>, num_rows: usize) -> Self {
        debug_assert!(columns.iter().all(|c| c.data.len() == num_rows));
        Self { columns, num_rows }
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows == 0
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column(name).is_some()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Cells of an amount column, `None` if the column is missing or not numeric.
    pub fn numeric(&self, name: &str) -> Option<&[f64]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Float64(v)) => Some(v),
            _ => None,
        }
    }

    /// Cells of a non-amount column.
    pub fn values(&self, name: &str) -> Option<&[Value]> {
        match self.column(name).map(|c| &c.data) {
            Some(ColumnData::Values(v)) => Some(v),
            _ => None,
        }
    }

    /// Text form of every cell of `name` (nulls become empty strings).
    pub fn labels(&self, name: &str) -> Option<Vec<String>> {
        let col = self.column(name)?;
        Some(
            (0..self.num_rows)
                .map(|i| col.data.get(i).map(|v| v.to_string()).unwrap_or_default())
                .collect(),
        )
    }

    pub fn record(&self, index: usize) -> Option<Record<'_>> {
        (index < self.num_rows).then_some(Record { table: self, index })
    }

    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        (0..self.num_rows).map(move |index| Record { table: self, index })
    }

    /// Columnar view: amount columns as Float64, everything else as Utf8.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let schema = build_arrow_schema(&self.columns);
        let arrays: Vec<ArrayRef> = self
            .columns
            .iter()
            .map(|col| match &col.data {
                ColumnData::Float64(v) => Arc::new(Float64Array::from(v.clone())) as ArrayRef,
                ColumnData::Values(v) => {
                    let strings: StringArray = v.iter().map(Value::to_text).collect();
                    Arc::new(strings) as ArrayRef
                }
            })
            .collect();

        RecordBatch::try_new(schema, arrays).context("building canonical record batch")
    }
}

/// A borrowed row of the canonical table.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a CanonicalTable,
    index: usize,
}

impl<'a> Record<'a> {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.table.column(name)?.data.get(self.index)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(|v| v.as_number())
    }

    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name).and_then(|v| v.to_text())
    }

    /// Column name → cell, in column order.
    pub fn to_json(&self) -> Map<String, JsonValue> {
        self.table
            .columns
            .iter()
            .map(|col| {
                let cell = col.data.get(self.index).unwrap_or_default();
                let json = serde_json::to_value(&cell).unwrap_or(JsonValue::Null);
                (col.name.clone(), json)
            })
            .collect()
    }
}
