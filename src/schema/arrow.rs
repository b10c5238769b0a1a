// src/schema/arrow.rs

use arrow::datatypes::{DataType, Field as ArrowField, Schema as ArrowSchema};
use std::sync::Arc;

use crate::table::{Column, ColumnData};

/// Map a canonical column into an Arrow DataType.
///
/// - coerced amount columns → Float64
/// - everything else        → Utf8 (numbers rendered in shortest form)
pub fn map_to_arrow_type(data: &ColumnData) -> DataType {
    match data {
        ColumnData::Float64(_) => DataType::Float64,
        ColumnData::Values(_) => DataType::Utf8,
    }
}

/// Build an ArrowSchema (inside an Arc) from the canonical table's columns.
/// Amount columns never hold nulls; text columns may.
pub fn build_arrow_schema(cols: &[Column]) -> Arc<ArrowSchema> {
    let fields: Vec<ArrowField> = cols
        .iter()
        .map(|col| {
            let dt = map_to_arrow_type(col.data());
            let nullable = !matches!(dt, DataType::Float64);
            ArrowField::new(col.name(), dt, nullable)
        })
        .collect();

    Arc::new(ArrowSchema::new(fields))
}
