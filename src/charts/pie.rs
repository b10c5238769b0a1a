use anyhow::Result;
use serde::Serialize;

use super::{label_column, value_counts, ChartBody, ChartConsumer, ChartSpec};
use crate::schema::STATUS;
use crate::table::CanonicalTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
    /// Share of the whole, in percent.
    pub percent: f64,
    /// `percent` formatted with one decimal, e.g. `"66.7%"`.
    pub percent_label: String,
    /// Radial offset of the slice.
    pub explode: f64,
}

/// Status shares, largest first. With `explode_largest` the biggest
/// slice(s) are pulled out by 0.1.
pub(crate) fn status_slices(table: &CanonicalTable, explode_largest: bool) -> Result<Vec<PieSlice>> {
    let statuses = label_column(table, STATUS)?;
    let counts = value_counts(&statuses);
    let total: usize = counts.iter().map(|(_, n)| n).sum();
    let max = counts.first().map(|(_, n)| *n).unwrap_or(0);

    Ok(counts
        .into_iter()
        .map(|(label, count)| {
            let percent = if total == 0 {
                0.0
            } else {
                count as f64 * 100.0 / total as f64
            };
            PieSlice {
                label,
                count,
                percent,
                percent_label: format!("{:.1}%", percent),
                explode: if explode_largest && count == max { 0.1 } else { 0.0 },
            }
        })
        .collect())
}

/// Employee status distribution.
pub struct StatusPie;

impl ChartConsumer for StatusPie {
    fn name(&self) -> &'static str {
        "status_pie"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[STATUS]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        Ok(ChartSpec {
            name: self.name().into(),
            title: "Employee Status Distribution".into(),
            x_label: None,
            y_label: None,
            body: ChartBody::Pie {
                slices: status_slices(table, true)?,
                start_angle: 140.0,
                shadow: true,
            },
        })
    }
}
