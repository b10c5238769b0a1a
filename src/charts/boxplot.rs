use anyhow::Result;
use serde::Serialize;

use super::{group_values, label_column, numeric_column, ChartBody, ChartConsumer, ChartSpec};
use crate::schema::{DIVISION, GROSS_PAY};
use crate::table::CanonicalTable;

/// Box-and-whisker summary of one group. Whiskers reach the furthest
/// values within 1.5 IQR of the box; anything beyond is an outlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoxStats {
    pub label: String,
    pub count: usize,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub whisker_low: f64,
    pub whisker_high: f64,
    pub outliers: Vec<f64>,
}

/// Linear-interpolated quantile of an ascending, non-empty slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

pub fn box_stats(label: String, mut values: Vec<f64>) -> Option<BoxStats> {
    values.retain(|v| v.is_finite());
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);

    let q1 = quantile(&values, 0.25);
    let median = quantile(&values, 0.5);
    let q3 = quantile(&values, 0.75);
    let iqr = q3 - q1;
    let (low_fence, high_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let inside = values.iter().copied().filter(|v| *v >= low_fence && *v <= high_fence);
    let whisker_low = inside.clone().reduce(f64::min).unwrap_or(q1);
    let whisker_high = inside.reduce(f64::max).unwrap_or(q3);
    let outliers = values
        .iter()
        .copied()
        .filter(|v| *v < low_fence || *v > high_fence)
        .collect();

    Some(BoxStats {
        label,
        count: values.len(),
        min: values[0],
        q1,
        median,
        q3,
        max: values[values.len() - 1],
        whisker_low,
        whisker_high,
        outliers,
    })
}

/// Gross pay spread per division.
pub struct PayByDivisionBoxplot;

impl ChartConsumer for PayByDivisionBoxplot {
    fn name(&self) -> &'static str {
        "pay_by_division_boxplot"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[DIVISION, GROSS_PAY]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        let divisions = label_column(table, DIVISION)?;
        let pay = numeric_column(table, GROSS_PAY)?;
        let groups = group_values(&divisions, pay)
            .into_iter()
            .filter_map(|(label, values)| box_stats(label, values))
            .collect();

        Ok(ChartSpec {
            name: self.name().into(),
            title: "Pay Distribution by Division".into(),
            x_label: Some("Division".into()),
            y_label: Some("Gross Pay".into()),
            body: ChartBody::BoxPlot { groups },
        })
    }
}
