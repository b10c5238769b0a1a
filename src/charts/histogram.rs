use anyhow::Result;
use serde::Serialize;

use super::{numeric_column, ChartBody, ChartConsumer, ChartSpec};
use crate::schema::HOURLY_RATE;
use crate::table::CanonicalTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// `bins + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
    pub color: String,
    pub edge_color: String,
}

/// Equal-width bins over `[min, max]`, last bin closed on the right.
/// A degenerate range is widened by 0.5 on each side; no values gives `[0, 1]`.
/// Non-finite values are not counted.
pub fn bin_values(values: &[f64], bins: usize) -> (Vec<f64>, Vec<usize>) {
    let bins = bins.max(1);
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();

    let (mut lo, mut hi) = match finite.iter().copied().reduce(f64::min) {
        Some(min) => (min, finite.iter().copied().fold(min, f64::max)),
        None => (0.0, 1.0),
    };
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }

    let width = (hi - lo) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();

    let mut counts = vec![0usize; bins];
    for v in finite {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    (edges, counts)
}

pub(crate) fn hourly_rate_histogram(table: &CanonicalTable, bins: usize) -> Result<Histogram> {
    let rates = numeric_column(table, HOURLY_RATE)?;
    let (edges, counts) = bin_values(rates, bins);
    Ok(Histogram {
        edges,
        counts,
        color: "purple".into(),
        edge_color: "white".into(),
    })
}

/// Distribution of hourly rates.
pub struct HourlyRateHistogram {
    pub bins: usize,
}

impl ChartConsumer for HourlyRateHistogram {
    fn name(&self) -> &'static str {
        "hourly_rate_histogram"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[HOURLY_RATE]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        Ok(ChartSpec {
            name: self.name().into(),
            title: "Distribution of Hourly Rates".into(),
            x_label: Some("Hourly Rate".into()),
            y_label: Some("Frequency".into()),
            body: ChartBody::Histogram(hourly_rate_histogram(table, self.bins)?),
        })
    }
}
