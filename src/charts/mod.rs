// src/charts/mod.rs

pub mod bar;
pub mod boxplot;
pub mod dashboard;
pub mod histogram;
pub mod pie;
pub mod scatter;

use anyhow::{anyhow, Result};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, info};

use crate::table::CanonicalTable;

pub use bar::{AvgPayByDivision, FirstNGrossPay, StatusCounts};
pub use boxplot::{BoxStats, PayByDivisionBoxplot};
pub use dashboard::Dashboard;
pub use histogram::{Histogram, HourlyRateHistogram};
pub use pie::{PieSlice, StatusPie};
pub use scatter::{HoursVsPay, HoursVsPaySingle, ScatterSeries};

/// A renderer-agnostic chart: everything a plotting front end needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec {
    pub name: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_label: Option<String>,
    #[serde(flatten)]
    pub body: ChartBody,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ChartBody {
    Bar {
        bars: Vec<Bar>,
    },
    Scatter {
        series: Vec<ScatterSeries>,
    },
    Histogram(Histogram),
    Pie {
        slices: Vec<PieSlice>,
        start_angle: f64,
        shadow: bool,
    },
    BoxPlot {
        groups: Vec<BoxStats>,
    },
    Grid {
        rows: usize,
        cols: usize,
        panels: Vec<ChartSpec>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotation: Option<String>,
}

/// One chart built from the canonical table. Consumers only read.
pub trait ChartConsumer {
    /// Stable identifier; also the artifact file stem.
    fn name(&self) -> &'static str;

    /// Columns read from the table.
    fn required_columns(&self) -> &'static [&'static str];

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec>;
}

/// Knobs shared by the default chart set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Rows shown by the first-N bar chart.
    pub top_n: usize,
    /// Bin count of the hourly-rate histogram.
    pub bins: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self { top_n: 10, bins: 10 }
    }
}

/// The full chart set, in output order.
pub fn default_consumers(opts: &ChartOptions) -> Vec<Box<dyn ChartConsumer>> {
    vec![
        Box::new(FirstNGrossPay { n: opts.top_n }),
        Box::new(AvgPayByDivision),
        Box::new(HoursVsPay),
        Box::new(HourlyRateHistogram { bins: opts.bins }),
        Box::new(StatusPie),
        Box::new(Dashboard { bins: opts.bins }),
        Box::new(PayByDivisionBoxplot),
        Box::new(HoursVsPaySingle),
        Box::new(StatusCounts),
    ]
}

/// Run every consumer in sequence against the same table.
pub fn build_all(
    table: &CanonicalTable,
    consumers: &[Box<dyn ChartConsumer>],
) -> Result<Vec<ChartSpec>> {
    let mut specs = Vec::with_capacity(consumers.len());
    for consumer in consumers {
        ensure_columns(table, consumer.as_ref())?;
        let spec = consumer.build(table)?;
        info!(chart = consumer.name(), "built chart");
        specs.push(spec);
    }
    Ok(specs)
}

fn ensure_columns(table: &CanonicalTable, consumer: &dyn ChartConsumer) -> Result<()> {
    match consumer
        .required_columns()
        .iter()
        .find(|c| !table.has_column(c))
    {
        Some(missing) => Err(anyhow!(
            "chart {} needs column {} which the table lacks",
            consumer.name(),
            missing
        )),
        None => Ok(()),
    }
}

pub(crate) fn numeric_column<'a>(table: &'a CanonicalTable, name: &str) -> Result<&'a [f64]> {
    table
        .numeric(name)
        .ok_or_else(|| anyhow!("column {} is missing or not numeric", name))
}

pub(crate) fn label_column(table: &CanonicalTable, name: &str) -> Result<Vec<String>> {
    table
        .labels(name)
        .ok_or_else(|| anyhow!("column {} is missing", name))
}

/// Distinct keys in first-seen order.
pub(crate) fn unique_in_order(keys: &[String]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keys.iter()
        .filter(|k| seen.insert(k.as_str()))
        .cloned()
        .collect()
}

/// Values grouped by key, keys ascending.
pub(crate) fn group_values(keys: &[String], values: &[f64]) -> BTreeMap<String, Vec<f64>> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (k, v) in keys.iter().zip(values) {
        groups.entry(k.clone()).or_default().push(*v);
    }
    groups
}

/// Mean per key, keys ascending.
pub(crate) fn group_mean(keys: &[String], values: &[f64]) -> Vec<(String, f64)> {
    group_values(keys, values)
        .into_iter()
        .map(|(k, vs)| {
            let mean = vs.iter().sum::<f64>() / vs.len() as f64;
            (k, mean)
        })
        .collect()
}

/// Occurrences per key, most frequent first; ties keep first-seen order.
pub(crate) fn value_counts(keys: &[String]) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for k in keys {
        *counts.entry(k.as_str()).or_default() += 1;
    }
    let mut out: Vec<(String, usize)> = unique_in_order(keys)
        .into_iter()
        .map(|k| {
            let n = counts[k.as_str()];
            (k, n)
        })
        .collect();
    // stable sort keeps first-seen order among equal counts
    out.sort_by(|a, b| b.1.cmp(&a.1));
    debug!(groups = out.len(), "value counts");
    out
}

/// Full-time statuses plot blue, everything else red.
pub(crate) fn status_color(status: &str) -> &'static str {
    if status.to_uppercase().contains("FULL") {
        "blue"
    } else {
        "red"
    }
}

pub(crate) fn currency_label(v: f64) -> String {
    format!("${:.2}", v)
}
