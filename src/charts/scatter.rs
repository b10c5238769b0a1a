use anyhow::Result;
use serde::Serialize;

use super::{
    label_column, numeric_column, status_color, unique_in_order, ChartBody, ChartConsumer,
    ChartSpec,
};
use crate::schema::{GROSS_PAY, HRS, STATUS};
use crate::table::CanonicalTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterSeries {
    pub label: String,
    pub color: String,
    pub alpha: f64,
    /// `[hours, gross pay]` pairs.
    pub points: Vec<[f64; 2]>,
}

/// One series per status, in first-seen order.
pub(crate) fn status_series(table: &CanonicalTable) -> Result<Vec<ScatterSeries>> {
    let statuses = label_column(table, STATUS)?;
    let hours = numeric_column(table, HRS)?;
    let pay = numeric_column(table, GROSS_PAY)?;

    Ok(unique_in_order(&statuses)
        .into_iter()
        .map(|status| {
            let points = statuses
                .iter()
                .zip(hours.iter().zip(pay))
                .filter(|(s, _)| **s == status)
                .map(|(_, (&h, &p))| [h, p])
                .collect();
            ScatterSeries {
                color: status_color(&status).into(),
                label: status,
                alpha: 0.75,
                points,
            }
        })
        .collect())
}

/// Hours worked against gross pay, split by status.
pub struct HoursVsPay;

impl ChartConsumer for HoursVsPay {
    fn name(&self) -> &'static str {
        "hours_vs_pay"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[HRS, GROSS_PAY, STATUS]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        Ok(ChartSpec {
            name: self.name().into(),
            title: "Hours Worked vs Gross Pay".into(),
            x_label: Some("Hours Worked".into()),
            y_label: Some("Gross Pay".into()),
            body: ChartBody::Scatter {
                series: status_series(table)?,
            },
        })
    }
}

/// Hours worked against gross pay, all employees in one series.
pub struct HoursVsPaySingle;

impl ChartConsumer for HoursVsPaySingle {
    fn name(&self) -> &'static str {
        "hours_vs_pay_single"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[HRS, GROSS_PAY]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        let hours = numeric_column(table, HRS)?;
        let pay = numeric_column(table, GROSS_PAY)?;
        let series = ScatterSeries {
            label: "all".into(),
            color: "green".into(),
            alpha: 0.7,
            points: hours.iter().zip(pay).map(|(&h, &p)| [h, p]).collect(),
        };

        Ok(ChartSpec {
            name: self.name().into(),
            title: "Hours Worked vs Gross Pay".into(),
            x_label: Some("Hours".into()),
            y_label: Some("Gross Pay".into()),
            body: ChartBody::Scatter {
                series: vec![series],
            },
        })
    }
}
