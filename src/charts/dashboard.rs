use anyhow::Result;

use super::bar::division_mean_bars;
use super::histogram::hourly_rate_histogram;
use super::pie::status_slices;
use super::scatter::status_series;
use super::{ChartBody, ChartConsumer, ChartSpec};
use crate::schema::{DIVISION, GROSS_PAY, HOURLY_RATE, HRS, STATUS};
use crate::table::CanonicalTable;

/// 2×2 overview: division means, rate histogram, hours/pay scatter, status pie.
pub struct Dashboard {
    pub bins: usize,
}

fn panel(name: &str, title: &str, body: ChartBody) -> ChartSpec {
    ChartSpec {
        name: name.into(),
        title: title.into(),
        x_label: None,
        y_label: None,
        body,
    }
}

impl ChartConsumer for Dashboard {
    fn name(&self) -> &'static str {
        "dashboard"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[DIVISION, GROSS_PAY, HOURLY_RATE, HRS, STATUS]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        let panels = vec![
            panel(
                "avg_pay_by_division",
                "Avg Gross Pay / Division",
                ChartBody::Bar {
                    bars: division_mean_bars(table, "teal")?,
                },
            ),
            panel(
                "hourly_rate_histogram",
                "Hourly Rate Distribution",
                ChartBody::Histogram(hourly_rate_histogram(table, self.bins)?),
            ),
            panel(
                "hours_vs_pay",
                "Hours vs Gross Pay",
                ChartBody::Scatter {
                    series: status_series(table)?,
                },
            ),
            panel(
                "status_pie",
                "Status Breakdown",
                ChartBody::Pie {
                    slices: status_slices(table, false)?,
                    start_angle: 0.0,
                    shadow: false,
                },
            ),
        ];

        Ok(ChartSpec {
            name: self.name().into(),
            title: "Payroll Data Visualizations".into(),
            x_label: None,
            y_label: None,
            body: ChartBody::Grid {
                rows: 2,
                cols: 2,
                panels,
            },
        })
    }
}
