use anyhow::Result;

use super::{
    currency_label, group_mean, label_column, numeric_column, value_counts, Bar, ChartBody,
    ChartConsumer, ChartSpec,
};
use crate::schema::{DIVISION, EMPLOYEE, GROSS_PAY, STATUS};
use crate::table::CanonicalTable;

/// Gross pay of the first `n` employees, in source order.
pub struct FirstNGrossPay {
    pub n: usize,
}

impl ChartConsumer for FirstNGrossPay {
    fn name(&self) -> &'static str {
        "first_n_gross_pay"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[EMPLOYEE, GROSS_PAY]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        let names = label_column(table, EMPLOYEE)?;
        let pay = numeric_column(table, GROSS_PAY)?;

        let bars = names
            .into_iter()
            .zip(pay)
            .take(self.n)
            .map(|(label, &value)| Bar {
                label,
                value,
                color: "steelblue".into(),
                annotation: Some(currency_label(value)),
            })
            .collect();

        Ok(ChartSpec {
            name: self.name().into(),
            title: format!("Gross Pay of First {} Employees", self.n),
            x_label: None,
            y_label: Some("Gross Pay".into()),
            body: ChartBody::Bar { bars },
        })
    }
}

/// Mean gross pay per division, highest first.
pub struct AvgPayByDivision;

/// Division means as bars, keys ascending. Shared with the dashboard.
pub(crate) fn division_mean_bars(table: &CanonicalTable, color: &str) -> Result<Vec<Bar>> {
    let divisions = label_column(table, DIVISION)?;
    let pay = numeric_column(table, GROSS_PAY)?;
    Ok(group_mean(&divisions, pay)
        .into_iter()
        .map(|(label, value)| Bar {
            label,
            value,
            color: color.into(),
            annotation: Some(currency_label(value)),
        })
        .collect())
}

impl ChartConsumer for AvgPayByDivision {
    fn name(&self) -> &'static str {
        "avg_pay_by_division"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[DIVISION, GROSS_PAY]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        let mut bars = division_mean_bars(table, "teal")?;
        // stable: equal means stay in key order
        bars.sort_by(|a, b| b.value.total_cmp(&a.value));

        Ok(ChartSpec {
            name: self.name().into(),
            title: "Average Gross Pay by Division".into(),
            x_label: Some("Division".into()),
            y_label: Some("Average Gross Pay".into()),
            body: ChartBody::Bar { bars },
        })
    }
}

/// Head count per status.
pub struct StatusCounts;

const STATUS_BAR_COLORS: [&str; 2] = ["orange", "purple"];

impl ChartConsumer for StatusCounts {
    fn name(&self) -> &'static str {
        "status_counts"
    }

    fn required_columns(&self) -> &'static [&'static str] {
        &[STATUS]
    }

    fn build(&self, table: &CanonicalTable) -> Result<ChartSpec> {
        let statuses = label_column(table, STATUS)?;
        let bars = value_counts(&statuses)
            .into_iter()
            .enumerate()
            .map(|(i, (label, count))| Bar {
                label,
                value: count as f64,
                color: STATUS_BAR_COLORS[i % STATUS_BAR_COLORS.len()].into(),
                annotation: None,
            })
            .collect();

        Ok(ChartSpec {
            name: self.name().into(),
            title: "Employee Status Breakdown".into(),
            x_label: None,
            y_label: Some("Count".into()),
            body: ChartBody::Bar { bars },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::tests::sample_table;

    fn bars(spec: ChartSpec) -> Vec<Bar> {
        match spec.body {
            ChartBody::Bar { bars } => bars,
            other => panic!("expected bar chart, got {:?}", other),
        }
    }

    #[test]
    fn first_n_truncates_and_annotates() -> Result<()> {
        let spec = FirstNGrossPay { n: 2 }.build(&sample_table())?;
        assert_eq!(spec.title, "Gross Pay of First 2 Employees");
        let bars = bars(spec);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].label, "Ann");
        assert_eq!(bars[0].value, 1000.0);
        assert_eq!(bars[0].annotation.as_deref(), Some("$1000.00"));
        assert_eq!(bars[1].label, "Bo");
        Ok(())
    }

    #[test]
    fn division_means_sorted_descending() -> Result<()> {
        let bars = bars(AvgPayByDivision.build(&sample_table())?);
        let got: Vec<_> = bars.iter().map(|b| (b.label.as_str(), b.value)).collect();
        assert_eq!(got, vec![("Sales", 1200.0), ("Ops", 600.0), ("HR", 200.0)]);
        Ok(())
    }

    #[test]
    fn status_counts_cycle_colors() -> Result<()> {
        let bars = bars(StatusCounts.build(&sample_table())?);
        let got: Vec<_> = bars
            .iter()
            .map(|b| (b.label.as_str(), b.value, b.color.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("FULL TIME", 2.0, "orange"),
                ("PART TIME", 1.0, "purple"),
                ("part time", 1.0, "orange"),
            ]
        );
        Ok(())
    }
}
