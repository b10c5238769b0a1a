// src/export.rs

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use parquet::{
    arrow::ArrowWriter,
    basic::{BrotliLevel, Compression},
    file::properties::WriterProperties,
};
use serde::Serialize;
use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};
use tracing::debug;

use crate::charts::ChartSpec;
use crate::process::NormalizeReport;
use crate::table::CanonicalTable;

pub const TABLE_FILE_NAME: &str = "normalized.parquet";
pub const SUMMARY_FILE_NAME: &str = "summary.json";

/// What a run read and wrote.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub source: PathBuf,
    pub generated_at: DateTime<Utc>,
    pub rows: usize,
    pub columns: Vec<String>,
    pub report: NormalizeReport,
    pub artifacts: Vec<PathBuf>,
}

/// Write a chart as pretty JSON to `<out_dir>/<name>.json`.
pub fn write_chart(out_dir: &Path, spec: &ChartSpec) -> Result<PathBuf> {
    let path = out_dir.join(format!("{}.json", spec.name));
    let json = serde_json::to_vec_pretty(spec)
        .with_context(|| format!("serializing chart {}", spec.name))?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    debug!(chart = %spec.name, path = %path.display(), "wrote chart");
    Ok(path)
}

/// Write the canonical table to Parquet via a temp file, then rename.
/// Returns the size in bytes.
pub fn write_table_parquet(table: &CanonicalTable, output_path: &Path) -> Result<u64> {
    let batch = table.to_record_batch()?;
    let temp_path = output_path.with_extension("tmp");

    let file = File::create(&temp_path)
        .with_context(|| format!("creating file {}", temp_path.display()))?;

    let props = WriterProperties::builder()
        .set_compression(Compression::BROTLI(BrotliLevel::try_new(5)?))
        .build();

    let mut writer = ArrowWriter::try_new(file, batch.schema(), Some(props))
        .context("creating parquet writer")?;
    writer.write(&batch).context("writing batch to parquet")?;
    writer.close().context("closing parquet writer")?;

    fs::rename(&temp_path, output_path).with_context(|| {
        format!(
            "renaming {} to {}",
            temp_path.display(),
            output_path.display()
        )
    })?;

    let metadata = fs::metadata(output_path).context("getting file metadata")?;
    debug!(path = %output_path.display(), bytes = metadata.len(), rows = batch.num_rows(), "wrote table");
    Ok(metadata.len())
}

pub fn write_summary(out_dir: &Path, summary: &RunSummary) -> Result<PathBuf> {
    let path = out_dir.join(SUMMARY_FILE_NAME);
    let json = serde_json::to_vec_pretty(summary).context("serializing run summary")?;
    fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::{default_consumers, build_all, ChartOptions};
    use crate::process::normalize_text;
    use arrow::array::{Array, Float64Array, StringArray};
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
    use tempfile::tempdir;

    const SRC: &str = "EMPLOYEE;DIVISION;HRS;HOURLY RATE;GROSS PAY;STATUS\n\
                       J Doe;Sales;40;$25,00;1.000,00;FULL TIME\n\
                       A Roe;;20;$30,00;600,00;PART TIME\n";

    #[test]
    fn parquet_round_trips_types() -> Result<()> {
        let tmp = tempdir()?;
        let table = normalize_text(SRC)?.table;
        let path = tmp.path().join(TABLE_FILE_NAME);
        let bytes = write_table_parquet(&table, &path)?;
        assert!(bytes > 0);
        assert!(!path.with_extension("tmp").exists());

        let reader = ParquetRecordBatchReaderBuilder::try_new(File::open(&path)?)?.build()?;
        let batches: Vec<_> = reader.collect::<std::result::Result<_, _>>()?;
        assert_eq!(batches.len(), 1);
        let batch = &batches[0];
        assert_eq!(batch.num_rows(), 2);

        let schema = batch.schema();
        let pay_idx = schema.index_of("GROSS PAY")?;
        let pay = batch
            .column(pay_idx)
            .as_any()
            .downcast_ref::<Float64Array>()
            .expect("GROSS PAY is Float64");
        assert_eq!(pay.values().to_vec(), vec![1000.0, 600.0]);

        let div_idx = schema.index_of("DIVISION")?;
        let div = batch
            .column(div_idx)
            .as_any()
            .downcast_ref::<StringArray>()
            .expect("DIVISION is Utf8");
        assert_eq!(div.value(1), "UNKNOWN");

        let loc_idx = schema.index_of("LOCATION")?;
        assert_eq!(batch.column(loc_idx).null_count(), 2);
        Ok(())
    }

    #[test]
    fn charts_and_summary_are_written() -> Result<()> {
        let tmp = tempdir()?;
        let normalized = normalize_text(SRC)?;
        let specs = build_all(
            &normalized.table,
            &default_consumers(&ChartOptions::default()),
        )?;

        let mut artifacts = Vec::new();
        for spec in &specs {
            artifacts.push(write_chart(tmp.path(), spec)?);
        }
        let pie: serde_json::Value =
            serde_json::from_slice(&fs::read(tmp.path().join("status_pie.json"))?)?;
        assert_eq!(pie["kind"], "pie");
        assert_eq!(pie["slices"].as_array().map(Vec::len), Some(2));

        let summary = RunSummary {
            source: PathBuf::from("bookDA.csv"),
            generated_at: Utc::now(),
            rows: normalized.table.num_rows(),
            columns: normalized
                .table
                .column_names()
                .into_iter()
                .map(String::from)
                .collect(),
            report: normalized.report.clone(),
            artifacts,
        };
        let path = write_summary(tmp.path(), &summary)?;
        let json: serde_json::Value = serde_json::from_slice(&fs::read(path)?)?;
        assert_eq!(json["rows"], 2);
        assert_eq!(json["report"]["strategy"]["mode"], "header");
        assert_eq!(json["report"]["strategy"]["skipped"], 0);
        assert_eq!(json["artifacts"].as_array().map(Vec::len), Some(specs.len()));
        Ok(())
    }
}
