// tests/normalize_end_to_end.rs
use anyhow::Result;
use parquet::file::reader::{FileReader, SerializedFileReader};
use payroll::{
    charts::{build_all, default_consumers, ChartOptions},
    export,
    load_payroll_csv, load_payroll_csv_with_report,
    process::{normalize_bytes, HeaderStrategy},
    schema::{CANONICAL_COLUMNS, NUMERIC_COLUMNS},
    CanonicalTable, SourceError,
};
use std::fs::{self, File};
use tempfile::tempdir;

fn assert_complete(table: &CanonicalTable) {
    for name in CANONICAL_COLUMNS {
        assert!(table.has_column(name), "missing {}", name);
    }
    for name in NUMERIC_COLUMNS {
        let col = table.numeric(name).expect("numeric column");
        assert_eq!(col.len(), table.num_rows());
    }
    for name in ["EMPLOYEE", "DIVISION", "STATUS"] {
        let values = table.values(name).expect("text-like column");
        assert!(values.iter().all(|v| !v.is_null()), "null left in {}", name);
    }
}

#[test]
fn loads_a_file_with_preamble() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("bookDA.csv");
    fs::write(
        &path,
        "Payroll period 2024-03\n\
         EMPLOYEE;DIVISION;HRS;HOURLY RATE;GROSS PAY;STATUS\n\
         J Doe;Sales;40;$25,00;1.000,00;FULL TIME\n\
         A Roe;Ops;20;$30,00;600,00;PART TIME\n",
    )?;

    let normalized = load_payroll_csv_with_report(&path)?;
    assert_eq!(normalized.report.strategy, HeaderStrategy::Header { skipped: 1 });
    assert_eq!(normalized.table.num_rows(), 2);
    assert_eq!(normalized.table.numeric("GROSS PAY").unwrap(), &[1000.0, 600.0]);
    assert_complete(&normalized.table);
    Ok(())
}

#[test]
fn missing_file_is_a_source_error() {
    let tmp = tempdir().unwrap();
    let err = load_payroll_csv(tmp.path().join("nope.csv")).unwrap_err();
    assert!(matches!(err, SourceError::Io { .. }), "got {:?}", err);
}

#[test]
fn empty_file_is_a_source_error() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("empty.csv");
    fs::write(&path, "")?;
    assert!(matches!(load_payroll_csv(&path), Err(SourceError::Empty)));
    Ok(())
}

#[test]
fn malformed_inputs_still_yield_the_full_schema() -> Result<()> {
    let inputs: &[&[u8]] = &[
        b"STATUS\n",
        b"a;b\n1;2;3\n",
        b"x\ny\nz\n",
        b"$12,50;HRS;GROSS PAY\n1;2;3\n",
        b"employee;;;\nA;;;\n;;;\n",
        b"EMPLOYEE;EMPLOYEE;HRS\nA;B;n/a\n",
    ];
    for input in inputs {
        let table = normalize_bytes(input)?.table;
        assert_complete(&table);
    }
    Ok(())
}

#[test]
fn loading_the_same_file_twice_is_identical() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("messy.csv");
    fs::write(
        &path,
        "\n\nemployee;hourly\u{a0}rate;GROSS  PAY\nA;$1.234,56;NA\nB;;$9,99\n",
    )?;
    let first = load_payroll_csv_with_report(&path)?;
    let second = load_payroll_csv_with_report(&path)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn full_run_writes_every_artifact() -> Result<()> {
    let tmp = tempdir()?;
    let src = tmp.path().join("bookDA.csv");
    fs::write(
        &src,
        "EMPLOYEE;DIVISION;HRS;HOURLY RATE;GROSS PAY;STATUS\n\
         J Doe;Sales;40;$25,00;1.000,00;FULL TIME\n\
         A Roe;Ops;20;$30,00;600,00;PART TIME\n\
         C Poe;Sales;38;$35,00;1.330,00;FULL TIME\n",
    )?;
    let out = tmp.path().join("charts");
    fs::create_dir_all(&out)?;

    let table = load_payroll_csv(&src)?;
    let specs = build_all(&table, &default_consumers(&ChartOptions::default()))?;
    assert_eq!(specs.len(), 9);
    for spec in &specs {
        let path = export::write_chart(&out, spec)?;
        assert!(path.exists());
    }

    let parquet_path = out.join(export::TABLE_FILE_NAME);
    export::write_table_parquet(&table, &parquet_path)?;
    let reader = SerializedFileReader::new(File::open(&parquet_path)?)?;
    assert_eq!(reader.metadata().file_metadata().num_rows(), 3);
    Ok(())
}
