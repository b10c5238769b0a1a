// src/main.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use payroll::{
    charts::{build_all, default_consumers, ChartOptions},
    export::{self, RunSummary},
    load_payroll_csv_with_report,
};
use std::{fs, path::PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "payroll")]
#[command(about = "Normalize a semicolon-separated payroll export and render chart specs")]
struct Args {
    /// Payroll CSV to read
    #[arg(short, long, default_value = "bookDA.csv")]
    input: PathBuf,

    /// Directory for chart specs, the normalized table and the run summary
    #[arg(short, long, default_value = "charts")]
    output: PathBuf,

    /// Employees shown in the first-N gross pay chart
    #[arg(long, default_value_t = 10)]
    top_n: usize,

    /// Bins of the hourly rate histogram
    #[arg(long, default_value_t = 10)]
    bins: usize,

    /// Skip writing normalized.parquet
    #[arg(long)]
    no_parquet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
    info!(input = %args.input.display(), output = %args.output.display(), "startup");

    let normalized = load_payroll_csv_with_report(&args.input)
        .with_context(|| format!("loading {}", args.input.display()))?;
    let table = &normalized.table;

    // columns and the first row, for eyeballing the recovered schema
    println!("{}", serde_json::to_string(&table.column_names())?);
    if let Some(first) = table.record(0) {
        println!("{}", serde_json::to_string(&first.to_json())?);
    }

    fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let opts = ChartOptions {
        top_n: args.top_n,
        bins: args.bins,
    };
    let specs = build_all(table, &default_consumers(&opts))?;

    let mut artifacts = Vec::with_capacity(specs.len() + 1);
    for spec in &specs {
        artifacts.push(export::write_chart(&args.output, spec)?);
    }

    if !args.no_parquet {
        let path = args.output.join(export::TABLE_FILE_NAME);
        let bytes = export::write_table_parquet(table, &path)?;
        info!(path = %path.display(), bytes, "wrote normalized table");
        artifacts.push(path);
    }

    let summary = RunSummary {
        source: args.input.clone(),
        generated_at: Utc::now(),
        rows: table.num_rows(),
        columns: table.column_names().into_iter().map(String::from).collect(),
        report: normalized.report.clone(),
        artifacts,
    };
    let summary_path = export::write_summary(&args.output, &summary)?;

    info!(
        charts = specs.len(),
        summary = %summary_path.display(),
        "all done"
    );
    Ok(())
}
