use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use chart_relations::{load_csv, resolve, save_relations, RelationsConfig};

/// Group charts into families from their "Same As" references
#[derive(Parser, Debug)]
#[command(name = "chart-relations")]
#[command(version)]
struct Args {
    /// Input CSV (needs the WISH, Date and Same As columns)
    #[arg(short, long, env = "CHART_RELATIONS_INPUT")]
    input: Option<PathBuf>,

    /// Output JSON path
    #[arg(short, long, env = "CHART_RELATIONS_OUTPUT")]
    output: Option<PathBuf>,

    /// Header of the subject identifier column
    #[arg(long)]
    wish_column: Option<String>,

    /// Header of the date column
    #[arg(long)]
    date_column: Option<String>,

    /// Header of the references column
    #[arg(long)]
    same_as_column: Option<String>,

    /// Write single-line JSON instead of indented
    #[arg(long)]
    compact: bool,
}

impl Args {
    fn into_config(self) -> RelationsConfig {
        let mut config = RelationsConfig::default();
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(col) = self.wish_column {
            config.columns.wish = col;
        }
        if let Some(col) = self.date_column {
            config.columns.date = col;
        }
        if let Some(col) = self.same_as_column {
            config.columns.same_as = col;
        }
        config.pretty = !self.compact;
        config
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chart_relations=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Args::parse().into_config();
    run(&config)
}

fn run(config: &RelationsConfig) -> Result<()> {
    // 1. Load CSV (schema failure aborts before anything is written)
    let report = load_csv(&config.input, &config.columns)
        .with_context(|| format!("Failed to load {}", config.input.display()))?;
    info!(
        rows = report.rows_read,
        skipped = report.rows_skipped,
        references_dropped = report.references_dropped,
        "rows processed"
    );

    // 2. Resolve families
    let relations = resolve(&report.records);
    let summary = relations.summary();
    info!(
        multi_member = summary.multi_member_families,
        largest = summary.largest_family,
        undated = summary.charts_undated,
        "families resolved"
    );

    // 3. Write JSON
    save_relations(&config.output, &relations, config.pretty)
        .with_context(|| format!("Failed to write {}", config.output.display()))?;

    println!(
        "Wrote {} with {} families and {} charts",
        config.output.display(),
        summary.families,
        summary.charts
    );

    Ok(())
}
