//! Stats command - summarize quotations matching filters.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use quotr_core::filter::{FacetValues, apply_filters};
use quotr_core::stats::{QuotationStats, compute_stats};

use super::{FilterArgs, OutputFormat, emit, load_config, load_working_set};

/// Arguments for the stats command.
#[derive(Args)]
pub struct StatsArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Dataset file (default: configured dataset, else bundled sample)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Also list distinct clients, statuses and sales persons
    #[arg(long)]
    facets: bool,

    /// Output format (csv is not supported here)
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatsReport {
    #[serde(flatten)]
    stats: QuotationStats,
    total_amount_formatted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    facets: Option<FacetValues>,
}

pub fn run(args: StatsArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let criteria = args.filters.criteria()?;
    let quotations = load_working_set(&config, args.dataset.as_deref())?;

    let snapshot = quotations.snapshot();
    let matches = apply_filters(&snapshot, &criteria);
    let stats = compute_stats(matches.iter().copied());
    let facets = args.facets.then(|| FacetValues::collect(snapshot.iter()));

    let report = StatsReport {
        stats,
        total_amount_formatted: stats.formatted_total(),
        facets,
    };

    let rendered = match args.format {
        OutputFormat::Json => serde_json::to_string_pretty(&report)?,
        OutputFormat::Text => format_text(&report),
        OutputFormat::Csv => anyhow::bail!("CSV output is not available for stats"),
    };

    emit(&rendered, args.output.as_deref())
}

fn format_text(report: &StatsReport) -> String {
    let stats = &report.stats;
    let mut output = String::new();

    output.push_str(&format!("Quotations:   {}\n", stats.count));
    output.push_str(&format!("Total amount: {}\n", report.total_amount_formatted));
    output.push_str(&format!(
        "Invoiced:     {} ({}%)\n",
        stats.invoiced_count,
        stats.conversion_rate()
    ));
    output.push_str(&format!("Regret:       {}\n", stats.regret_count));

    if let Some(facets) = &report.facets {
        output.push('\n');
        output.push_str(&format!("Clients:       {}\n", facets.clients.join(", ")));
        let statuses: Vec<&str> = facets.statuses.iter().map(|s| s.as_str()).collect();
        output.push_str(&format!("Statuses:      {}\n", statuses.join(", ")));
        output.push_str(&format!("Sales persons: {}\n", facets.sales_persons.join(", ")));
    }

    output
}
