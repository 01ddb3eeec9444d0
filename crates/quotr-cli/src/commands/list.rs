//! List command - show quotations matching filters.

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use quotr_core::filter::{apply_filters, paginate};

use super::{FilterArgs, OutputFormat, emit, format_records, load_config, load_working_set};

/// Arguments for the list command.
#[derive(Args)]
pub struct ListArgs {
    #[command(flatten)]
    filters: FilterArgs,

    /// Dataset file (default: configured dataset, else bundled sample)
    #[arg(short, long)]
    dataset: Option<PathBuf>,

    /// Page to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Records per page (default: configured page size)
    #[arg(long)]
    page_size: Option<usize>,

    /// Show every matching record on one page
    #[arg(long, conflicts_with_all = ["page", "page_size"])]
    all: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: ListArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let criteria = args.filters.criteria()?;
    let quotations = load_working_set(&config, args.dataset.as_deref())?;

    let snapshot = quotations.snapshot();
    let matches = apply_filters(&snapshot, &criteria);
    info!("{} of {} quotations match", matches.len(), snapshot.len());

    let page_size = if args.all {
        matches.len().max(1)
    } else {
        args.page_size.unwrap_or(config.dataset.page_size)
    };
    let page = paginate(&matches, args.page, page_size);

    let rendered = format_records(&page.items, args.format)?;
    emit(&rendered, args.output.as_deref())?;

    if matches!(args.format, OutputFormat::Text) && args.output.is_none() {
        eprintln!(
            "{} Page {} of {} ({} matching quotations)",
            style("ℹ").blue(),
            page.page,
            page.total_pages.max(1),
            page.total_items
        );
        if page.has_next() {
            eprintln!("  Use --page {} to see more.", page.page + 1);
        }
    }

    Ok(())
}
