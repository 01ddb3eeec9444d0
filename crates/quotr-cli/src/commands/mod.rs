//! Subcommand implementations and the helpers they share.

pub mod config;
pub mod extract;
pub mod list;
pub mod serve;
pub mod stats;

mod output;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use clap::Args;
use tracing::debug;

use quotr_core::extraction::{QuotationExtractor, ResponseParser};
use quotr_core::filter::{ALL_SENTINEL, FilterCriteria, FilterParams};
use quotr_core::models::config::QuotrConfig;
use quotr_core::WorkingSet;
use quotr_inference::ChatGatewayBackend;

pub use output::{OutputFormat, emit, format_record, format_records};

/// Location of the user configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("quotr")
        .join("config.json")
}

/// Load the explicit config file, else the user file, else defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<QuotrConfig> {
    if let Some(path) = config_path {
        return Ok(QuotrConfig::from_file(Path::new(path))?);
    }

    let path = default_config_path();
    if path.exists() {
        debug!("Using config file {}", path.display());
        Ok(QuotrConfig::from_file(&path)?)
    } else {
        Ok(QuotrConfig::default())
    }
}

/// Load the dataset named on the command line, in the config, or the bundled one.
pub fn load_working_set(config: &QuotrConfig, dataset: Option<&Path>) -> anyhow::Result<WorkingSet> {
    let path = dataset.or(config.dataset.path.as_deref());
    Ok(WorkingSet::load(path)?)
}

/// Build an extractor talking to the configured gateway.
pub fn build_extractor(config: &QuotrConfig, timeout_secs: Option<u64>) -> anyhow::Result<QuotationExtractor> {
    let timeout = Duration::from_secs(timeout_secs.unwrap_or(config.gateway.timeout_secs));

    let backend = ChatGatewayBackend::new()?
        .with_endpoint(&config.gateway.endpoint)
        .with_model(&config.gateway.model)
        .with_api_key_env(&config.gateway.api_key_env);

    Ok(QuotationExtractor::new(Arc::new(backend))
        .with_parser(ResponseParser::from_config(&config.extraction))
        .with_timeout(timeout))
}

/// Filter options shared by `list` and `stats`.
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Free-text search over number, client, descriptions, sales person, status and invoice
    #[arg(short, long)]
    search: Option<String>,

    /// Exact client name, or "all"
    #[arg(long, default_value = ALL_SENTINEL)]
    client: String,

    /// PENDING, INVOICED, REGRET, OPEN, or "all"
    #[arg(long, default_value = ALL_SENTINEL)]
    status: String,

    /// Exact sales person, or "all"
    #[arg(long, default_value = ALL_SENTINEL)]
    sales_person: String,

    /// NEW, OLD, or "all"
    #[arg(long, default_value = ALL_SENTINEL)]
    client_type: String,

    /// Substring of the quotation number
    #[arg(long)]
    quotation_no: Option<String>,

    /// Substring of the invoice number
    #[arg(long)]
    invoice_no: Option<String>,

    /// Earliest quotation date (YYYY-MM-DD)
    #[arg(long)]
    from: Option<String>,

    /// Latest quotation date (YYYY-MM-DD)
    #[arg(long)]
    to: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> anyhow::Result<FilterCriteria> {
        let params = FilterParams {
            search: self.search.clone().unwrap_or_default(),
            client: self.client.clone(),
            status: self.status.clone(),
            sales_person: self.sales_person.clone(),
            new_old: self.client_type.clone(),
            quotation_no: self.quotation_no.clone().unwrap_or_default(),
            invoice_no: self.invoice_no.clone().unwrap_or_default(),
            date_from: self.from.clone().unwrap_or_default(),
            date_to: self.to.clone().unwrap_or_default(),
        };
        Ok(FilterCriteria::try_from(params)?)
    }
}
