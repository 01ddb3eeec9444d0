//! Extract command - turn a quotation document image into a record.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use quotr_core::extraction::ExtractionState;
use quotr_core::models::config::EnumPolicy;
use quotr_core::models::draft::QuotationDraft;
use quotr_core::models::quotation::QuotationRecord;
use quotr_core::WorkingSet;
use quotr_inference::ImagePayload;

use super::{OutputFormat, build_extractor, emit, format_record, load_config};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Document image (png, jpg, webp, gif, bmp, tiff)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Seconds to wait for the model before giving up
    #[arg(short, long)]
    timeout: Option<u64>,

    /// Fail instead of defaulting unknown STATUS or NEW/OLD values
    #[arg(long)]
    reject_unknown: bool,

    /// Append the extracted record to this dataset file (only when QUOTATION NO, CLIENT and QUOTATION DATE are present)
    #[arg(long)]
    append_to: Option<PathBuf>,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = load_config(config_path)?;
    if args.reject_unknown {
        config.extraction.enum_policy = EnumPolicy::Reject;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let file_name = args
        .input
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default();
    let image = ImagePayload::from_file_bytes(file_name, fs::read(&args.input)?)?;

    let extractor = build_extractor(&config, args.timeout)?;
    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message(format!("Extracting with {}", extractor.model_name()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let state = extractor.extract(&image).await;

    let record = match state {
        ExtractionState::Succeeded(record) => {
            pb.finish_with_message("Done");
            record
        }
        ExtractionState::Failed(failure) => {
            pb.finish_and_clear();
            anyhow::bail!("Extraction failed: {}", failure);
        }
        other => {
            pb.finish_and_clear();
            anyhow::bail!("Extraction ended in unexpected state {}", other.name());
        }
    };

    let missing = record.missing_required_fields();
    if !missing.is_empty() {
        eprintln!(
            "{} Extracted record is missing: {}",
            style("⚠").yellow(),
            missing.join(", ")
        );
    }

    emit(&format_record(&record, args.format)?, args.output.as_deref())?;

    if let Some(dataset) = &args.append_to {
        let count = append_to_dataset(dataset, record)?;
        eprintln!(
            "{} Appended to {} ({} quotations)",
            style("✓").green(),
            dataset.display(),
            count
        );
    }

    info!("Extraction finished in {}ms", start.elapsed().as_millis());
    Ok(())
}

fn append_to_dataset(path: &Path, record: QuotationRecord) -> anyhow::Result<usize> {
    let record = QuotationDraft::from_record(record)
        .submit()
        .map_err(|e| anyhow::anyhow!("Not appending to {}: {}", path.display(), e))?;

    let quotations = if path.exists() {
        WorkingSet::from_file(path)?
    } else {
        WorkingSet::default()
    };

    let count = quotations.append(record);
    quotations.save(path)?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_append_requires_core_fields() {
        let dir = TempDir::new().unwrap();
        let dataset = dir.path().join("quotations.json");

        let incomplete = QuotationRecord {
            client: "Acme".into(),
            ..QuotationRecord::default()
        };
        let err = append_to_dataset(&dataset, incomplete).unwrap_err();
        assert!(err.to_string().contains("QUOTATION NO, QUOTATION DATE"));
        assert!(!dataset.exists());

        let complete = QuotationRecord {
            quotation_number: "25-0200".into(),
            quotation_date: "03-Mar-25".into(),
            client: "Acme".into(),
            ..QuotationRecord::default()
        };
        assert_eq!(append_to_dataset(&dataset, complete.clone()).unwrap(), 1);
        assert_eq!(append_to_dataset(&dataset, complete).unwrap(), 2);

        let reloaded = WorkingSet::from_file(&dataset).unwrap();
        assert_eq!(reloaded.snapshot()[1].quotation_number, "25-0200");
    }
}
