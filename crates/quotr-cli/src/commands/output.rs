//! Rendering records as JSON, CSV or a text table.

use std::fs;
use std::path::Path;

use console::style;

use quotr_core::models::quotation::{QuotationRecord, keys};

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text table
    Text,
}

pub fn format_records(records: &[&QuotationRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Text => Ok(format_table(records)),
    }
}

pub fn format_record(record: &QuotationRecord, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(record)?),
        OutputFormat::Csv => format_csv(&[record]),
        OutputFormat::Text => Ok(format_detail(record)),
    }
}

/// Write to `path` when given, otherwise print to stdout.
pub fn emit(output: &str, path: Option<&Path>) -> anyhow::Result<()> {
    if let Some(path) = path {
        fs::write(path, output)?;
        println!("{} Output written to {}", style("✓").green(), path.display());
    } else {
        println!("{}", output.trim_end());
    }
    Ok(())
}

fn format_csv(records: &[&QuotationRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(keys::ALL)?;
    for record in records {
        wtr.write_record([
            record.quotation_number.as_str(),
            &record.quotation_date,
            &record.client,
            record.client_type.as_str(),
            &record.description1,
            &record.description2,
            &record.quantity,
            &record.unit_cost,
            &record.total_amount,
            &record.sales_person,
            &record.invoice_number,
            record.status.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}

fn format_table(records: &[&QuotationRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:<10} {:<28} {:<4} {:<9} {:>12} {:<12} {:<12}\n",
        "NO", "DATE", "CLIENT", "TYPE", "STATUS", "TOTAL", "SALES", "INVOICE"
    ));

    for record in records {
        output.push_str(&format!(
            "{:<10} {:<10} {:<28} {:<4} {:<9} {:>12} {:<12} {:<12}\n",
            truncate(&record.quotation_number, 10),
            truncate(&record.quotation_date, 10),
            truncate(&record.client, 28),
            record.client_type.as_str(),
            record.status.as_str(),
            truncate(&record.total_amount, 12),
            truncate(&record.sales_person, 12),
            truncate(&record.invoice_number, 12),
        ));
    }

    output
}

fn format_detail(record: &QuotationRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Quotation: {}\n",
        style(&record.quotation_number).bold()
    ));
    output.push_str(&format!("Date: {}\n", record.quotation_date));
    output.push_str(&format!("Client: {} ({})\n", record.client, record.client_type));
    output.push('\n');

    output.push_str("Items:\n");
    output.push_str(&format!("  {}\n", record.description1));
    if !record.description2.is_empty() {
        output.push_str(&format!("  {}\n", record.description2));
    }
    output.push_str(&format!("  Qty: {}  Unit cost: {}\n", record.quantity, record.unit_cost));
    output.push_str(&format!("  Total: {}\n", record.total_amount));
    output.push('\n');

    output.push_str(&format!("Sales person: {}\n", record.sales_person));
    output.push_str(&format!("Status: {}\n", record.status));
    if record.has_invoice() {
        output.push_str(&format!("Invoice: {}\n", record.invoice_number));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use quotr_core::models::quotation::QuotationStatus;

    fn record() -> QuotationRecord {
        QuotationRecord {
            quotation_number: "25-0001".into(),
            client: "Acme, Inc.".into(),
            total_amount: "1,540.00".into(),
            status: QuotationStatus::Invoiced,
            ..QuotationRecord::default()
        }
    }

    #[test]
    fn test_csv_uses_schema_header_and_quotes() {
        let record = record();
        let csv = format_records(&[&record], OutputFormat::Csv).unwrap();
        let mut lines = csv.lines();

        assert_eq!(
            lines.next().unwrap(),
            "QUOTATION NO,QUOTATION DATE,CLIENT,NEW/OLD,DESCRIPTION 1,DESCRIPTION 2,QTY,UNIT COST,TOTAL AMOUNT,SALES  PERSON,INVOICE NO,STATUS"
        );
        assert_eq!(
            lines.next().unwrap(),
            "25-0001,,\"Acme, Inc.\",NEW,,,,,\"1,540.00\",,,INVOICED"
        );
    }

    #[test]
    fn test_json_list_uses_wire_keys() {
        let record = record();
        let json = format_records(&[&record], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["QUOTATION NO"], "25-0001");
        assert_eq!(value[0]["STATUS"], "INVOICED");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("Emirates Fabrication Co.", 10), "Emirates …");
    }
}
