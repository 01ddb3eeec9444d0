//! Summary statistics over a record view.

use std::borrow::Borrow;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::warn;

use crate::models::quotation::{QuotationRecord, QuotationStatus};
use crate::rules::format_amount;

/// Summary of a set of quotations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationStats {
    pub count: usize,
    /// Sum of parsed total amounts; unparseable totals contribute zero.
    pub total_amount: Decimal,
    pub invoiced_count: usize,
    pub regret_count: usize,
}

impl QuotationStats {
    /// Total amount rendered for display, e.g. `12,500.00`.
    pub fn formatted_total(&self) -> String {
        format_amount(self.total_amount)
    }

    /// Share of quotations that were invoiced, in percent.
    pub fn conversion_rate(&self) -> Decimal {
        if self.count == 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(self.invoiced_count) * Decimal::ONE_HUNDRED / Decimal::from(self.count))
            .round_dp(1)
    }
}

/// Aggregate count, total and status counts in one pass.
pub fn compute_stats<I, R>(records: I) -> QuotationStats
where
    I: IntoIterator<Item = R>,
    R: Borrow<QuotationRecord>,
{
    records
        .into_iter()
        .fold(QuotationStats::default(), |mut stats, record| {
            let record = record.borrow();
            stats.count += 1;
            let amount = record.total_amount_value();
            stats.total_amount = stats.total_amount.checked_add(amount).unwrap_or_else(|| {
                warn!(
                    "Total overflowed adding {:?} from quotation {:?}, saturating",
                    record.total_amount, record.quotation_number
                );
                if amount.is_sign_negative() { Decimal::MIN } else { Decimal::MAX }
            });
            match record.status {
                QuotationStatus::Invoiced => stats.invoiced_count += 1,
                QuotationStatus::Regret => stats.regret_count += 1,
                QuotationStatus::Pending | QuotationStatus::Open => {}
            }
            stats
        })
}
