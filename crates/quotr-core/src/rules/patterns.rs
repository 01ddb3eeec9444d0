//! Common regex patterns for quotation field handling.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Amount text: optional currency marker on either side, digits with
    // comma/space grouping, optional fraction.
    pub static ref AMOUNT_TEXT: Regex = Regex::new(
        r"^(?:[A-Z]{3}\.?|Rs\.?|[$€£¥₹])?\s*([+-]?[\d,\s\u{00a0}]*\.?\d*)\s*(?:[A-Z]{3}|[$€£¥₹])?$"
    ).unwrap();

    // Business date: 14-Feb-25
    pub static ref BUSINESS_DATE: Regex = Regex::new(
        r"^(\d{1,2})-([A-Za-z]{3})-(\d{2}|\d{4})$"
    ).unwrap();

    // Filter bound: 2025-02-14
    pub static ref ISO_DATE: Regex = Regex::new(
        r"^(\d{4})-(\d{2})-(\d{2})$"
    ).unwrap();

    // Numeric dates emitted by models: 14/02/2025, 14.02.25, 14-02-2025
    pub static ref DATE_DMY: Regex = Regex::new(
        r"^(\d{1,2})[./\-](\d{1,2})[./\-](\d{4}|\d{2})$"
    ).unwrap();

    pub static ref DATE_YMD: Regex = Regex::new(
        r"^(\d{4})[./\-](\d{1,2})[./\-](\d{1,2})$"
    ).unwrap();

    // Long form: 14 Feb 2025, 14 February 2025
    pub static ref DATE_LONG: Regex = Regex::new(
        r"^(\d{1,2})[\s\-]+([A-Za-z]{3})[A-Za-z]*\.?[\s\-,]+(\d{4}|\d{2})$"
    ).unwrap();

    // Fenced code blocks in model responses
    pub static ref JSON_FENCE: Regex = Regex::new(
        r"(?i)```json[ \t]*\r?\n?([\s\S]*?)```"
    ).unwrap();

    pub static ref ANY_FENCE: Regex = Regex::new(
        r"```(?:[A-Za-z0-9_+-]+[ \t]*\r?\n)?([\s\S]*?)```"
    ).unwrap();
}
