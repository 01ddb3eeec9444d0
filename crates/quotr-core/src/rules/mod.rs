//! Field rules shared by records, filters, aggregation and extraction.

pub mod amounts;
pub mod dates;
pub mod patterns;

pub use amounts::{compute_total, format_amount, parse_amount, try_parse_amount};
pub use dates::{format_business_date, normalize_business_date, parse_business_date, parse_iso_date};
