//! Data models for quotations and configuration.

pub mod config;
pub mod draft;
pub mod quotation;
