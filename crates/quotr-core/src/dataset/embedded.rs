//! Dataset bundled into the binary.

/// Default quotation dataset, loaded when no file is configured.
pub static BUNDLED_QUOTATIONS: &str = include_str!("../../../../data/quotations.json");

/// Check if the bundled dataset has content.
pub fn has_bundled_dataset() -> bool {
    !BUNDLED_QUOTATIONS.trim().is_empty()
}
