//! Instruction prompt sent alongside every document image.

/// Record keys the model must emit, spelled exactly as in the dataset.
pub const SCHEMA_KEYS: [&str; 12] = [
    "QUOTATION NO",
    "QUOTATION DATE",
    "CLIENT",
    "NEW/OLD",
    "DESCRIPTION 1",
    "DESCRIPTION 2",
    "QTY",
    "UNIT COST",
    "TOTAL AMOUNT",
    "SALES  PERSON",
    "INVOICE NO",
    "STATUS",
];

/// Fixed extraction instruction.
pub const INSTRUCTION_PROMPT: &str = r#"Read the quotation document in the attached image and extract its data.
Reply with a single JSON object and nothing else, using exactly these keys (note the two spaces in "SALES  PERSON"):
{
  "QUOTATION NO": "quotation number",
  "QUOTATION DATE": "quotation date as DD-Mon-YY, e.g. 14-Feb-25",
  "CLIENT": "client name",
  "NEW/OLD": "NEW or OLD",
  "DESCRIPTION 1": "first line of the item description",
  "DESCRIPTION 2": "second line of the item description",
  "QTY": "quantity as a number",
  "UNIT COST": "unit cost as a number",
  "TOTAL AMOUNT": "total amount as a number",
  "SALES  PERSON": "sales person name",
  "INVOICE NO": "invoice number, or empty",
  "STATUS": "PENDING, INVOICED, REGRET or OPEN"
}
Use an empty string for any field that is not on the document.
Leave currency symbols out of numbers."#;
