use crate::document::Document;
use crate::error::Result;

/// Serialize a document as compact JSON.
pub fn to_json(document: &Document) -> Result<String> {
    Ok(serde_json::to_string(document)?)
}

/// Serialize a document as indented JSON for display.
pub fn to_json_pretty(document: &Document) -> Result<String> {
    Ok(serde_json::to_string_pretty(document)?)
}
