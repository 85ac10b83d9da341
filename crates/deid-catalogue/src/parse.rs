use deid_model::Catalogue;
use tracing::debug;

use crate::error::Result;

/// Parse and validate a catalogue document.
///
/// Table order follows the document. Missing column lists default to empty.
///
/// # Errors
///
/// Fails on malformed JSON and on descriptors that list a column as both a
/// client identifier and another identifiable column.
pub fn parse_catalogue(json: &str) -> Result<Catalogue> {
    let catalogue: Catalogue = serde_json::from_str(json)?;
    catalogue.validate()?;
    debug!(tables = catalogue.len(), "parsed catalogue");
    Ok(catalogue)
}
