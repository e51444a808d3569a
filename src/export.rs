//! Flat boundary-list export.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <ImageColumns>
//!   <Column>42</Column>
//! </ImageColumns>
//! ```

use crate::error::ExportError;
use std::fmt::Write as _;
use std::path::Path;

const ROOT: &str = "ImageColumns";
const COLUMN: &str = "Column";

/// Serialize boundaries in order, one `<Column>` element each
pub fn write_columns_xml(columns: &[u32]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    xml.push_str("<ImageColumns>\n");
    for column in columns {
        // Writing into a String cannot fail
        let _ = writeln!(xml, "  <{COLUMN}>{column}</{COLUMN}>");
    }
    xml.push_str("</ImageColumns>\n");
    xml
}

/// Parse an export document back into the boundary sequence.
///
/// Whitespace around values is ignored; elements other than `<Column>` are
/// skipped.
pub fn parse_columns_xml(xml: &str) -> Result<Vec<u32>, ExportError> {
    let doc = roxmltree::Document::parse(xml)?;
    let root = doc.root_element();
    if root.tag_name().name() != ROOT {
        return Err(ExportError::UnexpectedRoot(root.tag_name().name().to_string()));
    }

    root.children()
        .filter(|node| node.is_element() && node.tag_name().name() == COLUMN)
        .map(|node| {
            let text = node.text().unwrap_or("").trim();
            text.parse::<u32>()
                .map_err(|_| ExportError::InvalidColumn(text.to_string()))
        })
        .collect()
}

pub fn save_columns(path: &Path, columns: &[u32]) -> Result<(), ExportError> {
    std::fs::write(path, write_columns_xml(columns))?;
    tracing::info!(path = %path.display(), columns = columns.len(), "Exported columns");
    Ok(())
}

pub fn load_columns(path: &Path) -> Result<Vec<u32>, ExportError> {
    let xml = std::fs::read_to_string(path)?;
    parse_columns_xml(&xml)
}
