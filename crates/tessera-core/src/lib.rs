pub mod element;
pub mod error;
pub mod extraction;
pub mod geometry;
pub mod section;
pub mod table;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use element::{Element, TextElement};
pub use error::{Axis, Conflict, TesseraError};
pub use extraction::{ElementSource, PageElements};
pub use geometry::BoundingBox;
pub use section::{Section, Sectioning};
pub use table::{
    add_header_to_table, extract_simple_table, extract_simple_table_with, extract_table,
    extract_table_with, extract_text_from_cells, extract_text_from_simple_table,
    extract_text_from_simple_table_with, extract_text_from_table, extract_text_from_table_with,
    validate_table_shape, BandOverlap, Record, SimpleTable, Table, TableOptions,
};

/// Whether a table may contain empty cells.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableMode {
    /// Every row/column position must be filled.
    Simple,
    /// Gaps become empty strings.
    #[default]
    Sparse,
}

/// Extract the text grid of `elements` in the given mode.
pub fn extract_text<E: Element>(
    elements: &[E],
    mode: TableMode,
    options: &TableOptions,
) -> Result<Vec<Vec<String>>, TesseraError> {
    match mode {
        TableMode::Simple => extract_text_from_simple_table_with(elements, options),
        TableMode::Sparse => extract_text_from_table_with(elements, options),
    }
}

/// Main API entry point: pull the table on one page of a PDF.
///
/// `page_number` is 1-based. When `region` is given, only elements lying
/// entirely inside it take part in the table.
pub fn extract_pdf_table(
    pdf_bytes: &[u8],
    source: &dyn ElementSource,
    page_number: usize,
    region: Option<&BoundingBox>,
    mode: TableMode,
    options: &TableOptions,
) -> Result<Vec<Vec<String>>, TesseraError> {
    let pages = source.extract_pages(pdf_bytes)?;
    let page = pages
        .iter()
        .find(|p| p.page_number == page_number)
        .ok_or_else(|| {
            TesseraError::Extraction(format!(
                "page {page_number} not found ({} pages extracted by {})",
                pages.len(),
                source.backend_name()
            ))
        })?;

    let elements = match region {
        Some(region) => page.within(region),
        None => page.elements.clone(),
    };
    debug!(page = page_number, elements = elements.len(), "selected elements");

    extract_text(&elements, mode, options)
}
