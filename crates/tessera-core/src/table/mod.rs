//! Table reconstruction from positioned text elements.
//!
//! Rows and columns are inferred purely from how element boxes overlap:
//! elements whose vertical extents overlap share a row, elements whose
//! horizontal extents overlap share a column. Layouts that do not resolve
//! to a clean grid are rejected rather than guessed at.

pub mod bands;
pub mod grid;
pub mod header;
pub mod text;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::element::Element;
use crate::error::{Conflict, TesseraError};
pub use bands::BandOverlap;
pub use grid::{build_grid, validate_table_shape, SimpleTable, Table};
pub use header::{add_header_to_table, Record};
pub use text::{
    extract_text_from_cells, extract_text_from_simple_cells, remove_duplicate_header_rows,
};

/// Knobs for table extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    /// Whether boxes sharing only an edge fall into the same row or column.
    pub overlap: BandOverlap,
    /// Trim surrounding whitespace when projecting cells to text.
    pub strip_text: bool,
    /// Drop text rows that repeat the first row.
    pub remove_duplicate_header_rows: bool,
}

/// Extract a table that may contain empty cells.
pub fn extract_table<E: Element>(elements: &[E]) -> Result<Table<'_, E>, TesseraError> {
    extract_table_with(elements, &TableOptions::default())
}

pub fn extract_table_with<'a, E: Element>(
    elements: &'a [E],
    options: &TableOptions,
) -> Result<Table<'a, E>, TesseraError> {
    build_grid(elements, options.overlap)
}

/// Extract a table in which every row/column position holds an element.
///
/// Fails with [`Conflict::EmptyCell`] if the elements leave a gap.
pub fn extract_simple_table<E: Element>(
    elements: &[E],
) -> Result<SimpleTable<'_, E>, TesseraError> {
    extract_simple_table_with(elements, &TableOptions::default())
}

pub fn extract_simple_table_with<'a, E: Element>(
    elements: &'a [E],
    options: &TableOptions,
) -> Result<SimpleTable<'a, E>, TesseraError> {
    let table = build_grid(elements, options.overlap)?;
    validate_table_shape(&table)?;

    let mut dense = Vec::with_capacity(table.len());
    for (row, cells) in table.into_iter().enumerate() {
        let mut dense_row = Vec::with_capacity(cells.len());
        for (column, cell) in cells.into_iter().enumerate() {
            match cell {
                Some(element) => dense_row.push(element),
                None => {
                    let conflict = Conflict::EmptyCell { row, column };
                    warn!(%conflict, "table extraction conflict");
                    return Err(conflict.into());
                }
            }
        }
        dense.push(dense_row);
    }
    Ok(dense)
}

/// [`extract_table`] followed by projection to text.
pub fn extract_text_from_table<E: Element>(
    elements: &[E],
) -> Result<Vec<Vec<String>>, TesseraError> {
    extract_text_from_table_with(elements, &TableOptions::default())
}

pub fn extract_text_from_table_with<E: Element>(
    elements: &[E],
    options: &TableOptions,
) -> Result<Vec<Vec<String>>, TesseraError> {
    let table = extract_table_with(elements, options)?;
    Ok(finish_text(extract_text_from_cells(&table, options.strip_text), options))
}

/// [`extract_simple_table`] followed by projection to text.
pub fn extract_text_from_simple_table<E: Element>(
    elements: &[E],
) -> Result<Vec<Vec<String>>, TesseraError> {
    extract_text_from_simple_table_with(elements, &TableOptions::default())
}

pub fn extract_text_from_simple_table_with<E: Element>(
    elements: &[E],
    options: &TableOptions,
) -> Result<Vec<Vec<String>>, TesseraError> {
    let table = extract_simple_table_with(elements, options)?;
    Ok(finish_text(
        extract_text_from_simple_cells(&table, options.strip_text),
        options,
    ))
}

fn finish_text(table: Vec<Vec<String>>, options: &TableOptions) -> Vec<Vec<String>> {
    if options.remove_duplicate_header_rows {
        remove_duplicate_header_rows(table)
    } else {
        table
    }
}
