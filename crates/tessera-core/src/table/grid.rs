use tracing::{debug, warn};

use crate::element::Element;
use crate::error::{Axis, Conflict, TesseraError};
use crate::table::bands::{check_band, merge_bands, Band, BandOverlap, Interval};

/// A table of element references; `None` marks an empty cell.
pub type Table<'a, E> = Vec<Vec<Option<&'a E>>>;

/// A table in which every cell is occupied.
pub type SimpleTable<'a, E> = Vec<Vec<&'a E>>;

/// Arrange `elements` into rows and columns by geometric overlap.
///
/// Rows come out top to bottom and columns left to right. The result does
/// not depend on the order of `elements`.
pub fn build_grid<'a, E: Element>(
    elements: &'a [E],
    overlap: BandOverlap,
) -> Result<Table<'a, E>, TesseraError> {
    if elements.is_empty() {
        return Ok(Vec::new());
    }

    let boxes: Vec<_> = elements.iter().map(Element::bounding_box).collect();
    let vertical: Vec<Interval> = boxes.iter().map(|b| Interval::new(b.y0, b.y1)).collect();
    let horizontal: Vec<Interval> = boxes.iter().map(|b| Interval::new(b.x0, b.x1)).collect();

    // Top row first, so vertical bands are reversed.
    let mut rows = merge_bands(&vertical, overlap);
    rows.reverse();
    let columns = merge_bands(&horizontal, overlap);
    debug!(
        elements = elements.len(),
        rows = rows.len(),
        columns = columns.len(),
        "merged bands"
    );

    let row_of = resolve(&rows, &vertical, overlap, Axis::Row)?;
    let column_of = resolve(&columns, &horizontal, overlap, Axis::Column)?;

    let mut occupant: Vec<Vec<Option<usize>>> = vec![vec![None; columns.len()]; rows.len()];
    for (idx, (&row, &column)) in row_of.iter().zip(&column_of).enumerate() {
        let cell = &mut occupant[row][column];
        if let Some(first) = *cell {
            let conflict = Conflict::DuplicateCell {
                row,
                column,
                first,
                second: idx,
            };
            warn!(%conflict, "table extraction conflict");
            return Err(conflict.into());
        }
        *cell = Some(idx);
    }

    Ok(occupant
        .into_iter()
        .map(|row| row.into_iter().map(|cell| cell.map(|idx| &elements[idx])).collect())
        .collect())
}

/// Map every element index to the position of its band, failing on the
/// first band one of whose members straddles the others.
fn resolve(
    bands: &[Band],
    intervals: &[Interval],
    overlap: BandOverlap,
    axis: Axis,
) -> Result<Vec<usize>, TesseraError> {
    let mut band_of = vec![0; intervals.len()];
    for (position, band) in bands.iter().enumerate() {
        if let Err(element) = check_band(band, intervals, overlap) {
            let conflict = Conflict::Straddle { element, axis };
            warn!(
                %conflict,
                band_start = band.start,
                band_end = band.end,
                "table extraction conflict"
            );
            return Err(conflict.into());
        }
        for &member in &band.members {
            band_of[member] = position;
        }
    }
    Ok(band_of)
}

/// Check that every row of `table` has the same number of cells.
///
/// Works on any table, not only ones built from elements. An empty table
/// is valid.
pub fn validate_table_shape<T>(table: &[Vec<T>]) -> Result<(), TesseraError> {
    let Some(first) = table.first() else {
        return Ok(());
    };
    let expected = first.len();
    match table.iter().position(|row| row.len() != expected) {
        Some(row) => Err(TesseraError::InvalidTableShape {
            row,
            expected,
            found: table[row].len(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextElement;
    use crate::geometry::BoundingBox;

    fn el(x0: f64, x1: f64, y0: f64, y1: f64, text: &str) -> TextElement {
        TextElement::new(BoundingBox::new(x0, x1, y0, y1), text)
    }

    fn texts<'a>(table: &Table<'a, TextElement>) -> Vec<Vec<Option<&'a str>>> {
        table
            .iter()
            .map(|row| row.iter().map(|cell| cell.map(|e| e.text.as_str())).collect())
            .collect()
    }

    #[test]
    fn test_empty_input() {
        let elements: Vec<TextElement> = vec![];
        let table = build_grid(&elements, BandOverlap::Strict).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_two_by_two_in_any_order() {
        let elements = vec![
            el(6.0, 10.0, 0.0, 5.0, "d"),
            el(0.0, 5.0, 6.0, 10.0, "a"),
            el(0.0, 5.0, 0.0, 5.0, "c"),
            el(6.0, 10.0, 6.0, 10.0, "b"),
        ];
        let table = build_grid(&elements, BandOverlap::Strict).unwrap();
        assert_eq!(
            texts(&table),
            vec![vec![Some("a"), Some("b")], vec![Some("c"), Some("d")]]
        );
    }

    #[test]
    fn test_cells_reference_input() {
        let elements = vec![el(0.0, 5.0, 0.0, 5.0, "only")];
        let table = build_grid(&elements, BandOverlap::Strict).unwrap();
        assert!(std::ptr::eq(table[0][0].unwrap(), &elements[0]));
    }

    #[test]
    fn test_duplicate_cell() {
        let elements = vec![
            el(0.0, 5.0, 0.0, 5.0, "a"),
            el(1.0, 4.0, 1.0, 4.0, "b"),
        ];
        let err = build_grid(&elements, BandOverlap::Strict).unwrap_err();
        assert!(matches!(
            err,
            TesseraError::TableExtraction(Conflict::DuplicateCell {
                row: 0,
                column: 0,
                first: 0,
                second: 1
            })
        ));
    }

    #[test]
    fn test_row_straddle() {
        let elements = vec![
            el(0.0, 5.0, 6.0, 10.0, "a"),
            el(6.0, 10.0, 3.0, 8.0, "tall"),
            el(0.0, 5.0, 0.0, 5.0, "c"),
        ];
        let err = build_grid(&elements, BandOverlap::Strict).unwrap_err();
        assert!(matches!(
            err,
            TesseraError::TableExtraction(Conflict::Straddle {
                element: 1,
                axis: Axis::Row
            })
        ));
    }

    #[test]
    fn test_touching_mode_merges_edges() {
        let elements = vec![
            el(0.0, 5.0, 0.0, 5.0, "a"),
            el(5.0, 10.0, 5.0, 10.0, "b"),
        ];
        let strict = build_grid(&elements, BandOverlap::Strict).unwrap();
        assert_eq!(strict.len(), 2);
        assert_eq!(strict[0].len(), 2);

        let err = build_grid(&elements, BandOverlap::Touching).unwrap_err();
        assert!(err.is_extraction_conflict());
    }

    #[test]
    fn test_validate_table_shape() {
        let empty: Vec<Vec<&str>> = vec![];
        assert!(validate_table_shape(&empty).is_ok());
        assert!(validate_table_shape(&[vec!["", ""], vec!["", ""]]).is_ok());
        assert!(validate_table_shape(&[vec![Some(""), None], vec![Some(""), Some("")]]).is_ok());

        let err = validate_table_shape(&[vec![""], vec!["", ""]]).unwrap_err();
        assert!(matches!(
            err,
            TesseraError::InvalidTableShape {
                row: 1,
                expected: 1,
                found: 2
            }
        ));
        assert!(validate_table_shape(&[vec!["", ""], vec![""]]).is_err());
    }
}
