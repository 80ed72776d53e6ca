use crate::element::Element;

/// Replace every cell of `table` with its element's text.
///
/// Empty cells become empty strings. The shape of the table is kept as is.
pub fn extract_text_from_cells<E: Element>(
    table: &[Vec<Option<&E>>],
    strip_text: bool,
) -> Vec<Vec<String>> {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Some(element) => cell_text(element.text(), strip_text),
                    None => String::new(),
                })
                .collect()
        })
        .collect()
}

/// Same as [`extract_text_from_cells`] for a table without empty cells.
pub fn extract_text_from_simple_cells<E: Element>(
    table: &[Vec<&E>],
    strip_text: bool,
) -> Vec<Vec<String>> {
    table
        .iter()
        .map(|row| {
            row.iter()
                .map(|element| cell_text(element.text(), strip_text))
                .collect()
        })
        .collect()
}

fn cell_text(text: &str, strip: bool) -> String {
    if strip {
        text.trim().to_string()
    } else {
        text.to_string()
    }
}

/// Drop every row after the first one that repeats it exactly.
///
/// Tables printed across a page break often repeat their header row.
pub fn remove_duplicate_header_rows(table: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let mut rows = table.into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let body: Vec<Vec<String>> = rows.filter(|row| *row != header).collect();
    std::iter::once(header).chain(body).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::TextElement;
    use crate::geometry::BoundingBox;

    fn element(text: &str) -> TextElement {
        TextElement::new(BoundingBox::new(0.0, 1.0, 0.0, 1.0), text)
    }

    #[test]
    fn test_single_cell() {
        let e = element("fake_text");
        assert_eq!(extract_text_from_cells(&[vec![Some(&e)]], false), vec![vec!["fake_text"]]);
        assert_eq!(
            extract_text_from_cells::<TextElement>(&[vec![None]], false),
            vec![vec![""]]
        );
    }

    #[test]
    fn test_mixed_cells() {
        let e = element("fake_text");
        let table = vec![vec![Some(&e), None], vec![Some(&e), Some(&e)]];
        assert_eq!(
            extract_text_from_cells(&table, false),
            vec![vec!["fake_text", ""], vec!["fake_text", "fake_text"]]
        );
    }

    #[test]
    fn test_strip_text() {
        let e = element("  padded \n");
        assert_eq!(extract_text_from_cells(&[vec![Some(&e)]], true), vec![vec!["padded"]]);
        assert_eq!(
            extract_text_from_simple_cells(&[vec![&e]], false),
            vec![vec!["  padded \n"]]
        );
    }

    #[test]
    fn test_remove_duplicate_header_rows() {
        let header = vec!["Name".to_string(), "Age".to_string()];
        let row = vec!["Ada".to_string(), "36".to_string()];
        let table = vec![header.clone(), row.clone(), header.clone(), row.clone()];
        assert_eq!(
            remove_duplicate_header_rows(table),
            vec![header, row.clone(), row]
        );
        assert!(remove_duplicate_header_rows(Vec::new()).is_empty());
    }
}
