use std::collections::HashSet;

use indexmap::IndexMap;

use crate::error::TesseraError;

/// One table row keyed by column header, in header order.
pub type Record = IndexMap<String, String>;

/// Turn a text table into header-keyed records.
///
/// Without `header` the first row of `table` is used as the header and is not
/// returned as a record. With `header` every row becomes a record.
///
/// Fails with [`TesseraError::InvalidHeader`] if the header repeats an entry
/// (even when there are no rows to label) or if a row's length differs from
/// the header's.
pub fn add_header_to_table(
    table: &[Vec<String>],
    header: Option<&[String]>,
) -> Result<Vec<Record>, TesseraError> {
    let (header, rows) = match header {
        Some(header) => (header, table),
        None => match table.split_first() {
            Some((first, rest)) => (first.as_slice(), rest),
            None => return Ok(Vec::new()),
        },
    };

    let mut seen = HashSet::with_capacity(header.len());
    if let Some(duplicate) = header.iter().find(|h| !seen.insert(h.as_str())) {
        return Err(TesseraError::InvalidHeader(format!(
            "duplicate header entry '{duplicate}'"
        )));
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != header.len() {
            return Err(TesseraError::InvalidHeader(format!(
                "header has {} entries but row {} has {} cells",
                header.len(),
                i,
                row.len()
            )));
        }
    }

    Ok(rows
        .iter()
        .map(|row| header.iter().cloned().zip(row.iter().cloned()).collect())
        .collect())
}
