use tessera_core::Record;

/// One line per row, cells separated by tabs.
pub fn grid(table: &[Vec<String>]) -> String {
    table
        .iter()
        .map(|row| join(row.iter().map(String::as_str)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Header line followed by one line per record.
pub fn records(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let mut lines = vec![join(first.keys().map(String::as_str))];
    lines.extend(records.iter().map(|r| join(r.values().map(String::as_str))));
    lines.join("\n")
}

fn join<'a>(cells: impl Iterator<Item = &'a str>) -> String {
    cells.map(clean).collect::<Vec<_>>().join("\t")
}

// Tabs and newlines inside a cell would break the row structure.
fn clean(cell: &str) -> String {
    cell.replace(['\t', '\n', '\r'], " ")
}
