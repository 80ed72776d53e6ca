use std::collections::HashMap;

use indexmap::IndexMap;

use crate::error::TesseraError;

/// A named, contiguous run of elements in a document.
///
/// Bounds are inclusive indices into the document's element slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    /// `name` suffixed with the number of earlier sections sharing it.
    pub unique_name: String,
    pub start: usize,
    pub end: usize,
}

impl Section {
    /// The section's elements, or `None` if `document` is too short to hold it.
    pub fn elements<'a, E>(&self, document: &'a [E]) -> Option<&'a [E]> {
        document.get(self.start..=self.end)
    }

    pub fn contains(&self, index: usize) -> bool {
        (self.start..=self.end).contains(&index)
    }
}

/// Registry of the sections created over one document.
#[derive(Debug, Clone, Default)]
pub struct Sectioning {
    document_len: usize,
    name_counts: HashMap<String, usize>,
    sections: IndexMap<String, Section>,
}

impl Sectioning {
    pub fn new(document_len: usize) -> Self {
        Sectioning {
            document_len,
            ..Default::default()
        }
    }

    /// Label elements `start..=end` as `name`.
    ///
    /// The section's unique name is `{name}_{n}`, `n` counting from zero per
    /// name.
    pub fn create_section(
        &mut self,
        name: &str,
        start: usize,
        end: usize,
    ) -> Result<&Section, TesseraError> {
        if start > end {
            return Err(TesseraError::InvalidSection(format!(
                "'{name}' starts at element {start} after its end {end}"
            )));
        }
        if end >= self.document_len {
            return Err(TesseraError::InvalidSection(format!(
                "'{name}' ends at element {end} but the document has {} elements",
                self.document_len
            )));
        }

        let count = self.name_counts.entry(name.to_string()).or_insert(0);
        let unique_name = format!("{name}_{count}");
        *count += 1;

        let section = Section {
            name: name.to_string(),
            unique_name: unique_name.clone(),
            start,
            end,
        };
        let (index, _) = self.sections.insert_full(unique_name, section);
        Ok(&self.sections[index])
    }

    /// Sections in creation order.
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.values()
    }

    pub fn get(&self, unique_name: &str) -> Option<&Section> {
        self.sections.get(unique_name)
    }

    /// Sections containing the element at `index`.
    pub fn sections_containing(&self, index: usize) -> impl Iterator<Item = &Section> {
        self.sections().filter(move |s| s.contains(index))
    }
}
