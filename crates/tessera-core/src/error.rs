use std::fmt;

/// Axis along which elements are grouped into bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Vertical intervals, grouped into rows.
    Row,
    /// Horizontal intervals, grouped into columns.
    Column,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Row => write!(f, "row"),
            Axis::Column => write!(f, "column"),
        }
    }
}

/// Why a set of elements could not be arranged into the requested table.
///
/// Element positions refer to indices into the slice passed to the
/// extraction entry point.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Conflict {
    #[error("element {element} spans more than one {axis}")]
    Straddle { element: usize, axis: Axis },

    #[error("elements {first} and {second} both occupy cell ({row}, {column})")]
    DuplicateCell {
        row: usize,
        column: usize,
        first: usize,
        second: usize,
    },

    #[error("cell ({row}, {column}) is empty in a simple table")]
    EmptyCell { row: usize, column: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum TesseraError {
    #[error("table extraction failed: {0}")]
    TableExtraction(#[from] Conflict),

    #[error("invalid table shape: row {row} has {found} cells, expected {expected}")]
    InvalidTableShape {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid table header: {0}")]
    InvalidHeader(String),

    #[error("invalid section: {0}")]
    InvalidSection(String),

    #[error("element extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("malformed pdftotext output: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TesseraError {
    /// The elements do not form the assumed table; refine the selection.
    pub fn is_extraction_conflict(&self) -> bool {
        matches!(self, TesseraError::TableExtraction(_))
    }

    pub fn is_invalid_shape(&self) -> bool {
        matches!(self, TesseraError::InvalidTableShape { .. })
    }

    pub fn is_invalid_header(&self) -> bool {
        matches!(self, TesseraError::InvalidHeader(_))
    }
}
