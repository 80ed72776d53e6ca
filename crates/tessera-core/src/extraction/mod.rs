pub mod pdftotext;

use serde::{Deserialize, Serialize};

use crate::element::TextElement;
use crate::error::TesseraError;
use crate::geometry::BoundingBox;

/// Positioned text found on a single page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageElements {
    pub page_number: usize,
    pub width: f64,
    pub height: f64,
    pub elements: Vec<TextElement>,
}

impl PageElements {
    /// Elements whose box lies entirely inside `region`, in reading order.
    pub fn within(&self, region: &BoundingBox) -> Vec<TextElement> {
        self.elements
            .iter()
            .filter(|e| region.contains(&e.bbox))
            .cloned()
            .collect()
    }
}

/// Trait for backends producing positioned text from a PDF.
pub trait ElementSource: Send + Sync {
    /// Extract elements from PDF bytes, returning one PageElements per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageElements>, TesseraError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
