use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// Anything positioned on a page that carries text.
///
/// The table engine only ever asks an element for these two things.
pub trait Element {
    fn bounding_box(&self) -> BoundingBox;
    fn text(&self) -> &str;
}

impl<T: Element + ?Sized> Element for &T {
    fn bounding_box(&self) -> BoundingBox {
        (**self).bounding_box()
    }

    fn text(&self) -> &str {
        (**self).text()
    }
}

/// A plain owned element, as read from JSON or produced by an element source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextElement {
    #[serde(default = "default_page")]
    pub page_number: usize,
    pub bbox: BoundingBox,
    pub text: String,
}

fn default_page() -> usize {
    1
}

impl TextElement {
    pub fn new(bbox: BoundingBox, text: impl Into<String>) -> Self {
        TextElement {
            page_number: 1,
            bbox,
            text: text.into(),
        }
    }
}

impl Element for TextElement {
    fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    fn text(&self) -> &str {
        &self.text
    }
}
