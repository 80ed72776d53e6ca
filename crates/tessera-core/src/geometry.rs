use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in page coordinates.
///
/// `(x0, y0)` is the bottom-left corner and `(x1, y1)` the top-right one.
/// The vertical axis grows upward, so content higher on the page has a
/// larger `y`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

impl BoundingBox {
    /// Build a box from its horizontal extent followed by its vertical extent.
    pub fn new(x0: f64, x1: f64, y0: f64, y1: f64) -> Self {
        BoundingBox { x0, x1, y0, y1 }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// Whether `other` lies entirely inside this box (edges included).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        other.x0 >= self.x0 && other.x1 <= self.x1 && other.y0 >= self.y0 && other.y1 <= self.y1
    }
}
