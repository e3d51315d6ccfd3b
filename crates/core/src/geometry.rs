use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in image pixel coordinates.
///
/// `(x0, y0)` is the top-left corner and `(x1, y1)` the bottom-right, so
/// `x0 <= x1` and `y0 <= y1` for every box built through [`BoundingBox::new`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BoundingBox {
    /// Build a box from two corners, ordering each axis.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self {
            x0: x0.min(x1),
            y0: y0.min(y1),
            x1: x0.max(x1),
            y1: y0.max(y1),
        }
    }

    /// Build a box from its top-left corner and size (Tesseract TSV layout).
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Smallest box enclosing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Whether `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &BoundingBox) -> bool {
        self.x0 <= other.x0 && self.y0 <= other.y0 && self.x1 >= other.x1 && self.y1 >= other.y1
    }

    /// Envelope of every box in `boxes`, or `None` when there are none.
    pub fn envelope<'a, I>(boxes: I) -> Option<BoundingBox>
    where
        I: IntoIterator<Item = &'a BoundingBox>,
    {
        let mut iter = boxes.into_iter();
        let first = *iter.next()?;
        Some(iter.fold(first, |acc, b| acc.union(b)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_orders_corners() {
        let b = BoundingBox::new(10.0, 20.0, 2.0, 4.0);
        assert_eq!(b, BoundingBox { x0: 2.0, y0: 4.0, x1: 10.0, y1: 20.0 });
    }

    #[test]
    fn origin_size_layout() {
        let b = BoundingBox::from_origin_size(5.0, 7.0, 30.0, 12.0);
        assert_eq!(b, BoundingBox::new(5.0, 7.0, 35.0, 19.0));
        assert_eq!(b.width(), 30.0);
        assert_eq!(b.height(), 12.0);
    }

    #[test]
    fn envelope_covers_all_boxes() {
        let boxes = [
            BoundingBox::new(10.0, 100.0, 40.0, 112.0),
            BoundingBox::new(50.0, 98.0, 60.0, 110.0),
            BoundingBox::new(200.0, 101.0, 240.0, 115.0),
        ];
        let env = BoundingBox::envelope(&boxes).unwrap();
        assert_eq!(env, BoundingBox::new(10.0, 98.0, 240.0, 115.0));
        assert!(boxes.iter().all(|b| env.contains(b)));
    }

    #[test]
    fn envelope_of_nothing_is_none() {
        let none: [BoundingBox; 0] = [];
        assert!(BoundingBox::envelope(&none).is_none());
    }
}
