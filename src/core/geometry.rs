use serde::{Deserialize, Serialize};

/// Tolerance for coordinates that drift slightly outside the unit square.
const NORMALIZED_EPSILON: f32 = 0.01;

/// Axis-aligned rectangle in normalized page coordinates.
///
/// The origin is the bottom-left corner of the page: `y1` is the top edge and
/// larger Y values are higher on the page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl BBox {
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn from_array(coords: [f32; 4]) -> Self {
        Self::new(coords[0], coords[1], coords[2], coords[3])
    }

    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).max(0.0)
    }

    pub fn center(&self) -> (f32, f32) {
        ((self.x0 + self.x1) * 0.5, (self.y0 + self.y1) * 0.5)
    }

    pub fn center_y(&self) -> f32 {
        (self.y0 + self.y1) * 0.5
    }

    pub fn union(&self, other: &Self) -> Self {
        Self {
            x0: self.x0.min(other.x0),
            y0: self.y0.min(other.y0),
            x1: self.x1.max(other.x1),
            y1: self.y1.max(other.y1),
        }
    }

    /// Minimal rectangle covering every box, or `None` for an empty input.
    pub fn union_all<'a, I>(boxes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a BBox>,
    {
        boxes
            .into_iter()
            .fold(None, |acc: Option<BBox>, b| match acc {
                Some(u) => Some(u.union(b)),
                None => Some(*b),
            })
    }

    pub fn center_distance(&self, other: &Self) -> f32 {
        let (cx1, cy1) = self.center();
        let (cx2, cy2) = other.center();
        ((cx1 - cx2).powi(2) + (cy1 - cy2).powi(2)).sqrt()
    }

    /// Length of the shared horizontal span of the two boxes.
    pub fn horizontal_overlap(&self, other: &Self) -> f32 {
        (self.x1.min(other.x1) - self.x0.max(other.x0)).max(0.0)
    }

    pub fn vertical_center_delta(&self, other: &Self) -> f32 {
        (self.center_y() - other.center_y()).abs()
    }

    pub fn contains_point(&self, x: f32, y: f32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Finite, non-inverted and inside the unit square (with a small tolerance).
    pub fn is_normalized(&self) -> bool {
        let coords = [self.x0, self.y0, self.x1, self.y1];
        coords.iter().all(|c| c.is_finite())
            && coords
                .iter()
                .all(|c| *c >= -NORMALIZED_EPSILON && *c <= 1.0 + NORMALIZED_EPSILON)
            && self.x1 >= self.x0
            && self.y1 >= self.y0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn unions_many_boxes() {
        let boxes = [
            BBox::new(0.1, 0.5, 0.3, 0.55),
            BBox::new(0.6, 0.48, 0.7, 0.52),
            BBox::new(0.2, 0.3, 0.25, 0.35),
        ];
        let union = BBox::union_all(boxes.iter()).expect("non-empty");
        assert_eq!(union, BBox::new(0.1, 0.3, 0.7, 0.55));
        assert!(BBox::union_all(std::iter::empty()).is_none());
    }

    #[test]
    fn measures_horizontal_overlap() {
        let a = BBox::new(0.1, 0.0, 0.5, 0.1);
        let b = BBox::new(0.4, 0.2, 0.9, 0.3);
        assert!((a.horizontal_overlap(&b) - 0.1).abs() < 1e-6);

        let c = BBox::new(0.6, 0.0, 0.7, 0.1);
        assert_eq!(a.horizontal_overlap(&c), 0.0);
    }

    #[test]
    fn rejects_malformed_boxes() {
        assert!(BBox::new(0.1, 0.1, 0.2, 0.2).is_normalized());
        assert!(!BBox::new(0.3, 0.1, 0.2, 0.2).is_normalized());
        assert!(!BBox::new(0.1, f32::NAN, 0.2, 0.2).is_normalized());
        assert!(!BBox::new(0.1, 0.1, 1.5, 0.2).is_normalized());
    }
}
