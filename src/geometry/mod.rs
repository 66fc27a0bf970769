//! Geometric primitives for text-layer matching.
//!
//! All coordinates are page-local with the origin at the top-left corner and
//! y growing downward, the way a rendered text layer reports them. Any display
//! scale has already been resolved by the caller.

use serde::{Deserialize, Serialize};

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A rectangle in page space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// X coordinate of the left edge
    pub x: f32,
    /// Y coordinate of the top edge
    pub y: f32,
    /// Width of rectangle
    pub width: f32,
    /// Height of rectangle
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle from position and dimensions.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from its left, top, right and bottom edges.
    ///
    /// Inverted edges are normalized so width and height are never negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Rect;
    ///
    /// let rect = Rect::from_edges(10.0, 20.0, 110.0, 70.0);
    /// assert_eq!(rect.left(), 10.0);
    /// assert_eq!(rect.top(), 20.0);
    /// assert_eq!(rect.width, 100.0);
    /// assert_eq!(rect.height, 50.0);
    /// ```
    pub fn from_edges(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        let (x0, x1) = if left <= right { (left, right) } else { (right, left) };
        let (y0, y1) = if top <= bottom { (top, bottom) } else { (bottom, top) };
        Self {
            x: x0,
            y: y0,
            width: covering_extent(x0, x1),
            height: covering_extent(y0, y1),
        }
    }

    /// Smallest rectangle enclosing every rectangle in `rects`.
    ///
    /// Returns `None` for an empty iterator.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Rect;
    ///
    /// let rects = [Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(20.0, 5.0, 10.0, 10.0)];
    /// let bounds = Rect::enclosing(rects.iter()).unwrap();
    /// assert_eq!(bounds, Rect::new(0.0, 0.0, 30.0, 15.0));
    /// assert!(Rect::enclosing(std::iter::empty::<&Rect>()).is_none());
    /// ```
    pub fn enclosing<'a, I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = &'a Rect>,
    {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| Some(acc.map_or(*r, |b| b.union(r))))
    }

    /// Get the left edge x-coordinate.
    pub fn left(&self) -> f32 {
        self.x
    }

    /// Get the right edge x-coordinate.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Get the top edge y-coordinate.
    pub fn top(&self) -> f32 {
        self.y
    }

    /// Get the bottom edge y-coordinate.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Rect;
    ///
    /// let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    /// let center = rect.center();
    /// assert_eq!(center.x, 50.0);
    /// assert_eq!(center.y, 25.0);
    /// ```
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// Compute the union of this rectangle with another.
    ///
    /// # Examples
    ///
    /// ```
    /// use region_locator::geometry::Rect;
    ///
    /// let r1 = Rect::new(0.0, 0.0, 50.0, 50.0);
    /// let r2 = Rect::new(25.0, 25.0, 50.0, 50.0);
    /// let union = r1.union(&r2);
    ///
    /// assert_eq!(union.x, 0.0);
    /// assert_eq!(union.right(), 75.0);
    /// assert_eq!(union.bottom(), 75.0);
    /// ```
    pub fn union(&self, other: &Rect) -> Rect {
        Rect::from_edges(
            self.left().min(other.left()),
            self.top().min(other.top()),
            self.right().max(other.right()),
            self.bottom().max(other.bottom()),
        )
    }

    /// Compute the area of the rectangle.
    pub fn area(&self) -> f32 {
        self.width * self.height
    }
}

/// Extent from `start` to `end` such that `start + extent >= end` holds in
/// `f32`, so a rectangle rebuilt from edges still reaches its far edge.
fn covering_extent(start: f32, end: f32) -> f32 {
    let mut extent = end - start;
    for _ in 0..8 {
        if !extent.is_finite() || extent <= 0.0 || start + extent >= end {
            break;
        }
        extent = f32::from_bits(extent.to_bits() + 1);
    }
    extent
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_reaches_both_far_edges() {
        let a = Rect::new(33.594288, 0.0, 20.0, 10.0);
        let b = Rect::new(97.910835, 0.0, 20.0, 10.0);
        let union = a.union(&b);
        assert!(union.right() >= b.right());
        assert!(union.left() <= a.left());

        let bounds = Rect::enclosing([b, a].iter()).unwrap();
        assert!(bounds.right() >= b.right());
        assert!(bounds.bottom() >= a.bottom());
    }

    #[test]
    fn test_rect_from_edges_normalizes() {
        let r = Rect::from_edges(110.0, 70.0, 10.0, 20.0);
        assert_eq!(r.x, 10.0);
        assert_eq!(r.y, 20.0);
        assert_eq!(r.width, 100.0);
        assert_eq!(r.height, 50.0);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 70.0);
    }

    #[test]
    fn test_enclosing_single_rect_is_identity() {
        let r = Rect::new(3.0, 4.0, 5.0, 6.0);
        assert_eq!(Rect::enclosing([r].iter()), Some(r));
    }

    #[test]
    fn test_enclosing_many() {
        let rects = vec![
            Rect::new(10.0, 10.0, 5.0, 5.0),
            Rect::new(0.0, 30.0, 5.0, 5.0),
            Rect::new(40.0, 0.0, 5.0, 5.0),
        ];
        let bounds = Rect::enclosing(rects.iter()).unwrap();
        assert_eq!(bounds.left(), 0.0);
        assert_eq!(bounds.top(), 0.0);
        assert_eq!(bounds.right(), 45.0);
        assert_eq!(bounds.bottom(), 35.0);
    }

    #[test]
    fn test_rect_area() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(r.area(), 5000.0);
        assert_eq!(Rect::new(5.0, 5.0, 0.0, 10.0).area(), 0.0);
    }

    #[test]
    fn test_rect_serde_roundtrip_shape() {
        let json = serde_json::to_string(&Rect::new(1.0, 2.0, 3.0, 4.0)).unwrap();
        assert_eq!(json, r#"{"x":1.0,"y":2.0,"width":3.0,"height":4.0}"#);
    }
}
