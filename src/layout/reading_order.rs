//! Reading order for positioned fragments.
//!
//! Page-local coordinates grow downward, so reading order is ascending top
//! edge, then ascending left edge. The caller's index breaks remaining ties so
//! the order is total and repeatable.

use std::cmp::Ordering;

use crate::geometry::Rect;

/// Compare two rectangles in reading order (top, then left).
pub fn compare_reading_order(a: &Rect, b: &Rect) -> Ordering {
    a.top()
        .total_cmp(&b.top())
        .then_with(|| a.left().total_cmp(&b.left()))
}

/// Indices of `rects` sorted into reading order.
///
/// # Examples
///
/// ```
/// use region_locator::geometry::Rect;
/// use region_locator::layout::reading_order_indices;
///
/// let rects = vec![
///     Rect::new(50.0, 20.0, 10.0, 10.0),
///     Rect::new(0.0, 20.0, 10.0, 10.0),
///     Rect::new(90.0, 0.0, 10.0, 10.0),
/// ];
/// assert_eq!(reading_order_indices(&rects), vec![2, 1, 0]);
/// ```
pub fn reading_order_indices(rects: &[Rect]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..rects.len()).collect();
    order.sort_by(|&a, &b| compare_reading_order(&rects[a], &rects[b]).then(a.cmp(&b)));
    order
}
