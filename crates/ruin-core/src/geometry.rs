use std::fmt;

use serde::{Deserialize, Serialize};

/// A position in tile space (within a map) or grid space (within the world).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point offset by `(dx, dy)`.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours, in N, E, S, W order.
    pub fn neighbours(self) -> [Point; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// An axis-aligned rectangle, `left..left+width` by `top..top+height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Leftmost column.
    pub left: i32,
    /// Topmost row.
    pub top: i32,
    /// Width in tiles.
    pub width: i32,
    /// Height in tiles.
    pub height: i32,
}

impl Rect {
    /// Create a rectangle.
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// One past the rightmost column.
    pub const fn right(&self) -> i32 {
        self.left + self.width
    }

    /// One past the bottom row.
    pub const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    /// Whether the point lies inside the rectangle.
    pub const fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x < self.right() && p.y >= self.top && p.y < self.bottom()
    }

    /// The rectangle shrunk by `n` tiles on every side.
    pub const fn inset(&self, n: i32) -> Self {
        Self {
            left: self.left + n,
            top: self.top + n,
            width: self.width - 2 * n,
            height: self.height - 2 * n,
        }
    }

    /// Whether the point lies on the rectangle's outermost ring.
    pub const fn on_border(&self, p: Point) -> bool {
        self.contains(p)
            && (p.x == self.left
                || p.x == self.right() - 1
                || p.y == self.top
                || p.y == self.bottom() - 1)
    }

    /// Every point in the rectangle, row by row.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        (self.top..self.bottom())
            .flat_map(move |y| (self.left..self.right()).map(move |x| Point::new(x, y)))
    }

    /// The center point (rounded towards the top-left).
    pub const fn center(&self) -> Point {
        Point::new(self.left + self.width / 2, self.top + self.height / 2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_contains_and_border() {
        let r = Rect::new(2, 3, 4, 5);
        assert!(r.contains(Point::new(2, 3)));
        assert!(r.contains(Point::new(5, 7)));
        assert!(!r.contains(Point::new(6, 7)));
        assert!(r.on_border(Point::new(2, 5)));
        assert!(!r.on_border(Point::new(3, 5)));
    }

    #[test]
    fn rect_points_row_major() {
        let r = Rect::new(0, 0, 2, 2);
        let pts: Vec<Point> = r.points().collect();
        assert_eq!(
            pts,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
    }

    #[test]
    fn inset_shrinks_both_sides() {
        let r = Rect::new(0, 0, 10, 6).inset(1);
        assert_eq!(r, Rect::new(1, 1, 8, 4));
        assert_eq!(r.center(), Point::new(5, 3));
    }

    proptest::proptest! {
        #[test]
        fn points_are_exactly_the_contained_ones(
            left in -20i32..20,
            top in -20i32..20,
            width in 0i32..12,
            height in 0i32..12,
        ) {
            let r = Rect::new(left, top, width, height);
            let pts: Vec<Point> = r.points().collect();
            proptest::prop_assert_eq!(pts.len(), (width * height) as usize);
            proptest::prop_assert!(pts.iter().all(|p| r.contains(*p)));
            proptest::prop_assert!(!r.contains(Point::new(r.right(), top)));
        }
    }
}
