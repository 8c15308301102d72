use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

/// Pixel index reported for positions outside the domain.
pub const UNDEFINED_INDEX: u32 = u32::MAX;

/// Integer pixel coordinate. `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl From<[i32; 2]> for Point {
    fn from([x, y]: [i32; 2]) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned rectangle of pixel positions with inclusive corners.
///
/// Indices are assigned in row-major order relative to the top-left corner,
/// so a domain that does not start at the origin (such as a padded label map)
/// still indexes from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Domain {
    left: i32,
    top: i32,
    right: i32,
    bottom: i32,
}

impl Domain {
    /// Domain with its top-left corner at the origin.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            left: 0,
            top: 0,
            right: width as i32 - 1,
            bottom: height as i32 - 1,
        }
    }

    pub fn from_corners(top_left: Point, bottom_right: Point) -> Self {
        Self {
            left: top_left.x,
            top: top_left.y,
            right: bottom_right.x,
            bottom: bottom_right.y,
        }
    }

    /// An empty box that absorbs any point passed to [`Domain::include`].
    pub fn empty() -> Self {
        Self {
            left: i32::MAX,
            top: i32::MAX,
            right: i32::MIN,
            bottom: i32::MIN,
        }
    }

    pub fn left(&self) -> i32 {
        self.left
    }

    pub fn top(&self) -> i32 {
        self.top
    }

    pub fn right(&self) -> i32 {
        self.right
    }

    pub fn bottom(&self) -> i32 {
        self.bottom
    }

    pub fn is_empty(&self) -> bool {
        self.left > self.right || self.top > self.bottom
    }

    pub fn width(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.right - self.left + 1) as u32
        }
    }

    pub fn height(&self) -> u32 {
        if self.is_empty() {
            0
        } else {
            (self.bottom - self.top + 1) as u32
        }
    }

    pub fn num_points(&self) -> u32 {
        self.width() * self.height()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.left <= p.x && p.x <= self.right && self.top <= p.y && p.y <= self.bottom
    }

    /// Row-major index of `p`. The caller must ensure `self.contains(p)`.
    pub fn point_to_index(&self, p: Point) -> u32 {
        (p.y - self.top) as u32 * self.width() + (p.x - self.left) as u32
    }

    pub fn index_to_point(&self, index: u32) -> Point {
        let width = self.width();
        Point::new(
            (index % width) as i32 + self.left,
            (index / width) as i32 + self.top,
        )
    }

    /// Grows the box by `n` pixels on every side.
    pub fn padded(&self, n: i32) -> Self {
        Self {
            left: self.left - n,
            top: self.top - n,
            right: self.right + n,
            bottom: self.bottom + n,
        }
    }

    /// Extends the box so that it contains `p`.
    pub fn include(&mut self, p: Point) {
        self.left = self.left.min(p.x);
        self.top = self.top.min(p.y);
        self.right = self.right.max(p.x);
        self.bottom = self.bottom.max(p.y);
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Domain) -> Domain {
        Domain {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    /// Largest box contained in both `self` and `other`; empty when they do
    /// not overlap.
    pub fn intersection(&self, other: &Domain) -> Domain {
        Domain {
            left: self.left.max(other.left),
            top: self.top.max(other.top),
            right: self.right.min(other.right),
            bottom: self.bottom.min(other.bottom),
        }
    }

    /// Iterates over all points in raster order.
    pub fn points(&self) -> impl Iterator<Item = Point> + use<> {
        let (left, right) = (self.left, self.right);
        (self.top..=self.bottom).flat_map(move |y| (left..=right).map(move |x| Point::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_round_trip_with_offset_domain() {
        let domain = Domain::from_corners(Point::new(-1, -1), Point::new(3, 2));
        assert_eq!(domain.width(), 5);
        assert_eq!(domain.height(), 4);
        assert_eq!(domain.point_to_index(Point::new(-1, -1)), 0);
        assert_eq!(domain.point_to_index(Point::new(0, 0)), 6);
        assert_eq!(domain.index_to_point(6), Point::new(0, 0));
        assert_eq!(domain.index_to_point(19), Point::new(3, 2));
    }

    #[test]
    fn containment_is_inclusive() {
        let domain = Domain::from_size(7, 5);
        assert!(domain.contains(Point::new(0, 0)));
        assert!(domain.contains(Point::new(6, 4)));
        assert!(!domain.contains(Point::new(7, 4)));
        assert!(!domain.contains(Point::new(-1, 0)));
        assert_eq!(domain.num_points(), 35);
    }

    #[test]
    fn empty_box_grows_to_include_points() {
        let mut bbox = Domain::empty();
        assert!(bbox.is_empty());
        assert_eq!(bbox.num_points(), 0);

        bbox.include(Point::new(3, 4));
        bbox.include(Point::new(1, 6));
        assert_eq!(bbox, Domain::from_corners(Point::new(1, 4), Point::new(3, 6)));

        let other = Domain::from_corners(Point::new(5, 0), Point::new(5, 0));
        assert_eq!(
            bbox.union(&other),
            Domain::from_corners(Point::new(1, 0), Point::new(5, 6))
        );
    }

    #[test]
    fn intersection_clips_to_the_overlap() {
        let domain = Domain::from_size(5, 4);
        let wide = Domain::from_corners(Point::new(-3, 2), Point::new(9, 8));
        assert_eq!(
            wide.intersection(&domain),
            Domain::from_corners(Point::new(0, 2), Point::new(4, 3))
        );

        let outside = Domain::from_corners(Point::new(6, 0), Point::new(8, 1));
        assert!(outside.intersection(&domain).is_empty());
        assert!(Domain::empty().intersection(&domain).is_empty());
        assert_eq!(domain.intersection(&domain), domain);
    }

    #[test]
    fn points_follow_raster_order() {
        let domain = Domain::from_size(2, 2);
        let points: Vec<Point> = domain.points().collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(0, 1),
                Point::new(1, 1)
            ]
        );
    }
}
