use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};

use crate::geometry::{Domain, Point, UNDEFINED_INDEX};

const OFFSETS_C4: [Point; 4] = [
    Point::new(0, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, 1),
];

const OFFSETS_C8: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(-1, 1),
    Point::new(0, 1),
    Point::new(1, 1),
];

#[derive(
    Debug, Clone, Copy,
    Serialize, Deserialize,
    Display, EnumString, EnumIter, VariantNames, IntoStaticStr,
    PartialEq, Eq, Hash
)]
pub enum Connectivity {
    /// Axis-aligned neighbors only
    #[serde(rename = "4")]
    #[strum(serialize = "4")]
    Four,
    /// Axis-aligned and diagonal neighbors
    #[serde(rename = "8")]
    #[strum(serialize = "8")]
    Eight,
}

impl Connectivity {
    pub fn offsets(&self) -> &'static [Point] {
        match self {
            Self::Four => &OFFSETS_C4,
            Self::Eight => &OFFSETS_C8,
        }
    }
}

/// How neighbors that fall outside the domain are reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// Off-domain neighbors are skipped.
    Closed,
    /// Off-domain neighbors are reported as [`UNDEFINED_INDEX`].
    Infinite,
}

/// Neighbor relation over the pixel indices of a domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    domain: Domain,
    connectivity: Connectivity,
    boundary: Boundary,
}

impl Adjacency {
    /// Adjacency used to build component trees.
    pub fn closed(domain: Domain, connectivity: Connectivity) -> Self {
        Self {
            domain,
            connectivity,
            boundary: Boundary::Closed,
        }
    }

    /// Adjacency used for contour queries, where the outside of the image is
    /// background.
    pub fn infinite(domain: Domain, connectivity: Connectivity) -> Self {
        Self {
            domain,
            connectivity,
            boundary: Boundary::Infinite,
        }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn connectivity(&self) -> Connectivity {
        self.connectivity
    }

    pub fn neighbours(&self, index: u32) -> Neighbours<'_> {
        Neighbours {
            adjacency: self,
            center: self.domain.index_to_point(index),
            offsets: self.connectivity.offsets().iter(),
        }
    }

    /// Returns true if `b` is a neighbor of `a`.
    pub fn contains_edge(&self, a: u32, b: u32) -> bool {
        self.neighbours(a).any(|q| q == b)
    }
}

/// Iterator over the neighbors of one pixel.
#[derive(Debug, Clone)]
pub struct Neighbours<'a> {
    adjacency: &'a Adjacency,
    center: Point,
    offsets: std::slice::Iter<'static, Point>,
}

impl Iterator for Neighbours<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        for &offset in self.offsets.by_ref() {
            let q = self.center + offset;
            if self.adjacency.domain.contains(q) {
                return Some(self.adjacency.domain.point_to_index(q));
            }
            if self.adjacency.boundary == Boundary::Infinite {
                return Some(UNDEFINED_INDEX);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.adjacency.boundary {
            Boundary::Infinite => (self.offsets.len(), Some(self.offsets.len())),
            Boundary::Closed => (0, Some(self.offsets.len())),
        }
    }
}
