use std::collections::HashSet;

use morphotree::{Domain, MaxTree};
use serde::{Deserialize, Serialize};

/// Unordered contour of one node, as pixel indices.
pub type ContourSet = HashSet<u32>;

/// Closed polygon of pixel indices in tracing order.
pub type Polygon = Vec<u32>;

/// Ordered contours of one node.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracedContour {
    /// One polygon per connected component, traced around its outside
    pub outer: Vec<Polygon>,
    /// One polygon per hole
    pub inner: Vec<Polygon>,
}

impl TracedContour {
    /// All pixels visited by any outer or inner polygon.
    pub fn pixels(&self) -> ContourSet {
        self.outer
            .iter()
            .chain(self.inner.iter())
            .flat_map(|polygon| polygon.iter().copied())
            .collect()
    }

    pub fn num_polygons(&self) -> usize {
        self.outer.len() + self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outer.is_empty() && self.inner.is_empty()
    }
}

/// Expands a contour set into a binary image over `domain`.
pub fn contour_mask(contour: &ContourSet, domain: &Domain) -> Vec<bool> {
    let mut mask = vec![false; domain.num_points() as usize];
    for &p in contour {
        mask[p as usize] = true;
    }
    mask
}

/// Shape statistics of a tree and its contours.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    pub nnodes: usize,
    pub sum_children: usize,
    pub max_children: usize,
    pub sum_contour: usize,
    pub max_contour: usize,
}

impl TreeStats {
    pub fn compute<T: Copy>(tree: &MaxTree<T>, contours: &[ContourSet]) -> Self {
        let mut stats = TreeStats {
            nnodes: tree.num_nodes(),
            ..Default::default()
        };

        tree.traverse(|node| {
            let children = node.children().len();
            let contour = contours[node.id()].len();
            stats.sum_children += children;
            stats.sum_contour += contour;
            stats.max_children = stats.max_children.max(children);
            stats.max_contour = stats.max_contour.max(contour);
        });

        stats
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "nnodes= {}", self.nnodes)?;
        writeln!(f, "sum_children= {}", self.sum_children)?;
        writeln!(f, "max_children= {}", self.max_children)?;
        writeln!(f, "sum_contour= {}", self.sum_contour)?;
        write!(f, "max_contour= {}", self.max_contour)
    }
}
