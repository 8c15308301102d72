use morphotree::{Adjacency, MaxTree, NodeId, UNDEFINED_INDEX};
use tracing::debug;

use crate::{
    algorithms::check_image_size,
    error::Result,
    traits::ContourExtractor,
    types::ContourSet,
};

/// Per-pixel count of neighbors that are background or lie strictly below the
/// level currently being processed.
///
/// Owned by a single extraction run and mutated only by its bottom-up pass.
#[derive(Debug, Clone)]
pub struct NeighborCounts {
    counts: Vec<u8>,
}

impl NeighborCounts {
    pub fn new(num_points: usize) -> Self {
        Self {
            counts: vec![0; num_points],
        }
    }

    pub fn reset(&mut self) {
        self.counts.fill(0);
    }

    pub fn get(&self, p: u32) -> u8 {
        self.counts[p as usize]
    }

    fn increment(&mut self, p: u32) {
        let count = &mut self.counts[p as usize];
        *count = count.wrapping_add(1);
    }

    /// Decrements and returns the new count.
    ///
    /// Counts are modular: a lower diagonal neighbor from another branch may
    /// decrement `p` before `p`'s own node adds to it, and the later increment
    /// for that neighbor cancels it.
    fn decrement(&mut self, p: u32) -> u8 {
        let count = &mut self.counts[p as usize];
        *count = count.wrapping_sub(1);
        *count
    }
}

/// Computes every node's contour in one bottom-up pass over the tree.
///
/// A node starts from the union of its children's contours. Each canonical
/// pixel `p` then looks at its neighbors `q`: a background or lower neighbor
/// adds to `p`'s count; a higher neighbor loses one, and leaves the contour
/// once nothing around it is lower than the current level. Every pixel is
/// touched once as a canonical pixel and once per neighbor, so the whole tree
/// costs `O(pixels * neighbors)` plus the set unions.
#[derive(Debug, Clone, Copy, Default)]
pub struct IncrementalContourExtractor;

impl IncrementalContourExtractor {
    /// Runs the extraction with an explicit node order.
    ///
    /// `order` must list every child before its parent. `cnps_of` supplies the
    /// canonical pixels of a node, which lets callers change the iteration order.
    pub fn extract_in_order<T, F, C>(
        &self,
        f: &[T],
        adjacency: &Adjacency,
        tree: &MaxTree<T>,
        order: &[NodeId],
        mut cnps_of: F,
    ) -> Vec<ContourSet>
    where
        T: Copy + Ord,
        F: FnMut(NodeId) -> C,
        C: AsRef<[u32]>,
    {
        let mut counts = NeighborCounts::new(f.len());
        let mut contours: Vec<ContourSet> = vec![ContourSet::default(); tree.num_nodes()];

        for &id in order {
            let node = tree.node(id);
            let mut contour = ContourSet::default();
            for &child in node.children() {
                contour.extend(contours[child].iter().copied());
            }

            let cnps = cnps_of(id);
            let cnps = cnps.as_ref();
            for &p in cnps {
                let fp = f[p as usize];
                for q in adjacency.neighbours(p) {
                    if q == UNDEFINED_INDEX || fp > f[q as usize] {
                        counts.increment(p);
                    } else if fp < f[q as usize] && counts.decrement(q) == 0 {
                        contour.remove(&q);
                    }
                }
            }

            for &p in cnps {
                if counts.get(p) > 0 {
                    contour.insert(p);
                }
            }

            contours[id] = contour;
        }

        contours
    }
}

impl<T: Copy + Ord + Send + Sync> ContourExtractor<T> for IncrementalContourExtractor {
    fn name(&self) -> &'static str {
        "incremental"
    }

    fn extract_contours(
        &self,
        f: &[T],
        adjacency: &Adjacency,
        tree: &MaxTree<T>,
    ) -> Result<Vec<ContourSet>> {
        check_image_size(f, adjacency)?;
        debug!(nodes = tree.num_nodes(), pixels = f.len(), "incremental contour extraction");

        let order = tree.post_order();
        Ok(self.extract_in_order(f, adjacency, tree, &order, |id| tree.node(id).cnps()))
    }
}
