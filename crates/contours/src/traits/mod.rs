use morphotree::{Adjacency, MaxTree};

use crate::{error::Result, types::ContourSet};

/// Trait for algorithms that compute the contour set of every node of a tree
pub trait ContourExtractor<T>: Send + Sync {
    /// Short name used in reports
    fn name(&self) -> &'static str;

    /// Compute one contour set per node id.
    ///
    /// `f` is the image the tree was built from and `adjacency` the (usually
    /// infinite) relation that decides which pixels touch the background.
    fn extract_contours(
        &self,
        f: &[T],
        adjacency: &Adjacency,
        tree: &MaxTree<T>,
    ) -> Result<Vec<ContourSet>>;
}
