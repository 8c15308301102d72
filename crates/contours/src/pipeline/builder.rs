use morphotree::{Adjacency, AreaComputer, AttributeComputer, Connectivity, Domain, build_max_tree};
use tracing::debug;

use crate::{
    algorithms::{BruteForceMode, check_image_size},
    error::Result,
    pipeline::Analysis,
};

/// Builder for an [`Analysis`] with a fluent API
#[derive(Debug, Clone)]
pub struct AnalysisBuilder {
    tree_connectivity: Connectivity,
    contour_connectivity: Connectivity,
    area_threshold: Option<u32>,
    mode: BruteForceMode,
}

impl AnalysisBuilder {
    /// Create a new builder: 4-connected tree and contours, no filtering
    pub fn new() -> Self {
        Self {
            tree_connectivity: Connectivity::Four,
            contour_connectivity: Connectivity::Four,
            area_threshold: None,
            mode: BruteForceMode::Level,
        }
    }

    /// Adjacency used to build the max-tree
    pub fn tree_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.tree_connectivity = connectivity;
        self
    }

    /// Adjacency used to decide which pixels touch the outside of a node
    pub fn contour_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.contour_connectivity = connectivity;
        self
    }

    /// Keep only nodes whose area is strictly greater than `area`
    pub fn area_threshold(mut self, area: u32) -> Self {
        self.area_threshold = Some(area);
        self
    }

    /// Reference definition used by [`Analysis::verify`]
    pub fn mode(mut self, mode: BruteForceMode) -> Self {
        self.mode = mode;
        self
    }

    /// Build the tree, apply the area filter if any, and bundle the result
    pub fn build<T>(self, domain: Domain, image: Vec<T>) -> Result<Analysis<T>>
    where
        T: Copy + Ord + Send + Sync,
    {
        let tree_adjacency = Adjacency::closed(domain, self.tree_connectivity);
        check_image_size(&image, &tree_adjacency)?;
        let mut tree = build_max_tree(&image, &tree_adjacency)?;
        let mut image = image;

        if let Some(threshold) = self.area_threshold {
            let area = AreaComputer.compute(&tree);
            let before = tree.num_nodes();
            tree = tree.direct_filter(|node| area[node.id()] > threshold);
            image = tree.reconstruct_image();
            debug!(threshold, before, after = tree.num_nodes(), "area filter applied");
        }

        Ok(Analysis::new(
            image,
            tree,
            Adjacency::infinite(domain, self.contour_connectivity),
            self.mode,
        ))
    }
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::new()
    }
}
