pub mod builder;

use morphotree::{Adjacency, AttributeComputer, BoundingBoxComputer, Domain, MaxTree, NodeId, Point};

use crate::{
    algorithms::{BruteForceMode, ContourTracer, IncrementalContourExtractor},
    error::{ContourError, Result},
    traits::ContourExtractor,
    types::{ContourSet, TracedContour, TreeStats},
    verify::{self, Algorithm, Extraction, Timing, VerificationReport},
};

/// A built max-tree together with the image and adjacency its contours are
/// computed against.
///
/// Built with [`builder::AnalysisBuilder`]. When an area threshold is set,
/// `image` is the filtered image, so every contour query sees the same levels
/// as the filtered tree.
#[derive(Debug, Clone)]
pub struct Analysis<T> {
    image: Vec<T>,
    tree: MaxTree<T>,
    contour_adjacency: Adjacency,
    mode: BruteForceMode,
}

impl<T: Copy + Ord + Send + Sync> Analysis<T> {
    pub(crate) fn new(image: Vec<T>, tree: MaxTree<T>, contour_adjacency: Adjacency, mode: BruteForceMode) -> Self {
        Self {
            image,
            tree,
            contour_adjacency,
            mode,
        }
    }

    pub fn domain(&self) -> &Domain {
        self.tree.domain()
    }

    pub fn image(&self) -> &[T] {
        &self.image
    }

    pub fn tree(&self) -> &MaxTree<T> {
        &self.tree
    }

    pub fn contour_adjacency(&self) -> &Adjacency {
        &self.contour_adjacency
    }

    /// Smallest node containing the pixel at `point`.
    pub fn node_at(&self, point: Point) -> Result<NodeId> {
        if !self.domain().contains(point) {
            return Err(ContourError::PointOutsideDomain(point));
        }
        Ok(self.tree.small_component(self.domain().point_to_index(point)).id())
    }

    /// Incremental contour set of every node.
    pub fn contours(&self) -> Result<Vec<ContourSet>> {
        IncrementalContourExtractor.extract_contours(&self.image, &self.contour_adjacency, &self.tree)
    }

    pub fn traced_contours(&self) -> Result<Vec<TracedContour>> {
        Ok(ContourTracer::new(*self.domain(), &self.image)?.trace_tree(&self.tree))
    }

    /// Traced contour of one node's own region.
    pub fn trace_node(&self, id: NodeId) -> Result<TracedContour> {
        self.tree.get(id)?;
        let bboxes = BoundingBoxComputer.compute(&self.tree);
        let mut tracer = ContourTracer::new(*self.domain(), &self.image)?;
        Ok(tracer.trace_node(&self.tree, &bboxes[id], id))
    }

    pub fn stats(&self) -> Result<TreeStats> {
        Ok(TreeStats::compute(&self.tree, &self.contours()?))
    }

    pub fn verify(&self) -> Result<VerificationReport> {
        verify::verify(&self.image, &self.contour_adjacency, &self.tree, self.mode)
    }

    pub fn run(&self, algorithm: Algorithm) -> Result<(Extraction, Timing)> {
        verify::run_algorithm(algorithm, &self.image, &self.contour_adjacency, &self.tree)
    }

    pub fn benchmark(&self) -> Result<Vec<Timing>> {
        verify::benchmark(&self.image, &self.contour_adjacency, &self.tree)
    }

    /// Get information about the analysis configuration
    pub fn info(&self) -> String {
        format!(
            "Analysis: {} nodes over {}x{} pixels, {}-connected contours",
            self.tree.num_nodes(),
            self.domain().width(),
            self.domain().height(),
            self.contour_adjacency.connectivity(),
        )
    }
}
