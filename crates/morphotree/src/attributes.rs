use crate::{geometry::Domain, tree::MaxTree};

/// Computes one attribute value per node of a tree.
pub trait AttributeComputer<T> {
    type Value;

    /// Returns a vector indexed by node id.
    fn compute(&self, tree: &MaxTree<T>) -> Vec<Self::Value>;
}

/// Number of pixels in each node's region.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaComputer;

impl<T: Copy> AttributeComputer<T> for AreaComputer {
    type Value = u32;

    fn compute(&self, tree: &MaxTree<T>) -> Vec<u32> {
        let mut area = vec![0u32; tree.num_nodes()];
        tree.traverse(|node| {
            area[node.id()] += node.cnps().len() as u32;
            if let Some(parent) = node.parent() {
                area[parent] += area[node.id()];
            }
        });
        area
    }
}

/// Bounding box of each node's region.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBoxComputer;

impl<T: Copy> AttributeComputer<T> for BoundingBoxComputer {
    type Value = Domain;

    fn compute(&self, tree: &MaxTree<T>) -> Vec<Domain> {
        let domain = *tree.domain();
        let mut boxes = vec![Domain::empty(); tree.num_nodes()];
        tree.traverse(|node| {
            let bbox = &mut boxes[node.id()];
            for &p in node.cnps() {
                bbox.include(domain.index_to_point(p));
            }
            if let Some(parent) = node.parent() {
                boxes[parent] = boxes[parent].union(&boxes[node.id()]);
            }
        });
        boxes
    }
}
