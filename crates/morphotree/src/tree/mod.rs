pub mod builder;
pub mod filter;

use crate::{
    error::{Result, TreeError},
    geometry::Domain,
};

pub type NodeId = usize;

/// One node of a component tree.
///
/// Nodes live in the arena owned by [`MaxTree`] and refer to each other by id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<T> {
    pub(crate) id: NodeId,
    pub(crate) level: T,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
    pub(crate) cnps: Vec<u32>,
}

impl<T: Copy> Node<T> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn level(&self) -> T {
        self.level
    }

    /// Parent node, `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Canonical new pixels: the pixels that first appear at this node.
    pub fn cnps(&self) -> &[u32] {
        &self.cnps
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Component tree of an image, max-tree convention (deeper nodes have higher
/// levels).
///
/// Node `0` is the root and every child has a larger id than its parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaxTree<T> {
    domain: Domain,
    nodes: Vec<Node<T>>,
    /// Node owning each pixel as a canonical pixel.
    cmap: Vec<NodeId>,
}

impl<T: Copy> MaxTree<T> {
    pub(crate) fn from_parts(domain: Domain, nodes: Vec<Node<T>>, cmap: Vec<NodeId>) -> Self {
        Self { domain, nodes, cmap }
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> &Node<T> {
        &self.nodes[0]
    }

    pub fn node(&self, id: NodeId) -> &Node<T> {
        &self.nodes[id]
    }

    pub fn get(&self, id: NodeId) -> Result<&Node<T>> {
        self.nodes.get(id).ok_or(TreeError::InvalidNode(id))
    }

    pub fn nodes(&self) -> &[Node<T>] {
        &self.nodes
    }

    /// Smallest node whose region contains `pixel`.
    pub fn small_component(&self, pixel: u32) -> &Node<T> {
        &self.nodes[self.cmap[pixel as usize]]
    }

    /// Node ids with every child listed before its parent.
    pub fn post_order(&self) -> Vec<NodeId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];
        while let Some(id) = stack.pop() {
            order.push(id);
            stack.extend(self.nodes[id].children.iter().rev());
        }
        // Reversed pre-order puts every subtree before its root.
        order.reverse();
        order
    }

    /// Visits all nodes, children before parents.
    pub fn traverse<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        for id in self.post_order() {
            visit(&self.nodes[id]);
        }
    }

    /// Full region of a node: its canonical pixels and those of all its
    /// descendants.
    pub fn reconstruct(&self, id: NodeId) -> Vec<u32> {
        let mut pixels = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let node = &self.nodes[current];
            pixels.extend_from_slice(&node.cnps);
            stack.extend_from_slice(&node.children);
        }
        pixels
    }

    /// Binary image over the domain marking the region of `id`.
    pub fn reconstruct_mask(&self, id: NodeId) -> Vec<bool> {
        let mut mask = vec![false; self.domain.num_points() as usize];
        for p in self.reconstruct(id) {
            mask[p as usize] = true;
        }
        mask
    }

    /// Image where every pixel takes the level of the node owning it.
    pub fn reconstruct_image(&self) -> Vec<T> {
        self.cmap.iter().map(|&id| self.nodes[id].level).collect()
    }
}

impl<T: Copy + Ord> MaxTree<T> {
    /// Node ids in non-decreasing level order.
    pub fn level_order(&self) -> Vec<NodeId> {
        let mut order: Vec<NodeId> = (0..self.nodes.len()).collect();
        order.sort_by_key(|&id| self.nodes[id].level);
        order
    }

    /// Visits all nodes in non-decreasing level order.
    pub fn traverse_by_level<F>(&self, mut visit: F)
    where
        F: FnMut(&Node<T>),
    {
        for id in self.level_order() {
            visit(&self.nodes[id]);
        }
    }
}
