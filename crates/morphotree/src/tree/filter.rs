use crate::tree::{MaxTree, Node, NodeId};

impl<T: Copy> MaxTree<T> {
    /// Direct filter: keeps the nodes for which `keep` returns true.
    ///
    /// A removed node hands its canonical pixels to its nearest kept ancestor,
    /// and its kept children are re-attached to that ancestor. The root is
    /// always kept. Node ids are reassigned, still growing with depth.
    pub fn direct_filter<F>(&self, mut keep: F) -> MaxTree<T>
    where
        F: FnMut(&Node<T>) -> bool,
    {
        let mut nodes: Vec<Node<T>> = Vec::new();
        let mut new_id: Vec<NodeId> = vec![NodeId::MAX; self.num_nodes()];

        for node in self.nodes() {
            match node.parent {
                Some(parent) if !keep(node) => {
                    let target = new_id[parent];
                    nodes[target].cnps.extend_from_slice(&node.cnps);
                    new_id[node.id] = target;
                }
                parent => {
                    let id = nodes.len();
                    let parent = parent.map(|p| new_id[p]);
                    nodes.push(Node {
                        id,
                        level: node.level,
                        parent,
                        children: Vec::new(),
                        cnps: node.cnps.clone(),
                    });
                    if let Some(parent) = parent {
                        nodes[parent].children.push(id);
                    }
                    new_id[node.id] = id;
                }
            }
        }

        let mut cmap = vec![0; self.domain().num_points() as usize];
        for node in &nodes {
            for &p in &node.cnps {
                cmap[p as usize] = node.id;
            }
        }

        MaxTree::from_parts(*self.domain(), nodes, cmap)
    }
}
