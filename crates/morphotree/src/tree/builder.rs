use tracing::debug;

use crate::{
    adjacency::Adjacency,
    error::{Result, TreeError},
    geometry::UNDEFINED_INDEX,
    tree::{MaxTree, Node, NodeId},
};

/// Builds the max-tree of `f` using union-find over pixels sorted by level.
///
/// `adjacency` must be closed (it must not report off-domain neighbors); it
/// defines which pixels are connected.
pub fn build_max_tree<T>(f: &[T], adjacency: &Adjacency) -> Result<MaxTree<T>>
where
    T: Copy + Ord,
{
    let domain = *adjacency.domain();
    let n = domain.num_points() as usize;
    if n == 0 {
        return Err(TreeError::EmptyDomain);
    }
    if f.len() != n {
        return Err(TreeError::SizeMismatch {
            expected: n,
            actual: f.len(),
        });
    }

    // Stable sort: ties keep raster order.
    let mut sorted: Vec<u32> = (0..n as u32).collect();
    sorted.sort_by_key(|&p| f[p as usize]);

    let mut parent = vec![UNDEFINED_INDEX; n];
    let mut zpar = vec![UNDEFINED_INDEX; n];

    for &p in sorted.iter().rev() {
        parent[p as usize] = p;
        zpar[p as usize] = p;
        for q in adjacency.neighbours(p) {
            if q == UNDEFINED_INDEX || zpar[q as usize] == UNDEFINED_INDEX {
                continue;
            }
            let r = find_root(&mut zpar, q);
            if r != p {
                parent[r as usize] = p;
                zpar[r as usize] = p;
            }
        }
    }

    // Point every pixel at the canonical element of its flat zone.
    for &p in &sorted {
        let q = parent[p as usize];
        let qq = parent[q as usize];
        if f[qq as usize] == f[q as usize] {
            parent[p as usize] = qq;
        }
    }

    // Parents precede their children in `sorted`, so ids grow with depth.
    let mut nodes: Vec<Node<T>> = Vec::new();
    let mut cmap: Vec<NodeId> = vec![NodeId::MAX; n];
    for &p in &sorted {
        let q = parent[p as usize];
        if q == p || f[q as usize] != f[p as usize] {
            let id = nodes.len();
            let parent_node = (q != p).then(|| cmap[q as usize]);
            nodes.push(Node {
                id,
                level: f[p as usize],
                parent: parent_node,
                children: Vec::new(),
                cnps: vec![p],
            });
            if let Some(parent_id) = parent_node {
                nodes[parent_id].children.push(id);
            }
            cmap[p as usize] = id;
        } else {
            let id = cmap[q as usize];
            nodes[id].cnps.push(p);
            cmap[p as usize] = id;
        }
    }

    debug!(pixels = n, nodes = nodes.len(), "built max-tree");
    Ok(MaxTree::from_parts(domain, nodes, cmap))
}

fn find_root(zpar: &mut [u32], p: u32) -> u32 {
    let mut root = p;
    while zpar[root as usize] != root {
        root = zpar[root as usize];
    }

    let mut current = p;
    while zpar[current as usize] != root {
        let next = zpar[current as usize];
        zpar[current as usize] = root;
        current = next;
    }
    root
}
