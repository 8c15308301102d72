use morphotree::{Adjacency, MaxTree, NodeId, UNDEFINED_INDEX};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, VariantNames};
use tracing::debug;

use crate::{
    algorithms::check_image_size,
    error::Result,
    traits::ContourExtractor,
    types::ContourSet,
};

/// Which pixels count as "outside" a node when testing a neighbor.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    VariantNames,
    IntoStaticStr,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BruteForceMode {
    /// Background or a neighbor strictly below the node level.
    #[default]
    Level,
    /// Background or a neighbor outside the node's reconstructed region.
    Region,
}

/// Recomputes every node's contour from its reconstructed region.
///
/// Costs the sum of all region areas, so it only serves as a reference for the
/// incremental algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceContourExtractor {
    pub mode: BruteForceMode,
}

impl BruteForceContourExtractor {
    pub fn new(mode: BruteForceMode) -> Self {
        Self { mode }
    }

    /// Contour of a single node.
    pub fn node_contour<T>(
        &self,
        f: &[T],
        adjacency: &Adjacency,
        tree: &MaxTree<T>,
        id: NodeId,
    ) -> ContourSet
    where
        T: Copy + Ord,
    {
        let level = tree.node(id).level();
        let region = tree.reconstruct(id);

        match self.mode {
            BruteForceMode::Level => region
                .into_iter()
                .filter(|&p| {
                    adjacency
                        .neighbours(p)
                        .any(|q| q == UNDEFINED_INDEX || f[q as usize] < level)
                })
                .collect(),
            BruteForceMode::Region => {
                let mut inside = vec![false; f.len()];
                for &p in &region {
                    inside[p as usize] = true;
                }
                region
                    .into_iter()
                    .filter(|&p| {
                        adjacency
                            .neighbours(p)
                            .any(|q| q == UNDEFINED_INDEX || !inside[q as usize])
                    })
                    .collect()
            }
        }
    }
}

impl<T: Copy + Ord + Send + Sync> ContourExtractor<T> for BruteForceContourExtractor {
    fn name(&self) -> &'static str {
        "brute_force"
    }

    fn extract_contours(
        &self,
        f: &[T],
        adjacency: &Adjacency,
        tree: &MaxTree<T>,
    ) -> Result<Vec<ContourSet>> {
        check_image_size(f, adjacency)?;
        debug!(nodes = tree.num_nodes(), mode = %self.mode, "brute force contour extraction");

        let mut contours = vec![ContourSet::default(); tree.num_nodes()];
        tree.traverse(|node| {
            contours[node.id()] = self.node_contour(f, adjacency, tree, node.id());
        });
        Ok(contours)
    }
}

#[cfg(test)]
mod tests {
    use morphotree::{Connectivity, Domain, build_max_tree};
    use proptest::prelude::*;

    use super::*;
    use crate::io::disk_image;

    #[test]
    fn mode_parses_from_cli_strings() {
        assert_eq!("level".parse::<BruteForceMode>().unwrap(), BruteForceMode::Level);
        assert_eq!("region".parse::<BruteForceMode>().unwrap(), BruteForceMode::Region);
        assert_eq!(BruteForceMode::Region.to_string(), "region");
    }

    #[test]
    fn root_contour_is_the_image_border() {
        let (domain, f) = disk_image();
        let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Four)).unwrap();
        let adj = Adjacency::infinite(domain, Connectivity::Four);

        let contour = BruteForceContourExtractor::default().node_contour(&f, &adj, &tree, 0);
        assert_eq!(contour.len(), 24);
        assert!(contour.iter().all(|&p| {
            let pt = domain.index_to_point(p);
            pt.x == 0 || pt.y == 0 || pt.x == 6 || pt.y == 6
        }));
    }

    #[test]
    fn modes_agree_across_diagonal_branches() {
        #[rustfmt::skip]
        let f: Vec<u8> = vec![
            0, 0, 1, 1, 0,
            0, 2, 0, 1, 0,
            0, 1, 0, 1, 0,
            0, 0, 2, 1, 0,
            0, 0, 0, 0, 0,
        ];
        let domain = Domain::from_size(5, 5);
        let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Four)).unwrap();
        let adj = Adjacency::infinite(domain, Connectivity::Eight);

        let left = tree.small_component(11).id();
        let level = BruteForceContourExtractor::new(BruteForceMode::Level)
            .node_contour(&f, &adj, &tree, left);
        let region = BruteForceContourExtractor::new(BruteForceMode::Region)
            .node_contour(&f, &adj, &tree, left);

        assert_eq!(level, ContourSet::from([6, 11]));
        assert_eq!(level, region);
    }

    proptest! {
        #[test]
        fn contour_is_a_subset_of_the_region(
            f in prop::collection::vec(0u8..4, 30),
            eight in any::<bool>(),
            region_mode in any::<bool>(),
        ) {
            let connectivity = if eight { Connectivity::Eight } else { Connectivity::Four };
            let mode = if region_mode { BruteForceMode::Region } else { BruteForceMode::Level };
            let domain = Domain::from_size(6, 5);
            let tree = build_max_tree(&f, &Adjacency::closed(domain, connectivity)).unwrap();
            let adj = Adjacency::infinite(domain, connectivity);

            let contours = BruteForceContourExtractor::new(mode).extract_contours(&f, &adj, &tree).unwrap();
            for node in tree.nodes() {
                let region = tree.reconstruct_mask(node.id());
                prop_assert!(contours[node.id()].iter().all(|&p| region[p as usize]));
            }
        }

        #[test]
        fn level_and_region_modes_agree(
            f in prop::collection::vec(0u8..4, 36),
            tree_eight in any::<bool>(),
            contour_eight in any::<bool>(),
        ) {
            let tree_conn = if tree_eight { Connectivity::Eight } else { Connectivity::Four };
            let contour_conn = if contour_eight { Connectivity::Eight } else { Connectivity::Four };
            let domain = Domain::from_size(6, 6);
            let tree = build_max_tree(&f, &Adjacency::closed(domain, tree_conn)).unwrap();
            let adj = Adjacency::infinite(domain, contour_conn);

            let level = BruteForceContourExtractor::new(BruteForceMode::Level)
                .extract_contours(&f, &adj, &tree)
                .unwrap();
            let region = BruteForceContourExtractor::new(BruteForceMode::Region)
                .extract_contours(&f, &adj, &tree)
                .unwrap();
            prop_assert_eq!(level, region);
        }
    }
}
