//! # Morphological Trees
//!
//! Component trees of grayscale images and the pixel geometry they are built
//! on.
//!
//! - **Domain & Points**: rectangular index spaces with row-major pixel indices
//! - **Adjacency**: 4- and 8-neighbor relations, either *closed* (off-domain
//!   neighbors are skipped, used to build trees) or *infinite* (off-domain
//!   neighbors are reported as [`UNDEFINED_INDEX`], used for boundary queries)
//! - **Max-tree**: union-find construction into an arena of nodes, traversals,
//!   region reconstruction and direct filtering
//! - **Attributes**: area and bounding box per node
//!
//! ```rust
//! use morphotree::{Adjacency, AreaComputer, AttributeComputer, Connectivity, Domain, build_max_tree};
//!
//! let f: Vec<u8> = vec![
//!     0, 0, 0,
//!     0, 5, 0,
//!     0, 0, 0,
//! ];
//! let domain = Domain::from_size(3, 3);
//! let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Four))?;
//!
//! let area = AreaComputer.compute(&tree);
//! assert_eq!(tree.num_nodes(), 2);
//! assert_eq!(area[tree.small_component(4).id()], 1);
//! # Ok::<(), morphotree::TreeError>(())
//! ```

pub mod adjacency;
pub mod attributes;
pub mod display;
pub mod error;
pub mod geometry;
pub mod tree;

pub use adjacency::{Adjacency, Boundary, Connectivity, Neighbours};
pub use attributes::{AreaComputer, AttributeComputer, BoundingBoxComputer};
pub use display::{format_image, format_mask};
pub use error::{Result, TreeError};
pub use geometry::{Domain, Point, UNDEFINED_INDEX};
pub use tree::{MaxTree, Node, NodeId, builder::build_max_tree};
