//! # Component-tree Contours
//!
//! Contours of every node of a max-tree, computed three ways and checked
//! against each other.
//!
//! ## Core Features
//!
//! - **Incremental extraction**: one bottom-up pass keeps a per-pixel count of
//!   lower neighbors and derives each node's contour from its children's
//! - **Brute force**: per-node recomputation, used as the reference
//! - **Border tracing**: ordered outer and inner polygons per node through a
//!   Moore-Neighbor walk over a label map
//! - **Verification & timing**: node-by-node comparison and wall-clock
//!   measurement of each algorithm
//! - **Visualization**: painting contours and regions into RGB images
//!
//! ## Quick Start
//!
//! ```rust
//! use contours::{AnalysisBuilder, io::disk_image};
//! use morphotree::Connectivity;
//!
//! let (domain, f) = disk_image();
//! let analysis = AnalysisBuilder::new()
//!     .tree_connectivity(Connectivity::Eight)
//!     .contour_connectivity(Connectivity::Four)
//!     .build(domain, f)?;
//!
//! let contours = analysis.contours()?;
//! assert_eq!(contours.len(), analysis.tree().num_nodes());
//! assert!(analysis.verify()?.is_ok());
//! # Ok::<(), contours::ContourError>(())
//! ```

pub mod algorithms;
pub mod error;
pub mod io;
pub mod pipeline;
pub mod render;
pub mod traits;
pub mod types;
pub mod verify;

pub use algorithms::*;
pub use error::{ContourError, Result};
pub use pipeline::{Analysis, builder::AnalysisBuilder};
pub use traits::*;
pub use types::{ContourSet, Polygon, TracedContour, TreeStats, contour_mask};
pub use verify::{Algorithm, Extraction, Timing, VerificationReport};
