pub mod brute_force;
pub mod incremental;
pub mod tracer;

pub use brute_force::*;
pub use incremental::*;
pub use tracer::*;

use morphotree::Adjacency;

use crate::error::{ContourError, Result};

/// Rejects images whose length differs from the adjacency's domain.
pub(crate) fn check_image_size<T>(f: &[T], adjacency: &Adjacency) -> Result<()> {
    let expected = adjacency.domain().num_points() as usize;
    if f.len() != expected {
        return Err(ContourError::SizeMismatch {
            expected,
            actual: f.len(),
        });
    }
    Ok(())
}
