use morphotree::{Point, TreeError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContourError {
    #[error("Failed to load image: {0}")]
    ImageLoad(#[from] image::ImageError),

    #[error("Component tree error: {0}")]
    Tree(#[from] TreeError),

    #[error("Image size mismatch: domain has {expected} points, image has {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("Point ({}, {}) lies outside the image", .0.x, .0.y)]
    PointOutsideDomain(Point),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContourError>;
