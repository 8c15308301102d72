use std::path::Path;

use image::{GrayImage, RgbImage};
use morphotree::Domain;
use tracing::debug;

use crate::{
    error::{ContourError, Result},
    render::Color,
};

/// Loads an image from disk as 8-bit luminance.
pub fn load_gray<P: AsRef<Path>>(path: P) -> Result<(Domain, Vec<u8>)> {
    let path = path.as_ref();
    let image = image::open(path)?.to_luma8();
    let domain = Domain::from_size(image.width(), image.height());
    debug!(path = %path.display(), width = image.width(), height = image.height(), "loaded image");
    Ok((domain, image.into_raw()))
}

pub fn save_gray<P: AsRef<Path>>(path: P, domain: &Domain, pixels: &[u8]) -> Result<()> {
    check_len(domain, pixels.len())?;
    let image = GrayImage::from_raw(domain.width(), domain.height(), pixels.to_vec()).ok_or(
        ContourError::SizeMismatch {
            expected: domain.num_points() as usize,
            actual: pixels.len(),
        },
    )?;
    image.save(path.as_ref())?;
    Ok(())
}

pub fn save_rgb<P: AsRef<Path>>(path: P, domain: &Domain, pixels: &[Color]) -> Result<()> {
    check_len(domain, pixels.len())?;
    let raw = pixels.iter().flat_map(|c| [c.r, c.g, c.b]).collect();
    let image = RgbImage::from_raw(domain.width(), domain.height(), raw).ok_or(
        ContourError::SizeMismatch {
            expected: domain.num_points() as usize,
            actual: pixels.len(),
        },
    )?;
    image.save(path.as_ref())?;
    Ok(())
}

fn check_len(domain: &Domain, actual: usize) -> Result<()> {
    let expected = domain.num_points() as usize;
    if expected != actual {
        return Err(ContourError::SizeMismatch { expected, actual });
    }
    Ok(())
}

/// Inserts `suffix` before the extension of `path`: `out.png` becomes
/// `out-contour.png`.
pub fn with_suffix<P: AsRef<Path>>(path: P, suffix: &str) -> std::path::PathBuf {
    let path = path.as_ref();
    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}{suffix}.{}", ext.to_string_lossy()),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}

/// 7x7 disk of ones on a zero background.
pub fn disk_image() -> (Domain, Vec<u8>) {
    #[rustfmt::skip]
    let f = vec![
        0, 0, 0, 0, 0, 0, 0,
        0, 0, 0, 0, 0, 0, 0,
        0, 0, 1, 1, 1, 0, 0,
        0, 1, 1, 1, 1, 1, 0,
        0, 1, 1, 1, 1, 1, 0,
        0, 0, 1, 1, 1, 0, 0,
        0, 0, 0, 0, 0, 0, 0,
    ];
    (Domain::from_size(7, 7), f)
}

/// 7x7 image with interleaved level-4 and level-7 regions.
pub fn two_level_image() -> (Domain, Vec<u8>) {
    #[rustfmt::skip]
    let f = vec![
        0, 0, 0, 0, 0, 0, 0,
        0, 4, 4, 4, 7, 7, 7,
        0, 7, 7, 4, 7, 4, 7,
        0, 7, 4, 4, 7, 4, 7,
        0, 4, 4, 4, 7, 4, 7,
        0, 7, 7, 4, 7, 7, 7,
        0, 0, 0, 0, 0, 0, 0,
    ];
    (Domain::from_size(7, 7), f)
}
