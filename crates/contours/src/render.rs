use morphotree::{MaxTree, NodeId};
use serde::{Deserialize, Serialize};

use crate::types::{ContourSet, TracedContour};

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

/// Converts HSV (`h` in degrees, `s` and `v` in `[0, 1]`) to RGB.
pub fn hsv_to_rgb(h: f32, s: f32, v: f32) -> Color {
    let c = v * s;
    let sector = h.rem_euclid(360.0) / 60.0;
    let x = c * (1.0 - (sector % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = match sector as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    let channel = |value: f32| ((value + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Color::new(channel(r), channel(g), channel(b))
}

/// `n` colors with evenly spaced hues.
pub fn palette(n: usize, saturation: f32, value: f32) -> Vec<Color> {
    (0..n)
        .map(|i| hsv_to_rgb(i as f32 / n as f32 * 360.0, saturation, value))
        .collect()
}

pub fn gray_to_rgb(f: &[u8]) -> Vec<Color> {
    f.iter().map(|&v| Color::gray(v)).collect()
}

pub fn paint<I>(canvas: &mut [Color], pixels: I, color: Color)
where
    I: IntoIterator<Item = u32>,
{
    for p in pixels {
        canvas[p as usize] = color;
    }
}

/// A pair of visualizations of the same selected nodes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaintedNodes {
    /// Each node's contour painted over the base image
    pub contour: Vec<Color>,
    /// Each node's whole region painted over the base image
    pub node: Vec<Color>,
}

/// Paints every selected node in its own palette color.
pub fn paint_nodes<T: Copy>(
    base: &[u8],
    tree: &MaxTree<T>,
    contours: &[ContourSet],
    selected: &[NodeId],
    saturation: f32,
    value: f32,
) -> PaintedNodes {
    let mut painted = PaintedNodes {
        contour: gray_to_rgb(base),
        node: gray_to_rgb(base),
    };

    let colors = palette(selected.len(), saturation, value);
    for (&id, &color) in selected.iter().zip(&colors) {
        paint(&mut painted.contour, contours[id].iter().copied(), color);
        paint(&mut painted.node, tree.reconstruct(id), color);
    }
    painted
}

/// Base image with one contour drawn in `color`.
pub fn highlight_contour(base: &[u8], contour: &ContourSet, color: Color) -> Vec<Color> {
    let mut canvas = gray_to_rgb(base);
    paint(&mut canvas, contour.iter().copied(), color);
    canvas
}

/// Grayscale rendering of a traced node: white background, black region and
/// gray contour pixels.
pub fn render_traced_node<T: Copy>(tree: &MaxTree<T>, id: NodeId, traced: &TracedContour) -> Vec<u8> {
    let mut output = vec![255u8; tree.domain().num_points() as usize];
    for p in tree.reconstruct(id) {
        output[p as usize] = 0;
    }
    for p in traced.outer.iter().chain(&traced.inner).flatten() {
        output[*p as usize] = 128;
    }
    output
}

#[cfg(test)]
mod tests {
    use morphotree::{Adjacency, Connectivity, build_max_tree};

    use super::*;
    use crate::{
        algorithms::{ContourTracer, IncrementalContourExtractor},
        io::disk_image,
        traits::ContourExtractor,
    };

    #[test]
    fn primary_and_secondary_hues() {
        assert_eq!(hsv_to_rgb(0.0, 1.0, 1.0), Color::RED);
        assert_eq!(hsv_to_rgb(120.0, 1.0, 1.0), Color::new(0, 255, 0));
        assert_eq!(hsv_to_rgb(240.0, 1.0, 1.0), Color::new(0, 0, 255));
        assert_eq!(hsv_to_rgb(180.0, 1.0, 1.0), Color::new(0, 255, 255));
        // Sector 3 keeps the blue channel at full chroma.
        assert_eq!(hsv_to_rgb(210.0, 1.0, 1.0), Color::new(0, 128, 255));
        assert_eq!(hsv_to_rgb(360.0, 1.0, 1.0), Color::RED);
        assert_eq!(hsv_to_rgb(42.0, 0.0, 0.5), Color::gray(128));
    }

    #[test]
    fn palette_spreads_hues() {
        let colors = palette(3, 1.0, 1.0);
        assert_eq!(
            colors,
            vec![Color::RED, Color::new(0, 255, 0), Color::new(0, 0, 255)]
        );
        assert!(palette(0, 0.8, 0.9).is_empty());
    }

    #[test]
    fn painted_nodes_keep_unselected_pixels() {
        let (domain, f) = disk_image();
        let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Four)).unwrap();
        let contours = IncrementalContourExtractor
            .extract_contours(&f, &Adjacency::infinite(domain, Connectivity::Four), &tree)
            .unwrap();

        let disk = tree.small_component(24).id();
        let painted = paint_nodes(&f, &tree, &contours, &[disk], 1.0, 1.0);

        assert_eq!(painted.contour[16], Color::RED);
        assert_eq!(painted.contour[24], Color::gray(1));
        assert_eq!(painted.node[24], Color::RED);
        assert_eq!(painted.node[0], Color::gray(0));
    }

    #[test]
    fn traced_node_render_marks_region_and_outline() {
        let (domain, f) = disk_image();
        let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Eight)).unwrap();
        let disk = tree.small_component(24).id();
        let mut tracer = ContourTracer::new(domain, &f).unwrap();
        let traced = tracer.compute_contour(&domain, 1);

        let output = render_traced_node(&tree, disk, &traced);
        assert_eq!(output[0], 255);
        assert_eq!(output[16], 128);
        assert_eq!(output[24], 0);
    }
}
