//! Moore-Neighbor border tracing with a label map.
//!
//! A raster scan over a bounding box finds the first pixel of every outer
//! contour and of every hole. Each contour is then walked pixel by pixel with
//! the 8-neighbor search of [`find_next_point`], labelling visited pixels and
//! the background probes that were rejected, so that later rows of the scan
//! recognise contours that were already traced.

use morphotree::{AttributeComputer, BoundingBoxComputer, Domain, MaxTree, NodeId, Point};
use tracing::debug;

use crate::{
    error::{ContourError, Result},
    types::{Polygon, TracedContour},
};

/// Neighbor offsets, clockwise in image coordinates starting east.
pub const DELTA: [Point; 8] = [
    Point::new(1, 0),
    Point::new(1, 1),
    Point::new(0, 1),
    Point::new(-1, 1),
    Point::new(-1, 0),
    Point::new(-1, -1),
    Point::new(0, -1),
    Point::new(1, -1),
];

/// Label stored for background positions already probed by a trace.
pub const BACKGROUND_LABEL: i32 = -1;

/// Per-position labels over a domain grown by one pixel on every side.
///
/// `0` means unlabeled, positive values are region labels and
/// [`BACKGROUND_LABEL`] marks probed background.
#[derive(Debug, Clone)]
pub struct LabelMap {
    domain: Domain,
    labels: Vec<i32>,
}

impl LabelMap {
    pub fn new(image_domain: &Domain) -> Self {
        let domain = image_domain.padded(1);
        Self {
            labels: vec![0; domain.num_points() as usize],
            domain,
        }
    }

    pub fn reset(&mut self) {
        self.labels.fill(0);
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn get(&self, p: Point) -> i32 {
        self.labels[self.domain.point_to_index(p) as usize]
    }

    pub fn set(&mut self, p: Point, label: i32) {
        let index = self.domain.point_to_index(p) as usize;
        self.labels[index] = label;
    }
}

/// Traces the contours of every foreground component met inside `bbox`.
///
/// `bbox` is clipped to `domain`. `is_foreground` must return `false` for
/// every point outside `domain`.
pub fn scan<F>(bbox: &Domain, domain: &Domain, labels: &mut LabelMap, is_foreground: F) -> TracedContour
where
    F: Fn(Point) -> bool,
{
    let bbox = bbox.intersection(domain);
    let mut traced = TracedContour::default();
    let mut region = 0;

    for y in bbox.top()..=bbox.bottom() {
        let mut label = 0;
        for x in bbox.left()..=bbox.right() {
            let p = Point::new(x, y);
            if is_foreground(p) {
                if label != 0 {
                    labels.set(p, label);
                    continue;
                }
                label = labels.get(p);
                if label == 0 {
                    region += 1;
                    label = region;
                    let outer = trace_contour(p, 0, label, domain, labels, &is_foreground);
                    traced.outer.push(outer);
                    labels.set(p, label);
                }
            } else if label != 0 {
                if labels.get(p) == 0 {
                    let start = p - Point::new(1, 0);
                    let inner = trace_contour(start, 1, label, domain, labels, &is_foreground);
                    traced.inner.push(inner);
                }
                label = 0;
            }
        }
    }

    traced
}

/// Walks one closed contour from `start`, searching first in direction `dir`.
///
/// The polygon begins with the first successor of `start` and ends once the
/// walk leaves `start` towards that successor again, which closes contours
/// that pass through the same pixel more than once.
pub fn trace_contour<F>(
    start: Point,
    dir: usize,
    label: i32,
    domain: &Domain,
    labels: &mut LabelMap,
    is_foreground: &F,
) -> Polygon
where
    F: Fn(Point) -> bool,
{
    let (first, mut next_dir) = find_next_point(start, dir, labels, is_foreground);
    let mut polygon = vec![domain.point_to_index(first)];

    // isolated pixel
    if first == start {
        return polygon;
    }

    let mut current = first;
    loop {
        labels.set(current, label);
        let (next, d) = find_next_point(current, (next_dir + 6) % 8, labels, is_foreground);
        next_dir = d;

        let previous = current;
        current = next;
        if previous == start && current == first {
            break;
        }
        polygon.push(domain.point_to_index(current));
    }

    polygon
}

/// Finds the first foreground neighbor of `current`, probing clockwise from
/// `dir`. Rejected probes are labeled as background.
///
/// Returns `current` itself when none of the seven probed neighbors is
/// foreground.
pub fn find_next_point<F>(
    current: Point,
    mut dir: usize,
    labels: &mut LabelMap,
    is_foreground: &F,
) -> (Point, usize)
where
    F: Fn(Point) -> bool,
{
    for _ in 0..7 {
        let candidate = current + DELTA[dir];
        if is_foreground(candidate) {
            return (candidate, dir);
        }
        labels.set(candidate, BACKGROUND_LABEL);
        dir = (dir + 1) % 8;
    }
    (current, dir)
}

/// Border tracer over one image.
///
/// Owns the label map, which is reset at the start of every trace.
#[derive(Debug, Clone)]
pub struct ContourTracer<'a, T> {
    domain: Domain,
    f: &'a [T],
    labels: LabelMap,
}

impl<'a, T: Copy + Ord> ContourTracer<'a, T> {
    pub fn new(domain: Domain, f: &'a [T]) -> Result<Self> {
        let expected = domain.num_points() as usize;
        if f.len() != expected {
            return Err(ContourError::SizeMismatch {
                expected,
                actual: f.len(),
            });
        }
        Ok(Self {
            labels: LabelMap::new(&domain),
            domain,
            f,
        })
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn labels(&self) -> &LabelMap {
        &self.labels
    }

    /// Contours of the level set `f >= level` inside `bbox`.
    pub fn compute_contour(&mut self, bbox: &Domain, level: T) -> TracedContour {
        self.labels.reset();
        let domain = self.domain;
        let f = self.f;
        scan(bbox, &domain, &mut self.labels, |p| {
            domain.contains(p) && f[domain.point_to_index(p) as usize] >= level
        })
    }

    /// Contours of the pixels marked in `region`, a mask over the domain.
    ///
    /// Unlike [`Self::compute_contour`], other components of the same level set
    /// inside `bbox` are ignored.
    pub fn compute_region_contour(&mut self, bbox: &Domain, region: &[bool]) -> TracedContour {
        self.labels.reset();
        let domain = self.domain;
        scan(bbox, &domain, &mut self.labels, |p| {
            domain.contains(p) && region[domain.point_to_index(p) as usize]
        })
    }

    /// Traced contour of every node, visiting nodes by increasing level.
    pub fn trace_tree(&mut self, tree: &MaxTree<T>) -> Vec<TracedContour> {
        debug!(nodes = tree.num_nodes(), "tracing contours of all nodes");
        let bboxes = BoundingBoxComputer.compute(tree);
        let mut contours = vec![TracedContour::default(); tree.num_nodes()];
        tree.traverse_by_level(|node| {
            contours[node.id()] = self.compute_contour(&bboxes[node.id()], node.level());
        });
        contours
    }

    /// Traced contour of a single node, restricted to its own region.
    pub fn trace_node(&mut self, tree: &MaxTree<T>, bbox: &Domain, id: NodeId) -> TracedContour {
        let region = tree.reconstruct_mask(id);
        self.compute_region_contour(bbox, &region)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use image::GrayImage;
    use imageproc::contours::find_contours;
    use morphotree::{Adjacency, Connectivity, build_max_tree};
    use proptest::prelude::*;

    use super::*;
    use crate::{
        algorithms::IncrementalContourExtractor,
        io::disk_image,
        traits::ContourExtractor,
        types::ContourSet,
    };

    fn pixels_of(polygons: &[Polygon]) -> ContourSet {
        polygons.iter().flatten().copied().collect()
    }

    /// Pixel union of every border imageproc finds in a binary image.
    fn reference_border(domain: &Domain, f: &[u8]) -> ContourSet {
        let image = GrayImage::from_fn(domain.width(), domain.height(), |x, y| {
            image::Luma([f[(y * domain.width() + x) as usize] * 255])
        });
        find_contours::<i32>(&image)
            .iter()
            .flat_map(|contour| contour.points.iter())
            .map(|p| domain.point_to_index(Point::new(p.x, p.y)))
            .collect()
    }

    #[test]
    fn isolated_pixel_is_a_single_point_contour() {
        let f: Vec<u8> = vec![0, 0, 0, 0, 1, 0, 0, 0, 0];
        let domain = Domain::from_size(3, 3);
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let traced = tracer.compute_contour(&domain, 1);
        assert_eq!(traced.outer, vec![vec![4]]);
        assert!(traced.inner.is_empty());
    }

    #[test]
    fn pixel_in_the_corner_traces_against_the_border() {
        let f: Vec<u8> = vec![1, 0, 0, 0];
        let domain = Domain::from_size(2, 2);
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let traced = tracer.compute_contour(&domain, 1);
        assert_eq!(traced.outer, vec![vec![0]]);
        // Seven of the eight neighbors are probed; the last one is never needed.
        assert_eq!(tracer.labels().get(Point::new(-1, -1)), BACKGROUND_LABEL);
        assert_eq!(tracer.labels().get(Point::new(1, 0)), BACKGROUND_LABEL);
        assert_eq!(tracer.labels().get(Point::new(1, -1)), 0);
        assert_eq!(tracer.labels().get(Point::new(0, 0)), 1);
    }

    #[test]
    fn hole_gives_one_outer_and_one_inner_contour() {
        #[rustfmt::skip]
        let f: Vec<u8> = vec![
            0, 0, 0, 0, 0, 0, 0,
            0, 1, 1, 1, 1, 1, 0,
            0, 1, 1, 1, 1, 1, 0,
            0, 1, 1, 0, 1, 1, 0,
            0, 1, 1, 1, 1, 1, 0,
            0, 1, 1, 1, 1, 1, 0,
            0, 0, 0, 0, 0, 0, 0,
        ];
        let domain = Domain::from_size(7, 7);
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let traced = tracer.compute_contour(&domain, 1);
        assert_eq!(traced.outer.len(), 1);
        assert_eq!(traced.inner.len(), 1);
        assert_eq!(traced.outer[0].len(), 16);
        // The hole at (3, 3) is surrounded by its four direct neighbors.
        assert_eq!(traced.inner[0], vec![31, 25, 17, 23]);

        let outer = pixels_of(&traced.outer);
        let inner = pixels_of(&traced.inner);
        assert!(outer.is_disjoint(&inner));
    }

    #[test]
    fn tracing_is_idempotent() {
        let (domain, f) = disk_image();
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let first = tracer.compute_contour(&domain, 1);
        let second = tracer.compute_contour(&domain, 1);
        assert_eq!(first, second);
    }

    #[test]
    fn disk_outline_visits_the_ring_in_order() {
        let (domain, f) = disk_image();
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let traced = tracer.compute_contour(&Domain::from_corners(Point::new(1, 2), Point::new(5, 5)), 1);
        assert_eq!(traced.outer.len(), 1);
        assert!(traced.inner.is_empty());
        assert_eq!(
            traced.outer[0],
            vec![17, 18, 26, 33, 39, 38, 37, 29, 22, 16]
        );
    }

    #[test]
    fn pinched_region_closes_through_the_shared_pixel() {
        // Two blocks touching at a single diagonal.
        #[rustfmt::skip]
        let f: Vec<u8> = vec![
            1, 1, 0, 0,
            1, 1, 0, 0,
            0, 0, 1, 1,
            0, 0, 1, 1,
        ];
        let domain = Domain::from_size(4, 4);
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let traced = tracer.compute_contour(&domain, 1);
        assert_eq!(traced.outer.len(), 1);
        assert!(traced.inner.is_empty());
        assert_eq!(pixels_of(&traced.outer).len(), 8);
        // 5 and 10 are each visited twice.
        assert_eq!(traced.outer[0].len(), 10);
    }

    #[test]
    fn matches_imageproc_borders_on_binary_masks() {
        let (disk_domain, disk) = disk_image();

        #[rustfmt::skip]
        let shapes: Vec<u8> = vec![
            1, 1, 1, 0, 0, 1,
            1, 0, 1, 0, 1, 0,
            1, 1, 1, 0, 0, 0,
            0, 0, 0, 1, 1, 1,
            0, 1, 0, 1, 0, 1,
            0, 0, 0, 1, 1, 1,
        ];
        let shapes_domain = Domain::from_size(6, 6);

        for (domain, f) in [(disk_domain, disk), (shapes_domain, shapes)] {
            let mut tracer = ContourTracer::new(domain, &f).unwrap();
            let traced = tracer.compute_contour(&domain, 1);
            assert_eq!(traced.pixels(), reference_border(&domain, &f));
        }
    }

    #[test]
    fn trace_tree_gives_one_contour_per_node() {
        let (domain, f) = disk_image();
        let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Eight)).unwrap();
        let mut tracer = ContourTracer::new(domain, &f).unwrap();

        let traced = tracer.trace_tree(&tree);
        assert_eq!(traced.len(), tree.num_nodes());

        let border: HashSet<u32> = (0..49)
            .filter(|&p| {
                let pt = domain.index_to_point(p);
                pt.x == 0 || pt.y == 0 || pt.x == 6 || pt.y == 6
            })
            .collect();
        assert_eq!(traced[0].pixels(), border);
        assert!(traced[0].inner.is_empty());
    }

    #[test]
    fn boxes_reaching_past_the_image_are_clipped() {
        let (domain, f) = disk_image();
        let mut tracer = ContourTracer::new(domain, &f).unwrap();
        let inside = tracer.compute_contour(&domain, 1);

        let oversized = domain.padded(3);
        assert_eq!(tracer.compute_contour(&oversized, 1), inside);

        let mask = vec![true; domain.num_points() as usize];
        let whole = tracer.compute_region_contour(&domain, &mask);
        assert_eq!(tracer.compute_region_contour(&oversized, &mask), whole);

        let disjoint = Domain::from_corners(Point::new(20, 20), Point::new(30, 30));
        assert!(tracer.compute_contour(&disjoint, 1).is_empty());
    }

    #[test]
    fn rejects_wrong_image_size() {
        let domain = Domain::from_size(3, 3);
        assert!(ContourTracer::new(domain, &[0u8; 8]).is_err());
    }

    proptest! {
        #[test]
        fn region_trace_matches_four_connected_contour(
            f in prop::collection::vec(0u8..3, 49),
        ) {
            let domain = Domain::from_size(7, 7);
            let tree = build_max_tree(&f, &Adjacency::closed(domain, Connectivity::Eight)).unwrap();
            let adj = Adjacency::infinite(domain, Connectivity::Four);
            let contours = IncrementalContourExtractor.extract_contours(&f, &adj, &tree).unwrap();

            let bboxes = BoundingBoxComputer.compute(&tree);
            let mut tracer = ContourTracer::new(domain, &f).unwrap();
            for node in tree.nodes() {
                let traced = tracer.trace_node(&tree, &bboxes[node.id()], node.id());
                prop_assert_eq!(traced.outer.len(), 1);
                prop_assert_eq!(&traced.pixels(), &contours[node.id()], "node {}", node.id());
            }
        }
    }
}
