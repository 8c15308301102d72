use std::time::{Duration, Instant};

use morphotree::{Adjacency, Connectivity, Domain, MaxTree, NodeId};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr, IntoEnumIterator, VariantNames};
use tracing::{info, warn};

use crate::{
    algorithms::{BruteForceContourExtractor, BruteForceMode, ContourTracer, IncrementalContourExtractor},
    error::Result,
    traits::ContourExtractor,
    types::{ContourSet, TracedContour, contour_mask},
};

/// Contour algorithms that can be timed over a whole tree.
#[derive(
    Debug,
    Clone,
    Copy,
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
pub enum Algorithm {
    /// Single bottom-up pass with neighbor counts
    Incremental,
    /// Per-node recomputation from the reconstructed region
    BruteForce,
    /// Moore-Neighbor tracing of every node's level set
    Trace,
}

impl Algorithm {
    pub fn names() -> &'static [&'static str] {
        <Self as VariantNames>::VARIANTS
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Incremental => "Incremental contour sets from a single bottom-up pass",
            Self::BruteForce => "Contour sets recomputed independently for every node",
            Self::Trace => "Ordered outer and inner polygons traced per node",
        }
    }

    /// Tree connectivity the algorithm is usually timed with: tracing follows
    /// 8-connected components, the set algorithms run on a 4-connected tree.
    pub fn default_tree_connectivity(&self) -> Connectivity {
        match self {
            Self::Incremental | Self::BruteForce => Connectivity::Four,
            Self::Trace => Connectivity::Eight,
        }
    }
}

/// Output of one algorithm over a whole tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Sets(Vec<ContourSet>),
    Traced(Vec<TracedContour>),
}

impl Extraction {
    pub fn len(&self) -> usize {
        match self {
            Self::Sets(sets) => sets.len(),
            Self::Traced(traced) => traced.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Wall-clock duration of one full-tree pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub algorithm: Algorithm,
    pub elapsed: Duration,
}

impl Timing {
    pub fn millis(&self) -> u128 {
        self.elapsed.as_millis()
    }
}

impl std::fmt::Display for Timing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ms", self.algorithm, self.millis())
    }
}

/// Outcome of comparing the incremental algorithm against the reference.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationReport {
    pub num_nodes: usize,
    /// Ids of every node whose contours differ, in increasing order.
    pub mismatches: Vec<NodeId>,
}

impl VerificationReport {
    pub fn is_ok(&self) -> bool {
        self.mismatches.is_empty()
    }
}

impl std::fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for id in &self.mismatches {
            writeln!(f, "Contours for node {id} are NOT equal!")?;
        }
        if self.is_ok() {
            write!(f, "Finished without errors over {} nodes", self.num_nodes)
        } else {
            write!(
                f,
                "Found {} mismatching nodes out of {}",
                self.mismatches.len(),
                self.num_nodes
            )
        }
    }
}

/// Node ids whose contours differ once expanded to binary images.
///
/// A node missing from one side compares as an empty contour.
pub fn compare_contours(domain: &Domain, expected: &[ContourSet], actual: &[ContourSet]) -> Vec<NodeId> {
    let empty = ContourSet::default();
    (0..expected.len().max(actual.len()))
        .filter(|&id| {
            let a = expected.get(id).unwrap_or(&empty);
            let b = actual.get(id).unwrap_or(&empty);
            contour_mask(a, domain) != contour_mask(b, domain)
        })
        .collect()
}

/// Checks the incremental contours of every node against brute force.
///
/// Mismatches are logged and returned; they never abort the run.
pub fn verify<T>(
    f: &[T],
    adjacency: &Adjacency,
    tree: &MaxTree<T>,
    mode: BruteForceMode,
) -> Result<VerificationReport>
where
    T: Copy + Ord + Send + Sync,
{
    let incremental = IncrementalContourExtractor.extract_contours(f, adjacency, tree)?;
    let reference = BruteForceContourExtractor::new(mode).extract_contours(f, adjacency, tree)?;

    let mismatches = compare_contours(adjacency.domain(), &reference, &incremental);
    for id in &mismatches {
        warn!(node = id, "incremental contour differs from brute force");
    }
    info!(
        nodes = tree.num_nodes(),
        mismatches = mismatches.len(),
        %mode,
        "verification finished"
    );

    Ok(VerificationReport {
        num_nodes: tree.num_nodes(),
        mismatches,
    })
}

/// Runs one algorithm over the whole tree and measures it.
pub fn run_algorithm<T>(
    algorithm: Algorithm,
    f: &[T],
    adjacency: &Adjacency,
    tree: &MaxTree<T>,
) -> Result<(Extraction, Timing)>
where
    T: Copy + Ord + Send + Sync,
{
    let start = Instant::now();
    let extraction = match algorithm {
        Algorithm::Incremental => {
            Extraction::Sets(IncrementalContourExtractor.extract_contours(f, adjacency, tree)?)
        }
        Algorithm::BruteForce => {
            Extraction::Sets(BruteForceContourExtractor::default().extract_contours(f, adjacency, tree)?)
        }
        Algorithm::Trace => {
            let mut tracer = ContourTracer::new(*tree.domain(), f)?;
            Extraction::Traced(tracer.trace_tree(tree))
        }
    };
    let timing = Timing {
        algorithm,
        elapsed: start.elapsed(),
    };

    info!(%algorithm, elapsed_ms = timing.millis() as u64, "contour extraction finished");
    Ok((extraction, timing))
}

/// Times every algorithm over the same tree.
pub fn benchmark<T>(f: &[T], adjacency: &Adjacency, tree: &MaxTree<T>) -> Result<Vec<Timing>>
where
    T: Copy + Ord + Send + Sync,
{
    Algorithm::iter()
        .map(|algorithm| run_algorithm(algorithm, f, adjacency, tree).map(|(_, timing)| timing))
        .collect()
}
