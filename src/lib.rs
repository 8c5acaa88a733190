//! Splitree is a library for representing phylogenetic trees parsed from
//! Newick strings, rerooting them, and clustering samples by topology.
//!
//! Core functionality provided:
//! - Newick: Parse rooted or unrooted descriptions with precise,
//!   position-bearing grammar errors, and serialize trees back to Newick.
//! - Tree model: Arena-pattern [Tree](model::Tree) whose node pool is sized
//!   exactly once before construction; nodes link to each other by index
//!   through first-child/next-sibling pointers.
//! - Manipulation: [TreeManip] owns a tree and performs all structural
//!   mutation, including rerooting at any leaf by pointer rotation and
//!   canonical internal-node numbering.
//! - Splits: [Split](model::Split) bitsets identify bipartitions of the
//!   leaf set; the set of a tree's internal splits identifies its topology
//!   independent of edge lengths and rooting.
//! - Summary: [TreeSummary] accumulates a sample of trees and groups them
//!   by topology, with a textual frequency report.
//!
//! Limitations:
//! - Leaves must be labeled with positive integers (1-based), as produced
//!   by tools that translate taxon names to numbers.
//! - Rerooting is supported at leaves only.
//!
//! # Usage patterns
//! 1. [parse_newick] gives quick access to parsing with the tree finished
//!    and ready to traverse.
//! 2. Hold a [TreeManip] yourself for rerooting, scaling, split
//!    computation, or serialization, and a [TreeSummary] for clustering
//!    whole samples.
//!
//! ## Example
//!
//! Parse a single unrooted Newick string:
//! ```
//! use splitree::parse_newick;
//!
//! let tree = parse_newick("(1:0.1,2:0.2,(3:0.3,4:0.4):0.5);", false, false)?;
//! assert_eq!(tree.num_leaves(), 4);
//! assert_eq!(tree.num_internals(), 2);
//! # Ok::<(), splitree::TreeError>(())
//! ```
//!
//! Cluster a sample of trees by topology:
//! ```
//! use splitree::TreeSummary;
//!
//! let sample = [
//!     "(1:0.1,2:0.2,(3:0.3,4:0.4):0.5);",
//!     "(1:0.4,2:0.3,(3:0.2,4:0.1):0.9);",
//! ];
//! let mut summary = TreeSummary::new();
//! summary.read_trees(sample, 0)?;
//! assert_eq!(summary.topologies().len(), 1);
//! # Ok::<(), splitree::TreeError>(())
//! ```

pub mod error;
pub mod manip;
pub mod model;
pub mod newick;
pub mod summary;

pub use crate::error::TreeError;
pub use crate::manip::TreeManip;
pub use crate::model::{MIN_EDGE_LENGTH, Node, NodeIndex, Split, Tree};
pub use crate::newick::write_newick;
pub use crate::summary::TreeSummary;

// ============================================================================
// Quick Newick API
// ============================================================================
/// Parses a Newick string, returning a finished [Tree] with traversal
/// caches current and internal nodes numbered.
///
/// Unrooted descriptions are canonically rerooted at leaf number 0. See
/// [TreeManip::build_from_newick] for full documentation.
pub fn parse_newick<S: AsRef<str>>(
    description: S,
    rooted: bool,
    allow_polytomies: bool,
) -> Result<Tree, TreeError> {
    let mut tm = TreeManip::new();
    tm.build_from_newick(description.as_ref(), rooted, allow_polytomies)?;
    Ok(tm.into_tree())
}
