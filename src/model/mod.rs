//! Data model for phylogenetic trees.
//!
//! # Tree representation
//! Trees are represented by [Tree], which uses the arena pattern to store
//! [Node] values in a pool that is sized once, before construction, and
//! never reallocated. Nodes reference each other by [NodeIndex] through
//! intrusive first-child/next-sibling links, so a node's children are
//! reached by following `left_child` and then `right_sib` links.
//!
//! # Splits
//! [Split] is a standalone fixed-width bitset over the leaf index space,
//! used to identify bipartitions (and, as an ordered set, whole topologies)
//! independently of edge lengths. It does not depend on [Node] or [Tree].
//!
//! # Mutation
//! The model layer holds no algorithms: parsing, traversal-cache refresh,
//! rerooting, and renumbering all live in
//! [TreeManip](crate::manip::TreeManip), which takes exclusive access to a
//! tree.

pub mod node;
pub mod split;
pub mod tree;

pub use node::{MIN_EDGE_LENGTH, Node};
pub use split::Split;
pub use tree::{NodeIndex, Tree};
