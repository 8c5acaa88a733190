//! Error type shared by all fallible tree operations.
//!
//! Every failure in this crate is reported as a [TreeError]. The variants
//! fall into three families:
//! * grammar errors raised while lexing/parsing a tree description,
//!   carrying the offending character position (1-based),
//! * semantic errors about the content of an otherwise well-formed
//!   description or about an unsupported manipulation,
//! * lookup errors for out-of-range queries against stored trees.

use thiserror::Error;

// =#========================================================================#=
// TREE ERROR
// =#========================================================================#=
/// Error raised by parsing, tree manipulation, and summary lookups.
///
/// Parsing errors reference the 1-based character position in the
/// (comment-stripped) tree description at which the problem was detected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TreeError {
    // --- Grammar errors ---
    /// Tree description contains fewer than four countable leaf tokens.
    #[error("expecting tree description to have at least four leaves, found {0}")]
    TooFewLeaves(usize),

    /// A token appeared after a token class that may not precede it.
    #[error("unexpected {token} at position {position} in tree description")]
    UnexpectedToken {
        /// Human-readable token class name
        token: &'static str,
        /// 1-based character position
        position: usize,
    },

    /// A right parenthesis appeared while already at the bottommost node.
    #[error("too many right parentheses at position {0} in tree description")]
    TooManyRightParens(usize),

    /// A group was closed containing a single child.
    #[error("internal node has only one child at position {0} in tree description")]
    SingleChildGroup(usize),

    /// A left parenthesis appeared inside an unquoted node name.
    #[error("unexpected left parenthesis inside node name at position {0} in tree description")]
    ParenInsideName(usize),

    /// An edge length contained a character that cannot occur in a number.
    #[error("invalid edge length character '{ch}' at position {position} in tree description")]
    InvalidEdgeLengthChar {
        /// The offending character
        ch: char,
        /// 1-based character position
        position: usize,
    },

    /// A node was given more siblings than the polytomy policy allows.
    #[error("polytomy found in the following tree description but polytomies prohibited:\n{0}")]
    PolytomyProhibited(String),

    /// More structural tokens appeared than the pre-sized node pool can hold.
    #[error("too many nodes specified by tree description ({allocated} nodes allocated for {leaves} leaves)")]
    TooManyNodes {
        /// Pool capacity computed from the leaf pre-scan
        allocated: usize,
        /// Leaf count from the pre-scan
        leaves: usize,
    },

    /// The description ended while a (quoted or unquoted) name was still open.
    #[error("tree description ended before end of node name starting at position {0} was found")]
    UnterminatedName(usize),

    /// The description ended while an edge length was still being read.
    #[error("tree description ended before end of edge length starting at position {0} was found")]
    UnterminatedEdgeLength(usize),

    // --- Semantic errors ---
    /// A leaf name could not be interpreted as a positive integer.
    #[error("node name {0:?} not interpretable as a positive integer")]
    BadLeafName(String),

    /// A leaf number exceeds the number of leaves in the description.
    #[error("leaf number {number} exceeds the number of leaves ({num_leaves})")]
    LeafNumberOutOfRange {
        /// The 1-based leaf number found
        number: u32,
        /// Leaf count of the description
        num_leaves: usize,
    },

    /// The same leaf number appeared on two leaves.
    #[error("leaf number {0} used more than once")]
    DuplicateLeafNumber(u32),

    /// An edge length string could not be interpreted as a floating value.
    #[error("{0:?} is not interpretable as a floating point number")]
    BadEdgeLength(String),

    /// No node carries the requested number.
    #[error("no node found with node number {0}")]
    NodeNumberNotFound(u32),

    /// Rerooting was requested at a node that has children.
    #[error("cannot currently root trees at internal nodes (e.g. node {0})")]
    RerootAtInternal(u32),

    // --- Lookup errors ---
    /// A stored tree or description was requested by an out-of-range index.
    #[error("tree index {index} out of range ({len} trees stored)")]
    TreeIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of stored trees
        len: usize,
    },
}
