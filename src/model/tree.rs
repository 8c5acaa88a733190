//! Arena-based rooted/unrooted tree structure.

use crate::model::node::Node;
use std::ops::{Index, IndexMut};

/// Index of a node in a tree's pool (arena).
pub type NodeIndex = usize;

// =#========================================================================#=
// TREE
// =#========================================================================#=
/// A phylogenetic tree over a pre-sized pool of [Node] values.
///
/// The pool is allocated once, with its final size, before any node is
/// linked: a parse can compute the exact leaf count up front, so node
/// indices stay valid for the tree's entire life and no reallocation can
/// invalidate links mid-construction. For `n` leaves the pool holds
/// `2n` nodes when rooted and `2n - 2` when unrooted.
///
/// Two derived traversal sequences are cached on the tree: `preorder`
/// (depth-first, parent before children) and `levelorder` (breadth-first).
/// Both cover every node except the root, and both are stale immediately
/// after any structural mutation; they must be explicitly refreshed by the
/// owning [TreeManip](crate::manip::TreeManip) before use. There is no
/// implicit refresh.
#[derive(Debug, Clone)]
pub struct Tree {
    pub(crate) is_rooted: bool,
    pub(crate) root: Option<NodeIndex>,
    pub(crate) num_leaves: usize,
    pub(crate) num_internals: usize,
    pub(crate) preorder: Vec<NodeIndex>,
    pub(crate) levelorder: Vec<NodeIndex>,
    pub(crate) nodes: Vec<Node>,
}

impl Tree {
    /// Creates an empty tree with no nodes.
    pub fn new() -> Self {
        Tree {
            is_rooted: false,
            root: None,
            num_leaves: 0,
            num_internals: 0,
            preorder: Vec::new(),
            levelorder: Vec::new(),
            nodes: Vec::new(),
        }
    }

    /// Creates a tree whose pool holds exactly `capacity` fresh nodes.
    pub(crate) fn with_pool(capacity: usize, is_rooted: bool, num_leaves: usize) -> Self {
        Tree {
            is_rooted,
            root: None,
            num_leaves,
            num_internals: 0,
            preorder: Vec::new(),
            levelorder: Vec::new(),
            nodes: vec![Node::new(); capacity],
        }
    }

    /// Resets the tree to the empty state.
    pub(crate) fn clear(&mut self) {
        self.is_rooted = false;
        self.root = None;
        self.num_leaves = 0;
        self.num_internals = 0;
        self.preorder.clear();
        self.levelorder.clear();
        self.nodes.clear();
    }

    /// Returns whether this tree is rooted.
    pub fn is_rooted(&self) -> bool {
        self.is_rooted
    }

    /// Returns the index of the root node, or `None` for an empty tree.
    pub fn root_index(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Returns a reference to the root node, or `None` for an empty tree.
    pub fn root(&self) -> Option<&Node> {
        self.root.map(|i| &self.nodes[i])
    }

    /// Returns the number of leaves.
    pub fn num_leaves(&self) -> usize {
        self.num_leaves
    }

    /// Returns the number of internal nodes.
    pub fn num_internals(&self) -> usize {
        self.num_internals
    }

    /// Returns the total number of nodes in the pool.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Returns a reference to the node at `index`.
    ///
    /// # Panics
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }

    /// Returns the cached preorder sequence (all nodes except the root).
    ///
    /// Stale after any structural mutation until explicitly refreshed.
    pub fn preorder(&self) -> &[NodeIndex] {
        &self.preorder
    }

    /// Returns the cached level-order sequence (all nodes except the root).
    ///
    /// Stale after any structural mutation until explicitly refreshed.
    pub fn levelorder(&self) -> &[NodeIndex] {
        &self.levelorder
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}

impl Index<NodeIndex> for Tree {
    type Output = Node;

    fn index(&self, index: NodeIndex) -> &Node {
        &self.nodes[index]
    }
}

impl IndexMut<NodeIndex> for Tree {
    fn index_mut(&mut self, index: NodeIndex) -> &mut Node {
        &mut self.nodes[index]
    }
}
