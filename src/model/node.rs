//! Node of a phylogenetic tree.

use crate::model::split::Split;
use crate::model::tree::NodeIndex;

/// Smallest representable edge length; every stored edge length is clamped
/// to at least this value so that downstream likelihood-style computations
/// never see a zero or negative branch.
pub const MIN_EDGE_LENGTH: f64 = 1.0e-12;

// =#========================================================================#=
// NODE
// =#========================================================================#=
/// A single node in a [Tree](crate::model::Tree) pool.
///
/// Children are stored intrusively: a node references its first child via
/// `left_child` and each child references the next via `right_sib`. All
/// three structural links are [NodeIndex] values into the owning pool,
/// wrapped in `Option` so that "no link" needs no sentinel index.
///
/// A node is a leaf exactly when it has no left child. Leaves carry a
/// 0-based `number` below the leaf count; internal nodes are numbered from
/// the leaf count upward once construction finishes.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) parent: Option<NodeIndex>,
    pub(crate) left_child: Option<NodeIndex>,
    pub(crate) right_sib: Option<NodeIndex>,
    pub(crate) number: Option<u32>,
    pub(crate) name: String,
    pub(crate) edge_length: f64,
    pub(crate) split: Option<Split>,
}

impl Node {
    /// Creates an unlinked, unnumbered node with the minimum edge length.
    pub fn new() -> Self {
        Node {
            parent: None,
            left_child: None,
            right_sib: None,
            number: None,
            name: String::new(),
            edge_length: MIN_EDGE_LENGTH,
            split: None,
        }
    }

    /// Returns the index of this node's parent, if any.
    pub fn parent(&self) -> Option<NodeIndex> {
        self.parent
    }

    /// Returns the index of this node's first child, if any.
    pub fn left_child(&self) -> Option<NodeIndex> {
        self.left_child
    }

    /// Returns the index of this node's next sibling, if any.
    pub fn right_sib(&self) -> Option<NodeIndex> {
        self.right_sib
    }

    /// Returns whether this node is a leaf (has no children).
    pub fn is_leaf(&self) -> bool {
        self.left_child.is_none()
    }

    /// Returns this node's number: 0-based leaf number for leaves,
    /// post-construction assigned number for internals.
    pub fn number(&self) -> Option<u32> {
        self.number
    }

    /// Returns this node's name (empty if none was given).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the length of the edge connecting this node to its parent.
    pub fn edge_length(&self) -> f64 {
        self.edge_length
    }

    /// Returns the split associated with this node's parent edge, if one
    /// has been computed.
    pub fn split(&self) -> Option<&Split> {
        self.split.as_ref()
    }

    /// Sets the edge length, clamping to [MIN_EDGE_LENGTH].
    pub fn set_edge_length(&mut self, edge_length: f64) {
        self.edge_length = if edge_length < MIN_EDGE_LENGTH {
            MIN_EDGE_LENGTH
        } else {
            edge_length
        };
    }

    /// Sets the node name.
    pub fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_parent(&mut self, parent: Option<NodeIndex>) {
        self.parent = parent;
    }

    pub(crate) fn set_left_child(&mut self, left_child: Option<NodeIndex>) {
        self.left_child = left_child;
    }

    pub(crate) fn set_right_sib(&mut self, right_sib: Option<NodeIndex>) {
        self.right_sib = right_sib;
    }

    pub(crate) fn set_number(&mut self, number: Option<u32>) {
        self.number = number;
    }

    pub(crate) fn set_split(&mut self, split: Option<Split>) {
        self.split = split;
    }

    pub(crate) fn split_mut(&mut self) -> Option<&mut Split> {
        self.split.as_mut()
    }
}

impl Default for Node {
    fn default() -> Self {
        Node::new()
    }
}
