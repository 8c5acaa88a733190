//! Construction and manipulation of [Tree] values.

use crate::error::TreeError;
use crate::model::split::Split;
use crate::model::tree::{NodeIndex, Tree};
use crate::newick::parser::build_tree;
use crate::newick::write_newick;
use std::collections::{BTreeSet, VecDeque};

// =#========================================================================#=
// TREE MANIP
// =#========================================================================#=
/// Owns a [Tree] and performs every operation that mutates its structure.
///
/// [Tree] itself is a passive data structure; building one from a Newick
/// description, rerooting it, renumbering its internals, and refreshing its
/// traversal caches all go through a `TreeManip`. Operations that change
/// structure leave the caches current, so a tree handed out by
/// [tree](TreeManip::tree) or [into_tree](TreeManip::into_tree) is always
/// ready to traverse.
#[derive(Debug, Default)]
pub struct TreeManip {
    tree: Tree,
}

impl TreeManip {
    /// Creates a manipulator holding an empty tree.
    pub fn new() -> Self {
        TreeManip { tree: Tree::new() }
    }

    /// Creates a manipulator taking ownership of an existing tree.
    pub fn with_tree(tree: Tree) -> Self {
        TreeManip { tree }
    }

    /// Returns a shared reference to the held tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// Consumes the manipulator, returning the held tree.
    pub fn into_tree(self) -> Tree {
        self.tree
    }

    /// Replaces the held tree with an empty one.
    pub fn clear(&mut self) {
        self.tree = Tree::new();
    }

    /// Returns the sum of all edge lengths.
    pub fn tree_length(&self) -> f64 {
        self.tree.preorder.iter().map(|&nd| self.tree[nd].edge_length()).sum()
    }

    /// Returns the number of edges (one per non-root node).
    pub fn count_edges(&self) -> usize {
        self.tree.preorder.len()
    }

    /// Multiplies every edge length by `scaler`.
    ///
    /// Scaled lengths are clamped the same way as parsed ones.
    pub fn scale_all_edge_lengths(&mut self, scaler: f64) {
        for i in 0..self.tree.preorder.len() {
            let nd = self.tree.preorder[i];
            let scaled = self.tree[nd].edge_length() * scaler;
            self.tree[nd].set_edge_length(scaled);
        }
    }

    /// Serializes the held tree as a Newick description.
    ///
    /// See [write_newick] for the formatting rules.
    pub fn make_newick(&self, precision: usize, use_names: bool) -> String {
        write_newick(&self.tree, precision, use_names)
    }

    /// Replaces the held tree with one built from a Newick description.
    ///
    /// A rooted description is kept as given; an unrooted one is rerooted
    /// at leaf number 0, giving every unrooted topology a canonical form.
    /// Internal nodes are then numbered from the leaf count upward and the
    /// traversal caches refreshed. If anything fails the manipulator is
    /// left holding an empty tree.
    ///
    /// # Arguments
    /// * `description` - The Newick string (terminal `;` optional)
    /// * `rooted` - Whether the description is of a rooted tree
    /// * `allow_polytomies` - Whether nodes may have more than two children
    ///
    /// # Example
    /// ```
    /// use splitree::TreeManip;
    ///
    /// let mut tm = TreeManip::new();
    /// tm.build_from_newick("(1:0.1,2:0.2,(3:0.3,4:0.4):0.5):0.0;", false, false)?;
    /// assert_eq!(tm.tree().num_leaves(), 4);
    /// assert_eq!(tm.count_edges(), 5);
    /// # Ok::<(), splitree::TreeError>(())
    /// ```
    pub fn build_from_newick(
        &mut self,
        description: &str,
        rooted: bool,
        allow_polytomies: bool,
    ) -> Result<(), TreeError> {
        let result = self.try_build(description, rooted, allow_polytomies);
        if result.is_err() {
            self.tree.clear();
        }
        result
    }

    fn try_build(
        &mut self,
        description: &str,
        rooted: bool,
        allow_polytomies: bool,
    ) -> Result<(), TreeError> {
        self.tree = build_tree(description, rooted, allow_polytomies)?;
        if rooted {
            self.refresh_preorder();
            self.refresh_levelorder();
        } else {
            self.reroot_at_number(0)?;
        }
        self.renumber_internals();
        Ok(())
    }

    /// Reroots the held tree at the leaf carrying `node_number`.
    ///
    /// Rerooting at the current root is a no-op; rerooting at an internal
    /// node is not supported.
    pub fn reroot_at_number(&mut self, node_number: u32) -> Result<(), TreeError> {
        let nd = (0..self.tree.nodes.len())
            .find(|&i| self.tree[i].number() == Some(node_number))
            .ok_or(TreeError::NodeNumberNotFound(node_number))?;

        if Some(nd) != self.tree.root {
            if self.tree[nd].left_child().is_some() {
                return Err(TreeError::RerootAtInternal(node_number));
            }
            self.reroot_at(nd);
        }
        Ok(())
    }

    /// Computes the split of every node and returns the set of internal
    /// splits, the edge-length-free identifier of this tree's topology.
    ///
    /// Works in a single reverse-preorder sweep: a leaf's split is its own
    /// bit, and each node's split accumulates into its parent's, so every
    /// internal split is complete by the time the sweep reaches it. Splits
    /// of trivial (leaf) edges are computed but not returned.
    pub fn store_splits(&mut self) -> BTreeSet<Split> {
        let num_leaves = self.tree.num_leaves;
        for nd in &mut self.tree.nodes {
            nd.set_split(Some(Split::new(num_leaves)));
        }

        let mut splitset = BTreeSet::new();
        for i in (0..self.tree.preorder.len()).rev() {
            let nd = self.tree.preorder[i];
            if self.tree[nd].left_child().is_some() {
                if let Some(split) = self.tree[nd].split() {
                    splitset.insert(split.clone());
                }
            } else if let Some(number) = self.tree[nd].number() {
                if let Some(split) = self.tree[nd].split_mut() {
                    split.set_bit(number as usize);
                }
            }
            if let Some(parent) = self.tree[nd].parent() {
                if let Some(child_split) = self.tree[nd].split().cloned() {
                    if let Some(parent_split) = self.tree[parent].split_mut() {
                        parent_split.add(&child_split);
                    }
                }
            }
        }
        splitset
    }

    /// Rebuilds the preorder cache. Must be called after every structural
    /// change.
    pub(crate) fn refresh_preorder(&mut self) {
        self.tree.preorder.clear();
        let Some(root) = self.tree.root else {
            return;
        };
        // The preorder sequence does not include the root itself
        self.tree.preorder.reserve(self.tree.nodes.len().saturating_sub(1));

        let Some(first) = self.tree[root].left_child() else {
            return;
        };
        debug_assert!(self.tree[first].right_sib().is_none());

        let mut nd = Some(first);
        while let Some(i) = nd {
            self.tree.preorder.push(i);
            nd = find_next_preorder(&self.tree, i);
        }
    }

    /// Rebuilds the level-order cache. Must be called after every
    /// structural change.
    pub(crate) fn refresh_levelorder(&mut self) {
        self.tree.levelorder.clear();
        let Some(root) = self.tree.root else {
            return;
        };
        self.tree.levelorder.reserve(self.tree.nodes.len().saturating_sub(1));

        let Some(first) = self.tree[root].left_child() else {
            return;
        };
        debug_assert!(self.tree[first].right_sib().is_none());

        let mut queue = VecDeque::new();
        queue.push_back(first);
        while let Some(nd) = queue.pop_front() {
            self.tree.levelorder.push(nd);
            let mut child = self.tree[nd].left_child();
            while let Some(c) = child {
                queue.push_back(c);
                child = self.tree[c].right_sib();
            }
        }
    }

    /// Numbers internal nodes in reverse preorder starting at the leaf
    /// count, so children always carry lower numbers than their ancestors.
    /// A rooted tree's root (absent from the preorder sequence) is numbered
    /// last.
    pub(crate) fn renumber_internals(&mut self) {
        debug_assert!(!self.tree.preorder.is_empty());

        let mut curr = self.tree.num_leaves as u32;
        for i in (0..self.tree.preorder.len()).rev() {
            let nd = self.tree.preorder[i];
            if self.tree[nd].left_child().is_some() {
                self.tree[nd].set_number(Some(curr));
                curr += 1;
            }
        }

        if self.tree.is_rooted {
            if let Some(root) = self.tree.root {
                self.tree[root].set_number(Some(curr));
                curr += 1;
            }
        }

        self.tree.num_internals = curr as usize - self.tree.num_leaves;

        // With polytomies the description used fewer internals than the
        // pool holds; number the unused pool slots so every node has one
        for nd in &mut self.tree.nodes {
            if nd.number().is_none() {
                nd.set_number(Some(curr));
                curr += 1;
            }
        }
    }

    /// Makes `prospective_root` (a leaf) the new root by walking the path
    /// to the old root, at each step pruning the current node from its
    /// parent, grafting the parent on as its last child, and shifting each
    /// edge length one step toward the old root.
    fn reroot_at(&mut self, prospective_root: NodeIndex) {
        let tree = &mut self.tree;
        let mut a = prospective_root;
        let mut b = tree[a].parent();
        tree[a].set_parent(None);
        let mut prev_edge_length = tree[a].edge_length();

        while let Some(bi) = b {
            // Prune node a from b's child list
            let a_sib = tree[a].right_sib();
            if tree[bi].left_child() == Some(a) {
                tree[bi].set_left_child(a_sib);
            } else {
                let mut c = tree[bi].left_child();
                while let Some(ci) = c {
                    if tree[ci].right_sib() == Some(a) {
                        tree[ci].set_right_sib(a_sib);
                        break;
                    }
                    c = tree[ci].right_sib();
                }
            }
            tree[a].set_right_sib(None);

            // Graft node b on as a's last child (b stays hooked to its own
            // parent until the next iteration)
            match tree[a].left_child() {
                None => tree[a].set_left_child(Some(bi)),
                Some(mut ci) => {
                    while let Some(next) = tree[ci].right_sib() {
                        ci = next;
                    }
                    tree[ci].set_right_sib(Some(bi));
                }
            }

            // Rotate one step up the old root path
            let p = a;
            a = bi;
            b = tree[a].parent();
            tree[a].set_parent(Some(p));

            // Edge lengths shift along with the parent direction
            let tmp = tree[a].edge_length();
            tree[a].set_edge_length(prev_edge_length);
            prev_edge_length = tmp;
        }

        tree[prospective_root].set_edge_length(0.0);
        tree.root = Some(prospective_root);
        self.refresh_preorder();
        self.refresh_levelorder();
    }
}

/// Returns the node following `nd` in preorder, or `None` at the end.
fn find_next_preorder(tree: &Tree, nd: NodeIndex) -> Option<NodeIndex> {
    if let Some(child) = tree[nd].left_child() {
        return Some(child);
    }
    if let Some(sib) = tree[nd].right_sib() {
        return Some(sib);
    }
    // Climb until an ancestor has a right sibling
    let mut anc = tree[nd].parent();
    while let Some(a) = anc {
        if let Some(sib) = tree[a].right_sib() {
            return Some(sib);
        }
        anc = tree[a].parent();
    }
    None
}
