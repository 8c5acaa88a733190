//! Serializing a [Tree] back to Newick form.

use crate::model::node::Node;
use crate::model::tree::{NodeIndex, Tree};
use std::fmt::Write as _;

/// Serializes `tree` as a Newick description, terminated by `;`.
///
/// Edge lengths are written in fixed-point notation with `precision`
/// digits after the decimal point. Leaves are labeled by their stored name
/// when `use_names` is set, and otherwise by their 1-based leaf number.
///
/// An unrooted tree is written with its root leaf folded into the first
/// group, carrying that group's edge length, so that parsing the output
/// unrooted reproduces the same topology and edge lengths.
///
/// The tree's preorder cache must be current; trees obtained from
/// [TreeManip](crate::manip::TreeManip) always satisfy this.
///
/// # Arguments
/// * `tree` - The tree to serialize
/// * `precision` - Digits after the decimal point for edge lengths
/// * `use_names` - Label leaves by name rather than by number
pub fn write_newick(tree: &Tree, precision: usize, use_names: bool) -> String {
    let mut newick = String::new();
    let mut node_stack: Vec<NodeIndex> = Vec::new();

    // For unrooted trees the root is a leaf; it is emitted first, inside
    // the outermost group, instead of being written as the enclosing level
    let mut root_tip: Option<NodeIndex> = if tree.is_rooted() {
        None
    } else {
        tree.root_index()
    };

    for &nd in tree.preorder() {
        let node = &tree[nd];
        if node.left_child().is_some() {
            newick.push('(');
            node_stack.push(nd);
            if let Some(tip) = root_tip.take() {
                push_leaf(&mut newick, &tree[tip], node.edge_length(), precision, use_names);
                newick.push(',');
            }
        } else {
            push_leaf(&mut newick, node, node.edge_length(), precision, use_names);
            if node.right_sib().is_some() {
                newick.push(',');
            } else {
                // This leaf closes one or more groups
                let mut popped = node_stack.last().copied();
                while let Some(p) = popped {
                    if tree[p].right_sib().is_some() {
                        break;
                    }
                    node_stack.pop();
                    if node_stack.is_empty() {
                        newick.push(')');
                        popped = None;
                    } else {
                        push_close(&mut newick, tree[p].edge_length(), precision);
                        popped = node_stack.last().copied();
                    }
                }
                if let Some(p) = popped {
                    node_stack.pop();
                    push_close(&mut newick, tree[p].edge_length(), precision);
                    newick.push(',');
                }
            }
        }
    }

    newick.push(';');
    newick
}

fn push_leaf(newick: &mut String, node: &Node, edge_length: f64, precision: usize, use_names: bool) {
    if use_names {
        let _ = write!(newick, "{}:{:.precision$}", node.name(), edge_length);
    } else {
        let number = node.number().map_or(0, |n| n + 1);
        let _ = write!(newick, "{}:{:.precision$}", number, edge_length);
    }
}

fn push_close(newick: &mut String, edge_length: f64, precision: usize) {
    let _ = write!(newick, "):{:.precision$}", edge_length);
}
