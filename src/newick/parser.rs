//! Token-class grammar for building a [Tree] from a Newick description.
//!
//! The parser walks the description character by character, tracking which
//! token class was seen last; each token class is only legal after certain
//! predecessors, and any violation raises a [TreeError] naming the offending
//! character position. Structure is built with a "current node" cursor over
//! the pre-sized node pool: `(` descends to a freshly allocated left child,
//! `,` allocates a right sibling at the same level, and `)` ascends to the
//! parent.
//!
//! Bracketed `[...]` comments are stripped before tokenizing, and a
//! lightweight pre-scan counts leaf tokens so the pool can be allocated
//! with its final size before a single node is linked.

use crate::error::TreeError;
use crate::model::tree::{NodeIndex, Tree};
use std::collections::BTreeSet;

// Token classes; `previous` constrains which token may legally follow.
const TOK_LPAREN: u8 = 0x01;
const TOK_RPAREN: u8 = 0x02;
const TOK_COLON: u8 = 0x04;
const TOK_COMMA: u8 = 0x08;
const TOK_NAME: u8 = 0x10;
const TOK_EDGELEN: u8 = 0x20;

const LPAREN_VALID: u8 = TOK_LPAREN | TOK_COMMA;
const RPAREN_VALID: u8 = TOK_RPAREN | TOK_NAME | TOK_EDGELEN;
const COMMA_VALID: u8 = TOK_RPAREN | TOK_NAME | TOK_EDGELEN;
const COLON_VALID: u8 = TOK_RPAREN | TOK_NAME;
const NAME_VALID: u8 = TOK_LPAREN | TOK_RPAREN | TOK_COMMA;

/// Builds a fully-linked [Tree] from a Newick description.
///
/// On success the returned tree has its node pool, links, leaf numbers, and
/// edge lengths in place; traversal caches and internal numbering are still
/// the caller's responsibility. On any failure the partially built tree is
/// dropped, so no caller ever observes a half-built structure.
///
/// # Arguments
/// * `description` - The Newick string (terminal `;` optional)
/// * `rooted` - Whether the description is of a rooted tree
/// * `allow_polytomies` - Whether nodes may have more than two children
pub(crate) fn build_tree(
    description: &str,
    rooted: bool,
    allow_polytomies: bool,
) -> Result<Tree, TreeError> {
    let commentless = strip_comments(description);

    // Pre-size the node pool; indices stay stable from here on
    let num_leaves = count_leaves(&commentless);
    if num_leaves < 4 {
        return Err(TreeError::TooFewLeaves(num_leaves));
    }
    let capacity = 2 * num_leaves - if rooted { 0 } else { 2 };
    let mut tree = Tree::with_pool(capacity, rooted, num_leaves);

    // Leaf numbers seen so far; each may be used only once
    let mut used: BTreeSet<u32> = BTreeSet::new();

    let mut curr_node_index: NodeIndex = 0;
    tree.root = Some(0);
    let mut nd: NodeIndex = 0;
    if rooted {
        // A rooted description hangs off a single child of the root
        curr_node_index = 1;
        tree[1].set_parent(Some(0));
        tree[0].set_left_child(Some(1));
        nd = 1;
    }

    let mut previous = TOK_LPAREN;

    // Set while reading a node name surrounded by single quotes
    let mut inside_quoted_name = false;
    // Set while reading a node name without quotes
    let mut inside_unquoted_name = false;
    // Set while reading an edge length
    let mut inside_edge_length = false;

    let mut name_buf = String::new();
    let mut edge_length_buf = String::new();
    let mut node_name_position = 0usize;
    let mut edge_length_position = 0usize;

    for (i, ch) in commentless.chars().enumerate() {
        let position = i + 1;

        if inside_quoted_name {
            if ch == '\'' {
                inside_quoted_name = false;
                node_name_position = 0;
                tree[nd].set_name(std::mem::take(&mut name_buf));
                if tree[nd].left_child().is_none() {
                    extract_node_number(&mut tree, nd, &mut used)?;
                }
                previous = TOK_NAME;
            } else if ch.is_whitespace() {
                name_buf.push(' ');
            } else {
                name_buf.push(ch);
            }
            continue;
        } else if inside_unquoted_name {
            if ch == '(' {
                return Err(TreeError::ParenInsideName(node_name_position));
            }

            if ch.is_whitespace() || ch == ':' || ch == ',' || ch == ')' || ch == ';' {
                inside_unquoted_name = false;

                // A name is only expected after a left paren, a comma,
                // or a right paren
                if previous & NAME_VALID == 0 {
                    return Err(TreeError::UnexpectedToken {
                        token: "node name",
                        position: node_name_position,
                    });
                }

                tree[nd].set_name(std::mem::take(&mut name_buf));
                if tree[nd].left_child().is_none() {
                    extract_node_number(&mut tree, nd, &mut used)?;
                }
                previous = TOK_NAME;
                // fall through: the terminator still needs handling below
            } else {
                name_buf.push(ch);
                continue;
            }
        } else if inside_edge_length {
            if ch == ',' || ch == ')' || ch == ';' || ch.is_whitespace() {
                inside_edge_length = false;
                edge_length_position = 0;
                extract_edge_length(&mut tree, nd, &edge_length_buf)?;
                edge_length_buf.clear();
                previous = TOK_EDGELEN;
                // fall through: the terminator still needs handling below
            } else {
                // Floating point and scientific notation characters only
                let valid = ch == 'e'
                    || ch == 'E'
                    || ch == '.'
                    || ch == '-'
                    || ch == '+'
                    || ch.is_ascii_digit();
                if !valid {
                    return Err(TreeError::InvalidEdgeLengthChar { ch, position });
                }
                edge_length_buf.push(ch);
                continue;
            }
        }

        if ch.is_whitespace() {
            continue;
        }

        match ch {
            ';' => {}

            ')' => {
                // At the bottommost node there is no group left to close
                let Some(parent) = tree[nd].parent() else {
                    return Err(TreeError::TooManyRightParens(position));
                };
                if previous & RPAREN_VALID == 0 {
                    return Err(TreeError::UnexpectedToken {
                        token: "right parenthesis",
                        position,
                    });
                }
                // Go down a level
                nd = parent;
                if tree[nd].left_child().and_then(|c| tree[c].right_sib()).is_none() {
                    return Err(TreeError::SingleChildGroup(position));
                }
                previous = TOK_RPAREN;
            }

            ':' => {
                if previous & COLON_VALID == 0 {
                    return Err(TreeError::UnexpectedToken {
                        token: "colon",
                        position,
                    });
                }
                previous = TOK_COLON;
            }

            ',' => {
                if tree[nd].parent().is_none() || previous & COMMA_VALID == 0 {
                    return Err(TreeError::UnexpectedToken {
                        token: "comma",
                        position,
                    });
                }

                if !can_have_sibling(&tree, nd, rooted, allow_polytomies) {
                    return Err(TreeError::PolytomyProhibited(description.to_string()));
                }

                // Create the sibling
                curr_node_index += 1;
                if curr_node_index == tree.nodes.len() {
                    return Err(TreeError::TooManyNodes {
                        allocated: tree.nodes.len(),
                        leaves: tree.num_leaves(),
                    });
                }
                let parent = tree[nd].parent();
                tree[nd].set_right_sib(Some(curr_node_index));
                tree[curr_node_index].set_parent(parent);
                nd = curr_node_index;
                previous = TOK_COMMA;
            }

            '(' => {
                if previous & LPAREN_VALID == 0 {
                    return Err(TreeError::UnexpectedToken {
                        token: "left parenthesis",
                        position,
                    });
                }
                // Create a new node above and to the left of the current node
                debug_assert!(tree[nd].left_child().is_none());
                curr_node_index += 1;
                if curr_node_index == tree.nodes.len() {
                    return Err(TreeError::TooManyNodes {
                        allocated: tree.nodes.len(),
                        leaves: tree.num_leaves(),
                    });
                }
                tree[nd].set_left_child(Some(curr_node_index));
                tree[curr_node_index].set_parent(Some(nd));
                nd = curr_node_index;
                previous = TOK_LPAREN;
            }

            '\'' => {
                // An apostrophe always starts a node name (names do not
                // have to be quoted, though)
                if previous & NAME_VALID == 0 {
                    return Err(TreeError::UnexpectedToken {
                        token: "node name",
                        position,
                    });
                }
                name_buf.clear();
                inside_quoted_name = true;
                node_name_position = position;
            }

            _ => {
                // Any other character begins an edge length (after a colon)
                // or an unquoted node name
                if previous == TOK_COLON {
                    inside_edge_length = true;
                    edge_length_position = position;
                    edge_length_buf.clear();
                    edge_length_buf.push(ch);
                } else {
                    name_buf.clear();
                    name_buf.push(ch);
                    inside_unquoted_name = true;
                    node_name_position = position;
                }
            }
        }
    }

    if inside_unquoted_name || inside_quoted_name {
        return Err(TreeError::UnterminatedName(node_name_position));
    }
    if inside_edge_length {
        return Err(TreeError::UnterminatedEdgeLength(edge_length_position));
    }

    Ok(tree)
}

/// Interprets a leaf's name as a 1-based leaf number and stores it 0-based.
///
/// Numbers must lie in `1..=num_leaves`, and each may be used only once
/// across the whole description. The upper bound keeps the stored 0-based
/// number a valid bit index for this tree's splits.
fn extract_node_number(
    tree: &mut Tree,
    nd: NodeIndex,
    used: &mut BTreeSet<u32>,
) -> Result<(), TreeError> {
    let name = tree[nd].name().to_string();
    let x: u32 = name
        .trim()
        .parse()
        .map_err(|_| TreeError::BadLeafName(name.clone()))?;
    if x == 0 {
        return Err(TreeError::BadLeafName(name));
    }
    if x as usize > tree.num_leaves() {
        return Err(TreeError::LeafNumberOutOfRange {
            number: x,
            num_leaves: tree.num_leaves(),
        });
    }
    if !used.insert(x) {
        return Err(TreeError::DuplicateLeafNumber(x));
    }
    tree[nd].set_number(Some(x - 1));
    Ok(())
}

/// Parses an edge length string and stores it (clamped) on the node.
fn extract_edge_length(tree: &mut Tree, nd: NodeIndex, s: &str) -> Result<(), TreeError> {
    let d: f64 = s.parse().map_err(|_| TreeError::BadEdgeLength(s.to_string()))?;
    tree[nd].set_edge_length(d);
    Ok(())
}

/// Whether `nd` may gain a right sibling under the polytomy policy.
///
/// Without polytomies a node may only gain a sibling while it is the first
/// child of its parent — except at the root of an unrooted description,
/// which is allowed a third child (the root of a rooted description keeps
/// exactly two).
fn can_have_sibling(tree: &Tree, nd: NodeIndex, rooted: bool, allow_polytomies: bool) -> bool {
    let Some(parent) = tree[nd].parent() else {
        // The root itself can never gain a sibling
        return false;
    };

    if allow_polytomies {
        return true;
    }

    let first_child = tree[parent].left_child();
    if first_child == Some(nd) {
        return true;
    }

    if tree[parent].parent().is_some() {
        // Giving a sibling to a sibling of nd, below a non-root parent
        false
    } else {
        let second_child = first_child.and_then(|c| tree[c].right_sib());
        !rooted && second_child == Some(nd)
    }
}

/// Removes bracketed `[...]` comments. An unmatched `[` is left in place.
fn strip_comments(newick: &str) -> String {
    let mut out = String::with_capacity(newick.len());
    let mut rest = newick;
    while let Some(open) = rest.find('[') {
        match rest[open..].find(']') {
            Some(close) => {
                out.push_str(&rest[..open]);
                rest = &rest[open + close + 1..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out
}

/// Counts leaf tokens (bare or quoted tokens directly following `(` or `,`)
/// to size the node pool before parsing.
///
/// This scan is deliberately independent of the main lexer; edge cases may
/// diverge, in which case the pool-capacity check during parsing catches an
/// undercount.
fn count_leaves(newick: &str) -> usize {
    let bytes = newick.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'(' || bytes[i] == b',' {
            let mut j = i + 1;
            while j < bytes.len() && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j < bytes.len() {
                if bytes[j] == b'\'' {
                    // Quoted token; only count it if the quote closes
                    if let Some(close) = bytes[j + 1..].iter().position(|&b| b == b'\'') {
                        count += 1;
                        i = j + 1 + close + 1;
                        continue;
                    }
                } else if !matches!(bytes[j], b'(' | b')' | b',' | b':' | b';') {
                    count += 1;
                    while j < bytes.len()
                        && !bytes[j].is_ascii_whitespace()
                        && !matches!(bytes[j], b'(' | b')' | b',' | b':' | b';')
                    {
                        j += 1;
                    }
                    i = j;
                    continue;
                }
            }
        }
        i += 1;
    }
    count
}
