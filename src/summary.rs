//! Collecting tree samples and clustering them by topology.

use crate::error::TreeError;
use crate::manip::TreeManip;
use crate::model::split::Split;
use crate::model::tree::Tree;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write as _;

// =#========================================================================#=
// TREE SUMMARY
// =#========================================================================#=
/// Accumulates a sample of trees and groups them by topology.
///
/// Each stored tree is identified by its set of internal splits, which is
/// independent of edge lengths and, thanks to canonical rerooting during
/// construction, of how the description happened to be rooted. Trees with
/// equal split sets land in the same topology group. Groups are numbered
/// in the order their topology was first seen.
///
/// The original Newick descriptions are kept verbatim, so any stored tree
/// can be rebuilt on demand.
#[derive(Debug, Default)]
pub struct TreeSummary {
    newicks: Vec<String>,
    topologies: Vec<Vec<usize>>,
    index: BTreeMap<BTreeSet<Split>, usize>,
}

impl TreeSummary {
    /// Creates an empty summary.
    pub fn new() -> Self {
        TreeSummary::default()
    }

    /// Reads tree descriptions into the summary, clustering as it goes.
    ///
    /// The first `skip` descriptions are discarded (burn-in). Every
    /// remaining description is stored verbatim, then parsed unrooted with
    /// polytomies prohibited and filed under its topology.
    ///
    /// On error the summary keeps the trees read so far; the failing
    /// description is not stored.
    ///
    /// # Arguments
    /// * `descriptions` - Newick descriptions, one tree each
    /// * `skip` - Number of leading descriptions to discard
    pub fn read_trees<'a, I>(&mut self, descriptions: I, skip: usize) -> Result<(), TreeError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut tm = TreeManip::new();
        for description in descriptions.into_iter().skip(skip) {
            self.newicks.push(description.to_string());
            let tree_index = self.newicks.len() - 1;

            let result = tm.build_from_newick(description, false, false);
            if let Err(e) = result {
                self.newicks.pop();
                return Err(e);
            }
            let splitset = tm.store_splits();

            match self.index.get(&splitset) {
                Some(&topology) => self.topologies[topology].push(tree_index),
                None => {
                    let topology = self.topologies.len();
                    self.topologies.push(vec![tree_index]);
                    self.index.insert(splitset, topology);
                }
            }
            log::debug!(
                "stored tree {} under topology {}",
                tree_index,
                self.topologies.len()
            );
        }
        Ok(())
    }

    /// Returns the number of stored trees.
    pub fn num_trees(&self) -> usize {
        self.newicks.len()
    }

    /// Returns the stored Newick description of tree `index`.
    pub fn newick(&self, index: usize) -> Result<&str, TreeError> {
        self.newicks
            .get(index)
            .map(String::as_str)
            .ok_or(TreeError::TreeIndexOutOfRange {
                index,
                len: self.newicks.len(),
            })
    }

    /// Rebuilds tree `index` from its stored description (unrooted,
    /// polytomies prohibited).
    pub fn tree(&self, index: usize) -> Result<Tree, TreeError> {
        let description = self.newick(index)?;
        let mut tm = TreeManip::new();
        tm.build_from_newick(description, false, false)?;
        Ok(tm.into_tree())
    }

    /// Returns the tree indices of each topology group, in first-seen
    /// order.
    pub fn topologies(&self) -> &[Vec<usize>] {
        &self.topologies
    }

    /// Renders a report: every topology group with its member trees,
    /// followed by a frequency table sorted by sample count (descending;
    /// ties keep first-seen order).
    pub fn summarize(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Read {} trees", self.newicks.len());

        let mut sorted: Vec<(usize, usize)> = Vec::with_capacity(self.topologies.len());
        for (t, trees) in self.topologies.iter().enumerate() {
            sorted.push((trees.len(), t + 1));
            let _ = writeln!(out, "Topology {} seen in these {} trees:", t + 1, trees.len());
            let indices: Vec<String> = trees.iter().map(|i| i.to_string()).collect();
            let _ = writeln!(out, " {}", indices.join(" "));
        }

        // Stable sort, so equally frequent topologies stay in first-seen
        // order
        sorted.sort_by(|a, b| b.0.cmp(&a.0));
        let _ = writeln!(out, "\nTopologies sorted by sample frequency:");
        let _ = writeln!(out, "{:^20} {:^20}", "topology", "frequency");
        for (count, topology) in sorted {
            let _ = writeln!(out, "{:^20} {:^20}", topology, count);
        }
        out
    }

    /// Forgets all stored trees and topology groups.
    pub fn clear(&mut self) {
        self.newicks.clear();
        self.topologies.clear();
        self.index.clear();
    }
}
