//! Reading and writing trees in Newick format.
//!
//! Parsing lives in [parser] and is exposed to the rest of the crate
//! through [TreeManip](crate::manip::TreeManip), which finishes the built
//! tree (canonical rerooting, internal numbering, traversal caches) before
//! handing it out. Serialization is a standalone function over a finished
//! tree.

pub(crate) mod parser;
mod writer;

pub use writer::write_newick;
