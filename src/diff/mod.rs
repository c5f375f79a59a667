//! Unified-diff handling.
//!
//! Turns the per-file `patch` text from the pull-request files listing
//! into destination-file line coordinates and the set of lines a review
//! comment may legally attach to.

pub mod parser;

pub use parser::parse_patch;
