//! HTML decomposition and recombination for rendered documents.
//!
//! Renderer output is trusted but not guaranteed well-formed, so everything
//! here goes through `scraper`'s fault-tolerant parser: parsing always
//! yields a tree, and missing pieces become empty fragments rather than
//! errors. The parsed tree is never mutated in place; removals and
//! attribute rewrites are expressed as a serialization pass producing a
//! fresh string.

pub mod fragments;
pub mod merge;
pub mod serialize;
