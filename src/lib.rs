//! A two-dimensional R*-tree spatial index with Overlap-Minimizing
//! Top-down (OMT) bulk loading.
//!
//! The tree maps axis-aligned rectangles ([`Envelope`]) to opaque
//! payloads, supporting window search, incremental insertion, bulk
//! loading, and removal by payload identity. [`RTree`] is the entry
//! point; [`boundary`] is a small adapter layer for callers working with
//! typed geometry rather than raw coordinates.

mod algorithm;
pub mod boundary;
mod envelope;
mod error;
mod node;
mod params;
mod rtree;

pub use envelope::Envelope;
pub use error::RTreeError;
pub use node::{Entry, ParentNode, RNode};
pub use params::{Params, DEFAULT_MAX_ENTRIES};
pub use rtree::RTree;
