//! A self-contained adapter between loosely-typed external geometry and
//! the core tree: extracting envelopes from typed geometry values,
//! projecting to and from the tree's `[0,1]²` coordinate space, rendering
//! structural dumps for observers, and hosting many independent trees
//! behind per-session locks.
//!
//! None of this is a network listener or a wire format — it is the glue
//! a real hosting process would put around [`crate::RTree`], kept in the
//! core crate because both halves are small and neither is useful alone.

mod dump;
mod geometry;
mod session;

pub use dump::{dump, NodeDump};
pub use geometry::{Geometry, LngLat};
pub use session::Sessions;
