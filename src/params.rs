//! Fan-out configuration: the `maxEntries`/`minEntries` pair every node in
//! the tree must respect.

/// Runtime configuration for an [`RTree`](crate::RTree): the fan-out
/// bounds every non-root node must respect.
///
/// Unlike the compile-time parameters this crate's ancestor uses, `Params`
/// is a plain runtime value — the tree's shape is data, not part of its
/// type, since `maxEntries` is a constructor argument rather than a type
/// parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Params {
    max_entries: usize,
    min_entries: usize,
}

/// The default fan-out.
pub const DEFAULT_MAX_ENTRIES: usize = 9;

/// The smallest `maxEntries` the tree will honor. A smaller request is
/// clamped up to this rather than rejected.
const MIN_MAX_ENTRIES: usize = 4;

impl Default for Params {
    fn default() -> Self {
        Params::new(DEFAULT_MAX_ENTRIES)
    }
}

impl Params {
    /// Builds a configuration from a requested `maxEntries`, clamping it up
    /// to 4 if it's smaller and deriving `minEntries = max(2, ceil(0.4 *
    /// maxEntries))`.
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(MIN_MAX_ENTRIES);
        let min_entries = ((max_entries * 2).div_ceil(5)).max(2);
        Params {
            max_entries,
            min_entries,
        }
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    pub fn min_entries(&self) -> usize {
        self.min_entries
    }
}
