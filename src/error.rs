//! The core's narrow, matchable error surface.
//!
//! Per the error handling design, almost everything the tree does is a
//! total operation: the only rejectable input is a malformed envelope.
//! Configuration below the minimum fan-out is clamped rather than
//! rejected, and removing an absent payload is a silent no-op rather than
//! an error — neither has a variant here.

/// An error produced by a fallible operation on the tree.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum RTreeError {
    /// The caller supplied a rectangle with `x1 > x2` or `y1 > y2`.
    ///
    /// The call that triggered this is rejected outright; the tree is left
    /// unmodified.
    #[error("invalid envelope: ({x1}, {y1}) .. ({x2}, {y2}) is not a well-formed rectangle")]
    InvalidEnvelope { x1: f64, y1: f64, x2: f64, y2: f64 },
}
