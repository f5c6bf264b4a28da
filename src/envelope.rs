//! Axis-aligned bounding rectangles and the pure geometric operations the
//! tree is built from.

use crate::error::RTreeError;

/// An axis-aligned rectangle in the plane, given as two corners.
///
/// `Envelope` is the only geometry type the core understands: every entry
/// stored in the tree, and every node's minimum bounding rectangle, is one
/// of these. Unlike the n-dimensional, generic-over-point-type envelope
/// this crate is descended from, `Envelope` is a concrete, non-generic 2D
/// rectangle of `f64` coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Envelope {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl Envelope {
    /// Creates an envelope from two corners, validating that the result is
    /// well-formed (`x1 <= x2 && y1 <= y2`).
    ///
    /// Returns [`RTreeError::InvalidEnvelope`] rather than silently swapping
    /// coordinates: a caller that passes inverted bounds almost certainly
    /// made a mistake, and should see it rather than have it corrected away.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Result<Self, RTreeError> {
        if x1 > x2 || y1 > y2 {
            return Err(RTreeError::InvalidEnvelope { x1, y1, x2, y2 });
        }
        Ok(Envelope { x1, y1, x2, y2 })
    }

    /// Creates an envelope without checking the corner ordering.
    ///
    /// Used internally once an envelope is already known to be valid (e.g.
    /// the merge of two valid envelopes can never be invalid).
    pub(crate) fn new_unchecked(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        debug_assert!(x1 <= x2 && y1 <= y2);
        Envelope { x1, y1, x2, y2 }
    }

    /// The empty sentinel envelope: `(+inf, +inf, -inf, -inf)`.
    ///
    /// The first [`Envelope::extend`] call on this value produces exactly
    /// the covering rectangle of its argument. `area`/`margin` must not be
    /// read before at least one `extend`.
    pub fn new_empty() -> Self {
        Envelope {
            x1: f64::INFINITY,
            y1: f64::INFINITY,
            x2: f64::NEG_INFINITY,
            y2: f64::NEG_INFINITY,
        }
    }

    pub fn x1(&self) -> f64 {
        self.x1
    }

    pub fn y1(&self) -> f64 {
        self.y1
    }

    pub fn x2(&self) -> f64 {
        self.x2
    }

    pub fn y2(&self) -> f64 {
        self.y2
    }

    /// The rectangle's area. Undefined (and possibly negative) on an
    /// empty/never-extended envelope.
    pub fn area(&self) -> f64 {
        (self.x2 - self.x1) * (self.y2 - self.y1)
    }

    /// Half the rectangle's perimeter: `(x2-x1) + (y2-y1)`.
    pub fn margin(&self) -> f64 {
        (self.x2 - self.x1) + (self.y2 - self.y1)
    }

    /// Extends `self` in place to the minimum bounding rectangle of `self`
    /// and `other`.
    pub fn extend(&mut self, other: &Envelope) {
        self.x1 = self.x1.min(other.x1);
        self.y1 = self.y1.min(other.y1);
        self.x2 = self.x2.max(other.x2);
        self.y2 = self.y2.max(other.y2);
    }

    /// The minimum bounding rectangle of `self` and `other`, without
    /// mutating either.
    pub fn merged(&self, other: &Envelope) -> Envelope {
        let mut result = *self;
        result.extend(other);
        result
    }

    /// Closed intersection test: rectangles that only touch at an edge or
    /// corner count as intersecting.
    pub fn intersects(&self, other: &Envelope) -> bool {
        other.x1 <= self.x2 && other.y1 <= self.y2 && other.x2 >= self.x1 && other.y2 >= self.y1
    }

    /// True if `other` is fully contained within `self`.
    pub fn contains(&self, other: &Envelope) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }

    /// The area of the minimum bounding rectangle of `self` and `other`,
    /// computed directly without constructing the merged envelope.
    pub fn enlarged_area(&self, other: &Envelope) -> f64 {
        let x1 = self.x1.min(other.x1);
        let y1 = self.y1.min(other.y1);
        let x2 = self.x2.max(other.x2);
        let y2 = self.y2.max(other.y2);
        (x2 - x1) * (y2 - y1)
    }

    /// The area of the intersection of two envelopes, or 0 if they don't
    /// overlap.
    pub fn intersection_area(&self, other: &Envelope) -> f64 {
        let dx = (self.x2.min(other.x2) - self.x1.max(other.x1)).max(0.0);
        let dy = (self.y2.min(other.y2) - self.y1.max(other.y1)).max(0.0);
        dx * dy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_bounds() {
        assert!(Envelope::new(1.0, 0.0, 0.0, 1.0).is_err());
        assert!(Envelope::new(0.0, 1.0, 1.0, 0.0).is_err());
        assert!(Envelope::new(0.0, 0.0, 1.0, 1.0).is_ok());
    }

    #[test]
    fn extend_from_empty_produces_argument() {
        let mut empty = Envelope::new_empty();
        let rect = Envelope::new(1.0, 2.0, 3.0, 4.0).unwrap();
        empty.extend(&rect);
        assert_eq!(empty, rect);
    }

    #[test]
    fn area_and_margin() {
        let rect = Envelope::new(0.0, 0.0, 2.0, 3.0).unwrap();
        assert_eq!(rect.area(), 6.0);
        assert_eq!(rect.margin(), 5.0);
    }

    #[test]
    fn intersects_is_closed() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Envelope::new(1.0, 1.0, 2.0, 2.0).unwrap();
        assert!(a.intersects(&b));
        let c = Envelope::new(1.1, 1.1, 2.0, 2.0).unwrap();
        assert!(!a.intersects(&c));
    }

    #[test]
    fn contains_is_reflexive_and_strict() {
        let a = Envelope::new(0.0, 0.0, 4.0, 4.0).unwrap();
        let b = Envelope::new(1.0, 1.0, 2.0, 2.0).unwrap();
        assert!(a.contains(&a));
        assert!(a.contains(&b));
        assert!(!b.contains(&a));
    }

    #[test]
    fn enlarged_area_matches_merged_area() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Envelope::new(2.0, 2.0, 3.0, 3.0).unwrap();
        assert_eq!(a.enlarged_area(&b), a.merged(&b).area());
    }

    #[test]
    fn intersection_area_of_disjoint_rects_is_zero() {
        let a = Envelope::new(0.0, 0.0, 1.0, 1.0).unwrap();
        let b = Envelope::new(2.0, 2.0, 3.0, 3.0).unwrap();
        assert_eq!(a.intersection_area(&b), 0.0);
    }

    #[test]
    fn intersection_area_of_overlapping_rects() {
        let a = Envelope::new(0.0, 0.0, 2.0, 2.0).unwrap();
        let b = Envelope::new(1.0, 1.0, 3.0, 3.0).unwrap();
        assert_eq!(a.intersection_area(&b), 1.0);
    }
}
