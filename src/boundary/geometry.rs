//! Typed geometry and the fixed longitude/latitude projection into the
//! tree's `[0,1]²` coordinate space.

use crate::envelope::Envelope;

/// A longitude/latitude coordinate pair, in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LngLat {
    pub x: f64,
    pub y: f64,
}

/// External geometry, as a small tagged variant rather than a
/// loosely-typed document — the extractor below walks it directly and
/// never parses anything resembling JSON.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Geometry {
    Point(LngLat),
    Polygon(Vec<LngLat>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// Visits every coordinate pair reachable from this geometry.
    fn for_each_point(&self, visit: &mut impl FnMut(LngLat)) {
        match self {
            Geometry::Point(p) => visit(*p),
            Geometry::Polygon(points) => points.iter().for_each(|p| visit(*p)),
            Geometry::GeometryCollection(geometries) => {
                geometries.iter().for_each(|g| g.for_each_point(visit))
            }
        }
    }

    /// The bounding envelope of this geometry, projected so every
    /// coordinate lands in `[0,1]²`: `u = x/360 + 0.5`, `v = y/180 + 0.5`.
    ///
    /// Returns `None` for an empty polygon or geometry collection, which
    /// has no points to bound.
    pub fn bounding_envelope(&self) -> Option<Envelope> {
        let mut min_u = f64::INFINITY;
        let mut min_v = f64::INFINITY;
        let mut max_u = f64::NEG_INFINITY;
        let mut max_v = f64::NEG_INFINITY;
        let mut any = false;

        self.for_each_point(&mut |p| {
            any = true;
            let (u, v) = project(p);
            min_u = min_u.min(u);
            min_v = min_v.min(v);
            max_u = max_u.max(u);
            max_v = max_v.max(v);
        });

        if !any {
            return None;
        }
        Some(Envelope::new_unchecked(min_u, min_v, max_u, max_v))
    }
}

/// Forward projection: `(lng, lat)` in degrees to `[0,1]²`.
fn project(p: LngLat) -> (f64, f64) {
    (p.x / 360.0 + 0.5, p.y / 180.0 + 0.5)
}

/// Inverse projection: `[0,1]²` back to `(lng, lat)` in degrees, used when
/// rendering a structural dump for an external observer.
pub(crate) fn unproject(u: f64, v: f64) -> LngLat {
    LngLat {
        x: (u - 0.5) * 360.0,
        y: (v - 0.5) * 180.0,
    }
}
