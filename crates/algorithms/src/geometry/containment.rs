//! Point-in-polygon tests
//!
//! Crossing-number (ray casting) test in the (lon, lat) plane: a horizontal
//! ray from the query point crosses the ring an odd number of times iff the
//! point is inside. Multi-part regions are the OR of their parts. Interior
//! rings are not consulted; country data carries disjoint exterior shapes.

use geo::{Coord, LineString, Polygon};
use quakemap_core::{Location, Region};

use super::BoundingBox;

/// True if `loc` lies inside any part of `region`.
pub fn contains(region: &Region, loc: &Location) -> bool {
    region.parts().iter().any(|part| polygon_contains(part, loc))
}

/// True if `loc` lies inside the exterior ring of `polygon`.
pub fn polygon_contains(polygon: &Polygon<f64>, loc: &Location) -> bool {
    ring_contains(polygon.exterior(), loc.lon, loc.lat)
}

/// Crossing-number test against a single ring.
///
/// The ring may or may not repeat its first vertex at the end. Rings with
/// fewer than three vertices contain nothing.
pub fn ring_contains(ring: &LineString<f64>, x: f64, y: f64) -> bool {
    let mut vertices: &[Coord<f64>] = &ring.0;
    if vertices.len() > 1 && vertices.first() == vertices.last() {
        vertices = &vertices[..vertices.len() - 1];
    }
    if vertices.len() < 3 {
        return false;
    }

    let n = vertices.len();
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[j];
        // Half-open rule on y so a vertex shared by two edges counts once.
        if (a.y > y) != (b.y > y) {
            let x_cross = a.x + (y - a.y) * (b.x - a.x) / (b.y - a.y);
            if x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// A region with its precomputed bounding box.
///
/// The box only rejects points early; `contains` answers exactly as the
/// plain [`contains`] function does.
#[derive(Debug, Clone)]
pub struct IndexedRegion<'a> {
    pub region: &'a Region,
    bbox: Option<BoundingBox>,
}

impl<'a> IndexedRegion<'a> {
    pub fn new(region: &'a Region) -> Self {
        Self {
            region,
            bbox: BoundingBox::of(&region.geometry),
        }
    }

    pub fn bbox(&self) -> Option<BoundingBox> {
        self.bbox
    }

    pub fn contains(&self, loc: &Location) -> bool {
        match self.bbox {
            Some(bb) if bb.contains_location(loc) => contains(self.region, loc),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::MultiPolygon;

    fn square(x0: f64, y0: f64, size: f64) -> Polygon<f64> {
        Polygon::new(
            LineString::from(vec![
                (x0, y0),
                (x0 + size, y0),
                (x0 + size, y0 + size),
                (x0, y0 + size),
                (x0, y0),
            ]),
            vec![],
        )
    }

    /// Locations are (lat, lon), polygons (lon, lat).
    fn at(x: f64, y: f64) -> Location {
        Location::new(y, x)
    }

    #[test]
    fn test_convex_interior_points() {
        let region = Region::from_polygon("Square", square(0.0, 0.0, 10.0));
        for i in 1..10 {
            for j in 1..10 {
                let p = at(i as f64 + 0.25, j as f64 - 0.5);
                assert!(contains(&region, &p), "expected inside: {}", p);
            }
        }
    }

    #[test]
    fn test_points_outside_bbox() {
        let region = Region::from_polygon("Square", square(0.0, 0.0, 10.0));
        for p in [at(-0.1, 5.0), at(10.1, 5.0), at(5.0, -0.1), at(5.0, 10.1), at(50.0, 50.0)] {
            assert!(!contains(&region, &p), "expected outside: {}", p);
        }
    }

    #[test]
    fn test_concave_polygon() {
        // L-shape: the notch at the top right is outside
        let l_shape = Polygon::new(
            LineString::from(vec![
                (0.0, 0.0),
                (10.0, 0.0),
                (10.0, 5.0),
                (5.0, 5.0),
                (5.0, 10.0),
                (0.0, 10.0),
                (0.0, 0.0),
            ]),
            vec![],
        );
        let region = Region::from_polygon("L", l_shape);
        assert!(contains(&region, &at(2.0, 8.0)));
        assert!(contains(&region, &at(8.0, 2.0)));
        assert!(!contains(&region, &at(8.0, 8.0)));
    }

    #[test]
    fn test_open_ring_is_closed_implicitly() {
        let open = LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0)]);
        assert!(ring_contains(&open, 2.0, 2.0));
        assert!(!ring_contains(&open, 5.0, 2.0));
    }

    #[test]
    fn test_degenerate_ring_contains_nothing() {
        let two = LineString::from(vec![(0.0, 0.0), (4.0, 4.0), (0.0, 0.0)]);
        assert!(!ring_contains(&two, 2.0, 2.0));
        let empty = LineString::<f64>::new(vec![]);
        assert!(!ring_contains(&empty, 0.0, 0.0));

        let region = Region::from_polygon("Line", Polygon::new(two, vec![]));
        assert!(!contains(&region, &at(2.0, 2.0)));
    }

    #[test]
    fn test_multipart_is_or_of_parts() {
        let region = Region::new(
            "Islands",
            MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)]),
        );
        assert!(contains(&region, &at(1.0, 1.0)));
        assert!(contains(&region, &at(11.0, 11.0)));
        assert!(!contains(&region, &at(5.0, 5.0)));
        assert!(!contains(&region, &at(-1.0, 11.0)));
    }

    #[test]
    fn test_holes_are_ignored() {
        let with_hole = Polygon::new(
            square(0.0, 0.0, 10.0).exterior().clone(),
            vec![square(4.0, 4.0, 2.0).exterior().clone()],
        );
        let region = Region::from_polygon("Donut", with_hole);
        assert!(contains(&region, &at(5.0, 5.0)));
    }

    #[test]
    fn test_indexed_region_matches_plain() {
        let region = Region::new(
            "Islands",
            MultiPolygon::new(vec![square(0.0, 0.0, 2.0), square(10.0, 10.0, 2.0)]),
        );
        let indexed = IndexedRegion::new(&region);
        for x in -2..15 {
            for y in -2..15 {
                let p = at(x as f64 + 0.5, y as f64 + 0.5);
                assert_eq!(indexed.contains(&p), contains(&region, &p), "at {}", p);
            }
        }
    }

    #[test]
    fn test_indexed_empty_region() {
        let region = Region::new("Nowhere", MultiPolygon::new(vec![]));
        let indexed = IndexedRegion::new(&region);
        assert!(indexed.bbox().is_none());
        assert!(!indexed.contains(&at(0.0, 0.0)));
    }
}
