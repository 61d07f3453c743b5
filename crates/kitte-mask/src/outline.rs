//! Closed scalloped outline construction.
//!
//! Turns a [`PerforationLayout`] into one continuous closed contour:
//! the bounding rectangle with a sampled semicircular bite at every
//! hole center. Walk order is top, right, bottom, left, then an
//! explicit closing repeat of the start point.
//!
//! The contour is what on-screen consumers clip and stroke; it never
//! touches bitmap pixels. Because it is built from the same layout the
//! raster punch uses, the live silhouette and the persisted artifact
//! agree exactly.

use std::f64::consts::PI;

use crate::perforation::PerforationLayout;
use crate::types::{Point, StampPath};

/// Subdivision count for each semicircular bite.
///
/// Even, so the arc midpoint lands exactly at the deepest point of the
/// bite (`inset_depth` inward from the edge).
pub const ARC_SEGMENTS: u32 = 12;

/// Build the closed scalloped contour for a perforation layout.
///
/// Between bites the contour runs straight along the raw edge; corners
/// are plain right angles. A layout with no holes (degenerate frame or
/// `Plain` frame type) yields the bounding rectangle. The result is
/// always closed and, along each edge, monotone in the walk direction,
/// so no edge self-intersects.
#[must_use]
pub fn stamp_outline_path(layout: &PerforationLayout) -> StampPath {
    let width = f64::from(layout.dimensions.width);
    let height = f64::from(layout.dimensions.height);
    let radius = layout.spec.hole_radius;

    let arc_points = layout.hole_count() * (ARC_SEGMENTS as usize + 1);
    let mut points = Vec::with_capacity(arc_points + 5);

    // Top edge, left to right along y = 0; bites dip toward +y.
    points.push(Point::new(0.0, 0.0));
    for center in &layout.top {
        sample_arc(&mut points, |theta| {
            Point::new(
                radius.mul_add(-theta.cos(), center.x),
                radius * theta.sin(),
            )
        });
    }

    // Right edge, top to bottom along x = width; bites dip toward -x.
    points.push(Point::new(width, 0.0));
    for center in &layout.right {
        sample_arc(&mut points, |theta| {
            Point::new(
                radius.mul_add(-theta.sin(), width),
                radius.mul_add(-theta.cos(), center.y),
            )
        });
    }

    // Bottom edge, right to left along y = height; bites dip toward -y.
    points.push(Point::new(width, height));
    for center in layout.bottom.iter().rev() {
        sample_arc(&mut points, |theta| {
            Point::new(
                radius.mul_add(theta.cos(), center.x),
                radius.mul_add(-theta.sin(), height),
            )
        });
    }

    // Left edge, bottom to top along x = 0; bites dip toward +x.
    points.push(Point::new(0.0, height));
    for center in layout.left.iter().rev() {
        sample_arc(&mut points, |theta| {
            Point::new(
                radius * theta.sin(),
                radius.mul_add(theta.cos(), center.y),
            )
        });
    }

    // Explicit closing repeat.
    points.push(Point::new(0.0, 0.0));
    StampPath::new(points)
}

/// Sample one semicircular bite.
///
/// `point_at` maps a parameter in `[0, pi]` to a contour point; 0 is
/// the bite entry (on the raw edge, nearer the walk start) and `pi` is
/// the exit. Each closure above orients the parameter so the sampled
/// points advance monotonically along the edge.
fn sample_arc(points: &mut Vec<Point>, point_at: impl Fn(f64) -> Point) {
    for step in 0..=ARC_SEGMENTS {
        let theta = PI * f64::from(step) / f64::from(ARC_SEGMENTS);
        points.push(point_at(theta));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, FrameType, MaskConfig};

    fn layout(width: u32, height: u32) -> PerforationLayout {
        PerforationLayout::compute(Dimensions { width, height }, &MaskConfig::default()).unwrap()
    }

    #[test]
    fn path_is_closed() {
        let path = stamp_outline_path(&layout(300, 400));
        assert!(path.is_closed());
        assert_eq!(path.points().first(), path.points().last());
    }

    #[test]
    fn degenerate_frame_yields_plain_rectangle() {
        let path = stamp_outline_path(&layout(1, 1));
        assert!(path.is_closed());
        assert_eq!(path.len(), 5);
        assert_eq!(path.points()[0], Point::new(0.0, 0.0));
        assert_eq!(path.points()[1], Point::new(1.0, 0.0));
        assert_eq!(path.points()[2], Point::new(1.0, 1.0));
        assert_eq!(path.points()[3], Point::new(0.0, 1.0));
    }

    #[test]
    fn plain_frame_yields_plain_rectangle() {
        let config = MaskConfig {
            frame: FrameType::Plain,
            ..MaskConfig::default()
        };
        let plain =
            PerforationLayout::compute(Dimensions { width: 300, height: 400 }, &config).unwrap();
        let path = stamp_outline_path(&plain);
        assert_eq!(path.len(), 5);
    }

    #[test]
    fn deterministic_output() {
        let a = stamp_outline_path(&layout(640, 480));
        let b = stamp_outline_path(&layout(640, 480));
        assert_eq!(a, b);
    }

    #[test]
    fn all_points_stay_within_frame() {
        let lay = layout(300, 400);
        let path = stamp_outline_path(&lay);
        for p in path.points() {
            assert!(p.x >= -1e-9 && p.x <= 300.0 + 1e-9, "x out of frame: {p:?}");
            assert!(p.y >= -1e-9 && p.y <= 400.0 + 1e-9, "y out of frame: {p:?}");
        }
    }

    #[test]
    fn bites_indent_by_inset_depth() {
        // The deepest point of every top-edge bite sits exactly
        // inset_depth inward from y = 0 at the hole center x.
        let lay = layout(300, 400);
        let path = stamp_outline_path(&lay);
        let inset = lay.spec.inset_depth;
        for center in &lay.top {
            let deepest = Point::new(center.x, inset);
            let hit = path
                .points()
                .iter()
                .any(|p| p.distance(deepest) < 1e-9);
            assert!(hit, "no bite apex near {deepest:?}");
        }
    }

    #[test]
    fn top_edge_walk_is_monotone() {
        // Walking the top edge, x must never decrease; a reversal would
        // mean the contour self-intersects along the edge.
        let lay = layout(300, 400);
        let path = stamp_outline_path(&lay);
        let top_end = path
            .points()
            .iter()
            .position(|p| *p == Point::new(300.0, 0.0))
            .unwrap();
        let top_run = &path.points()[..=top_end];
        for pair in top_run.windows(2) {
            assert!(
                pair[1].x >= pair[0].x - 1e-9,
                "x reversed along top edge: {pair:?}",
            );
        }
    }

    #[test]
    fn scallops_continuous_across_corners() {
        // The bite nearest each corner must leave a straight run of raw
        // edge on both sides of the corner point: no bite may swallow
        // the corner. Checked by asserting every corner point is on the
        // contour exactly.
        let path = stamp_outline_path(&layout(300, 400));
        for corner in [
            Point::new(0.0, 0.0),
            Point::new(300.0, 0.0),
            Point::new(300.0, 400.0),
            Point::new(0.0, 400.0),
        ] {
            assert!(
                path.points().iter().any(|p| p.distance(corner) < 1e-9),
                "corner {corner:?} missing from contour",
            );
        }
    }
}
