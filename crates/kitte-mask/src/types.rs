//! Shared types for the kitte stamp-mask geometry.

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference masked
/// bitmaps without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position (pixels from left edge).
    pub x: f64,
    /// Vertical position (pixels from top edge).
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to another point.
    ///
    /// Avoids the square root for comparison purposes.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx.mul_add(dx, dy * dy)
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        self.distance_squared(other).sqrt()
    }
}

/// Image dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Dimensions {
    /// Dimensions of an in-memory RGBA image.
    #[must_use]
    pub fn of(image: &RgbaImage) -> Self {
        Self {
            width: image.width(),
            height: image.height(),
        }
    }
}

/// Which frame silhouette a stamp uses.
///
/// Only `Perforated` carries distinct geometry. `Plain` is a frame
/// selector with no perforations: the outline degrades to the bounding
/// rectangle and the punch pass leaves the bitmap untouched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameType {
    /// Classic postage-stamp edge: semicircular perforation bites.
    #[default]
    Perforated,
    /// Unperforated rectangle.
    Plain,
}

/// Configuration for stamp-mask generation.
///
/// Defaults: hole radius is 2% of the frame width and the
/// center-to-center pitch is three radii. Both ratios derive from
/// `width` alone, so perforations along the vertical edges are sized
/// by the horizontal dimension as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskConfig {
    /// Perforation hole radius as a fraction of the frame width.
    /// Must be strictly positive.
    pub hole_radius_ratio: f64,

    /// Center-to-center hole spacing as a multiple of the hole radius.
    /// Must be greater than 2.0 so adjacent holes never overlap.
    pub pitch_factor: f64,

    /// Frame silhouette selector.
    pub frame: FrameType,
}

impl Default for MaskConfig {
    fn default() -> Self {
        Self {
            hole_radius_ratio: 0.02,
            pitch_factor: 3.0,
            frame: FrameType::default(),
        }
    }
}

/// Perforation measurements derived from dimensions and configuration.
///
/// Never stored; recomputed on demand so the outline and punch
/// consumers can never drift apart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerforationSpec {
    /// Radius of each perforation hole in pixels.
    pub hole_radius: f64,
    /// Center-to-center spacing between adjacent holes in pixels.
    pub pitch: f64,
    /// How far the scalloped edge indents from the bounding rectangle.
    ///
    /// Hole centers sit on the edge line, so the bite is a semicircle
    /// and the indent depth equals the hole radius.
    pub inset_depth: f64,
}

impl PerforationSpec {
    /// Derive the spec for a frame of the given dimensions.
    #[must_use]
    pub fn derive(dimensions: Dimensions, config: &MaskConfig) -> Self {
        let hole_radius = f64::from(dimensions.width) * config.hole_radius_ratio;
        Self {
            hole_radius,
            pitch: hole_radius * config.pitch_factor,
            inset_depth: hole_radius,
        }
    }
}

/// A closed scalloped contour in image coordinates.
///
/// Produced by [`crate::outline::stamp_outline_path`]; the first and
/// last points coincide. Consumable by any 2D vector renderer as a
/// clip path or a stroked border.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StampPath(Vec<Point>);

impl StampPath {
    /// Create a path from an ordered point sequence.
    #[must_use]
    pub const fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Returns `true` if the path has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of points in the path.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the first and last points coincide.
    ///
    /// A closed contour needs at least a triangle (four points with
    /// the closing repeat).
    #[must_use]
    pub fn is_closed(&self) -> bool {
        match (self.0.first(), self.0.last()) {
            (Some(first), Some(last)) => self.0.len() >= 4 && first == last,
            _ => false,
        }
    }

    /// Returns a slice of all points.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the path and returns the underlying vector of points.
    #[must_use]
    pub fn into_points(self) -> Vec<Point> {
        self.0
    }
}

/// Errors that can occur during stamp-mask generation.
#[derive(Debug, thiserror::Error)]
pub enum MaskError {
    /// Frame dimensions are degenerate (zero width or height).
    #[error("invalid geometry: {width}x{height} (both dimensions must be positive)")]
    InvalidGeometry {
        /// Offending width.
        width: u32,
        /// Offending height.
        height: u32,
    },

    /// The bitmap handed to the punch compositor does not match the
    /// dimensions the perforation layout was computed for.
    #[error(
        "bitmap dimensions {actual_width}x{actual_height} do not match \
         geometry dimensions {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        /// Width the layout was computed for.
        expected_width: u32,
        /// Height the layout was computed for.
        expected_height: u32,
        /// Width of the bitmap actually supplied.
        actual_width: u32,
        /// Height of the bitmap actually supplied.
        actual_height: u32,
    },

    /// Mask configuration is invalid.
    #[error("invalid mask configuration: {0}")]
    InvalidConfig(String),
}
