//! Perforation-center computation.
//!
//! The single source of truth for where perforation holes sit on a
//! stamp frame. Both consumers -- the vector outline and the raster
//! punch -- derive from one [`PerforationLayout`], so the on-screen
//! silhouette and the persisted artifact cannot drift apart.
//!
//! Hole centers sit on the edge line itself; each bite is a semicircle
//! of depth `hole_radius`. Along each edge, `floor(edge_len / pitch)`
//! holes are spaced evenly starting at `pitch / 2` from the edge start,
//! so no hole ever lands on a corner.

use crate::types::{Dimensions, FrameType, MaskConfig, MaskError, PerforationSpec, Point};

/// Per-edge perforation hole centers for a stamp frame.
///
/// Edges are stored in contour-walk order: top (left to right), right
/// (top to bottom), bottom (left to right), left (top to bottom). The
/// outline walker reverses bottom and left itself.
#[derive(Debug, Clone, PartialEq)]
pub struct PerforationLayout {
    /// Dimensions the layout was computed for.
    pub dimensions: Dimensions,
    /// Derived perforation measurements.
    pub spec: PerforationSpec,
    /// Hole centers on the top edge (y = 0), ordered by x.
    pub top: Vec<Point>,
    /// Hole centers on the right edge (x = width), ordered by y.
    pub right: Vec<Point>,
    /// Hole centers on the bottom edge (y = height), ordered by x.
    pub bottom: Vec<Point>,
    /// Hole centers on the left edge (x = 0), ordered by y.
    pub left: Vec<Point>,
}

impl PerforationLayout {
    /// Compute the perforation layout for a frame.
    ///
    /// Pure and deterministic: identical inputs yield bit-identical
    /// layouts. A `Plain` frame yields zero holes. Edges too short to
    /// fit a single hole get zero holes rather than failing -- a
    /// degenerate frame degrades to an unperforated rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`MaskError::InvalidGeometry`] when either dimension is
    /// zero, and [`MaskError::InvalidConfig`] when the configured
    /// ratios are non-positive or would let adjacent holes overlap.
    pub fn compute(dimensions: Dimensions, config: &MaskConfig) -> Result<Self, MaskError> {
        if dimensions.width == 0 || dimensions.height == 0 {
            return Err(MaskError::InvalidGeometry {
                width: dimensions.width,
                height: dimensions.height,
            });
        }
        validate_config(config)?;

        let spec = PerforationSpec::derive(dimensions, config);
        if config.frame == FrameType::Plain {
            return Ok(Self {
                dimensions,
                spec,
                top: Vec::new(),
                right: Vec::new(),
                bottom: Vec::new(),
                left: Vec::new(),
            });
        }

        let width = f64::from(dimensions.width);
        let height = f64::from(dimensions.height);

        let horizontal = edge_hole_offsets(width, spec.pitch);
        let vertical = edge_hole_offsets(height, spec.pitch);

        Ok(Self {
            dimensions,
            spec,
            top: horizontal.iter().map(|&x| Point::new(x, 0.0)).collect(),
            right: vertical.iter().map(|&y| Point::new(width, y)).collect(),
            bottom: horizontal.iter().map(|&x| Point::new(x, height)).collect(),
            left: vertical.iter().map(|&y| Point::new(0.0, y)).collect(),
        })
    }

    /// Total number of perforation holes across all four edges.
    #[must_use]
    pub const fn hole_count(&self) -> usize {
        self.top.len() + self.right.len() + self.bottom.len() + self.left.len()
    }

    /// Iterate over every hole center in edge-walk order.
    pub fn centers(&self) -> impl Iterator<Item = Point> + '_ {
        self.top
            .iter()
            .chain(&self.right)
            .chain(&self.bottom)
            .chain(&self.left)
            .copied()
    }
}

/// Evenly spaced hole-center offsets along one edge.
///
/// `floor(edge_len / pitch)` holes at `pitch / 2 + i * pitch`. The last
/// center lands at most `pitch / 2` short of the far corner, so the
/// bite (radius < pitch / 2) never touches a corner. Returns an empty
/// vector when the edge is shorter than one pitch.
fn edge_hole_offsets(edge_len: f64, pitch: f64) -> Vec<f64> {
    if pitch <= 0.0 || edge_len < pitch {
        return Vec::new();
    }
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let count = (edge_len / pitch).floor() as u32;
    (0..count)
        .map(|i| f64::from(i).mul_add(pitch, pitch / 2.0))
        .collect()
}

fn validate_config(config: &MaskConfig) -> Result<(), MaskError> {
    if config.hole_radius_ratio <= 0.0 || !config.hole_radius_ratio.is_finite() {
        return Err(MaskError::InvalidConfig(format!(
            "hole_radius_ratio must be positive, got {}",
            config.hole_radius_ratio,
        )));
    }
    // pitch > 2 * radius guarantees non-overlapping holes, which in turn
    // lets the punch compositor erase in any order.
    if config.pitch_factor <= 2.0 || !config.pitch_factor.is_finite() {
        return Err(MaskError::InvalidConfig(format!(
            "pitch_factor must exceed 2.0 so holes cannot overlap, got {}",
            config.pitch_factor,
        )));
    }
    Ok(())
}
