//! kitte-mask: Pure postage-stamp mask geometry (sans-IO).
//!
//! Generates the perforated stamp-frame silhouette used two ways by
//! the diary app:
//!
//! - as a closed vector outline for on-screen clipping and stroking,
//! - as a raster alpha-punch that erases transparent perforation holes
//!   from a captured bitmap before it is persisted.
//!
//! Both consumers derive from one [`PerforationLayout`], so the live
//! preview and the saved artifact always agree. This crate has **no
//! I/O dependencies** -- it operates on in-memory bitmaps and returns
//! structured data. Filesystem interaction lives in `kitte-store`.
//!
//! Everything here is pure, synchronous, and free of shared mutable
//! state: safe to call from any thread, including a rendering thread.
//! The punch is CPU-bound full-resolution pixel work; callers that
//! care about frame pacing should run it on a worker thread.

pub mod outline;
pub mod perforation;
pub mod punch;
pub mod types;

pub use outline::{ARC_SEGMENTS, stamp_outline_path};
pub use perforation::PerforationLayout;
pub use punch::punch_holes;
pub use types::{
    Dimensions, FrameType, MaskConfig, MaskError, PerforationSpec, Point, RgbaImage, StampPath,
};

/// Long-side cap applied to captures before masking, in pixels.
///
/// Keeps full-resolution camera output at a manageable working size.
pub const MAX_CAPTURE_DIMENSION: u32 = 1080;

/// Build the closed stamp outline for a frame of the given dimensions.
///
/// This is the vector consumer's entry point: the returned path is
/// ready for clip and stroke rendering.
///
/// # Errors
///
/// Returns [`MaskError::InvalidGeometry`] for zero dimensions and
/// [`MaskError::InvalidConfig`] for unusable ratios.
pub fn stamp_outline(dimensions: Dimensions, config: &MaskConfig) -> Result<StampPath, MaskError> {
    let layout = PerforationLayout::compute(dimensions, config)?;
    Ok(outline::stamp_outline_path(&layout))
}

/// Punch perforation holes into a bitmap at its current size.
///
/// The perforation layout is computed for the bitmap's own dimensions,
/// so placement always matches the output pixel for pixel.
///
/// # Errors
///
/// Returns [`MaskError::InvalidGeometry`] for an empty bitmap and
/// [`MaskError::InvalidConfig`] for unusable ratios.
pub fn punch_stamp(source: &RgbaImage, config: &MaskConfig) -> Result<RgbaImage, MaskError> {
    let layout = PerforationLayout::compute(Dimensions::of(source), config)?;
    punch::punch_holes(source, &layout)
}

/// Resize a capture to fit within `max_dimension` on its long side,
/// then punch perforation holes.
///
/// Resizing always precedes masking: the layout is recomputed for the
/// resized bitmap so hole placement matches the final artifact.
/// Sources already within the cap are masked as-is.
///
/// # Errors
///
/// Same failure modes as [`punch_stamp`].
pub fn punch_fit(
    source: &RgbaImage,
    max_dimension: u32,
    config: &MaskConfig,
) -> Result<RgbaImage, MaskError> {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Err(MaskError::InvalidGeometry { width, height });
    }

    let long_side = width.max(height);
    if long_side <= max_dimension {
        return punch_stamp(source, config);
    }

    let scale = f64::from(max_dimension) / f64::from(long_side);
    let scaled_width = scaled_side(width, scale);
    let scaled_height = scaled_side(height, scale);
    let resized = image::imageops::resize(
        source,
        scaled_width,
        scaled_height,
        image::imageops::FilterType::Lanczos3,
    );
    punch_stamp(&resized, config)
}

/// Scale one side, never rounding below a single pixel.
fn scaled_side(side: u32, scale: f64) -> u32 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let scaled = (f64::from(side) * scale).round() as u32;
    scaled.max(1)
}
