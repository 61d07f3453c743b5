//! Raster alpha-punch compositor.
//!
//! Erases a filled circle of `hole_radius` at every perforation center,
//! producing the transparent-hole bitmap that gets persisted. Pixels
//! outside the holes are bit-identical to the source.
//!
//! The holes are rendered once into an anti-aliased coverage mask with
//! `tiny-skia`, then applied as Porter-Duff DST_OUT:
//! `alpha_out = alpha_src * (1 - coverage)`. Holes never overlap
//! (pitch exceeds two radii by construction), so erase order is
//! irrelevant.

use image::RgbaImage;
use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, Transform};

use crate::perforation::PerforationLayout;
use crate::types::MaskError;

/// Punch perforation holes into a bitmap.
///
/// The bitmap dimensions must equal the dimensions the layout was
/// computed for; resizing must happen before masking so hole placement
/// matches the final artifact pixel for pixel. A layout with zero
/// holes returns an untouched copy of the source.
///
/// # Errors
///
/// Returns [`MaskError::DimensionMismatch`] when the bitmap and layout
/// dimensions diverge -- never silently truncates or stretches.
pub fn punch_holes(source: &RgbaImage, layout: &PerforationLayout) -> Result<RgbaImage, MaskError> {
    let (width, height) = source.dimensions();
    if width != layout.dimensions.width || height != layout.dimensions.height {
        return Err(MaskError::DimensionMismatch {
            expected_width: layout.dimensions.width,
            expected_height: layout.dimensions.height,
            actual_width: width,
            actual_height: height,
        });
    }

    let mut output = source.clone();
    if layout.hole_count() == 0 {
        return Ok(output);
    }

    let coverage = hole_coverage_mask(layout, width, height)?;
    for (pixel, mask) in output.pixels_mut().zip(coverage.pixels()) {
        let hole_alpha = mask.alpha();
        if hole_alpha == 0 {
            continue;
        }
        // DST_OUT with rounding; full coverage erases the pixel outright.
        let kept = u16::from(pixel.0[3]) * u16::from(255 - hole_alpha);
        #[allow(clippy::cast_possible_truncation)]
        {
            pixel.0[3] = ((kept + 127) / 255) as u8;
        }
    }
    Ok(output)
}

/// Render every hole circle into a single anti-aliased coverage mask.
///
/// Coverage is the mask's alpha channel: 255 fully inside a hole, 0
/// fully outside, fractional on the rim.
fn hole_coverage_mask(
    layout: &PerforationLayout,
    width: u32,
    height: u32,
) -> Result<Pixmap, MaskError> {
    let mut pixmap = Pixmap::new(width, height).ok_or(MaskError::InvalidGeometry {
        width,
        height,
    })?;

    let mut paint = Paint::default();
    paint.set_color(Color::WHITE);
    paint.anti_alias = true;

    #[allow(clippy::cast_possible_truncation)]
    let radius = layout.spec.hole_radius as f32;
    for center in layout.centers() {
        #[allow(clippy::cast_possible_truncation)]
        let (cx, cy) = (center.x as f32, center.y as f32);
        // from_circle only fails for non-positive radii, which the
        // layout validation already rules out.
        if let Some(circle) = PathBuilder::from_circle(cx, cy, radius) {
            pixmap.fill_path(
                &circle,
                &paint,
                FillRule::Winding,
                Transform::identity(),
                None,
            );
        }
    }
    Ok(pixmap)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Dimensions, MaskConfig, Point};
    use image::Rgba;

    fn opaque_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([200, 150, 100, 255]))
    }

    fn layout_for(width: u32, height: u32) -> PerforationLayout {
        PerforationLayout::compute(Dimensions { width, height }, &MaskConfig::default()).unwrap()
    }

    #[test]
    fn output_dimensions_match_source() {
        let source = opaque_image(1080, 1440);
        let masked = punch_holes(&source, &layout_for(1080, 1440)).unwrap();
        assert_eq!(masked.dimensions(), (1080, 1440));
    }

    #[test]
    fn hole_centers_become_transparent() {
        let source = opaque_image(1080, 1440);
        let layout = layout_for(1080, 1440);
        let masked = punch_holes(&source, &layout).unwrap();

        for center in layout.centers() {
            // Sample just inside the frame at the hole center; centers
            // sit on the edge line itself.
            let x = (center.x.round().min(1079.0)).max(0.0);
            let y = (center.y.round().min(1439.0)).max(0.0);
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let pixel = masked.get_pixel(x as u32, y as u32);
            assert_eq!(
                pixel.0[3], 0,
                "pixel at hole center ({x}, {y}) should be fully transparent",
            );
        }
    }

    #[test]
    fn pixels_outside_holes_are_untouched() {
        let source = opaque_image(1080, 1440);
        let layout = layout_for(1080, 1440);
        let masked = punch_holes(&source, &layout).unwrap();

        // Anti-aliasing only reaches one pixel past the geometric rim.
        let safe_radius = layout.spec.hole_radius + 1.5;
        let centers: Vec<Point> = layout.centers().collect();
        let mut checked = 0_u64;
        for (x, y, pixel) in masked.enumerate_pixels() {
            let p = Point::new(f64::from(x), f64::from(y));
            let near_hole = centers
                .iter()
                .any(|c| p.distance_squared(*c) <= safe_radius * safe_radius);
            if near_hole {
                continue;
            }
            assert_eq!(pixel, source.get_pixel(x, y), "pixel ({x}, {y}) altered");
            checked += 1;
        }
        assert!(checked > 0);
    }

    #[test]
    fn color_channels_survive_inside_frame() {
        let source = opaque_image(300, 400);
        let masked = punch_holes(&source, &layout_for(300, 400)).unwrap();
        // Center of the frame is far from every edge hole.
        assert_eq!(masked.get_pixel(150, 200), source.get_pixel(150, 200));
    }

    #[test]
    fn dimension_mismatch_is_rejected() {
        let source = opaque_image(300, 400);
        let err = punch_holes(&source, &layout_for(301, 400)).unwrap_err();
        assert!(matches!(
            err,
            MaskError::DimensionMismatch {
                expected_width: 301,
                actual_width: 300,
                ..
            }
        ));
    }

    #[test]
    fn zero_hole_layout_copies_source() {
        let source = opaque_image(1, 1);
        let masked = punch_holes(&source, &layout_for(1, 1)).unwrap();
        assert_eq!(masked, source);
    }

    #[test]
    fn punch_is_deterministic() {
        let source = opaque_image(300, 400);
        let layout = layout_for(300, 400);
        let a = punch_holes(&source, &layout).unwrap();
        let b = punch_holes(&source, &layout).unwrap();
        assert_eq!(a, b);
    }
}
