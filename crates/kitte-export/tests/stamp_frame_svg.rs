//! Integration test: generate a stamp outline, punch the matching raster
//! mask, and export the outline to SVG -- both consumers from one layout.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use kitte_mask::{Dimensions, MaskConfig, PerforationLayout, punch_holes, stamp_outline_path};

#[test]
fn outline_and_punch_agree_end_to_end() {
    let dimensions = Dimensions {
        width: 300,
        height: 400,
    };
    let config = MaskConfig::default();
    let layout = PerforationLayout::compute(dimensions, &config).expect("layout should compute");

    // Vector consumer.
    let outline = stamp_outline_path(&layout);
    assert!(outline.is_closed(), "outline must be a closed contour");

    // Raster consumer, same layout.
    let photo = image::RgbaImage::from_pixel(300, 400, image::Rgba([120, 90, 60, 255]));
    let masked = punch_holes(&photo, &layout).expect("punch should succeed");
    assert_eq!(masked.dimensions(), (300, 400));

    // Every erased hole corresponds to a bite in the outline.
    for center in layout.centers() {
        let apex_near = outline
            .points()
            .iter()
            .any(|p| p.distance(center) <= layout.spec.hole_radius + 1e-9);
        assert!(apex_near, "no outline bite near hole center {center:?}");
    }

    // Export the outline.
    let svg = kitte_export::to_svg(
        &outline,
        dimensions,
        &kitte_export::SvgMetadata {
            title: Some("integration"),
            description: None,
        },
    )
    .expect("svg export should succeed");

    assert!(svg.contains("<svg"));
    assert!(svg.contains("<path"));
    assert!(svg.contains("</svg>"));
    eprintln!("SVG output: {} bytes", svg.len());
}

#[test]
fn clipped_image_document_is_well_formed() {
    let dimensions = Dimensions {
        width: 1080,
        height: 1440,
    };
    let outline = kitte_mask::stamp_outline(dimensions, &MaskConfig::default()).unwrap();
    let svg = kitte_export::to_clipped_image_svg(
        &outline,
        dimensions,
        "images/stamp_test.png",
        &kitte_export::SvgMetadata::default(),
    )
    .unwrap();

    assert!(svg.contains("<clipPath"));
    assert!(svg.contains("images/stamp_test.png"));
    // The border path is drawn after (on top of) the clipped image.
    let image_pos = svg.find("<image").unwrap();
    let border_pos = svg.rfind("<path").unwrap();
    assert!(border_pos > image_pos);
}
