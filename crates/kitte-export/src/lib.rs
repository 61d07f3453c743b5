//! kitte-export: Pure format serializers (sans-IO)
//!
//! Converts stamp outlines into output formats. Currently supports SVG.

pub mod svg;

pub use svg::{ExportError, SvgMetadata, build_path_data, to_clipped_image_svg, to_svg};
