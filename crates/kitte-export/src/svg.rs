//! SVG export serializer.
//!
//! Converts a stamp outline into an SVG string using the [`svg`] crate
//! for document construction, XML escaping, and path data formatting.
//!
//! Two documents are supported: a bare stroked silhouette
//! ([`to_svg`]), and a clipped photograph ([`to_clipped_image_svg`])
//! where the outline doubles as a `<clipPath>` for an `<image>`
//! element and as the stroked border drawn on top -- the same dual use
//! the diary UI makes of the outline.
//!
//! These are pure functions with no I/O -- they return `String`s.

use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{ClipPath, Definitions, Description, Image, Path, Title};
use svg::node::{Text, Value};

use kitte_mask::{Dimensions, StampPath};

/// Identifier of the embedded `<clipPath>` element.
const CLIP_PATH_ID: &str = "stamp-frame";
/// Border stroke styling: the faint outline drawn on album cards.
const STROKE_COLOR: &str = "lightgray";
const STROKE_OPACITY: f64 = 0.2;
const STROKE_WIDTH: f64 = 1.0;

/// Errors that can occur during SVG export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// The outline has too few points to form a silhouette.
    #[error("stamp outline has fewer than 2 points")]
    EmptyOutline,

    /// Document dimensions are degenerate.
    #[error("document dimensions {0}x{1} are degenerate")]
    ZeroDimensions(u32, u32),
}

/// Metadata to embed in the SVG document.
///
/// Both fields are optional. When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag. Text
/// values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title -- emitted as `<title>`.
    ///
    /// Typically the source photo filename (without extension).
    pub title: Option<&'a str>,

    /// Document description -- emitted as `<desc>`.
    ///
    /// Typically the record's location and category.
    pub description: Option<&'a str>,
}

/// Build an SVG path `d` attribute string from a stamp outline.
///
/// Uses `M` for the first point and `L` for subsequent points; a
/// closed outline (first point repeated last) ends with `Z` instead of
/// repeating the coordinate. Returns an empty string for paths with
/// fewer than 2 points.
#[must_use]
pub fn build_path_data(outline: &StampPath) -> String {
    let points = outline.points();
    if points.len() < 2 {
        return String::new();
    }

    let closed = outline.is_closed();
    let line_points = if closed {
        &points[1..points.len() - 1]
    } else {
        &points[1..]
    };

    let first = &points[0];
    let mut data = Data::new().move_to((first.x, first.y));
    for p in line_points {
        data = data.line_to((p.x, p.y));
    }
    if closed {
        data = data.close();
    }
    String::from(Value::from(data))
}

/// Serialize a stamp outline into a standalone SVG document string.
///
/// The outline becomes a single stroked `<path>`; the `viewBox` is set
/// from [`Dimensions`] so the SVG coordinate space matches the frame's
/// pixel grid.
///
/// # Errors
///
/// Returns [`ExportError::EmptyOutline`] when the outline has fewer
/// than 2 points.
pub fn to_svg(
    outline: &StampPath,
    dimensions: Dimensions,
    metadata: &SvgMetadata<'_>,
) -> Result<String, ExportError> {
    if outline.len() < 2 {
        return Err(ExportError::EmptyOutline);
    }
    let document = base_document(dimensions, metadata)?;
    let document = document.add(border_path(outline));
    Ok(document.to_string())
}

/// Serialize a stamp outline as a clip mask over a photograph.
///
/// Emits a `<clipPath>` definition containing the outline, an
/// `<image>` referencing `image_href` clipped to it, and the stroked
/// border on top. `image_href` is emitted verbatim (relative path,
/// absolute path, or data URI).
///
/// # Errors
///
/// Returns [`ExportError::EmptyOutline`] when the outline has fewer
/// than 2 points.
pub fn to_clipped_image_svg(
    outline: &StampPath,
    dimensions: Dimensions,
    image_href: &str,
    metadata: &SvgMetadata<'_>,
) -> Result<String, ExportError> {
    if outline.len() < 2 {
        return Err(ExportError::EmptyOutline);
    }
    let document = base_document(dimensions, metadata)?;

    let clip = ClipPath::new()
        .set("id", CLIP_PATH_ID)
        .add(Path::new().set("d", build_path_data(outline)));
    let defs = Definitions::new().add(clip);

    let photo = Image::new()
        .set("href", image_href)
        .set("width", dimensions.width)
        .set("height", dimensions.height)
        .set("preserveAspectRatio", "xMidYMid slice")
        .set("clip-path", format!("url(#{CLIP_PATH_ID})"));

    Ok(document
        .add(defs)
        .add(photo)
        .add(border_path(outline))
        .to_string())
}

/// Shared document skeleton: sizing, viewBox, optional title/desc.
fn base_document(
    dimensions: Dimensions,
    metadata: &SvgMetadata<'_>,
) -> Result<Document, ExportError> {
    if dimensions.width == 0 || dimensions.height == 0 {
        return Err(ExportError::ZeroDimensions(
            dimensions.width,
            dimensions.height,
        ));
    }

    let mut document = Document::new()
        .set("width", dimensions.width)
        .set("height", dimensions.height)
        .set(
            "viewBox",
            format!("0 0 {} {}", dimensions.width, dimensions.height),
        );

    if let Some(title) = metadata.title {
        document = document.add(Title::new(title));
    }
    if let Some(description) = metadata.description {
        document = document.add(Description::new().add(Text::new(description)));
    }
    Ok(document)
}

/// The stroked border path drawn on top of the clipped photo.
fn border_path(outline: &StampPath) -> Path {
    Path::new()
        .set("d", build_path_data(outline))
        .set("fill", "none")
        .set("stroke", STROKE_COLOR)
        .set("stroke-opacity", STROKE_OPACITY)
        .set("stroke-width", STROKE_WIDTH)
}
