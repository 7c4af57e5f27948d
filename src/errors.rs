//! Error types with rich diagnostics using miette.
//!
//! Every failure is terminal to the construction that raised it; there are
//! no retries and no partially-assembled documents.

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, GlyphError>;

/// Errors raised while assembling or exporting a glyph document.
#[derive(Error, Diagnostic, Debug)]
pub enum GlyphError {
    #[error("glyph `{id}` has no size")]
    #[diagnostic(
        code(glyphforge::container::no_size),
        help("declare a canonical size during `init`, or build the glyph with an instantiated size")
    )]
    NoSize { id: String },

    #[error("glyph `{id}` has an invalid viewbox: {width} x {height}")]
    #[diagnostic(
        code(glyphforge::container::invalid_viewbox),
        help("viewbox width and height must both be positive")
    )]
    InvalidViewBox { id: String, width: f64, height: f64 },

    #[error("glyph `{id}` has a non-finite size")]
    #[diagnostic(code(glyphforge::container::non_finite_size))]
    NonFiniteSize { id: String },

    #[error("gradient has no stops")]
    #[diagnostic(
        code(glyphforge::gradient::stops_missing),
        help("provide either a color list or explicit stops")
    )]
    GradientStopsMissing,

    #[error("gradient has both a color list and explicit stops")]
    #[diagnostic(
        code(glyphforge::gradient::stops_conflict),
        help("provide either a color list or explicit stops, not both")
    )]
    GradientStopsConflict,

    #[error("child glyph `{id}` has no size and cannot be placed")]
    #[diagnostic(
        code(glyphforge::glyph::unsized_child),
        help("give the child a size, or pass an explicit position")
    )]
    UnsizedChild { id: String },

    #[error("matrix row {row} has {len} cells, expected {expected}")]
    #[diagnostic(code(glyphforge::layout::ragged_matrix))]
    RaggedMatrix {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("raster export is not available")]
    #[diagnostic(
        code(glyphforge::export::raster_unavailable),
        help("rebuild with the `raster` feature enabled")
    )]
    RasterUnavailable,

    #[cfg(feature = "raster")]
    #[error("failed to parse generated SVG")]
    #[diagnostic(code(glyphforge::export::svg_parse))]
    SvgParse(#[source] usvg::Error),

    #[error("failed to allocate pixmap for raster rendering")]
    #[diagnostic(code(glyphforge::export::pixmap_alloc))]
    PixmapAlloc,

    #[error("failed to encode PNG: {detail}")]
    #[diagnostic(code(glyphforge::export::png_encode))]
    PngEncode { detail: String },

    #[error(transparent)]
    #[diagnostic(code(glyphforge::io))]
    Io(#[from] std::io::Error),
}
