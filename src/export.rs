//! File export: SVG always, PNG behind the `raster` feature.
//!
//! With the feature disabled the raster entry points stay callable and
//! return [`GlyphError::RasterUnavailable`]; vector export is unaffected.

use std::path::Path;

use crate::container::Container;
use crate::errors::Result;
use crate::glyph::{Glyph, GlyphDef};

#[cfg(not(feature = "raster"))]
use crate::errors::GlyphError;

/// Whether PNG export was compiled in.
pub const RASTER_SUPPORT: bool = cfg!(feature = "raster");

/// Rasterization settings.
///
/// `size` pins the output pixel dimensions; otherwise the document size is
/// multiplied by `scale`. `background` fills the pixmap before rendering
/// (named color or hex), default transparent.
#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f64,
    pub size: Option<(u32, u32)>,
    pub background: Option<String>,
}

impl Default for RasterOptions {
    fn default() -> Self {
        Self {
            scale: 1.0,
            size: None,
            background: None,
        }
    }
}

impl Container {
    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path, self.to_svg())?;
        Ok(())
    }

    /// Rasterize the standalone document to PNG bytes.
    pub fn to_png(&self, options: &RasterOptions) -> Result<Vec<u8>> {
        svg_to_png(&self.to_svg(), options)
    }

    pub fn write_png(&self, path: impl AsRef<Path>, options: &RasterOptions) -> Result<()> {
        let bytes = self.to_png(options)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}

impl<D: GlyphDef> Glyph<D> {
    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<()> {
        self.container().write_svg(path)
    }

    /// Rasterize the standalone document to PNG bytes.
    pub fn to_png(&self, options: &RasterOptions) -> Result<Vec<u8>> {
        self.container().to_png(options)
    }

    pub fn write_png(&self, path: impl AsRef<Path>, options: &RasterOptions) -> Result<()> {
        self.container().write_png(path, options)
    }
}

#[cfg(not(feature = "raster"))]
pub fn svg_to_png(_svg: &str, _options: &RasterOptions) -> Result<Vec<u8>> {
    Err(GlyphError::RasterUnavailable)
}

#[cfg(feature = "raster")]
pub fn svg_to_png(svg: &str, options: &RasterOptions) -> Result<Vec<u8>> {
    use crate::errors::GlyphError;

    let opt = usvg::Options::default();
    let tree = usvg::Tree::from_str(svg, &opt).map_err(GlyphError::SvgParse)?;
    let base = tree.size();

    let (width_px, height_px) = match options.size {
        Some((w, h)) => (w.max(1), h.max(1)),
        None => (
            (base.width() as f64 * options.scale).ceil().max(1.0) as u32,
            (base.height() as f64 * options.scale).ceil().max(1.0) as u32,
        ),
    };

    let mut pixmap =
        tiny_skia::Pixmap::new(width_px, height_px).ok_or(GlyphError::PixmapAlloc)?;
    if let Some(bg) = &options.background {
        if let Some(color) = parse_color(bg) {
            pixmap.fill(color);
        }
    }

    let transform = tiny_skia::Transform::from_scale(
        width_px as f32 / base.width(),
        height_px as f32 / base.height(),
    );
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|e| GlyphError::PngEncode { detail: e.to_string() })
}

#[cfg(feature = "raster")]
fn parse_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255)),
        "black" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 255)),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    match bytes.len() {
        3 => Some(tiny_skia::Color::from_rgba8(
            hex1(bytes[0])?,
            hex1(bytes[1])?,
            hex1(bytes[2])?,
            255,
        )),
        6 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            255,
        )),
        8 => Some(tiny_skia::Color::from_rgba8(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        )),
        _ => None,
    }
}
