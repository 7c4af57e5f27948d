//! Composable parametric vector glyphs.
//!
//! A *glyph* is a reusable drawing unit: it declares a configuration schema
//! ([`glyph_params!`]), draws into its own canonical coordinate space, and
//! can be placed inside other glyphs with independent positioning, scaling
//! and rotation. Documents export to SVG, and to PNG with the `raster`
//! feature.
//!
//! ```
//! use glyphforge::*;
//!
//! struct Target;
//!
//! impl GlyphDef for Target {
//!     type Params = EmptyParams;
//!     const NAME: &'static str = "Target";
//!
//!     fn init(&mut self, setup: &mut Setup<'_, EmptyParams>) -> Result<()> {
//!         setup.set_size(DVec2::splat(100.0));
//!         Ok(())
//!     }
//!
//!     fn draw(&mut self, canvas: &mut Canvas<'_, EmptyParams>) -> Result<()> {
//!         canvas.draw_circle(DVec2::splat(50.0), 40.0, Style::default().fill("red"));
//!         canvas.draw_circle(DVec2::splat(50.0), 20.0, Style::default().fill("white"));
//!         Ok(())
//!     }
//! }
//!
//! let ctx = GlyphContext::new();
//! let glyph = Glyph::build(&ctx, Target)?;
//! let svg = glyph.to_svg();
//! assert!(svg.contains("circle"));
//! # Ok::<(), GlyphError>(())
//! ```

pub mod container;
pub mod context;
pub mod element;
pub mod errors;
pub mod export;
pub mod glyph;
pub mod layout;
pub(crate) mod log;
pub mod params;
pub mod style;
pub mod transform;
pub(crate) mod writer;

pub use container::{Container, ViewBox};
pub use context::GlyphContext;
pub use element::{
    Circle, Ellipse, ElementFactory, GradientRef, GradientStops, Group, Line, Node, Polygon,
    Polyline, Rect, Stop,
};
pub use errors::{GlyphError, Result};
pub use export::{svg_to_png, RasterOptions, RASTER_SUPPORT};
pub use glyph::{Canvas, Empty, Glyph, GlyphDef, GlyphOptions, Setup};
pub use layout::{ArrayParams, ArrayPatch, HArray, Matrix, Pad, Padding, VArray};
pub use params::{EmptyParams, EmptyPatch, GlyphParams};
pub use style::Style;
pub use transform::{TransformOp, Transformable};

pub use glam::DVec2;
