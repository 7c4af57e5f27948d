//! Glyph definitions and the eager construction lifecycle.
//!
//! A [`GlyphDef`] describes one reusable drawing unit: its params schema,
//! class name, default style, an optional `init` hook that declares
//! canonical geometry, and a `draw` hook that populates the canonical
//! surface. [`Glyph::build`] runs the whole lifecycle up front; there is no
//! deferred rendering phase.

use glam::DVec2;

use crate::container::{Container, ViewBox};
use crate::context::GlyphContext;
use crate::element::factory::ElementFactory;
use crate::element::gradients::{GradientRef, GradientStops};
use crate::element::shapes::Node;
use crate::errors::Result;
use crate::log::debug;
use crate::params::{EmptyParams, GlyphParams};
use crate::style::Style;
use crate::transform::{TransformOp, Transformable};

/// A reusable, parametrized drawing unit.
pub trait GlyphDef {
    type Params: GlyphParams;

    /// Class name; the identifier prefix and the `class` attribute of the
    /// serialized layers.
    const NAME: &'static str;

    /// Patch applied over the schema defaults before the caller's patch.
    fn default_params() -> Option<<Self::Params as GlyphParams>::Patch> {
        None
    }

    /// Style every instance starts from; caller overrides merge on top.
    fn default_style() -> Style {
        Style::default()
    }

    /// Declare canonical geometry and adjust style from params. Runs before
    /// the container is finalized.
    fn init(&mut self, setup: &mut Setup<'_, Self::Params>) -> Result<()> {
        let _ = setup;
        Ok(())
    }

    /// Populate the canonical surface. May build and insert child glyphs.
    fn draw(&mut self, canvas: &mut Canvas<'_, Self::Params>) -> Result<()>;
}

/// Handle passed to [`GlyphDef::init`].
pub struct Setup<'a, P> {
    pub params: &'a P,
    pub(crate) container: &'a mut Container,
}

impl<P> Setup<'_, P> {
    pub fn id(&self) -> &str {
        self.container.id()
    }

    /// Declare the canonical size (canonical units).
    pub fn set_size(&mut self, size: DVec2) {
        self.container.set_canonical_size(size);
    }

    /// Declare an explicit canonical coordinate window.
    pub fn set_viewbox(&mut self, viewbox: ViewBox) {
        self.container.set_canonical_viewbox(viewbox);
    }

    pub fn style_mut(&mut self) -> &mut Style {
        self.container.style_mut()
    }
}

/// Handle passed to [`GlyphDef::draw`]: the canonical drawing surface plus
/// the identity context for child construction.
pub struct Canvas<'a, P> {
    pub params: &'a P,
    pub(crate) ctx: &'a GlyphContext,
    pub(crate) container: &'a mut Container,
}

impl<P> Canvas<'_, P> {
    pub fn id(&self) -> &str {
        self.container.id()
    }

    /// The identity context, for building child glyphs.
    pub fn ctx(&self) -> &GlyphContext {
        self.ctx
    }

    pub fn canonical_size(&self) -> Option<DVec2> {
        self.container.canonical_size()
    }

    pub fn canonical_center(&self) -> Option<DVec2> {
        self.container.canonical_center()
    }

    pub fn size(&self) -> Result<DVec2> {
        self.container.size()
    }

    /// Place a child subtree; see [`Container::insert`].
    pub fn insert(
        &mut self,
        child: impl Into<Container>,
        position: Option<DVec2>,
    ) -> Result<&mut Container> {
        self.container.insert(child, position)
    }

    /// Register a linear gradient in this glyph's definitions area.
    pub fn create_linear_gradient(
        &mut self,
        start: DVec2,
        end: DVec2,
        stops: &GradientStops,
        inherit: Option<&GradientRef>,
    ) -> Result<GradientRef> {
        self.container
            .create_linear_gradient(start, end, stops, inherit)
    }

    /// Register a radial gradient in this glyph's definitions area.
    pub fn create_radial_gradient(
        &mut self,
        center: DVec2,
        radius: f64,
        focal: Option<DVec2>,
        stops: &GradientStops,
        inherit: Option<&GradientRef>,
    ) -> Result<GradientRef> {
        self.container
            .create_radial_gradient(center, radius, focal, stops, inherit)
    }
}

impl<P> ElementFactory for Canvas<'_, P> {
    fn surface(&mut self) -> &mut Vec<Node> {
        self.container.surface()
    }

    fn base_style(&self) -> Style {
        self.container.base_style()
    }
}

/// Construction options: identity, params patch, style override, and the
/// instantiated (target) size.
pub struct GlyphOptions<P: GlyphParams> {
    pub id: Option<String>,
    pub params: P::Patch,
    pub style: Style,
    pub size: Option<DVec2>,
}

impl<P: GlyphParams> Default for GlyphOptions<P> {
    fn default() -> Self {
        Self {
            id: None,
            params: P::Patch::default(),
            style: Style::default(),
            size: None,
        }
    }
}

impl<P: GlyphParams> GlyphOptions<P> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn params(mut self, patch: P::Patch) -> Self {
        self.params = patch;
        self
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn size(mut self, size: DVec2) -> Self {
        self.size = Some(size);
        self
    }
}

/// A fully constructed glyph instance: definition, aggregated params, and
/// the assembled document subtree.
#[derive(Debug)]
pub struct Glyph<D: GlyphDef> {
    def: D,
    params: D::Params,
    container: Container,
}

impl<D: GlyphDef> Glyph<D> {
    /// Build with defaults throughout.
    pub fn build(ctx: &GlyphContext, def: D) -> Result<Self> {
        Self::build_with(ctx, def, GlyphOptions::default())
    }

    /// Run the full lifecycle: aggregate params and style, allocate an
    /// identifier, `init`, finalize geometry, `draw`.
    pub fn build_with(
        ctx: &GlyphContext,
        mut def: D,
        options: GlyphOptions<D::Params>,
    ) -> Result<Self> {
        let mut params = D::Params::default();
        if let Some(patch) = D::default_params() {
            params.apply(&patch);
        }
        params.apply(&options.params);

        let mut style = D::default_style();
        style.merge_from(&options.style);

        let id = options.id.unwrap_or_else(|| ctx.allocate(D::NAME));
        debug!("building glyph `{}`", id);

        let mut container = Container::new(id, D::NAME, style);
        if let Some(size) = options.size {
            container.set_instantiated_size(size);
        }

        let mut setup = Setup {
            params: &params,
            container: &mut container,
        };
        def.init(&mut setup)?;
        container.finalize()?;

        let mut canvas = Canvas {
            params: &params,
            ctx,
            container: &mut container,
        };
        def.draw(&mut canvas)?;

        Ok(Self {
            def,
            params,
            container,
        })
    }

    pub fn id(&self) -> &str {
        self.container.id()
    }

    pub fn def(&self) -> &D {
        &self.def
    }

    pub fn params(&self) -> &D::Params {
        &self.params
    }

    pub fn style(&self) -> &Style {
        self.container.style()
    }

    pub fn container(&self) -> &Container {
        &self.container
    }

    pub fn container_mut(&mut self) -> &mut Container {
        &mut self.container
    }

    pub fn size(&self) -> Result<DVec2> {
        self.container.size()
    }

    pub fn width(&self) -> Result<f64> {
        self.container.width()
    }

    pub fn height(&self) -> Result<f64> {
        self.container.height()
    }

    pub fn canonical_size(&self) -> Option<DVec2> {
        self.container.canonical_size()
    }

    pub fn canonical_center(&self) -> Option<DVec2> {
        self.container.canonical_center()
    }

    /// Filesystem-safe descriptor of params and style overrides.
    pub fn describe(&self) -> String {
        let params = self.params.describe();
        let style = self.container.style().describe();
        match (params.is_empty(), style.is_empty()) {
            (true, true) => String::new(),
            (false, true) => params,
            (true, false) => style,
            (false, false) => format!("{params}__{style}"),
        }
    }

    /// Place a child subtree; see [`Container::insert`].
    pub fn insert(
        &mut self,
        child: impl Into<Container>,
        position: Option<DVec2>,
    ) -> Result<&mut Container> {
        self.container.insert(child, position)
    }

    /// Serialize as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        self.container.to_svg()
    }
}

impl<D: GlyphDef> From<Glyph<D>> for Container {
    fn from(glyph: Glyph<D>) -> Container {
        glyph.container
    }
}

impl<D: GlyphDef> Transformable for Glyph<D> {
    fn transform_ops(&mut self) -> &mut Vec<TransformOp> {
        self.container.transform_ops()
    }

    fn transform_size(&self) -> Option<DVec2> {
        self.container.transform_size()
    }
}

impl<D: GlyphDef> ElementFactory for Glyph<D> {
    fn surface(&mut self) -> &mut Vec<Node> {
        self.container.surface()
    }

    fn base_style(&self) -> Style {
        self.container.base_style()
    }
}

/// Freeform glyph with no params and no drawing of its own; a container
/// for on-the-fly composition.
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl GlyphDef for Empty {
    type Params = EmptyParams;

    const NAME: &'static str = "Empty";

    fn draw(&mut self, _canvas: &mut Canvas<'_, EmptyParams>) -> Result<()> {
        Ok(())
    }
}

impl Glyph<Empty> {
    /// Build an empty glyph, optionally with an explicit size.
    pub fn empty(ctx: &GlyphContext, size: Option<DVec2>) -> Result<Self> {
        let options = match size {
            Some(size) => GlyphOptions::default().size(size),
            None => GlyphOptions::default(),
        };
        Self::build_with(ctx, Empty, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph_params;

    glyph_params! {
        pub struct DotParams patch DotPatch {
            color: String = "black".to_string(),
            unit: f64 = 10.0,
        }
    }

    struct Dot;

    impl GlyphDef for Dot {
        type Params = DotParams;

        const NAME: &'static str = "Dot";

        fn default_style() -> Style {
            Style::default().stroke("none")
        }

        fn init(&mut self, setup: &mut Setup<'_, DotParams>) -> Result<()> {
            setup.set_size(DVec2::splat(setup.params.unit));
            Ok(())
        }

        fn draw(&mut self, canvas: &mut Canvas<'_, DotParams>) -> Result<()> {
            let radius = canvas.params.unit / 2.0;
            let color = canvas.params.color.clone();
            canvas.draw_circle(
                DVec2::splat(radius),
                radius,
                Style::default().fill(color),
            );
            Ok(())
        }
    }

    #[test]
    fn lifecycle_aggregates_params_and_style() {
        let ctx = GlyphContext::new();
        let glyph = Glyph::build(&ctx, Dot).unwrap();
        assert_eq!(glyph.id(), "Dot-0");
        assert_eq!(glyph.params().color, "black");
        assert_eq!(glyph.canonical_size(), Some(DVec2::splat(10.0)));
        assert_eq!(glyph.style().stroke.as_deref(), Some("none"));
        assert!(glyph.to_svg().contains("fill=\"black\""));
    }

    #[test]
    fn caller_patch_wins() {
        let ctx = GlyphContext::new();
        let glyph = Glyph::build_with(
            &ctx,
            Dot,
            GlyphOptions::default().params(DotPatch {
                color: Some("red".to_string()),
                ..DotPatch::default()
            }),
        )
        .unwrap();
        assert_eq!(glyph.params().color, "red");
        assert!(glyph.to_svg().contains("fill=\"red\""));
    }

    #[test]
    fn default_params_patch_applies_between() {
        struct RedDot;

        impl GlyphDef for RedDot {
            type Params = DotParams;

            const NAME: &'static str = "RedDot";

            fn default_params() -> Option<DotPatch> {
                Some(DotPatch {
                    color: Some("red".to_string()),
                    ..DotPatch::default()
                })
            }

            fn draw(&mut self, _canvas: &mut Canvas<'_, DotParams>) -> Result<()> {
                Ok(())
            }
        }

        let ctx = GlyphContext::new();
        let defaulted = Glyph::build(&ctx, RedDot).unwrap();
        assert_eq!(defaulted.params().color, "red");

        let overridden = Glyph::build_with(
            &ctx,
            RedDot,
            GlyphOptions::default().params(DotPatch {
                color: Some("green".to_string()),
                ..DotPatch::default()
            }),
        )
        .unwrap();
        assert_eq!(overridden.params().color, "green");
    }

    #[test]
    fn explicit_id_bypasses_allocation() {
        let ctx = GlyphContext::new();
        let glyph =
            Glyph::build_with(&ctx, Dot, GlyphOptions::default().id("custom")).unwrap();
        assert_eq!(glyph.id(), "custom");
        assert_eq!(Glyph::build(&ctx, Dot).unwrap().id(), "Dot-0");
    }

    #[test]
    fn instantiated_size_drives_rescale() {
        let ctx = GlyphContext::new();
        let glyph = Glyph::build_with(
            &ctx,
            Dot,
            GlyphOptions::default().size(DVec2::splat(100.0)),
        )
        .unwrap();
        assert_eq!(glyph.size().unwrap(), DVec2::splat(100.0));
        let svg = glyph.to_svg();
        assert!(svg.contains("wrapper-scale"));
        assert!(svg.contains("viewBox=\"0 0 10 10\""));
    }

    #[test]
    fn empty_glyph_composes_freeform() {
        let ctx = GlyphContext::new();
        let dot = Glyph::build(&ctx, Dot).unwrap();
        let mut empty = Glyph::empty(&ctx, None).unwrap();
        empty.insert(dot, Some(DVec2::new(5.0, 5.0))).unwrap();
        assert_eq!(empty.id(), "Empty-0");
        assert_eq!(empty.container().nested_ids(), ["Dot-0"]);
        assert!(matches!(
            empty.size(),
            Err(crate::errors::GlyphError::NoSize { .. })
        ));
    }

    #[test]
    fn empty_glyph_takes_explicit_size() {
        let ctx = GlyphContext::new();
        let empty = Glyph::empty(&ctx, Some(DVec2::splat(50.0))).unwrap();
        assert_eq!(empty.size().unwrap(), DVec2::splat(50.0));
        assert!(empty.to_svg().contains("width=\"50\" height=\"50\""));
    }

    #[test]
    fn describe_combines_params_and_style() {
        let ctx = GlyphContext::new();
        let glyph = Glyph::build_with(
            &ctx,
            Dot,
            GlyphOptions::default().style(Style::default().opacity("0.5")),
        )
        .unwrap();
        assert_eq!(
            glyph.describe(),
            "color-black__unit-10__stroke-none__opacity-0_5"
        );
    }
}
