//! Layered document tree assembly.
//!
//! A container owns one glyph's document subtree. Serialized top-down the
//! layers are:
//!
//! 1. root `<svg>` document (standalone export only), sized whenever a size
//!    is resolvable so viewers do not truncate to the 100% default;
//! 2. placement group `<g id="{id}-group">` carrying the transform list;
//! 3. scaling wrapper `<svg id="{id}-wrapper-scale">`, present only when an
//!    instantiated size is set, mapping canonical units onto the target
//!    extent via `viewBox` with a centered meet fit;
//! 4. canonical `<svg id="{id}">` holding `<defs>` and the drawn content in
//!    canonical units.
//!
//! Inserted children keep their own subtree intact under a placement
//! wrapper `<svg id="{child-id}-wrapper-placement" x y>`.

use glam::DVec2;

use crate::element::factory::ElementFactory;
use crate::element::gradients::{
    Gradient, GradientRef, GradientStops, LinearGradient, RadialGradient,
};
use crate::element::shapes::Node;
use crate::errors::{GlyphError, Result};
use crate::log::warn;
use crate::style::Style;
use crate::transform::{transform_attr, TransformOp, Transformable};
use crate::writer::{fmt_num, ToXml, XmlWriter};

/// Canonical coordinate window, serialized as the `viewBox` attribute.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewBox {
    pub min: DVec2,
    pub size: DVec2,
}

impl ViewBox {
    pub fn new(min: DVec2, size: DVec2) -> Self {
        Self { min, size }
    }

    fn to_attr(self) -> String {
        format!(
            "{} {} {} {}",
            fmt_num(self.min.x),
            fmt_num(self.min.y),
            fmt_num(self.size.x),
            fmt_num(self.size.y)
        )
    }
}

/// One glyph's document subtree: identity, aggregated style, sizes, the
/// placement transform list, drawn content, and gradient definitions.
#[derive(Debug, Clone)]
pub struct Container {
    id: String,
    class_name: String,
    style: Style,
    canonical_size: Option<DVec2>,
    canonical_viewbox: Option<ViewBox>,
    instantiated_size: Option<DVec2>,
    transforms: Vec<TransformOp>,
    children: Vec<Node>,
    defs: Vec<Gradient>,
    nested_ids: Vec<String>,
    finalized: bool,
}

/// A child subtree placed at an offset inside its parent's canonical space.
#[derive(Debug, Clone)]
pub struct NestedChild {
    pub(crate) offset: DVec2,
    pub(crate) inner: Box<Container>,
}

impl Container {
    pub(crate) fn new(
        id: impl Into<String>,
        class_name: impl Into<String>,
        style: Style,
    ) -> Self {
        Self {
            id: id.into(),
            class_name: class_name.into(),
            style,
            canonical_size: None,
            canonical_viewbox: None,
            instantiated_size: None,
            transforms: Vec::new(),
            children: Vec::new(),
            defs: Vec::new(),
            nested_ids: Vec::new(),
            finalized: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn style(&self) -> &Style {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut Style {
        &mut self.style
    }

    pub(crate) fn set_canonical_size(&mut self, size: DVec2) {
        self.canonical_size = Some(size);
    }

    pub(crate) fn set_canonical_viewbox(&mut self, viewbox: ViewBox) {
        self.canonical_viewbox = Some(viewbox);
    }

    pub(crate) fn set_instantiated_size(&mut self, size: DVec2) {
        self.instantiated_size = Some(size);
    }

    pub fn canonical_size(&self) -> Option<DVec2> {
        self.canonical_size
    }

    /// Center of the canonical area, when a canonical size is declared.
    pub fn canonical_center(&self) -> Option<DVec2> {
        self.canonical_size.map(|s| s / 2.0)
    }

    pub fn instantiated_size(&self) -> Option<DVec2> {
        self.instantiated_size
    }

    /// Effective size: instantiated when set, else canonical.
    pub fn size(&self) -> Result<DVec2> {
        self.instantiated_size
            .or(self.canonical_size)
            .ok_or_else(|| GlyphError::NoSize {
                id: self.id.clone(),
            })
    }

    pub fn width(&self) -> Result<f64> {
        Ok(self.size()?.x)
    }

    pub fn height(&self) -> Result<f64> {
        Ok(self.size()?.y)
    }

    pub fn has_size(&self) -> bool {
        self.instantiated_size.is_some() || self.canonical_size.is_some()
    }

    /// Identifiers of directly nested children, in insertion order.
    pub fn nested_ids(&self) -> &[String] {
        &self.nested_ids
    }

    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Validate geometry once the `init` phase has run. Idempotent.
    pub(crate) fn finalize(&mut self) -> Result<()> {
        if let Some(vb) = self.canonical_viewbox {
            if vb.size.x <= 0.0 || vb.size.y <= 0.0 {
                return Err(GlyphError::InvalidViewBox {
                    id: self.id.clone(),
                    width: vb.size.x,
                    height: vb.size.y,
                });
            }
            if !vb.min.is_finite() || !vb.size.is_finite() {
                return Err(GlyphError::NonFiniteSize {
                    id: self.id.clone(),
                });
            }
        }
        for size in [self.canonical_size, self.instantiated_size].into_iter().flatten() {
            if !size.is_finite() {
                return Err(GlyphError::NonFiniteSize {
                    id: self.id.clone(),
                });
            }
        }
        self.finalized = true;
        Ok(())
    }

    /// Place a child subtree, consuming it.
    ///
    /// With no position the child is centered in the parent's canonical
    /// area when the parent has a canonical size (the child must then have
    /// a resolvable size), else placed at the origin. Returns the nested
    /// container for transform chaining.
    pub fn insert(
        &mut self,
        child: impl Into<Container>,
        position: Option<DVec2>,
    ) -> Result<&mut Container> {
        let child: Container = child.into();
        let offset = match position {
            Some(p) => p,
            None => match self.canonical_size {
                Some(parent) => {
                    let child_size = child.size().map_err(|_| GlyphError::UnsizedChild {
                        id: child.id.clone(),
                    })?;
                    (parent - child_size) / 2.0
                }
                None => DVec2::ZERO,
            },
        };
        self.nested_ids.push(child.id.clone());
        self.children.push(Node::Nested(NestedChild {
            offset,
            inner: Box::new(child),
        }));
        match self.children.last_mut() {
            Some(Node::Nested(nested)) => Ok(&mut nested.inner),
            _ => unreachable!(),
        }
    }

    fn next_gradient_id(&self) -> String {
        format!("{}-gradient-{}", self.id, self.defs.len())
    }

    /// Register a linear gradient definition and return a reference to it.
    pub fn create_linear_gradient(
        &mut self,
        start: DVec2,
        end: DVec2,
        stops: &GradientStops,
        inherit: Option<&GradientRef>,
    ) -> Result<GradientRef> {
        let resolved = if inherit.is_some() && stops.is_unset() {
            Vec::new()
        } else {
            stops.resolve()?
        };
        let id = self.next_gradient_id();
        self.defs.push(Gradient::Linear(LinearGradient {
            id: id.clone(),
            start,
            end,
            stops: resolved,
            href: inherit.map(|g| g.id().to_string()),
        }));
        Ok(GradientRef::new(id))
    }

    /// Register a radial gradient definition and return a reference to it.
    pub fn create_radial_gradient(
        &mut self,
        center: DVec2,
        radius: f64,
        focal: Option<DVec2>,
        stops: &GradientStops,
        inherit: Option<&GradientRef>,
    ) -> Result<GradientRef> {
        let resolved = if inherit.is_some() && stops.is_unset() {
            Vec::new()
        } else {
            stops.resolve()?
        };
        let id = self.next_gradient_id();
        self.defs.push(Gradient::Radial(RadialGradient {
            id: id.clone(),
            center,
            radius,
            focal,
            stops: resolved,
            href: inherit.map(|g| g.id().to_string()),
        }));
        Ok(GradientRef::new(id))
    }

    /// Serialize the subtree as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut w = XmlWriter::new();
        self.write_document(&mut w);
        w.finish()
    }

    fn write_document(&self, w: &mut XmlWriter) {
        w.start("svg");
        w.attr("xmlns", "http://www.w3.org/2000/svg");
        if let Some(size) = self.instantiated_size.or(self.canonical_size) {
            w.attr_num("width", size.x);
            w.attr_num("height", size.y);
        }
        self.write_group(w);
        w.end();
    }

    /// Placement group and everything below it.
    pub(crate) fn write_group(&self, w: &mut XmlWriter) {
        w.start("g");
        w.attr("id", &format!("{}-group", self.id));
        w.attr("class", &format!("{}-group", self.class_name));
        if let Some(attr) = transform_attr(&self.transforms) {
            w.attr("transform", &attr);
        }
        match self.instantiated_size {
            Some(instantiated) => self.write_scaled(w, instantiated),
            None => self.write_canonical(w),
        }
        w.end();
    }

    fn write_scaled(&self, w: &mut XmlWriter, instantiated: DVec2) {
        w.start("svg");
        w.attr("id", &format!("{}-wrapper-scale", self.id));
        w.attr("class", &format!("{}-wrapper-scale", self.class_name));
        w.attr_num("width", instantiated.x);
        w.attr_num("height", instantiated.y);
        match self.canonical_size {
            Some(canonical) => {
                w.attr(
                    "viewBox",
                    &format!(
                        "0 0 {} {}",
                        fmt_num(canonical.x.round()),
                        fmt_num(canonical.y.round())
                    ),
                );
                w.attr("preserveAspectRatio", "xMidYMid meet");
            }
            None => {
                warn!(
                    "rescaling `{}` without a canonical size; proportions are not preserved",
                    self.id
                );
            }
        }
        self.write_canonical(w);
        w.end();
    }

    fn write_canonical(&self, w: &mut XmlWriter) {
        w.start("svg");
        w.attr("id", &self.id);
        w.attr("class", &self.class_name);
        if let Some(canonical) = self.canonical_size {
            w.attr_num("width", canonical.x);
            w.attr_num("height", canonical.y);
        }
        if let Some(vb) = self.canonical_viewbox {
            w.attr("viewBox", &vb.to_attr());
            w.attr("preserveAspectRatio", "xMidYMid meet");
        }
        self.style.write_attrs(w);
        if !self.defs.is_empty() {
            w.start("defs");
            for def in &self.defs {
                def.write_xml(w);
            }
            w.end();
        }
        for node in &self.children {
            node.write_xml(w);
        }
        w.end();
    }
}

impl ToXml for NestedChild {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("svg");
        w.attr("id", &format!("{}-wrapper-placement", self.inner.id));
        w.attr(
            "class",
            &format!("{}-wrapper-placement", self.inner.class_name),
        );
        w.attr_num("x", self.offset.x);
        w.attr_num("y", self.offset.y);
        self.inner.write_group(w);
        w.end();
    }
}

impl Transformable for Container {
    fn transform_ops(&mut self) -> &mut Vec<TransformOp> {
        &mut self.transforms
    }

    fn transform_size(&self) -> Option<DVec2> {
        self.instantiated_size.or(self.canonical_size)
    }
}

impl ElementFactory for Container {
    fn surface(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    fn base_style(&self) -> Style {
        self.style.clone()
    }
}
