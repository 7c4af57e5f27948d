//! Strongly-typed SVG drawing nodes.
//!
//! Every shape owns its aggregated style and its own transform list, so a
//! transform applied through an element handle affects that element only.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::container::NestedChild;
use crate::style::Style;
use crate::transform::{transform_attr, TransformOp, Transformable};
use crate::writer::{fmt_num, ToXml, XmlWriter};

#[derive(Debug, Clone)]
pub struct Line {
    pub start: DVec2,
    pub end: DVec2,
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
}

#[derive(Debug, Clone)]
pub struct Polyline {
    pub points: Vec<DVec2>,
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
}

#[derive(Debug, Clone)]
pub struct Polygon {
    pub points: Vec<DVec2>,
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
}

#[derive(Debug, Clone)]
pub struct Rect {
    pub position: DVec2,
    pub size: DVec2,
    pub rx: Option<f64>,
    pub ry: Option<f64>,
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
}

impl Rect {
    /// Round the corners.
    pub fn round(&mut self, rx: f64, ry: f64) -> &mut Self {
        self.rx = Some(rx);
        self.ry = Some(ry);
        self
    }
}

#[derive(Debug, Clone)]
pub struct Circle {
    pub center: DVec2,
    pub radius: f64,
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
}

#[derive(Debug, Clone)]
pub struct Ellipse {
    pub center: DVec2,
    pub radius: DVec2,
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
}

/// A `<g>` grouping element; draws append to its children via
/// [`ElementFactory`](crate::element::ElementFactory).
#[derive(Debug, Clone)]
pub struct Group {
    pub style: Style,
    pub(crate) transform: Vec<TransformOp>,
    pub(crate) children: Vec<Node>,
}

/// A node of the canonical drawing surface, in z-order.
#[enum_dispatch(ToXml)]
#[derive(Debug, Clone)]
pub enum Node {
    Line(Line),
    Polyline(Polyline),
    Polygon(Polygon),
    Rect(Rect),
    Circle(Circle),
    Ellipse(Ellipse),
    Group(Group),
    Nested(NestedChild),
}

macro_rules! impl_transformable {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl Transformable for $ty {
                fn transform_ops(&mut self) -> &mut Vec<TransformOp> {
                    &mut self.transform
                }

                fn transform_size(&self) -> Option<DVec2> {
                    None
                }
            }
        )+
    };
}

impl_transformable!(Line, Polyline, Polygon, Rect, Circle, Ellipse, Group);

fn write_transform(w: &mut XmlWriter, ops: &[TransformOp]) {
    if let Some(attr) = transform_attr(ops) {
        w.attr("transform", &attr);
    }
}

fn points_attr(points: &[DVec2]) -> String {
    points
        .iter()
        .map(|p| format!("{},{}", fmt_num(p.x), fmt_num(p.y)))
        .collect::<Vec<_>>()
        .join(" ")
}

impl ToXml for Line {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("line");
        w.attr_num("x1", self.start.x);
        w.attr_num("y1", self.start.y);
        w.attr_num("x2", self.end.x);
        w.attr_num("y2", self.end.y);
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        w.end();
    }
}

impl ToXml for Polyline {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("polyline");
        w.attr("points", &points_attr(&self.points));
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        w.end();
    }
}

impl ToXml for Polygon {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("polygon");
        w.attr("points", &points_attr(&self.points));
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        w.end();
    }
}

impl ToXml for Rect {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("rect");
        w.attr_num("x", self.position.x);
        w.attr_num("y", self.position.y);
        w.attr_num("width", self.size.x);
        w.attr_num("height", self.size.y);
        if let Some(rx) = self.rx {
            w.attr_num("rx", rx);
        }
        if let Some(ry) = self.ry {
            w.attr_num("ry", ry);
        }
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        w.end();
    }
}

impl ToXml for Circle {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("circle");
        w.attr_num("cx", self.center.x);
        w.attr_num("cy", self.center.y);
        w.attr_num("r", self.radius);
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        w.end();
    }
}

impl ToXml for Ellipse {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("ellipse");
        w.attr_num("cx", self.center.x);
        w.attr_num("cy", self.center.y);
        w.attr_num("rx", self.radius.x);
        w.attr_num("ry", self.radius.y);
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        w.end();
    }
}

impl ToXml for Group {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("g");
        self.style.write_attrs(w);
        write_transform(w, &self.transform);
        for child in &self.children {
            child.write_xml(w);
        }
        w.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(node: &dyn ToXml) -> String {
        let mut w = XmlWriter::new();
        node.write_xml(&mut w);
        w.finish()
    }

    #[test]
    fn line_serialization() {
        let line = Line {
            start: DVec2::ZERO,
            end: DVec2::new(10.0, 20.0),
            style: Style::default().stroke("black"),
            transform: Vec::new(),
        };
        assert_eq!(
            render(&line),
            "<line x1=\"0\" y1=\"0\" x2=\"10\" y2=\"20\" stroke=\"black\"/>\n"
        );
    }

    #[test]
    fn polygon_points() {
        let poly = Polygon {
            points: vec![DVec2::ZERO, DVec2::new(5.0, 0.0), DVec2::new(2.5, 4.0)],
            style: Style::default(),
            transform: Vec::new(),
        };
        assert_eq!(render(&poly), "<polygon points=\"0,0 5,0 2.5,4\"/>\n");
    }

    #[test]
    fn rect_rounded_corners() {
        let mut rect = Rect {
            position: DVec2::new(1.0, 2.0),
            size: DVec2::new(3.0, 4.0),
            rx: None,
            ry: None,
            style: Style::default(),
            transform: Vec::new(),
        };
        rect.round(0.5, 0.5);
        assert_eq!(
            render(&rect),
            "<rect x=\"1\" y=\"2\" width=\"3\" height=\"4\" rx=\"0.5\" ry=\"0.5\"/>\n"
        );
    }

    #[test]
    fn element_transform_is_local() {
        let mut circle = Circle {
            center: DVec2::splat(5.0),
            radius: 2.0,
            style: Style::default(),
            transform: Vec::new(),
        };
        circle.rotate(45.0, Some(DVec2::splat(5.0)));
        assert_eq!(
            render(&circle),
            "<circle cx=\"5\" cy=\"5\" r=\"2\" transform=\"rotate(45,5,5)\"/>\n"
        );
    }

    #[test]
    fn group_nests_children() {
        let group = Group {
            style: Style::default().fill("red"),
            transform: Vec::new(),
            children: vec![Node::Circle(Circle {
                center: DVec2::ZERO,
                radius: 1.0,
                style: Style::default(),
                transform: Vec::new(),
            })],
        };
        assert_eq!(
            render(&group),
            "<g fill=\"red\">\n  <circle cx=\"0\" cy=\"0\" r=\"1\"/>\n</g>\n"
        );
    }
}
