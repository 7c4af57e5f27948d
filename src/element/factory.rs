//! Drawing factory shared by containers, glyph canvases, and groups.

use glam::DVec2;

use crate::element::shapes::{Circle, Ellipse, Group, Line, Node, Polygon, Polyline, Rect};
use crate::style::Style;

/// Push a node and hand back a `&mut` to the concrete shape just pushed.
macro_rules! push_shape {
    ($self:ident, $variant:ident, $value:expr) => {{
        let surface = $self.surface();
        surface.push(Node::$variant($value));
        match surface.last_mut() {
            Some(Node::$variant(el)) => el,
            _ => unreachable!(),
        }
    }};
}

fn layered(base: Style, overlay: Style) -> Style {
    let mut style = base;
    style.merge_from(&overlay);
    style
}

/// Capability trait for anything a shape can be drawn onto.
///
/// Each `draw_*` method aggregates the surface's base style with the
/// per-call override, appends the element in z-order, and returns a handle
/// for further mutation or transform chaining.
pub trait ElementFactory {
    /// Node list new elements append to.
    fn surface(&mut self) -> &mut Vec<Node>;

    /// Style merged under every element's per-call override.
    fn base_style(&self) -> Style;

    fn draw_line(&mut self, start: DVec2, end: DVec2, style: Style) -> &mut Line {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Line,
            Line {
                start,
                end,
                style,
                transform: Vec::new(),
            }
        )
    }

    fn draw_polyline(&mut self, points: Vec<DVec2>, style: Style) -> &mut Polyline {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Polyline,
            Polyline {
                points,
                style,
                transform: Vec::new(),
            }
        )
    }

    fn draw_polygon(&mut self, points: Vec<DVec2>, style: Style) -> &mut Polygon {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Polygon,
            Polygon {
                points,
                style,
                transform: Vec::new(),
            }
        )
    }

    fn draw_rect(&mut self, position: DVec2, size: DVec2, style: Style) -> &mut Rect {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Rect,
            Rect {
                position,
                size,
                rx: None,
                ry: None,
                style,
                transform: Vec::new(),
            }
        )
    }

    fn draw_circle(&mut self, center: DVec2, radius: f64, style: Style) -> &mut Circle {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Circle,
            Circle {
                center,
                radius,
                style,
                transform: Vec::new(),
            }
        )
    }

    fn draw_ellipse(&mut self, center: DVec2, radius: DVec2, style: Style) -> &mut Ellipse {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Ellipse,
            Ellipse {
                center,
                radius,
                style,
                transform: Vec::new(),
            }
        )
    }

    fn draw_group(&mut self, style: Style) -> &mut Group {
        let style = layered(self.base_style(), style);
        push_shape!(
            self,
            Group,
            Group {
                style,
                transform: Vec::new(),
                children: Vec::new(),
            }
        )
    }
}

impl ElementFactory for Group {
    fn surface(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    fn base_style(&self) -> Style {
        self.style.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sheet {
        nodes: Vec<Node>,
        style: Style,
    }

    impl ElementFactory for Sheet {
        fn surface(&mut self) -> &mut Vec<Node> {
            &mut self.nodes
        }

        fn base_style(&self) -> Style {
            self.style.clone()
        }
    }

    #[test]
    fn draw_appends_in_z_order() {
        let mut sheet = Sheet {
            nodes: Vec::new(),
            style: Style::default(),
        };
        sheet.draw_circle(DVec2::ZERO, 1.0, Style::default());
        sheet.draw_rect(DVec2::ZERO, DVec2::splat(2.0), Style::default());
        assert!(matches!(sheet.nodes[0], Node::Circle(_)));
        assert!(matches!(sheet.nodes[1], Node::Rect(_)));
    }

    #[test]
    fn call_style_overrides_base() {
        let mut sheet = Sheet {
            nodes: Vec::new(),
            style: Style::default().fill("black").stroke("blue"),
        };
        let rect = sheet.draw_rect(
            DVec2::ZERO,
            DVec2::splat(1.0),
            Style::default().fill("red"),
        );
        assert_eq!(rect.style.fill.as_deref(), Some("red"));
        assert_eq!(rect.style.stroke.as_deref(), Some("blue"));
    }

    #[test]
    fn group_is_a_surface() {
        let mut sheet = Sheet {
            nodes: Vec::new(),
            style: Style::default(),
        };
        let group = sheet.draw_group(Style::default().opacity("0.5"));
        group.draw_line(DVec2::ZERO, DVec2::splat(1.0), Style::default());
        let Node::Group(g) = &sheet.nodes[0] else {
            panic!("expected group");
        };
        assert_eq!(g.children.len(), 1);
    }
}
