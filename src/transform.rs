//! Composable 2D transforms.
//!
//! Transform invocations append to an op list and serialize in invocation
//! order; they are never flattened into a single matrix, so composition
//! across nesting behaves exactly as the SVG `transform` attribute does.

use glam::DVec2;

use crate::writer::fmt_num;

/// One entry of a `transform` attribute list.
#[derive(Debug, Clone, PartialEq)]
pub enum TransformOp {
    Translate {
        dx: f64,
        dy: f64,
    },
    Rotate {
        angle: f64,
        center: Option<DVec2>,
    },
    Scale {
        sx: f64,
        sy: Option<f64>,
    },
    SkewX {
        angle: f64,
    },
    SkewY {
        angle: f64,
    },
    Matrix {
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
    },
}

impl TransformOp {
    pub(crate) fn to_svg(&self) -> String {
        match self {
            TransformOp::Translate { dx, dy } => {
                format!("translate({},{})", fmt_num(*dx), fmt_num(*dy))
            }
            TransformOp::Rotate {
                angle,
                center: Some(c),
            } => format!(
                "rotate({},{},{})",
                fmt_num(*angle),
                fmt_num(c.x),
                fmt_num(c.y)
            ),
            TransformOp::Rotate {
                angle,
                center: None,
            } => format!("rotate({})", fmt_num(*angle)),
            TransformOp::Scale { sx, sy: Some(sy) } => {
                format!("scale({},{})", fmt_num(*sx), fmt_num(*sy))
            }
            TransformOp::Scale { sx, sy: None } => format!("scale({})", fmt_num(*sx)),
            TransformOp::SkewX { angle } => format!("skewX({})", fmt_num(*angle)),
            TransformOp::SkewY { angle } => format!("skewY({})", fmt_num(*angle)),
            TransformOp::Matrix { a, b, c, d, e, f } => format!(
                "matrix({},{},{},{},{},{})",
                fmt_num(*a),
                fmt_num(*b),
                fmt_num(*c),
                fmt_num(*d),
                fmt_num(*e),
                fmt_num(*f)
            ),
        }
    }
}

/// Serialize an op list in invocation order, or `None` when empty.
pub(crate) fn transform_attr(ops: &[TransformOp]) -> Option<String> {
    if ops.is_empty() {
        None
    } else {
        Some(
            ops.iter()
                .map(TransformOp::to_svg)
                .collect::<Vec<_>>()
                .join(" "),
        )
    }
}

/// Capability trait for anything carrying a transform list: containers,
/// glyphs, and individual elements.
pub trait Transformable {
    /// The op list transform invocations append to.
    fn transform_ops(&mut self) -> &mut Vec<TransformOp>;

    /// Size used to derive a default rotation pivot, when known.
    fn transform_size(&self) -> Option<DVec2>;

    fn translate(&mut self, dx: f64, dy: f64) -> &mut Self {
        self.transform_ops().push(TransformOp::Translate { dx, dy });
        self
    }

    /// Rotate by `angle` degrees. With no explicit center the pivot is the
    /// geometric center when a size is resolvable, else the origin.
    fn rotate(&mut self, angle: f64, center: Option<DVec2>) -> &mut Self {
        let center = center.or_else(|| self.transform_size().map(|s| s / 2.0));
        self.transform_ops().push(TransformOp::Rotate { angle, center });
        self
    }

    fn scale(&mut self, sx: f64, sy: Option<f64>) -> &mut Self {
        self.transform_ops().push(TransformOp::Scale { sx, sy });
        self
    }

    fn skew_x(&mut self, angle: f64) -> &mut Self {
        self.transform_ops().push(TransformOp::SkewX { angle });
        self
    }

    fn skew_y(&mut self, angle: f64) -> &mut Self {
        self.transform_ops().push(TransformOp::SkewY { angle });
        self
    }

    fn matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.transform_ops()
            .push(TransformOp::Matrix { a, b, c, d, e, f });
        self
    }
}
