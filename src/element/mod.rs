//! Typed drawing elements, gradient definitions, and the drawing factory.

pub mod factory;
pub mod gradients;
pub mod shapes;

pub use factory::ElementFactory;
pub use gradients::{Gradient, GradientRef, GradientStops, LinearGradient, RadialGradient, Stop};
pub use shapes::{Circle, Ellipse, Group, Line, Node, Polygon, Polyline, Rect};
