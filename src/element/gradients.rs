//! Gradient definitions registered in a glyph's `<defs>` area.
//!
//! Stops are specified either as a flat color list (spread evenly across an
//! optional sweep sub-range) or as explicit [`Stop`] triples; supplying
//! neither or both is an error caught at creation time.

use enum_dispatch::enum_dispatch;
use glam::DVec2;

use crate::errors::{GlyphError, Result};
use crate::writer::{fmt_num, ToXml, XmlWriter};

/// A single gradient stop. Offsets and opacity are percentages (0-100).
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    pub color: String,
    pub offset_pct: f64,
    pub opacity_pct: Option<f64>,
}

impl Stop {
    pub fn new(color: impl Into<String>, offset_pct: f64) -> Self {
        Self {
            color: color.into(),
            offset_pct,
            opacity_pct: None,
        }
    }

    pub fn opacity(mut self, pct: f64) -> Self {
        self.opacity_pct = Some(pct);
        self
    }
}

/// Stop specification for a gradient: a color list or explicit stops.
///
/// `sweep` and `opacity` only apply to the color-list form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradientStops {
    colors: Vec<String>,
    stops: Vec<Stop>,
    sweep_pct: Option<(f64, f64)>,
    opacity_pct: Option<f64>,
}

impl GradientStops {
    /// Spread a flat color list evenly across the sweep range.
    pub fn colors<I, S>(colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Explicit stop triples, used verbatim.
    pub fn stops(stops: Vec<Stop>) -> Self {
        Self {
            stops,
            ..Self::default()
        }
    }

    /// Restrict the color spread to a sub-range of the gradient vector,
    /// in percent.
    pub fn sweep(mut self, start_pct: f64, end_pct: f64) -> Self {
        self.sweep_pct = Some((start_pct, end_pct));
        self
    }

    /// Shared opacity applied to every spread color, in percent.
    pub fn opacity(mut self, pct: f64) -> Self {
        self.opacity_pct = Some(pct);
        self
    }

    pub(crate) fn is_unset(&self) -> bool {
        self.colors.is_empty() && self.stops.is_empty()
    }

    pub(crate) fn resolve(&self) -> Result<Vec<Stop>> {
        match (self.colors.is_empty(), self.stops.is_empty()) {
            (true, true) => Err(GlyphError::GradientStopsMissing),
            (false, false) => Err(GlyphError::GradientStopsConflict),
            (true, false) => Ok(self.stops.clone()),
            (false, true) => {
                let (start, end) = self.sweep_pct.unwrap_or((0.0, 100.0));
                let n = self.colors.len();
                Ok(self
                    .colors
                    .iter()
                    .enumerate()
                    .map(|(i, color)| {
                        let t = if n <= 1 {
                            0.0
                        } else {
                            i as f64 / (n - 1) as f64
                        };
                        Stop {
                            color: color.clone(),
                            offset_pct: start + (end - start) * t,
                            opacity_pct: self.opacity_pct,
                        }
                    })
                    .collect())
            }
        }
    }
}

/// Handle to a registered gradient definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GradientRef {
    id: String,
}

impl GradientRef {
    pub(crate) fn new(id: String) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// `url(#id)` reference usable as a fill or stroke value.
    pub fn funciri(&self) -> String {
        format!("url(#{})", self.id)
    }
}

#[derive(Debug, Clone)]
pub struct LinearGradient {
    pub(crate) id: String,
    pub(crate) start: DVec2,
    pub(crate) end: DVec2,
    pub(crate) stops: Vec<Stop>,
    pub(crate) href: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RadialGradient {
    pub(crate) id: String,
    pub(crate) center: DVec2,
    pub(crate) radius: f64,
    pub(crate) focal: Option<DVec2>,
    pub(crate) stops: Vec<Stop>,
    pub(crate) href: Option<String>,
}

/// A definition stored in the `<defs>` area.
#[enum_dispatch(ToXml)]
#[derive(Debug, Clone)]
pub enum Gradient {
    Linear(LinearGradient),
    Radial(RadialGradient),
}

fn write_stops(w: &mut XmlWriter, stops: &[Stop]) {
    for stop in stops {
        w.start("stop");
        w.attr("offset", &fmt_num(stop.offset_pct / 100.0));
        w.attr("stop-color", &stop.color);
        if let Some(opacity) = stop.opacity_pct {
            w.attr("stop-opacity", &fmt_num(opacity / 100.0));
        }
        w.end();
    }
}

impl ToXml for LinearGradient {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("linearGradient");
        w.attr("id", &self.id);
        if let Some(href) = &self.href {
            w.attr("href", &format!("#{href}"));
        }
        w.attr_num("x1", self.start.x);
        w.attr_num("y1", self.start.y);
        w.attr_num("x2", self.end.x);
        w.attr_num("y2", self.end.y);
        w.attr("gradientUnits", "userSpaceOnUse");
        write_stops(w, &self.stops);
        w.end();
    }
}

impl ToXml for RadialGradient {
    fn write_xml(&self, w: &mut XmlWriter) {
        w.start("radialGradient");
        w.attr("id", &self.id);
        if let Some(href) = &self.href {
            w.attr("href", &format!("#{href}"));
        }
        w.attr_num("cx", self.center.x);
        w.attr_num("cy", self.center.y);
        w.attr_num("r", self.radius);
        if let Some(focal) = self.focal {
            w.attr_num("fx", focal.x);
            w.attr_num("fy", focal.y);
        }
        w.attr("gradientUnits", "userSpaceOnUse");
        write_stops(w, &self.stops);
        w.end();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_spread_evenly() {
        let stops = GradientStops::colors(["red", "white", "blue"])
            .resolve()
            .unwrap();
        assert_eq!(stops.len(), 3);
        assert_eq!(stops[0].offset_pct, 0.0);
        assert_eq!(stops[1].offset_pct, 50.0);
        assert_eq!(stops[2].offset_pct, 100.0);
    }

    #[test]
    fn sweep_restricts_spread() {
        let stops = GradientStops::colors(["red", "blue"])
            .sweep(20.0, 80.0)
            .resolve()
            .unwrap();
        assert_eq!(stops[0].offset_pct, 20.0);
        assert_eq!(stops[1].offset_pct, 80.0);
    }

    #[test]
    fn single_color_sits_at_sweep_start() {
        let stops = GradientStops::colors(["red"])
            .sweep(25.0, 75.0)
            .resolve()
            .unwrap();
        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].offset_pct, 25.0);
    }

    #[test]
    fn missing_stops_rejected() {
        let err = GradientStops::default().resolve().unwrap_err();
        assert!(matches!(err, GlyphError::GradientStopsMissing));
    }

    #[test]
    fn conflicting_stops_rejected() {
        let mut stops = GradientStops::colors(["red"]);
        stops.stops.push(Stop::new("blue", 50.0));
        let err = stops.resolve().unwrap_err();
        assert!(matches!(err, GlyphError::GradientStopsConflict));
    }

    #[test]
    fn linear_gradient_serialization() {
        let grad = LinearGradient {
            id: "g-0".to_string(),
            start: DVec2::ZERO,
            end: DVec2::new(100.0, 0.0),
            stops: vec![Stop::new("red", 0.0), Stop::new("blue", 100.0).opacity(50.0)],
            href: None,
        };
        let mut w = XmlWriter::new();
        grad.write_xml(&mut w);
        let out = w.finish();
        assert!(out.contains("gradientUnits=\"userSpaceOnUse\""));
        assert!(out.contains("<stop offset=\"0\" stop-color=\"red\"/>"));
        assert!(out.contains("<stop offset=\"1\" stop-color=\"blue\" stop-opacity=\"0.5\"/>"));
    }

    #[test]
    fn funciri_format() {
        let r = GradientRef::new("Ring-0-gradient-0".to_string());
        assert_eq!(r.funciri(), "url(#Ring-0-gradient-0)");
    }
}
