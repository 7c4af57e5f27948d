//! XML serialization primitives for the SVG document tree.

use enum_dispatch::enum_dispatch;

use crate::container::NestedChild;
use crate::element::gradients::{Gradient, LinearGradient, RadialGradient};
use crate::element::shapes::{Circle, Ellipse, Group, Line, Node, Polygon, Polyline, Rect};

/// Serialization hook for document nodes, dispatched over the node enums.
#[enum_dispatch]
pub(crate) trait ToXml {
    fn write_xml(&self, w: &mut XmlWriter);
}

/// Decimal digits kept in attribute values. Canonical units are abstract,
/// so six significant digits is far below visible error while keeping
/// attributes short and byte-stable across platforms.
const SIG_DIGITS: i32 = 6;

/// Format an attribute number: six significant digits, no trailing zeros,
/// no exponent notation.
pub(crate) fn fmt_num(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    // Shift so the leading digit lands just above the rounding boundary,
    // round there, and shift back.
    let leading = value.abs().log10().floor() as i32;
    let shift = 10_f64.powi(SIG_DIGITS - 1 - leading);
    let rounded = (value * shift).round() / shift;

    let decimals = (SIG_DIGITS - 1 - leading).max(0) as usize;
    let mut out = format!("{rounded:.decimals$}");
    if out.contains('.') {
        while out.ends_with('0') {
            out.pop();
        }
        if out.ends_with('.') {
            out.pop();
        }
    }
    out
}

pub(crate) fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Streaming writer producing indented XML.
///
/// A started element stays open for attributes until the next `start` or
/// `end` call; `end` self-closes elements with no children.
pub struct XmlWriter {
    out: String,
    stack: Vec<&'static str>,
    open: bool,
}

impl XmlWriter {
    pub(crate) fn new() -> Self {
        Self {
            out: String::new(),
            stack: Vec::new(),
            open: false,
        }
    }

    pub(crate) fn start(&mut self, tag: &'static str) {
        if self.open {
            self.out.push_str(">\n");
            self.open = false;
        }
        let depth = self.stack.len();
        self.indent(depth);
        self.out.push('<');
        self.out.push_str(tag);
        self.stack.push(tag);
        self.open = true;
    }

    pub(crate) fn attr(&mut self, name: &str, value: &str) {
        self.out.push(' ');
        self.out.push_str(name);
        self.out.push_str("=\"");
        self.out.push_str(&escape_attr(value));
        self.out.push('"');
    }

    pub(crate) fn attr_num(&mut self, name: &str, value: f64) {
        let formatted = fmt_num(value);
        self.attr(name, &formatted);
    }

    pub(crate) fn end(&mut self) {
        let Some(tag) = self.stack.pop() else {
            return;
        };
        if self.open {
            self.out.push_str("/>\n");
            self.open = false;
        } else {
            let depth = self.stack.len();
            self.indent(depth);
            self.out.push_str("</");
            self.out.push_str(tag);
            self.out.push_str(">\n");
        }
    }

    pub(crate) fn finish(mut self) -> String {
        while !self.stack.is_empty() {
            self.end();
        }
        self.out
    }

    fn indent(&mut self, depth: usize) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_num_trims_trailing_zeros() {
        assert_eq!(fmt_num(0.0), "0");
        assert_eq!(fmt_num(1.0), "1");
        assert_eq!(fmt_num(1.5), "1.5");
        assert_eq!(fmt_num(0.25), "0.25");
        assert_eq!(fmt_num(-2.0), "-2");
        assert_eq!(fmt_num(100.0), "100");
    }

    #[test]
    fn fmt_num_six_sig_figs() {
        assert_eq!(fmt_num(1.0 / 3.0), "0.333333");
        assert_eq!(fmt_num(123456.78), "123457");
        assert_eq!(fmt_num(0.000123456789), "0.000123457");
        assert_eq!(fmt_num(-1.0 / 3.0), "-0.333333");
    }

    #[test]
    fn fmt_num_rounding_carry() {
        // rounding spills into a new leading digit
        assert_eq!(fmt_num(999999.5), "1000000");
        assert_eq!(fmt_num(0.0999999999), "0.1");
    }

    #[test]
    fn escape_special_chars() {
        assert_eq!(escape_attr("a<b&c>\"d\""), "a&lt;b&amp;c&gt;&quot;d&quot;");
        assert_eq!(escape_attr("plain"), "plain");
    }

    #[test]
    fn writer_nests_and_self_closes() {
        let mut w = XmlWriter::new();
        w.start("svg");
        w.attr("xmlns", "http://www.w3.org/2000/svg");
        w.start("rect");
        w.attr_num("width", 10.0);
        w.end();
        w.end();
        let out = w.finish();
        assert_eq!(
            out,
            "<svg xmlns=\"http://www.w3.org/2000/svg\">\n  <rect width=\"10\"/>\n</svg>\n"
        );
    }
}
