//! SVG presentation styling with presence-based override.
//!
//! A `Style` field that is `None` is *unset* and falls through to whatever
//! an outer layer (or the SVG default) provides. Aggregation is last-wins
//! per field, never whole-record replacement.

use crate::params::sanitize_descriptor;
use crate::writer::XmlWriter;

macro_rules! style_fields {
    ($( $field:ident => $attr:literal ),+ $(,)?) => {
        /// Record of SVG presentation attributes. Unset fields are omitted
        /// from serialized output.
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct Style {
            $( pub $field: Option<String>, )+
        }

        impl Style {
            $(
                #[doc = concat!("Set `", $attr, "`.")]
                pub fn $field(mut self, value: impl Into<String>) -> Self {
                    self.$field = Some(value.into());
                    self
                }
            )+

            /// Overlay `other` on top of `self`: fields set in `other` win,
            /// unset fields fall through.
            pub fn merge_from(&mut self, other: &Style) {
                $(
                    if other.$field.is_some() {
                        self.$field = other.$field.clone();
                    }
                )+
            }

            /// Fold an override chain left to right; the last source with a
            /// field set wins.
            pub fn aggregate<'a, I>(sources: I) -> Style
            where
                I: IntoIterator<Item = &'a Style>,
            {
                let mut out = Style::default();
                for source in sources {
                    out.merge_from(source);
                }
                out
            }

            pub fn is_empty(&self) -> bool {
                $( self.$field.is_none() )&&+
            }

            /// Filesystem-safe descriptor of the set fields, in declaration
            /// order: `attr-value` pairs joined by `__`.
            pub fn describe(&self) -> String {
                let mut parts: Vec<String> = Vec::new();
                $(
                    if let Some(v) = &self.$field {
                        parts.push(format!("{}-{}", $attr, v));
                    }
                )+
                sanitize_descriptor(&parts.join("__"))
            }

            pub(crate) fn write_attrs(&self, w: &mut XmlWriter) {
                $(
                    if let Some(v) = &self.$field {
                        w.attr($attr, v);
                    }
                )+
            }
        }
    };
}

style_fields! {
    fill => "fill",
    fill_opacity => "fill-opacity",
    fill_rule => "fill-rule",
    stroke => "stroke",
    stroke_width => "stroke-width",
    stroke_opacity => "stroke-opacity",
    stroke_linecap => "stroke-linecap",
    stroke_linejoin => "stroke-linejoin",
    stroke_miterlimit => "stroke-miterlimit",
    stroke_dasharray => "stroke-dasharray",
    stroke_dashoffset => "stroke-dashoffset",
    color => "color",
    opacity => "opacity",
    font_family => "font-family",
    font_size => "font-size",
    font_style => "font-style",
    font_weight => "font-weight",
    text_anchor => "text-anchor",
}
