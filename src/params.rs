//! Per-glyph configuration schemas with presence-based patching.
//!
//! A glyph class declares a concrete params struct (every field has a
//! default) plus a *patch* struct holding each field as an `Option`. At
//! construction the aggregation chain is: schema defaults, then the glyph
//! definition's default patch, then the caller's patch; the rightmost
//! source with a field set wins. Params are immutable after construction.

/// Configuration schema for a glyph class.
///
/// Usually implemented via [`glyph_params!`](crate::glyph_params) rather
/// than by hand.
pub trait GlyphParams: Clone + Default {
    /// Presence-based override record: each schema field as an `Option`.
    type Patch: Clone + Default;

    /// Overlay a patch: fields set in the patch win.
    fn apply(&mut self, patch: &Self::Patch);

    /// Filesystem-safe descriptor over all schema fields in declaration
    /// order.
    fn describe(&self) -> String;
}

/// Schema for glyphs with no configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyParams;

/// Patch type for [`EmptyParams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyPatch;

impl GlyphParams for EmptyParams {
    type Patch = EmptyPatch;

    fn apply(&mut self, _patch: &EmptyPatch) {}

    fn describe(&self) -> String {
        String::new()
    }
}

/// Substitute characters that collide with filesystem or key-value syntax:
/// `=` becomes `~` and `.` becomes `_`.
pub fn sanitize_descriptor(raw: &str) -> String {
    raw.replace('=', "~").replace('.', "_")
}

/// Declare a params schema and its patch type in one block.
///
/// ```
/// use glyphforge::glyph_params;
///
/// glyph_params! {
///     pub struct RingParams patch RingPatch {
///         color: String = "black".to_string(),
///         thickness: f64 = 2.0,
///     }
/// }
/// ```
///
/// Expands to `RingParams` (with `Default` from the declared initializers),
/// `RingPatch` (every field an `Option`), and the
/// [`GlyphParams`](crate::params::GlyphParams) impl wiring them together.
/// Field types must implement `Clone`, `PartialEq` and `Display`.
#[macro_export]
macro_rules! glyph_params {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident patch $patch:ident {
            $(
                $(#[$fmeta:meta])*
                $field:ident : $ty:ty = $default:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                pub $field: $ty,
            )+
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self {
                    $( $field: $default, )+
                }
            }
        }

        #[derive(Debug, Clone, Default, PartialEq)]
        $vis struct $patch {
            $( pub $field: ::std::option::Option<$ty>, )+
        }

        impl $crate::params::GlyphParams for $name {
            type Patch = $patch;

            fn apply(&mut self, patch: &$patch) {
                $(
                    if let ::std::option::Option::Some(v) = &patch.$field {
                        self.$field = v.clone();
                    }
                )+
            }

            fn describe(&self) -> ::std::string::String {
                let parts: ::std::vec::Vec<::std::string::String> = vec![
                    $( format!("{}-{}", stringify!($field), &self.$field), )+
                ];
                $crate::params::sanitize_descriptor(&parts.join("__"))
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    glyph_params! {
        pub struct DemoParams patch DemoPatch {
            color: String = "black".to_string(),
            width: f64 = 1.5,
        }
    }

    #[test]
    fn defaults_from_initializers() {
        let params = DemoParams::default();
        assert_eq!(params.color, "black");
        assert_eq!(params.width, 1.5);
    }

    #[test]
    fn patch_set_fields_win() {
        let mut params = DemoParams::default();
        params.apply(&DemoPatch {
            color: Some("red".to_string()),
            ..DemoPatch::default()
        });
        assert_eq!(params.color, "red");
        assert_eq!(params.width, 1.5);
    }

    #[test]
    fn patch_chain_rightmost_wins() {
        let mut params = DemoParams::default();
        params.apply(&DemoPatch {
            color: Some("red".to_string()),
            width: Some(3.0),
        });
        params.apply(&DemoPatch {
            color: Some("green".to_string()),
            ..DemoPatch::default()
        });
        assert_eq!(params.color, "green");
        assert_eq!(params.width, 3.0);
    }

    #[test]
    fn describe_covers_all_fields() {
        assert_eq!(DemoParams::default().describe(), "color-black__width-1_5");
    }

    #[test]
    fn empty_params_describe() {
        assert_eq!(EmptyParams.describe(), "");
    }
}
