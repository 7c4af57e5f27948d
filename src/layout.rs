//! Grid and padding composition helpers.
//!
//! These are ordinary glyph definitions over type-erased child containers:
//! build the children first, hand them over, and build the layout glyph
//! like any other. Structural problems (ragged rows, sizeless children)
//! are rejected during `init`, before any layout math runs.

use glam::DVec2;

use crate::container::Container;
use crate::context::GlyphContext;
use crate::errors::{GlyphError, Result};
use crate::glyph::{Canvas, Glyph, GlyphDef, GlyphOptions, Setup};
use crate::glyph_params;
use crate::params::EmptyParams;

glyph_params! {
    /// Shared configuration for the grid layouts.
    pub struct ArrayParams patch ArrayPatch {
        /// Gap between adjacent cells, in canonical units.
        spacing: f64 = 0.0,
        /// Center each child within its cell slot.
        center: bool = true,
    }
}

/// Grid of child containers. Cell slots are sized per-column / per-row by
/// the largest child; the canonical size is the sum of slots plus spacing.
#[derive(Debug)]
pub struct Matrix {
    rows: Vec<Vec<Container>>,
    col_widths: Vec<f64>,
    row_heights: Vec<f64>,
}

impl Matrix {
    pub fn new<R, C>(rows: R) -> Self
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator,
        C::Item: Into<Container>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
            col_widths: Vec::new(),
            row_heights: Vec::new(),
        }
    }

    fn measure(&mut self, spacing: f64) -> Result<DVec2> {
        let expected = self.rows.first().map(Vec::len).unwrap_or(0);
        for (i, row) in self.rows.iter().enumerate() {
            if row.len() != expected {
                return Err(GlyphError::RaggedMatrix {
                    row: i,
                    len: row.len(),
                    expected,
                });
            }
        }

        let mut col_widths = vec![0.0_f64; expected];
        let mut row_heights = vec![0.0_f64; self.rows.len()];
        for (r, row) in self.rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let size = cell.size().map_err(|_| GlyphError::UnsizedChild {
                    id: cell.id().to_string(),
                })?;
                col_widths[c] = col_widths[c].max(size.x);
                row_heights[r] = row_heights[r].max(size.y);
            }
        }

        let width = col_widths.iter().sum::<f64>()
            + spacing * expected.saturating_sub(1) as f64;
        let height = row_heights.iter().sum::<f64>()
            + spacing * self.rows.len().saturating_sub(1) as f64;
        self.col_widths = col_widths;
        self.row_heights = row_heights;
        Ok(DVec2::new(width, height))
    }
}

impl GlyphDef for Matrix {
    type Params = ArrayParams;

    const NAME: &'static str = "Matrix";

    fn init(&mut self, setup: &mut Setup<'_, ArrayParams>) -> Result<()> {
        let size = self.measure(setup.params.spacing)?;
        setup.set_size(size);
        Ok(())
    }

    fn draw(&mut self, canvas: &mut Canvas<'_, ArrayParams>) -> Result<()> {
        let spacing = canvas.params.spacing;
        let center = canvas.params.center;
        let rows = std::mem::take(&mut self.rows);
        let mut y = 0.0;
        for (r, row) in rows.into_iter().enumerate() {
            let mut x = 0.0;
            for (c, cell) in row.into_iter().enumerate() {
                let slot = DVec2::new(self.col_widths[c], self.row_heights[r]);
                let size = cell.size().map_err(|_| GlyphError::UnsizedChild {
                    id: cell.id().to_string(),
                })?;
                let mut position = DVec2::new(x, y);
                if center {
                    position += (slot - size) / 2.0;
                }
                canvas.insert(cell, Some(position))?;
                x += slot.x + spacing;
            }
            y += self.row_heights[r] + spacing;
        }
        Ok(())
    }
}

/// Single-row grid.
pub struct HArray {
    inner: Matrix,
}

impl HArray {
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Container>,
    {
        Self {
            inner: Matrix::new([cells.into_iter().map(Into::into).collect::<Vec<_>>()]),
        }
    }
}

impl GlyphDef for HArray {
    type Params = ArrayParams;

    const NAME: &'static str = "HArray";

    fn init(&mut self, setup: &mut Setup<'_, ArrayParams>) -> Result<()> {
        self.inner.init(setup)
    }

    fn draw(&mut self, canvas: &mut Canvas<'_, ArrayParams>) -> Result<()> {
        self.inner.draw(canvas)
    }
}

/// Single-column grid.
pub struct VArray {
    inner: Matrix,
}

impl VArray {
    pub fn new<I>(cells: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Container>,
    {
        Self {
            inner: Matrix::new(cells.into_iter().map(|c| vec![c.into()])),
        }
    }
}

impl GlyphDef for VArray {
    type Params = ArrayParams;

    const NAME: &'static str = "VArray";

    fn init(&mut self, setup: &mut Setup<'_, ArrayParams>) -> Result<()> {
        self.inner.init(setup)
    }

    fn draw(&mut self, canvas: &mut Canvas<'_, ArrayParams>) -> Result<()> {
        self.inner.draw(canvas)
    }
}

/// Per-side padding amounts, in canonical units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pad {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Pad {
    pub fn uniform(amount: f64) -> Self {
        Self {
            left: amount,
            top: amount,
            right: amount,
            bottom: amount,
        }
    }
}

/// Wraps one child with padding on every side. With no explicit padding the
/// default is a tenth of the child's smaller dimension.
#[derive(Debug)]
pub struct Padding {
    inner: Option<Container>,
    pad: Option<Pad>,
    resolved: Pad,
}

impl Padding {
    pub fn new(inner: impl Into<Container>) -> Self {
        Self {
            inner: Some(inner.into()),
            pad: None,
            resolved: Pad::uniform(0.0),
        }
    }

    pub fn with_pad(inner: impl Into<Container>, pad: Pad) -> Self {
        Self {
            inner: Some(inner.into()),
            pad: Some(pad),
            resolved: Pad::uniform(0.0),
        }
    }

    /// Build a padded wrapper around `inner` with id `<inner-id>-pad`.
    pub fn wrap(
        ctx: &GlyphContext,
        inner: impl Into<Container>,
        pad: Option<Pad>,
    ) -> Result<Glyph<Padding>> {
        let inner = inner.into();
        let id = format!("{}-pad", inner.id());
        let def = Self {
            inner: Some(inner),
            pad,
            resolved: Pad::uniform(0.0),
        };
        Glyph::build_with(ctx, def, GlyphOptions::default().id(id))
    }
}

impl GlyphDef for Padding {
    type Params = EmptyParams;

    const NAME: &'static str = "Padding";

    fn init(&mut self, setup: &mut Setup<'_, EmptyParams>) -> Result<()> {
        let Some(inner) = &self.inner else {
            return Ok(());
        };
        let size = inner.size().map_err(|_| GlyphError::UnsizedChild {
            id: inner.id().to_string(),
        })?;
        self.resolved = self.pad.unwrap_or_else(|| Pad::uniform(size.min_element() / 10.0));
        setup.set_size(DVec2::new(
            size.x + self.resolved.left + self.resolved.right,
            size.y + self.resolved.top + self.resolved.bottom,
        ));
        Ok(())
    }

    fn draw(&mut self, canvas: &mut Canvas<'_, EmptyParams>) -> Result<()> {
        if let Some(inner) = self.inner.take() {
            canvas.insert(
                inner,
                Some(DVec2::new(self.resolved.left, self.resolved.top)),
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::factory::ElementFactory;
    use crate::style::Style;

    struct Square(f64);

    impl GlyphDef for Square {
        type Params = EmptyParams;

        const NAME: &'static str = "Square";

        fn init(&mut self, setup: &mut Setup<'_, EmptyParams>) -> Result<()> {
            setup.set_size(DVec2::splat(self.0));
            Ok(())
        }

        fn draw(&mut self, canvas: &mut Canvas<'_, EmptyParams>) -> Result<()> {
            let size = DVec2::splat(self.0);
            canvas.draw_rect(DVec2::ZERO, size, Style::default().fill("black"));
            Ok(())
        }
    }

    fn square(ctx: &GlyphContext, side: f64) -> Glyph<Square> {
        Glyph::build(ctx, Square(side)).unwrap()
    }

    #[test]
    fn matrix_sizes_from_slots_and_spacing() {
        let ctx = GlyphContext::new();
        let matrix = Glyph::build_with(
            &ctx,
            Matrix::new([
                vec![square(&ctx, 100.0), square(&ctx, 100.0)],
                vec![square(&ctx, 100.0), square(&ctx, 100.0)],
            ]),
            GlyphOptions::default().params(ArrayPatch {
                spacing: Some(10.0),
                ..ArrayPatch::default()
            }),
        )
        .unwrap();
        assert_eq!(matrix.canonical_size(), Some(DVec2::splat(210.0)));
        let svg = matrix.to_svg();
        assert!(svg.contains("x=\"0\" y=\"0\""));
        assert!(svg.contains("x=\"110\" y=\"0\""));
        assert!(svg.contains("x=\"0\" y=\"110\""));
        assert!(svg.contains("x=\"110\" y=\"110\""));
    }

    #[test]
    fn matrix_centers_within_uneven_slots() {
        let ctx = GlyphContext::new();
        let matrix = Glyph::build(
            &ctx,
            Matrix::new([vec![square(&ctx, 100.0), square(&ctx, 50.0)]]),
        )
        .unwrap();
        assert_eq!(matrix.canonical_size(), Some(DVec2::new(150.0, 100.0)));
        // 50-square centered in a 50x100 slot starting at x=100
        assert!(matrix.to_svg().contains("x=\"100\" y=\"25\""));
    }

    #[test]
    fn ragged_matrix_rejected() {
        let ctx = GlyphContext::new();
        let err = Glyph::build(
            &ctx,
            Matrix::new([
                vec![square(&ctx, 10.0), square(&ctx, 10.0)],
                vec![square(&ctx, 10.0)],
            ]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            GlyphError::RaggedMatrix {
                row: 1,
                len: 1,
                expected: 2
            }
        ));
    }

    #[test]
    fn sizeless_cell_rejected() {
        let ctx = GlyphContext::new();
        let empty = Glyph::empty(&ctx, None).unwrap();
        let err = Glyph::build(&ctx, Matrix::new([vec![empty]])).unwrap_err();
        assert!(matches!(err, GlyphError::UnsizedChild { .. }));
    }

    #[test]
    fn harray_is_a_row() {
        let ctx = GlyphContext::new();
        let row = Glyph::build(
            &ctx,
            HArray::new([square(&ctx, 10.0), square(&ctx, 10.0), square(&ctx, 10.0)]),
        )
        .unwrap();
        assert_eq!(row.canonical_size(), Some(DVec2::new(30.0, 10.0)));
        assert_eq!(row.id(), "HArray-0");
    }

    #[test]
    fn varray_is_a_column() {
        let ctx = GlyphContext::new();
        let column = Glyph::build(
            &ctx,
            VArray::new([square(&ctx, 10.0), square(&ctx, 20.0)]),
        )
        .unwrap();
        assert_eq!(column.canonical_size(), Some(DVec2::new(20.0, 30.0)));
    }

    #[test]
    fn padding_default_is_tenth_of_min_dimension() {
        let ctx = GlyphContext::new();
        let padded = Padding::wrap(&ctx, square(&ctx, 100.0), None).unwrap();
        assert_eq!(padded.id(), "Square-0-pad");
        assert_eq!(padded.canonical_size(), Some(DVec2::splat(120.0)));
        assert!(padded.to_svg().contains("x=\"10\" y=\"10\""));
    }

    #[test]
    fn padding_explicit_per_side() {
        let ctx = GlyphContext::new();
        let padded = Padding::wrap(
            &ctx,
            square(&ctx, 100.0),
            Some(Pad {
                left: 5.0,
                top: 10.0,
                right: 15.0,
                bottom: 20.0,
            }),
        )
        .unwrap();
        assert_eq!(padded.canonical_size(), Some(DVec2::new(120.0, 130.0)));
        assert!(padded.to_svg().contains("x=\"5\" y=\"10\""));
    }

    #[test]
    fn padding_unsized_child_rejected() {
        let ctx = GlyphContext::new();
        let empty = Glyph::empty(&ctx, None).unwrap();
        let err = Padding::wrap(&ctx, empty, None).unwrap_err();
        assert!(matches!(err, GlyphError::UnsizedChild { .. }));
    }
}
