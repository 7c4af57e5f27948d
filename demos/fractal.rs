//! Recursive composition: each level inserts a rotated, rescaled copy of
//! itself. Writes `fractal.svg`.

use glyphforge::*;

glyph_params! {
    pub struct SpiralParams patch SpiralPatch {
        depth: u32 = 8,
        hue: f64 = 0.0,
    }
}

const UNIT: f64 = 400.0;

struct Spiral;

impl GlyphDef for Spiral {
    type Params = SpiralParams;

    const NAME: &'static str = "Spiral";

    fn init(&mut self, setup: &mut Setup<'_, SpiralParams>) -> Result<()> {
        setup.set_size(DVec2::splat(UNIT));
        Ok(())
    }

    fn draw(&mut self, canvas: &mut Canvas<'_, SpiralParams>) -> Result<()> {
        let hue = canvas.params.hue;
        let depth = canvas.params.depth;

        canvas.draw_rect(
            DVec2::ZERO,
            DVec2::splat(UNIT),
            Style::default()
                .fill("none")
                .stroke(format!("hsl({hue}, 70%, 50%)"))
                .stroke_width("4"),
        );

        if depth > 0 {
            let inner = Glyph::build_with(
                canvas.ctx(),
                Spiral,
                GlyphOptions::default()
                    .params(SpiralPatch {
                        depth: Some(depth - 1),
                        hue: Some(hue + 30.0),
                    })
                    .size(DVec2::splat(UNIT * 0.75)),
            )?;
            canvas.insert(inner, None)?.rotate(15.0, None);
        }
        Ok(())
    }
}

fn main() -> miette::Result<()> {
    let ctx = GlyphContext::new();
    let spiral = Glyph::build(&ctx, Spiral)?;
    spiral.write_svg("fractal.svg")?;
    println!("wrote fractal.svg");
    Ok(())
}
