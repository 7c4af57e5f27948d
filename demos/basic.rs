//! Draws a parametrized badge glyph and writes `basic.svg`.

use glyphforge::*;

glyph_params! {
    pub struct BadgeParams patch BadgePatch {
        rim_color: String = "navy".to_string(),
        core_color: String = "gold".to_string(),
        unit: f64 = 100.0,
    }
}

struct Badge;

impl GlyphDef for Badge {
    type Params = BadgeParams;

    const NAME: &'static str = "Badge";

    fn init(&mut self, setup: &mut Setup<'_, BadgeParams>) -> Result<()> {
        setup.set_size(DVec2::splat(setup.params.unit));
        Ok(())
    }

    fn draw(&mut self, canvas: &mut Canvas<'_, BadgeParams>) -> Result<()> {
        let unit = canvas.params.unit;
        let center = DVec2::splat(unit / 2.0);
        let rim = canvas.params.rim_color.clone();
        let core = canvas.params.core_color.clone();

        let shine = canvas.create_radial_gradient(
            center,
            unit / 2.0,
            Some(center - DVec2::splat(unit / 8.0)),
            &GradientStops::colors([core.as_str(), rim.as_str()]),
            None,
        )?;

        canvas.draw_circle(center, unit / 2.0, Style::default().fill(shine.funciri()));
        canvas.draw_circle(
            center,
            unit / 3.0,
            Style::default().fill("none").stroke(rim).stroke_width("3"),
        );
        canvas
            .draw_rect(
                center - DVec2::splat(unit / 8.0),
                DVec2::splat(unit / 4.0),
                Style::default().fill(core),
            )
            .rotate(45.0, Some(center));
        Ok(())
    }
}

fn main() -> miette::Result<()> {
    let ctx = GlyphContext::new();

    let badge = Glyph::build(&ctx, Badge)?;
    let crimson = Glyph::build_with(
        &ctx,
        Badge,
        GlyphOptions::default().params(BadgePatch {
            rim_color: Some("crimson".to_string()),
            ..BadgePatch::default()
        }),
    )?;

    let row = Glyph::build_with(
        &ctx,
        HArray::new([badge, crimson]),
        GlyphOptions::default().params(ArrayPatch {
            spacing: Some(20.0),
            ..ArrayPatch::default()
        }),
    )?;
    let framed = Padding::wrap(&ctx, row, None)?;

    framed.write_svg("basic.svg")?;
    println!("wrote basic.svg");

    if RASTER_SUPPORT {
        framed.write_png("basic.png", &RasterOptions::default())?;
        println!("wrote basic.png");
    }
    Ok(())
}
