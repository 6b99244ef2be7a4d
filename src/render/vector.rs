//! CPU rasterization of vector bubbles and the image-overlay scene.

use std::sync::Arc;

use crate::foundation::core::Rgba8;
use crate::foundation::error::{BubbleError, BubbleResult};
use crate::geometry::{GeometryDescriptor, TEXT_ADVANCE, TEXT_FONT_SIZE, compute_geometry};
use crate::render::backend::{FrameRGBA, RenderSettings};
use crate::render::blur::drop_shadow_layer;
use crate::render::composite::{over_at, over_in_place};
use crate::render::cpu::{
    bezpath_to_cpu, block_glyph_cells, clear_pixmap, color_to_cpu, rect_to_cpu,
};
use crate::scene::background::BackgroundImage;
use crate::scene::store::BubbleStore;

/// Rasterize one bubble (shadow, body, tail, centered text) into a frame the size of its viewport.
#[tracing::instrument(level = "trace", skip(g, text))]
pub fn rasterize_bubble(g: &GeometryDescriptor, text: &str) -> BubbleResult<FrameRGBA> {
    let (w, h) = viewport_px(g)?;
    if w == 0 || h == 0 {
        return Ok(FrameRGBA::transparent(u32::from(w), u32::from(h)));
    }

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    let mut stroke = vello_cpu::kurbo::Stroke::new(g.stroke_width);
    if let Some(dash) = g.dash_pattern {
        stroke = stroke.with_dashes(0.0, [dash.dash, dash.gap]);
    }

    for path in std::iter::once(&g.body_path).chain(g.tail_path.as_ref()) {
        let cpu_path = bezpath_to_cpu(path);
        ctx.set_paint(color_to_cpu(g.fill));
        ctx.fill_path(&cpu_path);
        ctx.set_stroke(stroke.clone());
        ctx.set_paint(color_to_cpu(g.stroke));
        ctx.stroke_path(&cpu_path);
    }

    ctx.set_paint(color_to_cpu(Rgba8::BLACK));
    for (origin, line) in g.text_line_origins(text).into_iter().zip(text.lines()) {
        for cell in block_glyph_cells(origin, line, TEXT_FONT_SIZE, TEXT_ADVANCE) {
            ctx.fill_rect(&rect_to_cpu(cell));
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);
    let bubble = FrameRGBA {
        width: u32::from(w),
        height: u32::from(h),
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    };

    let Some(shadow) = g.drop_shadow else {
        return Ok(bubble);
    };
    let mut out = drop_shadow_layer(&bubble, &shadow)?;
    over_at(&mut out, &bubble, 0, 0)?;
    Ok(out)
}

/// Compose the overlay scene: background scaled to fit, then every bubble in store order.
#[tracing::instrument(level = "debug", skip(store, background, settings), fields(bubbles = store.len()))]
pub fn compose_overlay(
    store: &BubbleStore,
    background: Option<&BackgroundImage>,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> BubbleResult<FrameRGBA> {
    let mut scene = render_background(background, width, height, settings)?;
    for bubble in store.iter() {
        let g = compute_geometry(bubble.width, bubble.height, &bubble.style);
        let layer = rasterize_bubble(&g, &bubble.text)?;
        let at = g.placement(bubble.x, bubble.y);
        over_at(&mut scene, &layer, at.x.round() as i64, at.y.round() as i64)?;
    }
    Ok(scene)
}

fn render_background(
    background: Option<&BackgroundImage>,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> BubbleResult<FrameRGBA> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BubbleError::render("scene width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BubbleError::render("scene height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Ok(FrameRGBA::transparent(width, height));
    }

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    if let Some([r, g, b, a]) = settings.clear_rgba {
        clear_pixmap(&mut pixmap, Rgba8::rgba(r, g, b, a).to_premul());
    }

    if let Some(bg) = background {
        let decoded = bg.decode()?;
        let image =
            image_premul_bytes_to_pixmap(&decoded.rgba8_premul, decoded.width, decoded.height)?;
        let (iw, ih) = (f64::from(image.width()), f64::from(image.height()));
        let scale = (f64::from(w) / iw).min(f64::from(h) / ih);
        let dx = (f64::from(w) - iw * scale) / 2.0;
        let dy = (f64::from(h) - ih * scale) / 2.0;

        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(
            vello_cpu::kurbo::Affine::translate((dx, dy))
                * vello_cpu::kurbo::Affine::scale(scale),
        );
        ctx.set_paint(vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(image)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        });
        ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
        ctx.flush();

        let mut layer = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut layer);
        over_in_place(
            pixmap.data_as_u8_slice_mut(),
            layer.data_as_u8_slice(),
            1.0,
        )?;
    }

    Ok(FrameRGBA {
        width,
        height,
        data: pixmap.data_as_u8_slice().to_vec(),
        premultiplied: true,
    })
}

fn viewport_px(g: &GeometryDescriptor) -> BubbleResult<(u16, u16)> {
    let to_px = |v: f64, what: &str| -> BubbleResult<u16> {
        let v = if v.is_finite() { v.ceil().max(0.0) } else { 0.0 };
        if v > f64::from(u16::MAX) {
            return Err(BubbleError::render(format!("bubble {what} exceeds u16")));
        }
        Ok(v as u16)
    };
    Ok((
        to_px(g.viewport.width, "width")?,
        to_px(g.viewport.height, "height")?,
    ))
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> BubbleResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| BubbleError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| BubbleError::render("image height exceeds u16"))?;
    if w == 0 || h == 0 {
        return Err(BubbleError::render("background image is empty"));
    }
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(BubbleError::render("decoded image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let pixels: Vec<_> = rgba8_premul
        .chunks_exact(4)
        .map(|px| {
            may_have_opacities |= px[3] != 255;
            vello_cpu::peniko::color::PremulRgba8 {
                r: px[0],
                g: px[1],
                b: px[2],
                a: px[3],
            }
        })
        .collect();

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

#[cfg(test)]
#[path = "../../tests/unit/render/vector.rs"]
mod tests;
