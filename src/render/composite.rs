use crate::foundation::error::{BubbleError, BubbleResult};
use crate::foundation::math::mul_div255_u8;
use crate::render::backend::FrameRGBA;

/// Premultiplied RGBA8 pixel.
pub type PremulRgba8 = [u8; 4];

/// Source-over of one premultiplied pixel with extra `opacity` in `[0, 1]`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }
    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));
    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

/// Source-over of two equally sized premultiplied buffers.
pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> BubbleResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(BubbleError::render(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Source-over of `src` onto `dst` with `src`'s top-left at `(x, y)`; clipped to `dst`.
pub fn over_at(dst: &mut FrameRGBA, src: &FrameRGBA, x: i64, y: i64) -> BubbleResult<()> {
    if !dst.premultiplied || !src.premultiplied {
        return Err(BubbleError::render("over_at expects premultiplied frames"));
    }
    let (dw, dh) = (i64::from(dst.width), i64::from(dst.height));
    let (sw, sh) = (i64::from(src.width), i64::from(src.height));

    let x0 = x.max(0);
    let y0 = y.max(0);
    let x1 = (x + sw).min(dw);
    let y1 = (y + sh).min(dh);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let span = ((x1 - x0) * 4) as usize;
    for dy in y0..y1 {
        let sy = dy - y;
        let d_start = ((dy * dw + x0) * 4) as usize;
        let s_start = ((sy * sw + (x0 - x)) * 4) as usize;
        let (Some(d_row), Some(s_row)) = (
            dst.data.get_mut(d_start..d_start + span),
            src.data.get(s_start..s_start + span),
        ) else {
            return Err(BubbleError::render("frame buffer shorter than its dimensions"));
        };
        over_in_place(d_row, s_row, 1.0)?;
    }
    Ok(())
}

/// Premultiplied silhouette of `src` flooded with `color`, keeping `src`'s coverage.
pub fn silhouette(src: &FrameRGBA, color: PremulRgba8) -> FrameRGBA {
    let mut data = Vec::with_capacity(src.data.len());
    for px in src.data.chunks_exact(4) {
        let a = u16::from(px[3]);
        data.extend(color.iter().map(|&c| mul_div255_u8(u16::from(c), a)));
    }
    FrameRGBA {
        width: src.width,
        height: src.height,
        data,
        premultiplied: true,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
