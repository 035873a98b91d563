//! Caption text under a symbol, drawn from the embedded 8x8 bitmap font.

use font8x8::{UnicodeFonts, BASIC_FONTS, LATIN_FONTS};
use image::{Rgba, RgbaImage};

/// Shadow opacity out of 255 (30% black), offset one pixel right and down.
const SHADOW_ALPHA: u16 = 77;
const SHADOW_OFFSET: i64 = 1;

/// Darkens an opaque pixel towards black by the shadow opacity.
fn shade(pixel: &mut Rgba<u8>) {
    for channel in &mut pixel.0[..3] {
        *channel = (u16::from(*channel) * (255 - SHADOW_ALPHA) / 255) as u8;
    }
}

/// Glyph bitmap for `c`; characters outside the font fall back to `?`.
fn glyph(c: char) -> [u8; 8] {
    BASIC_FONTS
        .get(c)
        .or_else(|| LATIN_FONTS.get(c))
        .or_else(|| BASIC_FONTS.get('?'))
        .unwrap_or([0; 8])
}

/// Width in pixels of `text` at `font_px`. Every glyph advances by `font_px`.
pub fn text_width(text: &str, font_px: u32) -> u64 {
    text.chars().count() as u64 * u64::from(font_px)
}

/// Draws `text` with its top edge at `top`, centred on `center_x`. Pixels
/// falling outside the canvas are clipped.
pub(crate) fn draw_label(
    canvas: &mut RgbaImage,
    text: &str,
    center_x: i64,
    top: i64,
    font_px: u32,
    color: Rgba<u8>,
    shadow: bool,
) {
    if text.is_empty() || font_px == 0 {
        return;
    }
    let left = center_x - (text_width(text, font_px) / 2) as i64;
    if shadow {
        draw_text(canvas, text, left + SHADOW_OFFSET, top + SHADOW_OFFSET, font_px, shade);
    }
    draw_text(canvas, text, left, top, font_px, |pixel| *pixel = color);
}

fn draw_text<F>(canvas: &mut RgbaImage, text: &str, left: i64, top: i64, font_px: u32, mut paint: F)
where
    F: FnMut(&mut Rgba<u8>),
{
    let size = i64::from(font_px);
    let (width, height) = (i64::from(canvas.width()), i64::from(canvas.height()));
    for (index, c) in text.chars().enumerate() {
        let origin = left + index as i64 * size;
        if origin >= width {
            break;
        }
        if origin + size <= 0 {
            continue;
        }
        let rows = glyph(c);
        for gy in 0..size {
            let y = top + gy;
            if y < 0 || y >= height {
                continue;
            }
            let bits = rows[(gy * 8 / size) as usize];
            for gx in 0..size {
                let x = origin + gx;
                if x < 0 || x >= width {
                    continue;
                }
                if (bits >> (gx * 8 / size)) & 1 == 1 {
                    paint(canvas.get_pixel_mut(x as u32, y as u32));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);

    fn ink_bounds(canvas: &RgbaImage, ink: Rgba<u8>) -> Option<(u32, u32, u32, u32)> {
        let mut bounds: Option<(u32, u32, u32, u32)> = None;
        for (x, y, pixel) in canvas.enumerate_pixels() {
            if *pixel == ink {
                let b = bounds.get_or_insert((x, y, x, y));
                b.0 = b.0.min(x);
                b.1 = b.1.min(y);
                b.2 = b.2.max(x);
                b.3 = b.3.max(y);
            }
        }
        bounds
    }

    #[test]
    fn test_label_is_centred_and_below_top() {
        let mut canvas = RgbaImage::from_pixel(200, 60, WHITE);
        draw_label(&mut canvas, "HI", 100, 10, 16, BLUE, false);
        let (x0, y0, x1, y1) = ink_bounds(&canvas, BLUE).unwrap();
        assert!(x0 >= 84 && x1 < 116, "{x0}..{x1}");
        assert!(y0 >= 10 && y1 < 26, "{y0}..{y1}");
    }

    #[test]
    fn test_shadow_darkens_background() {
        let mut canvas = RgbaImage::from_pixel(100, 40, WHITE);
        draw_label(&mut canvas, "|", 50, 5, 16, BLUE, true);
        let shaded = canvas.pixels().filter(|p| p.0[0] < 255 && p.0[0] > 0).count();
        assert!(shaded > 0);
        assert!(canvas.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_overflowing_text_is_clipped() {
        let mut canvas = RgbaImage::from_pixel(20, 20, WHITE);
        draw_label(&mut canvas, "a very long caption", 10, 15, 12, BLUE, true);
        assert_eq!(canvas.dimensions(), (20, 20));
        assert!(ink_bounds(&canvas, BLUE).is_some());
    }

    #[test]
    fn test_unknown_characters_use_fallback_glyph() {
        assert_eq!(glyph('\u{1F600}'), glyph('?'));
        assert_ne!(glyph('A'), [0; 8]);
        assert_eq!(text_width("añb", 10), 30);
    }
}
