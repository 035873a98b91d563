//! Canvas geometry and the primitive drawing routines shared by single and
//! batch renders: rectangles, frames, module painting.

use image::{Rgba, RgbaImage};

use crate::matrix::QrMatrix;

/// An axis-aligned square on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub side: u32,
}

impl Region {
    pub fn new(x: u32, y: u32, side: u32) -> Self {
        Self { x, y, side }
    }

    /// A square of `side` centred inside `self`, flooring odd remainders.
    pub fn centered(&self, side: u32) -> Region {
        let offset = self.side.saturating_sub(side) / 2;
        Region::new(self.x + offset, self.y + offset, side)
    }

    pub fn right(&self) -> u32 {
        self.x + self.side
    }

    pub fn bottom(&self) -> u32 {
        self.y + self.side
    }

    pub fn center_x(&self) -> u32 {
        self.x + self.side / 2
    }
}

/// Side length of the smallest square grid holding `count` cells, i.e. `ceil(sqrt(count))`.
///
/// ```rust
/// use qrstyle::geometry::grid_size;
///
/// assert_eq!(grid_size(1), 1);
/// assert_eq!(grid_size(5), 3);
/// assert_eq!(grid_size(9), 3);
/// assert_eq!(grid_size(10), 4);
/// ```
pub fn grid_size(count: usize) -> usize {
    // The float root is within one of the answer; settle it exactly.
    let mut size = (count as f64).sqrt() as usize;
    while size > 0 && (size - 1) * (size - 1) >= count {
        size -= 1;
    }
    while size.checked_mul(size).is_some_and(|square| square < count) {
        size += 1;
    }
    size
}

/// Widens a configured ratio, dropping the f32 representation error so that
/// `800 * 0.16` is 128, not 127.99.
pub(crate) fn ratio(value: f32) -> f64 {
    (f64::from(value) * 1e6).round() / 1e6
}

/// Rounds `value * ratio` to whole pixels.
pub(crate) fn scaled(value: u32, ratio: f32) -> u32 {
    (f64::from(value) * self::ratio(ratio)).round() as u32
}

/// A rectangle of modules, half-open on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ModuleRect {
    pub x0: usize,
    pub y0: usize,
    pub x1: usize,
    pub y1: usize,
}

impl ModuleRect {
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x0 && x < self.x1 && y >= self.y0 && y < self.y1
    }

    /// Every module touched by the pixel rectangle (`x`, `y`, `width`, `height`),
    /// given in coordinates relative to a symbol drawn `symbol_side` pixels wide.
    pub fn covering(matrix_width: usize, symbol_side: u32, x: u32, y: u32, width: u32, height: u32) -> Self {
        let side = symbol_side.max(1) as usize;
        let first = |px: u32| (px as usize * matrix_width) / side;
        let past = |px: u32| ((px as usize * matrix_width) + side - 1) / side;
        Self {
            x0: first(x),
            y0: first(y),
            x1: past(x + width).min(matrix_width),
            y1: past(y + height).min(matrix_width),
        }
    }
}

fn put(canvas: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}

/// Fills a rectangle, clipped to the canvas.
pub(crate) fn fill_rect(canvas: &mut RgbaImage, x: u32, y: u32, width: u32, height: u32, color: Rgba<u8>) {
    let x_end = x.saturating_add(width).min(canvas.width());
    let y_end = y.saturating_add(height).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

/// Four bands of `width` pixels flush with the edges of `tile`.
pub(crate) fn draw_solid_frame(canvas: &mut RgbaImage, tile: Region, width: u32, color: Rgba<u8>) {
    let w = width.min(tile.side);
    let far = tile.side - w;
    fill_rect(canvas, tile.x, tile.y, tile.side, w, color);
    fill_rect(canvas, tile.x, tile.y, w, tile.side, color);
    fill_rect(canvas, tile.x + far, tile.y, w, tile.side, color);
    fill_rect(canvas, tile.x, tile.y + far, tile.side, w, color);
}

/// Strokes a rounded rectangle whose path is inset by half the stroke from the
/// edges of `tile`, so the straight runs cover exactly `width` pixels.
pub(crate) fn draw_rounded_frame(canvas: &mut RgbaImage, tile: Region, width: u32, radius: u32, color: Rgba<u8>) {
    if width == 0 || tile.side == 0 {
        return;
    }
    let stroke = f64::from(width);
    let half_stroke = stroke / 2.0;
    let half = (f64::from(tile.side) - stroke).max(0.0) / 2.0;
    let r = f64::from(radius).min(half);
    let center = f64::from(tile.side) / 2.0;
    // Pixels further than this from every edge cannot reach the stroke.
    let reach = width.saturating_add(radius);

    for ty in 0..tile.side {
        let near_y = ty < reach || ty >= tile.side.saturating_sub(reach);
        for tx in 0..tile.side {
            let near_x = tx < reach || tx >= tile.side.saturating_sub(reach);
            if !near_x && !near_y {
                continue;
            }
            let px = (f64::from(tx) + 0.5 - center).abs() - (half - r);
            let py = (f64::from(ty) + 0.5 - center).abs() - (half - r);
            let outside = px.max(0.0).hypot(py.max(0.0));
            let inside = px.max(py).min(0.0);
            let distance = outside + inside - r;
            if distance.abs() <= half_stroke {
                put(canvas, tile.x + tx, tile.y + ty, color);
            }
        }
    }
}

/// Paints the matrix into `area`, scaling modules nearest-neighbour. Modules
/// inside `excavated` are painted as light.
pub(crate) fn paint_modules(
    canvas: &mut RgbaImage,
    area: Region,
    matrix: &QrMatrix,
    dark: Rgba<u8>,
    light: Rgba<u8>,
    excavated: Option<ModuleRect>,
) {
    let width = matrix.width();
    let side = area.side.max(1) as usize;
    for sy in 0..area.side {
        let my = sy as usize * width / side;
        for sx in 0..area.side {
            let mx = sx as usize * width / side;
            let cleared = excavated.is_some_and(|rect| rect.contains(mx, my));
            let color = if matrix.is_dark(mx, my) && !cleared { dark } else { light };
            put(canvas, area.x + sx, area.y + sy, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    #[test]
    fn test_grid_size_is_ceil_sqrt() {
        let expected = [(0, 0), (1, 1), (2, 2), (4, 2), (5, 3), (9, 3), (10, 4), (16, 4), (17, 5)];
        for (count, size) in expected {
            assert_eq!(grid_size(count), size, "count {count}");
        }
        assert_eq!(grid_size(10_000), 100);
        assert_eq!(grid_size(10_001), 101);
        assert_eq!(grid_size(usize::MAX), 1 << (usize::BITS / 2));
    }

    #[test]
    fn test_ratios_are_exact_at_pixel_scale() {
        assert_eq!((800.0 * ratio(0.16)).floor(), 128.0);
        assert_eq!(scaled(1000, 0.8), 800);
        assert_eq!(scaled(1000, 0.05), 50);
    }

    #[test]
    fn test_centered_region_is_symmetric() {
        let outer = Region::new(0, 0, 1080);
        let inner = outer.centered(800);
        assert_eq!(inner, Region::new(140, 140, 800));
        assert_eq!(outer.right() - inner.right(), inner.x);
    }

    #[test]
    fn test_solid_frame_bands() {
        let mut canvas = RgbaImage::from_pixel(40, 40, WHITE);
        draw_solid_frame(&mut canvas, Region::new(0, 0, 40), 5, RED);
        for i in 0..40 {
            for d in 0..5 {
                assert_eq!(*canvas.get_pixel(i, d), RED);
                assert_eq!(*canvas.get_pixel(d, i), RED);
                assert_eq!(*canvas.get_pixel(i, 39 - d), RED);
                assert_eq!(*canvas.get_pixel(39 - d, i), RED);
            }
        }
        assert_eq!(*canvas.get_pixel(5, 5), WHITE);
        assert_eq!(*canvas.get_pixel(20, 20), WHITE);
    }

    #[test]
    fn test_rounded_frame_leaves_corners_clear() {
        let mut canvas = RgbaImage::from_pixel(200, 200, WHITE);
        draw_rounded_frame(&mut canvas, Region::new(0, 0, 200), 20, 20, RED);
        // Straight runs are exactly the stroke width.
        assert_eq!(*canvas.get_pixel(100, 0), RED);
        assert_eq!(*canvas.get_pixel(100, 19), RED);
        assert_eq!(*canvas.get_pixel(100, 20), WHITE);
        assert_eq!(*canvas.get_pixel(0, 100), RED);
        assert_eq!(*canvas.get_pixel(199, 100), RED);
        // The outer corner lies beyond the arc.
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);
        assert_eq!(*canvas.get_pixel(199, 199), WHITE);
        assert_eq!(*canvas.get_pixel(100, 100), WHITE);
    }

    #[test]
    fn test_module_rect_covers_partial_modules() {
        // 10 modules over 100 px: pixels 15..35 touch modules 1, 2 and 3.
        let rect = ModuleRect::covering(10, 100, 15, 15, 20, 20);
        assert_eq!(rect, ModuleRect { x0: 1, y0: 1, x1: 4, y1: 4 });
        assert!(rect.contains(3, 1));
        assert!(!rect.contains(4, 1));
    }

    #[test]
    fn test_paint_modules_scales_and_excavates() {
        let matrix = QrMatrix::new(2, vec![true, false, false, true]);
        let mut canvas = RgbaImage::from_pixel(10, 10, WHITE);
        paint_modules(&mut canvas, Region::new(1, 1, 8), &matrix, RED, WHITE, None);
        assert_eq!(*canvas.get_pixel(1, 1), RED);
        assert_eq!(*canvas.get_pixel(4, 4), RED);
        assert_eq!(*canvas.get_pixel(5, 1), WHITE);
        assert_eq!(*canvas.get_pixel(8, 8), RED);
        assert_eq!(*canvas.get_pixel(0, 0), WHITE);

        let hole = ModuleRect { x0: 1, y0: 1, x1: 2, y1: 2 };
        paint_modules(&mut canvas, Region::new(1, 1, 8), &matrix, RED, WHITE, Some(hole));
        assert_eq!(*canvas.get_pixel(8, 8), WHITE);
        assert_eq!(*canvas.get_pixel(1, 1), RED);
    }
}
