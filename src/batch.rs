//! Batch export: many symbols laid out on one square grid image.

use image::RgbaImage;
use log::{debug, warn};

use crate::compositor::{paint_tile, Compositor, Tile};
use crate::config::LABEL_GAP;
use crate::content::ContentSpec;
use crate::error::{Error, RenderError, Result};
use crate::geometry::{self, Region};
use crate::label;
use crate::matrix::{MatrixProvider, QrMatrix};
use crate::raster::RasterImage;
use crate::style::StyleSpec;

/// One item of a batch and the caption printed under its cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchEntry {
    pub content: ContentSpec,
    pub label: String,
}

impl BatchEntry {
    pub fn new(raw_content: impl Into<String>, label: impl Into<String>) -> Self {
        Self { content: ContentSpec::new(raw_content), label: label.into() }
    }
}

/// Ordered entries sharing one style.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchRequest {
    pub entries: Vec<BatchEntry>,
    pub style: StyleSpec,
}

impl BatchRequest {
    pub fn new(entries: Vec<BatchEntry>, style: StyleSpec) -> Self {
        Self { entries, style }
    }
}

/// Pixel geometry of a batch grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchLayout {
    /// Cells per row and per column.
    pub grid_size: u32,
    pub cell_size: u32,
    /// Distance between the origins of neighbouring cells.
    pub stride: u32,
    pub canvas_side: u32,
    cell_padding: u32,
}

impl BatchLayout {
    /// The square occupied by cell `index`, row-major.
    pub fn cell(&self, index: usize) -> Region {
        let grid = self.grid_size.max(1) as usize;
        let (row, col) = ((index / grid) as u32, (index % grid) as u32);
        Region::new(
            col * self.stride + self.cell_padding / 2,
            row * self.stride + self.cell_padding / 2,
            self.cell_size,
        )
    }
}

impl Compositor {
    /// Grid geometry for `entry_count` cells. A caption band is reserved under
    /// every row when `labelled` is set.
    ///
    /// Fails with [`RenderError::BatchTooLarge`] when the canvas side would
    /// exceed `max_resolution`.
    pub fn batch_layout(&self, entry_count: usize, labelled: bool) -> std::result::Result<BatchLayout, RenderError> {
        let batch = &self.config().batch;
        let max = self.config().max_resolution;
        let too_large = || RenderError::BatchTooLarge { entries: entry_count, max };
        let grid_size = u32::try_from(geometry::grid_size(entry_count)).map_err(|_| too_large())?;
        let stride = batch.stride(labelled).ok_or_else(too_large)?;
        let canvas_side = grid_size
            .checked_mul(stride)
            .filter(|&side| side <= max)
            .ok_or_else(too_large)?;
        Ok(BatchLayout {
            grid_size,
            cell_size: batch.cell_size,
            stride,
            canvas_side,
            cell_padding: batch.cell_padding,
        })
    }

    /// Draws every non-blank entry into one grid canvas.
    ///
    /// Entries the provider cannot encode are skipped with a warning and take
    /// no cell. Fails with [`Error::EmptyBatch`] when nothing is left to draw.
    pub fn compose_batch<P: MatrixProvider + ?Sized>(&self, request: &BatchRequest, provider: &P) -> Result<RgbaImage> {
        let candidates: Vec<&BatchEntry> = request.entries.iter().filter(|e| !e.content.is_blank()).collect();
        if candidates.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let level = self.config().error_correction;
        let encoded: Vec<(&BatchEntry, QrMatrix)> = candidates
            .into_iter()
            .filter_map(|entry| match provider.encode(&entry.content.raw_content, level) {
                Ok(matrix) => Some((entry, matrix)),
                Err(err) => {
                    warn!("skipping batch entry {:?}: {err}", entry.label);
                    None
                }
            })
            .collect();
        if encoded.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let labelled = encoded.iter().any(|(entry, _)| !entry.label.is_empty());
        let layout = self.batch_layout(encoded.len(), labelled)?;
        debug!(
            "compositing batch of {} on a {}x{} grid, {}px canvas",
            encoded.len(),
            layout.grid_size,
            layout.grid_size,
            layout.canvas_side
        );

        let batch = &self.config().batch;
        let symbol_side = geometry::scaled(batch.cell_size, self.config().symbol_ratio).max(1);
        let mut canvas = RgbaImage::from_pixel(layout.canvas_side, layout.canvas_side, batch.canvas_color.to_rgba());
        for (index, (entry, matrix)) in encoded.iter().enumerate() {
            let cell = layout.cell(index);
            let tile = Tile {
                region: cell,
                frame_width: batch.frame_width,
                corner_radius: batch.corner_radius,
                symbol_side,
                logo_ratio: self.config().logo_ratio,
            };
            paint_tile(&mut canvas, &tile, matrix, &request.style, entry.content.active_logo())?;
            label::draw_label(
                &mut canvas,
                &entry.label,
                i64::from(cell.center_x()),
                i64::from(cell.bottom() + LABEL_GAP),
                batch.label_font_px,
                request.style.foreground.to_rgba(),
                false,
            );
        }
        Ok(canvas)
    }

    /// Draws the batch and encodes it as PNG.
    pub fn render_batch<P: MatrixProvider + ?Sized>(&self, request: &BatchRequest, provider: &P) -> Result<RasterImage> {
        let canvas = self.compose_batch(request, provider)?;
        Ok(RasterImage::from_rgba(&canvas)?)
    }
}

/// Renders a batch with the default configuration.
pub fn render_batch<P: MatrixProvider + ?Sized>(request: &BatchRequest, provider: &P) -> Result<RasterImage> {
    Compositor::default().render_batch(request, provider)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CompositorConfig;
    use crate::error::EncodeError;
    use crate::matrix::{EcLevel, QrcodeProvider};

    /// Refuses any content containing "bad".
    struct Picky;

    impl MatrixProvider for Picky {
        fn encode(&self, content: &str, level: EcLevel) -> std::result::Result<QrMatrix, EncodeError> {
            if content.contains("bad") {
                return Err(EncodeError::Unsupported("picky".to_string()));
            }
            QrcodeProvider.encode(content, level)
        }
    }

    #[test]
    fn test_layout_stride_and_cells() {
        let compositor = Compositor::default();
        let layout = compositor.batch_layout(5, false).unwrap();
        assert_eq!(layout.grid_size, 3);
        assert_eq!(layout.stride, 220);
        assert_eq!(layout.canvas_side, 660);
        assert_eq!(layout.cell(0), Region::new(10, 10, 200));
        assert_eq!(layout.cell(4), Region::new(230, 230, 200));

        let labelled = compositor.batch_layout(5, true).unwrap();
        assert_eq!(labelled.stride, 240);
        assert_eq!(labelled.canvas_side, 720);
    }

    #[test]
    fn test_blank_entries_are_filtered() {
        let request = BatchRequest::new(
            vec![BatchEntry::new("   ", "nope"), BatchEntry::new("", ""), BatchEntry::new("\n", "x")],
            StyleSpec::default(),
        );
        let err = Compositor::default().compose_batch(&request, &QrcodeProvider).unwrap_err();
        assert!(matches!(err, Error::EmptyBatch));
    }

    #[test]
    fn test_failed_entries_are_skipped() {
        let request = BatchRequest::new(
            vec![BatchEntry::new("one", ""), BatchEntry::new("bad", ""), BatchEntry::new("two", "")],
            StyleSpec::default(),
        );
        let canvas = Compositor::default().compose_batch(&request, &Picky).unwrap();
        // Two survivors fit a 2x2 grid.
        assert_eq!(canvas.dimensions(), (440, 440));

        let only_bad = BatchRequest::new(vec![BatchEntry::new("bad", "")], StyleSpec::default());
        let err = Compositor::default().compose_batch(&only_bad, &Picky).unwrap_err();
        assert!(matches!(err, Error::EmptyBatch));
    }

    #[test]
    fn test_oversized_grid_is_refused() {
        let compositor = Compositor::default();
        // 100x100 cells of 220px is 22000px, past the 10000px limit.
        let err = compositor.batch_layout(10_000, false).unwrap_err();
        assert!(matches!(err, RenderError::BatchTooLarge { entries: 10_000, max: 10_000 }));
        assert!(compositor.batch_layout(usize::MAX, true).is_err());
        // 45x45 cells is 9900px and still fits.
        assert_eq!(compositor.batch_layout(45 * 45, false).unwrap().canvas_side, 9900);
    }

    #[test]
    fn test_oversized_batch_fails_before_drawing() {
        let config = CompositorConfig { max_resolution: 500, ..CompositorConfig::default() };
        let compositor = Compositor::new(config).unwrap();
        let request = BatchRequest::new(entries_of(5), StyleSpec::default());
        let err = compositor.compose_batch(&request, &QrcodeProvider).unwrap_err();
        assert!(matches!(err, Error::Render(RenderError::BatchTooLarge { entries: 5, max: 500 })));

        let pair = BatchRequest::new(entries_of(2), StyleSpec::default());
        assert_eq!(compositor.compose_batch(&pair, &QrcodeProvider).unwrap().dimensions(), (440, 440));
    }

    fn entries_of(count: usize) -> Vec<BatchEntry> {
        (0..count).map(|i| BatchEntry::new(format!("item {i}"), "")).collect()
    }
}
