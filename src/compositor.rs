//! Single-image compositing: background, frame, symbol, logo and caption
//! flattened onto one square canvas.

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use log::{debug, warn};

use crate::config::CompositorConfig;
use crate::content::ContentSpec;
use crate::error::{RenderError, Result};
use crate::geometry::{self, ModuleRect, Region};
use crate::label;
use crate::logo::Logo;
use crate::matrix::{MatrixProvider, QrMatrix};
use crate::raster::RasterImage;
use crate::style::{FrameStyle, StyleSpec};

/// Everything needed for one export.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub content: ContentSpec,
    pub style: StyleSpec,
    /// Nominal symbol area in pixels. The canvas adds padding and frame around it.
    pub resolution_px: u32,
}

impl RenderRequest {
    pub fn new(content: ContentSpec, style: StyleSpec, resolution_px: u32) -> Self {
        Self { content, style, resolution_px }
    }
}

/// Pixel geometry of a single render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderLayout {
    /// Side of the square output.
    pub canvas_side: u32,
    /// Frame thickness; zero without a frame.
    pub frame_width: u32,
    pub symbol: Region,
    pub label_top: u32,
    pub label_font_px: u32,
}

/// How a symbol sits inside a square tile: the whole canvas for a single
/// render, one cell for a batch.
pub(crate) struct Tile {
    pub region: Region,
    pub frame_width: u32,
    pub corner_radius: u32,
    pub symbol_side: u32,
    pub logo_ratio: f32,
}

/// Renders requests with a fixed [`CompositorConfig`].
///
/// A compositor holds no mutable state; one instance can serve any number of
/// renders, from any thread.
#[derive(Debug, Clone, Default)]
pub struct Compositor {
    config: CompositorConfig,
}

impl Compositor {
    /// Creates a compositor after validating `config`.
    pub fn new(config: CompositorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Computes the geometry of a render without drawing anything.
    pub fn layout(&self, resolution_px: u32, frame_style: FrameStyle) -> std::result::Result<RenderLayout, RenderError> {
        if resolution_px == 0 {
            return Err(RenderError::InvalidResolution(resolution_px));
        }
        if resolution_px > self.config.max_resolution {
            return Err(RenderError::ResolutionTooLarge {
                requested: resolution_px,
                max: self.config.max_resolution,
            });
        }
        let frame_width = match frame_style {
            FrameStyle::None => 0,
            FrameStyle::Rounded | FrameStyle::Solid => self.config.frame_width,
        };
        let canvas_side = self.config.canvas_side(resolution_px, frame_width).ok_or(RenderError::ResolutionTooLarge {
            requested: resolution_px,
            max: self.config.max_resolution,
        })?;
        let symbol_side = geometry::scaled(resolution_px, self.config.symbol_ratio).max(1);
        let symbol = Region::new(0, 0, canvas_side).centered(symbol_side);
        Ok(RenderLayout {
            canvas_side,
            frame_width,
            symbol,
            label_top: symbol.bottom().saturating_add(geometry::scaled(resolution_px, self.config.label_gap_ratio)),
            label_font_px: geometry::scaled(resolution_px, self.config.label_ratio).max(1),
        })
    }

    /// Draws the request onto a fresh canvas.
    pub fn compose(&self, request: &RenderRequest, matrix: &QrMatrix) -> Result<RgbaImage> {
        matrix.validate()?;
        let layout = self.layout(request.resolution_px, request.style.frame_style)?;
        debug!(
            "compositing {}px canvas, symbol {}px at {}, {}x{} modules",
            layout.canvas_side,
            layout.symbol.side,
            layout.symbol.x,
            matrix.width(),
            matrix.width()
        );

        let style = &request.style;
        let mut canvas = RgbaImage::new(layout.canvas_side, layout.canvas_side);
        let tile = Tile {
            region: Region::new(0, 0, layout.canvas_side),
            frame_width: layout.frame_width,
            corner_radius: self.config.corner_radius,
            symbol_side: layout.symbol.side,
            logo_ratio: self.config.logo_ratio,
        };
        paint_tile(&mut canvas, &tile, matrix, style, request.content.active_logo())?;

        if let Some(text) = request.content.label() {
            label::draw_label(
                &mut canvas,
                text,
                i64::from(layout.symbol.center_x()),
                i64::from(layout.label_top),
                layout.label_font_px,
                style.foreground.to_rgba(),
                true,
            );
        }
        Ok(canvas)
    }

    /// Draws the request and encodes it as PNG.
    pub fn render(&self, request: &RenderRequest, matrix: &QrMatrix) -> Result<RasterImage> {
        let canvas = self.compose(request, matrix)?;
        Ok(RasterImage::from_rgba(&canvas)?)
    }

    /// Encodes the request's content with `provider`, then renders it.
    pub fn render_content<P: MatrixProvider + ?Sized>(&self, request: &RenderRequest, provider: &P) -> Result<RasterImage> {
        let matrix = provider.encode(&request.content.raw_content, self.config.error_correction)?;
        self.render(request, &matrix)
    }
}

/// Renders with the default configuration.
pub fn render(request: &RenderRequest, matrix: &QrMatrix) -> Result<RasterImage> {
    Compositor::default().render(request, matrix)
}

/// Background, frame, symbol and logo for one tile.
pub(crate) fn paint_tile(
    canvas: &mut RgbaImage,
    tile: &Tile,
    matrix: &QrMatrix,
    style: &StyleSpec,
    logo: Option<&Logo>,
) -> std::result::Result<(), RenderError> {
    let foreground = style.foreground.to_rgba();
    let background = style.background.to_rgba();
    let region = tile.region;
    let symbol = region.centered(tile.symbol_side);

    // Decode before drawing so a bad logo aborts with nothing painted.
    let overlay = match logo {
        Some(logo) => place_logo(logo, symbol, tile.logo_ratio)?,
        None => None,
    };

    geometry::fill_rect(canvas, region.x, region.y, region.side, region.side, background);
    match style.frame_style {
        FrameStyle::None => {}
        FrameStyle::Solid => {
            geometry::draw_solid_frame(canvas, region, tile.frame_width, style.frame_color.to_rgba())
        }
        FrameStyle::Rounded => geometry::draw_rounded_frame(
            canvas,
            region,
            tile.frame_width,
            tile.corner_radius,
            style.frame_color.to_rgba(),
        ),
    }

    let excavated = overlay.as_ref().map(|logo| {
        ModuleRect::covering(
            matrix.width(),
            symbol.side,
            logo.x - symbol.x,
            logo.y - symbol.y,
            logo.image.width(),
            logo.image.height(),
        )
    });
    geometry::paint_modules(canvas, symbol, matrix, foreground, background, excavated);

    if let Some(logo) = overlay {
        imageops::overlay(canvas, &logo.image, i64::from(logo.x), i64::from(logo.y));
    }
    Ok(())
}

/// A logo resized and positioned on the canvas.
struct PlacedLogo {
    image: RgbaImage,
    x: u32,
    y: u32,
}

/// Decodes and sizes a logo to fit within `logo_ratio` of the symbol side,
/// centred on the symbol. Returns `None` for logos with no visible area.
fn place_logo(logo: &Logo, symbol: Region, logo_ratio: f32) -> std::result::Result<Option<PlacedLogo>, RenderError> {
    let decoded = logo.decode()?;
    let max_side = (f64::from(symbol.side) * geometry::ratio(logo_ratio)).floor() as u32;
    let (width, height) = match logo.size() {
        Some((w, h)) => {
            let fitted = fit_within(w, h, max_side, false);
            if fitted != (w, h) {
                warn!("logo size {w}x{h} exceeds the {max_side}px logo box, scaled to {}x{}", fitted.0, fitted.1);
            }
            fitted
        }
        None => fit_within(decoded.width(), decoded.height(), max_side, true),
    };
    if width == 0 || height == 0 {
        return Ok(None);
    }
    let image = if decoded.dimensions() == (width, height) {
        decoded.into_owned()
    } else {
        imageops::resize(&*decoded, width, height, FilterType::Triangle)
    };
    Ok(Some(PlacedLogo {
        image,
        x: symbol.x + (symbol.side - width) / 2,
        y: symbol.y + (symbol.side - height) / 2,
    }))
}

/// Scales (`width`, `height`) to fit a `max_side` box, keeping the aspect ratio.
/// With `grow`, smaller images are enlarged to touch the box.
fn fit_within(width: u32, height: u32, max_side: u32, grow: bool) -> (u32, u32) {
    let longest = width.max(height);
    if longest == 0 || max_side == 0 {
        return (0, 0);
    }
    if longest <= max_side && !grow {
        return (width, height);
    }
    let scale = |v: u32| ((u64::from(v) * u64::from(max_side)) / u64::from(longest)).max(1) as u32;
    (scale(width), scale(height))
}
