//! The compositor's output: a flattened image in a PNG container.

use std::io::Cursor;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{ImageFormat, ImageResult, RgbaImage};

use crate::error::RenderError;

/// PNG bytes of a finished render, ready for a clipboard or a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl RasterImage {
    /// Encodes a canvas as PNG.
    pub fn from_rgba(canvas: &RgbaImage) -> Result<Self, RenderError> {
        let mut out = Cursor::new(Vec::new());
        canvas
            .write_to(&mut out, ImageFormat::Png)
            .map_err(RenderError::ImageEncode)?;
        Ok(Self {
            width: canvas.width(),
            height: canvas.height(),
            png_data: out.into_inner(),
        })
    }

    /// `data:image/png;base64,...`, the form a browser accepts as an image source.
    pub fn to_data_url(&self) -> String {
        format!("data:image/png;base64,{}", STANDARD.encode(&self.png_data))
    }

    /// Decodes the PNG back into pixels.
    pub fn to_rgba(&self) -> ImageResult<RgbaImage> {
        Ok(image::load_from_memory_with_format(&self.png_data, ImageFormat::Png)?.into_rgba8())
    }
}
