//! # qrstyle
//!
//! A Rust library for rendering styled QR codes to PNG.
//!
//! `qrstyle` takes a logical description of a QR code (content, colours, frame, logo, caption,
//! target resolution) and flattens it into a single square raster image. Symbol encoding is
//! delegated to the [`qrcode`](https://docs.rs/qrcode) crate through the
//! [`matrix::MatrixProvider`] trait; this crate does the compositing.
//!
//! ## Features
//!
//! - Custom foreground/background colours and six quick presets (Classic, Ocean, Sunset, ...).
//! - Solid or rounded frames of a fixed pixel width.
//! - Centred logos with module excavation, capped at 16% of the symbol side.
//! - Captions under the symbol, scaled with the resolution, with a drop shadow.
//! - Batch export: many symbols on one square grid image.
//! - PNG bytes, `data:` URLs, PNG files and SVG output.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Installation
//!
//! Add to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! qrstyle = "0.1" # Replace with the latest version
//! ```
//!
//! ## Example
//!
//! Render a framed QR code with a caption:
//!
//! ```rust
//! use qrstyle::color::Color;
//! use qrstyle::compositor::{Compositor, RenderRequest};
//! use qrstyle::content::ContentSpec;
//! use qrstyle::matrix::QrcodeProvider;
//! use qrstyle::style::{FrameStyle, StyleSpec};
//!
//! let style = StyleSpec::default().with_frame(FrameStyle::Solid, Color::rgb(0xF5, 0x9E, 0x0B));
//! let content = ContentSpec::new("https://example.com").with_label("Scan me");
//! let request = RenderRequest::new(content, style, 400);
//!
//! let raster = Compositor::default().render_content(&request, &QrcodeProvider).unwrap();
//! assert_eq!((raster.width, raster.height), (520, 520));
//! ```
//!
//! Render a batch grid:
//!
//! ```rust
//! use qrstyle::batch::{render_batch, BatchEntry, BatchRequest};
//! use qrstyle::matrix::QrcodeProvider;
//! use qrstyle::style::{preset, StyleSpec};
//!
//! let style = StyleSpec::default().apply_preset(preset("Ocean").unwrap());
//! let request = BatchRequest::new(
//!     vec![BatchEntry::new("https://a.example", "A"), BatchEntry::new("https://b.example", "B")],
//!     style,
//! );
//! let raster = render_batch(&request, &QrcodeProvider).unwrap();
//! assert_eq!(raster.width, raster.height);
//! ```
//!
//! ## Modules
//!
//! - [`compositor`]: Single-image rendering.
//! - [`batch`]: Grid rendering of many symbols.
//! - [`matrix`]: The QR matrix seam and the `qrcode`-backed provider.
//! - [`style`], [`color`], [`content`], [`templates`]: Inputs.
//! - [`logo`]: Logo handles, data URIs and the single-slot logo store.
//! - [`raster`]: The PNG output container.
//! - [`helper`]: One-shot generation, file saving and SVG output.
//! - [`config`], [`error`]: Settings and error types.

#![forbid(unsafe_code)]

pub mod batch;
pub mod color;
pub mod compositor;
pub mod config;
pub mod content;
pub mod error;
pub mod geometry;
pub mod helper;
pub mod label;
pub mod logo;
pub mod matrix;
pub mod raster;
pub mod style;
pub mod templates;

pub use batch::{render_batch, BatchEntry, BatchRequest};
pub use compositor::{render, Compositor, RenderRequest};
pub use content::ContentSpec;
pub use error::{EncodeError, Error, RenderError, Result};
pub use matrix::{EcLevel, MatrixProvider, QrMatrix, QrcodeProvider};
pub use raster::RasterImage;
pub use style::{FrameStyle, StyleSpec};
