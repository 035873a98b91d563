use crate::batch::{BatchEntry, BatchRequest};
use crate::compositor::{Compositor, RenderRequest};
use crate::content::ContentSpec;
use crate::error::Result;
use crate::matrix::QrMatrix;
use crate::matrix::QrcodeProvider;
use crate::raster::RasterImage;
use crate::style::StyleSpec;

use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/*---- Utilities ----*/

// Returns a string of SVG code for an image depicting
// the given QR matrix in the style's colours, with the given number of border modules.
// The string always uses Unix newlines (\n), regardless of the platform.
pub fn to_svg_string(matrix: &QrMatrix, style: &StyleSpec, border: u32) -> String {
	let width = matrix.width();
	let dimension = width + 2 * border as usize;
	let mut result = String::new();
	result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
	result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {0} {0}\" stroke=\"none\">\n", dimension);
	result += &format!("\t<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>\n", style.background);
	result += "\t<path d=\"";
	let mut first = true;
	for y in 0 .. width {
		for x in 0 .. width {
			if matrix.is_dark(x, y) {
				if !first {
					result += " ";
				}
				first = false;
				result += &format!("M{},{}h1v1h-1z", x + border as usize, y + border as usize);
			}
		}
	}
	result += &format!("\" fill=\"{}\"/>\n", style.foreground);
	result += "</svg>\n";
	result
}

/// Milliseconds since the Unix epoch, or zero if the clock is before it.
fn timestamp_millis() -> u128 {
	SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.map(|elapsed| elapsed.as_millis())
		.unwrap_or(0)
}

fn save_with_prefix(raster: &RasterImage, directory_path: Option<&str>, filename: Option<&str>, prefix: &str) -> Result<PathBuf> {
	let directory_path = directory_path.unwrap_or("generated");
	let filename = match filename {
		Some(name) if name.ends_with(".png") => name.to_string(),
		Some(name) => format!("{}.png", name),
		None => format!("{}-{}.png", prefix, timestamp_millis()),
	};

	// Check if the directory exists, create it if it doesn't
	if !Path::new(directory_path).exists() {
		fs::create_dir_all(directory_path)?;
	}

	let file_path = Path::new(directory_path).join(filename);
	fs::write(&file_path, &raster.png_data)?;
	info!("saved {}x{} image to {}", raster.width, raster.height, file_path.display());
	Ok(file_path)
}

/// Writes a rendered image to a PNG file.
///
/// # Arguments
///
/// * `raster` - The rendered image.
/// * `directory_path` - Optional. The directory path where the image will be saved. If not provided, the default directory is "generated".
/// * `filename` - Optional. The name of the image file; `.png` is appended when missing. If not provided, a timestamp-based `qr-code-<millis>.png` is used.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created or the file cannot be written.
///
/// # Example
///
/// ```no_run
/// use qrstyle::helper::{generate_png, save_png};
/// use qrstyle::style::StyleSpec;
///
/// let raster = generate_png("Hello, World!", &StyleSpec::default(), 1000).unwrap();
/// save_png(&raster, Some("images"), Some("qr_code")).unwrap();
/// ```
pub fn save_png(raster: &RasterImage, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
	save_with_prefix(raster, directory_path, filename, "qr-code")
}

/// Like [`save_png`], defaulting to a `batch-qr-codes-<millis>.png` file name.
pub fn save_batch_png(raster: &RasterImage, directory_path: Option<&str>, filename: Option<&str>) -> Result<PathBuf> {
	save_with_prefix(raster, directory_path, filename, "batch-qr-codes")
}

/// Encodes `content` at level H and renders it with `style` and the default configuration.
///
/// # Example
///
/// ```
/// use qrstyle::helper::generate_png;
/// use qrstyle::style::StyleSpec;
///
/// let raster = generate_png("Hello, World!", &StyleSpec::default(), 200).unwrap();
/// assert_eq!((raster.width, raster.height), (280, 280));
/// ```
pub fn generate_png(content: &str, style: &StyleSpec, resolution_px: u32) -> Result<RasterImage> {
	let request = RenderRequest::new(ContentSpec::new(content), style.clone(), resolution_px);
	Compositor::default().render_content(&request, &QrcodeProvider)
}

/// Renders `(content, label)` pairs as one grid image with the default configuration.
///
/// # Example
///
/// ```
/// use qrstyle::helper::generate_batch_png;
/// use qrstyle::style::StyleSpec;
///
/// let raster = generate_batch_png(&[("https://a.example", "A"), ("https://b.example", "")], &StyleSpec::default()).unwrap();
/// assert_eq!(raster.width, raster.height);
/// ```
pub fn generate_batch_png(entries: &[(&str, &str)], style: &StyleSpec) -> Result<RasterImage> {
	let entries = entries
		.iter()
		.map(|(content, label)| BatchEntry::new(*content, *label))
		.collect();
	Compositor::default().render_batch(&BatchRequest::new(entries, style.clone()), &QrcodeProvider)
}
