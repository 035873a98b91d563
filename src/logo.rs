//! Logo images: the in-memory handle given to the compositor, data URI
//! conversion, and the single-slot store that remembers the last logo.

use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use image::{DynamicImage, RgbaImage};
use log::info;

use crate::error::{LogoError, RenderError, Result};

#[derive(Debug, Clone, PartialEq)]
enum LogoSource {
    /// Container bytes (PNG, JPEG, ...) decoded when the symbol is rendered.
    Encoded(Vec<u8>),
    Decoded(RgbaImage),
}

/// A logo to overlay on the centre of a symbol.
///
/// Encoded logos are decoded during the render; a decode failure fails that
/// render with [`RenderError::LogoDecode`] rather than dropping the logo.
#[derive(Debug, Clone, PartialEq)]
pub struct Logo {
    source: LogoSource,
    size: Option<(u32, u32)>,
    enabled: bool,
}

impl Logo {
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { source: LogoSource::Encoded(bytes), size: None, enabled: true }
    }

    pub fn from_image(image: DynamicImage) -> Self {
        Self { source: LogoSource::Decoded(image.into_rgba8()), size: None, enabled: true }
    }

    /// Builds a logo from a `data:<mime>;base64,<payload>` string, the format
    /// kept by [`LogoStore`].
    pub fn from_data_uri(uri: &str) -> std::result::Result<Self, LogoError> {
        let (_, bytes) = parse_data_uri(uri)?;
        Ok(Self::from_bytes(bytes))
    }

    /// Requests a display size in pixels. The compositor still shrinks it to
    /// fit the logo box, keeping the aspect ratio.
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = Some((width, height));
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn size(&self) -> Option<(u32, u32)> {
        self.size
    }

    pub(crate) fn decode(&self) -> std::result::Result<Cow<'_, RgbaImage>, RenderError> {
        match &self.source {
            LogoSource::Decoded(image) => Ok(Cow::Borrowed(image)),
            LogoSource::Encoded(bytes) => image::load_from_memory(bytes)
                .map(|image| Cow::Owned(image.into_rgba8()))
                .map_err(RenderError::LogoDecode),
        }
    }
}

/// Splits a base64 data URI into its media type and decoded payload.
///
/// ```rust
/// use qrstyle::logo::parse_data_uri;
///
/// let (mime, bytes) = parse_data_uri("data:image/png;base64,AAEC").unwrap();
/// assert_eq!(mime, "image/png");
/// assert_eq!(bytes, vec![0, 1, 2]);
/// ```
pub fn parse_data_uri(uri: &str) -> std::result::Result<(String, Vec<u8>), LogoError> {
    let invalid = || LogoError::InvalidDataUri(truncate(uri));
    let rest = uri.trim().strip_prefix("data:").ok_or_else(invalid)?;
    let (header, payload) = rest.split_once(',').ok_or_else(invalid)?;
    let mime = header.strip_suffix(";base64").ok_or_else(invalid)?;
    let bytes = STANDARD.decode(payload.trim())?;
    Ok((mime.to_string(), bytes))
}

/// Encodes bytes as a base64 data URI with the given media type.
pub fn to_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

fn truncate(uri: &str) -> String {
    uri.chars().take(32).collect()
}

/// A file-backed slot holding the most recently supplied logo as a data URI.
///
/// The store never interprets the image; it only checks that the string is a
/// well-formed base64 data URI before replacing the previous entry.
#[derive(Debug, Clone)]
pub struct LogoStore {
    path: PathBuf,
}

impl LogoStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the stored data URI, or `None` if nothing has been stored.
    pub fn load(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) if contents.trim().is_empty() => Ok(None),
            Ok(contents) => Ok(Some(contents.trim().to_string())),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Loads the stored entry as a [`Logo`].
    pub fn load_logo(&self) -> Result<Option<Logo>> {
        match self.load()? {
            Some(uri) => Ok(Some(Logo::from_data_uri(&uri)?)),
            None => Ok(None),
        }
    }

    /// Replaces the stored logo. The previous entry survives if the new one is
    /// malformed or the write fails.
    pub fn store(&self, data_uri: &str) -> Result<()> {
        parse_data_uri(data_uri)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let staging = self.path.with_extension("tmp");
        fs::write(&staging, data_uri.trim())?;
        fs::rename(&staging, &self.path)?;
        info!("stored logo in {}", self.path.display());
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                info!("cleared logo store {}", self.path.display());
                Ok(())
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
