//! The QR matrix seam.
//!
//! Symbol encoding (segment selection, Reed-Solomon, masking) is not done here.
//! A [`MatrixProvider`] turns content into a [`QrMatrix`], a plain square grid of
//! dark/light modules that the compositor knows how to paint. [`QrcodeProvider`]
//! is the default provider, backed by the `qrcode` crate.

use qrcode::types::QrError;
use qrcode::QrCode;
use serde::{Deserialize, Serialize};

use crate::error::{EncodeError, RenderError};

/// The error correction level, i.e. how many codewords can be lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EcLevel {
    /// Tolerates about 7% erroneous codewords.
    L,
    /// Tolerates about 15% erroneous codewords.
    M,
    /// Tolerates about 25% erroneous codewords.
    Q,
    /// Tolerates about 30% erroneous codewords. Needed when a logo is excavated.
    #[default]
    H,
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::L => qrcode::EcLevel::L,
            EcLevel::M => qrcode::EcLevel::M,
            EcLevel::Q => qrcode::EcLevel::Q,
            EcLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// A square grid of modules, row-major, `true` = dark.
///
/// This is the handle the compositor consumes. It carries no quiet zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrMatrix {
    width: usize,
    modules: Vec<bool>,
}

impl QrMatrix {
    /// Wraps a raw module buffer. The buffer is checked by the compositor, not here,
    /// so a malformed handle surfaces as a [`RenderError`] at render time.
    pub fn new(width: usize, modules: Vec<bool>) -> Self {
        Self { width, modules }
    }

    /// Side length in modules.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn modules(&self) -> &[bool] {
        &self.modules
    }

    /// Returns the module at (x, y). Anything outside the grid is light.
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.width && self.modules.get(y * self.width + x).copied().unwrap_or(false)
    }

    pub(crate) fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.modules.len() != self.width * self.width {
            return Err(RenderError::InvalidMatrix {
                width: self.width,
                modules: self.modules.len(),
            });
        }
        Ok(())
    }
}

/// Anything that can encode content into a QR matrix.
pub trait MatrixProvider {
    fn encode(&self, content: &str, level: EcLevel) -> Result<QrMatrix, EncodeError>;
}

/// [`MatrixProvider`] backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeProvider;

impl MatrixProvider for QrcodeProvider {
    fn encode(&self, content: &str, level: EcLevel) -> Result<QrMatrix, EncodeError> {
        if content.is_empty() {
            return Err(EncodeError::EmptyContent);
        }
        let code = QrCode::with_error_correction_level(content.as_bytes(), level.into()).map_err(|err| match err {
            QrError::DataTooLong => EncodeError::DataTooLong,
            other => EncodeError::Unsupported(other.to_string()),
        })?;
        let modules = code
            .to_colors()
            .into_iter()
            .map(|color| color == qrcode::Color::Dark)
            .collect();
        Ok(QrMatrix::new(code.width(), modules))
    }
}
