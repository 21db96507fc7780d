//! # Image Processing Module
//!
//! Questo modulo espone il codec PNG usato dalla conversione, tramite
//! un'interfaccia stretta: decode dei byte in un buffer di pixel, encode
//! del buffer normalizzato in byte PNG.
//!
//! ## Pipeline per un file:
//! 1. **Decode**: `image::load_from_memory_with_format` (solo PNG)
//! 2. **Normalizzazione**: conversione incondizionata a RGBA8 o RGB8
//! 3. **Encode**: `PngEncoder` con `CompressionType::Best` e filtro adattivo
//!
//! ## Normalizzazione del colore:
//! La conversione viene applicata sempre, anche se la sorgente è già nel
//! modo di destinazione. Scala di grigi, palette e immagini a 16 bit
//! diventano tutte 8 bit per canale.
//!
//! ## Esempio:
//! ```ignore
//! let codec = PngCodec::default();
//! let bytes = codec.transcode(&input, ColorMode::Rgba)?;
//! ```

use crate::error::ConvertError;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, ImageEncoder, ImageFormat};

/// Target pixel layout for every output file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// 4 channels with alpha
    Rgba,
    /// 3 channels, opaque
    Rgb,
}

impl ColorMode {
    pub fn from_preserve_alpha(preserve_alpha: bool) -> Self {
        if preserve_alpha {
            Self::Rgba
        } else {
            Self::Rgb
        }
    }

    /// Unconditional conversion into this mode
    pub fn apply(self, image: &DynamicImage) -> DynamicImage {
        match self {
            Self::Rgba => DynamicImage::ImageRgba8(image.to_rgba8()),
            Self::Rgb => DynamicImage::ImageRgb8(image.to_rgb8()),
        }
    }
}

/// Encoder settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Use the slowest, smallest lossless compression level
    pub best_compression: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            best_compression: true,
        }
    }
}

/// Decode/encode seam. Implementations must be deterministic for a given input.
pub trait ImageCodec: Send + Sync {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, ConvertError>;

    fn encode(&self, image: &DynamicImage, options: EncodeOptions) -> Result<Vec<u8>, ConvertError>;

    /// Decode, normalize to `mode`, encode
    fn transcode(
        &self,
        bytes: &[u8],
        mode: ColorMode,
        options: EncodeOptions,
    ) -> Result<Vec<u8>, ConvertError> {
        let decoded = self.decode(bytes)?;
        let normalized = mode.apply(&decoded);
        drop(decoded);
        self.encode(&normalized, options)
    }
}

/// PNG codec backed by the `image` crate
#[derive(Debug, Default, Clone, Copy)]
pub struct PngCodec;

impl ImageCodec for PngCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DynamicImage, ConvertError> {
        image::load_from_memory_with_format(bytes, ImageFormat::Png).map_err(ConvertError::Decode)
    }

    fn encode(&self, image: &DynamicImage, options: EncodeOptions) -> Result<Vec<u8>, ConvertError> {
        let compression = if options.best_compression {
            CompressionType::Best
        } else {
            CompressionType::Default
        };

        let mut buffer = Vec::new();
        PngEncoder::new_with_quality(&mut buffer, compression, FilterType::Adaptive)
            .write_image(image.as_bytes(), image.width(), image.height(), image.color())
            .map_err(ConvertError::Encode)?;
        Ok(buffer)
    }
}
