//! Image input boundary: file bytes in, embeddable JPEG data URL out.
//!
//! Pure transform, no store access. Callers mutate the store only after this returns
//! `Ok`, so a corrupt upload never leaves a half-edited record behind.

use crate::error::{FolioError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

pub const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageSettings {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality, 1..=100.
    pub quality: u8,
}

impl Default for ImageSettings {
    fn default() -> Self {
        Self {
            max_width: 800,
            max_height: 800,
            quality: 70,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub data_url: String,
    pub width: u32,
    pub height: u32,
    /// Size of the JPEG before base64.
    pub bytes: usize,
}

/// A compressed upload plus what the caller should tell the user about it.
#[derive(Debug, Clone)]
pub struct Upload {
    pub image: EncodedImage,
    pub source_bytes: u64,
    pub oversized: bool,
}

/// Scale `(width, height)` into the bounding box. The longer side decides: landscape
/// images are bounded by `max_width`, everything else by `max_height`. Fractions are
/// truncated.
pub fn fit_within(width: u32, height: u32, settings: &ImageSettings) -> (u32, u32) {
    let (w, h) = (width as f64, height as f64);
    let (w, h) = if width > height {
        if width > settings.max_width {
            let max = settings.max_width as f64;
            (max, h * max / w)
        } else {
            (w, h)
        }
    } else if height > settings.max_height {
        let max = settings.max_height as f64;
        (w * max / h, max)
    } else {
        (w, h)
    };
    ((w.floor() as u32).max(1), (h.floor() as u32).max(1))
}

pub fn compress(bytes: &[u8], settings: &ImageSettings) -> Result<EncodedImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| FolioError::Image(format!("Cannot decode image: {}", e)))?;

    let (width, height) = fit_within(decoded.width(), decoded.height(), settings);
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::Lanczos3)
    };

    let mut jpeg = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut jpeg, settings.quality.clamp(1, 100));
    resized
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| FolioError::Image(format!("Cannot encode image: {}", e)))?;

    debug!(width, height, bytes = jpeg.len(), "image compressed");
    Ok(EncodedImage {
        data_url: format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(&jpeg)),
        width,
        height,
        bytes: jpeg.len(),
    })
}

/// Read and compress a user-selected file.
pub fn read_upload(path: &Path, settings: &ImageSettings, large_file_bytes: u64) -> Result<Upload> {
    let bytes = fs::read(path)
        .map_err(|e| FolioError::Image(format!("Cannot read {}: {}", path.display(), e)))?;
    let source_bytes = bytes.len() as u64;
    let oversized = large_file_bytes > 0 && source_bytes > large_file_bytes;
    if oversized {
        warn!(path = %path.display(), bytes = source_bytes, "large image file");
    }
    let image = compress(&bytes, settings)?;
    Ok(Upload {
        image,
        source_bytes,
        oversized,
    })
}
