use crate::drag::SlideGeometry;
use crate::error::{FolioError, Result};
use crate::image_input::ImageSettings;
use crate::session::{SessionOptions, DEFAULT_PLACEHOLDER};
use crate::store::gateway::DEFAULT_QUOTA_BYTES;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";
pub const DEFAULT_SITE_TITLE: &str = "Calipso Design";
pub const DEFAULT_LARGE_FILE_BYTES: u64 = 5 * 1024 * 1024;

/// Configuration for folio, stored as `config.json` in the data directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FolioConfig {
    /// Site checkout directory or http(s) base URL holding `data/projects.json`.
    pub remote: Option<String>,
    pub site_title: String,
    pub placeholder_image: String,
    pub quota_bytes: usize,
    pub image: ImageSettings,
    /// Uploads above this size get a warning before compression.
    pub large_file_bytes: u64,
    pub slide_width: f64,
    pub slide_gap: f64,
    pub loop_carousel: bool,
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            remote: None,
            site_title: DEFAULT_SITE_TITLE.to_string(),
            placeholder_image: DEFAULT_PLACEHOLDER.to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
            image: ImageSettings::default(),
            large_file_bytes: DEFAULT_LARGE_FILE_BYTES,
            slide_width: SlideGeometry::default().slide_width,
            slide_gap: SlideGeometry::default().gap,
            loop_carousel: true,
        }
    }
}

impl FolioConfig {
    pub const KEYS: [&'static str; 11] = [
        "remote",
        "site_title",
        "placeholder_image",
        "quota_bytes",
        "image.max_width",
        "image.max_height",
        "image.quality",
        "large_file_bytes",
        "slide_width",
        "slide_gap",
        "loop_carousel",
    ];

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(FolioError::Io)?;
        let config: FolioConfig =
            serde_json::from_str(&content).map_err(FolioError::Serialization)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();
        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(FolioError::Io)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(FolioError::Serialization)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content).map_err(FolioError::Io)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "remote" => self.remote.clone().unwrap_or_default(),
            "site_title" => self.site_title.clone(),
            "placeholder_image" => self.placeholder_image.clone(),
            "quota_bytes" => self.quota_bytes.to_string(),
            "image.max_width" => self.image.max_width.to_string(),
            "image.max_height" => self.image.max_height.to_string(),
            "image.quality" => self.image.quality.to_string(),
            "large_file_bytes" => self.large_file_bytes.to_string(),
            "slide_width" => self.slide_width.to_string(),
            "slide_gap" => self.slide_gap.to_string(),
            "loop_carousel" => self.loop_carousel.to_string(),
            _ => return None,
        };
        Some(value)
    }

    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        fn num<T: std::str::FromStr>(key: &str, value: &str) -> std::result::Result<T, String> {
            value
                .trim()
                .parse()
                .map_err(|_| format!("Invalid value for {}: {}", key, value))
        }

        match key {
            "remote" => {
                let value = value.trim();
                self.remote = (!value.is_empty()).then(|| value.to_string());
            }
            "site_title" => self.site_title = value.to_string(),
            "placeholder_image" => self.placeholder_image = value.to_string(),
            "quota_bytes" => self.quota_bytes = num(key, value)?,
            "image.max_width" => self.image.max_width = positive(key, num(key, value)?)?,
            "image.max_height" => self.image.max_height = positive(key, num(key, value)?)?,
            "image.quality" => {
                let quality: u8 = num(key, value)?;
                if !(1..=100).contains(&quality) {
                    return Err(format!("{} must be between 1 and 100", key));
                }
                self.image.quality = quality;
            }
            "large_file_bytes" => self.large_file_bytes = num(key, value)?,
            "slide_width" => {
                let width: f64 = num(key, value)?;
                if !width.is_finite() || width <= 0.0 {
                    return Err(format!("{} must be a positive number", key));
                }
                if width + self.slide_gap <= 0.0 {
                    return Err(format!("{} must be larger than -slide_gap", key));
                }
                self.slide_width = width;
            }
            "slide_gap" => {
                let gap: f64 = num(key, value)?;
                // Slide centres must stay strictly increasing
                if !gap.is_finite() || self.slide_width + gap <= 0.0 {
                    return Err(format!(
                        "{} must be a finite number larger than -slide_width",
                        key
                    ));
                }
                self.slide_gap = gap;
            }
            "loop_carousel" => self.loop_carousel = num(key, value)?,
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    /// `0` disables the size check.
    pub fn quota(&self) -> Option<usize> {
        (self.quota_bytes > 0).then_some(self.quota_bytes)
    }

    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            loop_carousel: self.loop_carousel,
            edit_mode: true,
            geometry: SlideGeometry::new(self.slide_width, self.slide_gap),
            placeholder: self.placeholder_image.clone(),
        }
    }
}

fn positive(key: &str, value: u32) -> std::result::Result<u32, String> {
    if value == 0 {
        Err(format!("{} must be positive", key))
    } else {
        Ok(value)
    }
}
