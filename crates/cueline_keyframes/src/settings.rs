// SPDX-License-Identifier: MIT OR Apache-2.0
//! Sampler configuration, stored as RON.

use crate::color::Rgb;
use crate::lut::DEFAULT_FPS;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Current settings format version
pub const SETTINGS_FORMAT_VERSION: u32 = 1;

/// Errors from loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File content is not valid settings RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// File was written by a newer version
    #[error("Settings version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Highest version this build reads
        supported: u32,
    },
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Sampler settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerSettings {
    /// Format version
    pub version: u32,
    /// Frame-rate hint that sets lookup-table density
    pub frame_rate: f64,
    /// Sample curves through lookup tables instead of evaluating them directly
    pub use_lookup_tables: bool,
    /// Fallback for malformed color payloads
    pub default_color: String,
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self {
            version: SETTINGS_FORMAT_VERSION,
            frame_rate: DEFAULT_FPS,
            use_lookup_tables: true,
            default_color: Rgb::BLACK.to_hex(),
        }
    }
}

impl SamplerSettings {
    /// Parse settings from a RON string
    pub fn from_ron(s: &str) -> Result<Self> {
        let settings: SamplerSettings = ron::from_str(s)?;

        if settings.version > SETTINGS_FORMAT_VERSION {
            tracing::warn!(
                found = settings.version,
                supported = SETTINGS_FORMAT_VERSION,
                "unsupported sampler settings version"
            );
            return Err(SettingsError::UnsupportedVersion {
                found: settings.version,
                supported: SETTINGS_FORMAT_VERSION,
            });
        }

        Ok(settings.sanitized())
    }

    /// Serialize to pretty RON
    pub fn to_ron(&self) -> Result<String> {
        let config = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, config)?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&content)?;
        tracing::debug!(
            path = %path.display(),
            fps = settings.frame_rate,
            "loaded sampler settings"
        );
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Fallback color, parsed
    pub fn default_rgb(&self) -> Rgb {
        Rgb::parse_or(&self.default_color, Rgb::BLACK)
    }

    /// Replace unusable values with defaults
    fn sanitized(mut self) -> Self {
        if !self.frame_rate.is_finite() || self.frame_rate <= 0.0 {
            tracing::warn!(frame_rate = self.frame_rate, "invalid frame rate, using default");
            self.frame_rate = DEFAULT_FPS;
        }
        if self.default_color.parse::<Rgb>().is_err() {
            tracing::warn!(color = %self.default_color, "invalid default color, using black");
            self.default_color = Rgb::BLACK.to_hex();
        }
        self
    }
}
