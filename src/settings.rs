use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::viewer::DEFAULT_RENDER_SCALE;

const APP_NAME: &str = "snipview";
const SETTINGS_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Settings {
    /// Pixels per PDF point when rasterizing a page
    #[serde(default = "default_render_scale")]
    pub render_scale: f32,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_file: Option<PathBuf>,

    /// Directory holding the PDFium shared library
    #[serde(default)]
    pub pdfium_library_dir: Option<PathBuf>,
}

fn default_render_scale() -> f32 {
    DEFAULT_RENDER_SCALE
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            render_scale: default_render_scale(),
            log_level: default_log_level(),
            log_file: None,
            pdfium_library_dir: None,
        }
    }
}

/// Values given on the command line; `None` keeps the settings-file value
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub render_scale: Option<f32>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
    pub pdfium_library_dir: Option<PathBuf>,
}

pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config| config.join(APP_NAME).join(SETTINGS_FILENAME))
}

impl Settings {
    /// Read settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load from the user's config directory.
    ///
    /// Logging is not set up yet when this runs, so a broken file is
    /// handed back to the caller to report once it is.
    pub fn load() -> (Self, Option<ConfigError>) {
        let Some(path) = settings_path() else {
            return (Self::default(), None);
        };

        match Self::load_from(&path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn apply(mut self, overrides: Overrides) -> Self {
        if let Some(scale) = overrides.render_scale {
            self.render_scale = scale;
        }
        if let Some(level) = overrides.log_level {
            self.log_level = level;
        }
        if overrides.log_file.is_some() {
            self.log_file = overrides.log_file;
        }
        if overrides.pdfium_library_dir.is_some() {
            self.pdfium_library_dir = overrides.pdfium_library_dir;
        }
        self
    }

    /// Scale actually used for rendering; unusable values fall back to the default
    pub fn effective_render_scale(&self) -> f32 {
        if self.render_scale.is_finite() && self.render_scale > 0.0 {
            self.render_scale
        } else {
            DEFAULT_RENDER_SCALE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.json")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.render_scale, 1.5);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"render_scale": 2.0}}"#).unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.render_scale, 2.0);
        assert_eq!(settings.log_level, "info");
        assert!(settings.log_file.is_none());
    }

    #[test]
    fn test_malformed_file_is_a_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "render_scale = 2").unwrap();

        assert!(matches!(
            Settings::load_from(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_overrides_win() {
        let settings = Settings::default().apply(Overrides {
            render_scale: Some(3.0),
            log_level: Some("debug".to_string()),
            log_file: Some(PathBuf::from("/tmp/snipview.log")),
            pdfium_library_dir: None,
        });

        assert_eq!(settings.render_scale, 3.0);
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/snipview.log")));
        assert!(settings.pdfium_library_dir.is_none());
    }

    #[test]
    fn test_non_positive_scale_falls_back() {
        let settings = Settings {
            render_scale: 0.0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_render_scale(), DEFAULT_RENDER_SCALE);

        let settings = Settings {
            render_scale: -2.0,
            ..Settings::default()
        };
        assert_eq!(settings.effective_render_scale(), DEFAULT_RENDER_SCALE);
    }
}
