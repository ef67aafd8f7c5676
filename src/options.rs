//! Viewer options with TOML persistence.
//!
//! All fields use `#[serde(default)]` so partial TOML files (e.g. only
//! overriding the background color) work correctly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::VitrineError;

/// Environment preset selecting the backdrop and reflection mood.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum Environment {
    /// Neutral studio backdrop.
    #[default]
    Studio,
    /// Dark gallery backdrop.
    Gallery,
    /// Outdoor daylight backdrop.
    Outdoor,
}

/// Persistent viewer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewerOptions {
    /// Scene clear color, linear RGB.
    pub background_color: [f32; 3],
    /// Tint applied to the key and top lights, linear RGB.
    pub light_color: [f32; 3],
    /// Render every material as wireframe.
    pub wireframe: bool,
    /// Show the showroom platform under the model.
    pub show_platform: bool,
    /// Environment preset.
    pub environment: Environment,
    /// Address of the most recently displayed asset, restored on startup.
    pub last_asset: Option<String>,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            background_color: [0.051, 0.055, 0.078], // #0d0e14
            light_color: [1.0, 1.0, 1.0],
            wireframe: false,
            show_platform: true,
            environment: Environment::Studio,
            last_asset: None,
        }
    }
}

impl ViewerOptions {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::Io`] if the file cannot be read and
    /// [`VitrineError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, VitrineError> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            VitrineError::OptionsParse(format!(
                "failed to parse {}: {e}",
                path.display()
            ))
        })
    }

    /// Save options to a TOML file (pretty-printed), creating parent
    /// directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`VitrineError::OptionsParse`] if serialization fails and
    /// [`VitrineError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), VitrineError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            VitrineError::OptionsParse(format!(
                "failed to serialize options: {e}"
            ))
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options: ViewerOptions =
            toml::from_str("wireframe = true").unwrap();
        assert!(options.wireframe);
        assert!(options.show_platform);
        assert_eq!(options.environment, Environment::Studio);
        assert_eq!(options.last_asset, None);
    }

    #[test]
    fn test_round_trip() {
        let mut options = ViewerOptions::default();
        options.environment = Environment::Gallery;
        options.last_asset = Some("models/chair.glb".to_owned());
        let text = toml::to_string_pretty(&options).unwrap();
        let back: ViewerOptions = toml::from_str(&text).unwrap();
        assert_eq!(back, options);
    }

    #[test]
    fn test_environment_snake_case() {
        let options: ViewerOptions =
            toml::from_str("environment = \"outdoor\"").unwrap();
        assert_eq!(options.environment, Environment::Outdoor);
    }
}
