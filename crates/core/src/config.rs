//! Tunable constants for layout, interaction and drawing.
//!
//! Every section is `#[serde(default)]`, so a TOML file only needs the keys it
//! overrides:
//!
//! ```toml
//! [layout]
//! slot_width = 200.0
//!
//! [render]
//! title_max_chars = 20
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::NodeBox;

/// Configuration errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {reason}")]
    Read { path: String, reason: String },

    #[error("invalid config syntax: {0}")]
    Parse(String),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Layered layout spacing
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Horizontal slot each node occupies within its level
    pub slot_width: f64,
    /// Vertical distance between consecutive levels
    pub level_height: f64,
    /// Y coordinate of level 0
    pub top_margin: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_width: 160.0,
            level_height: 100.0,
            top_margin: 50.0,
        }
    }
}

/// Pan/zoom behaviour
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Multiplicative factor applied per wheel notch
    pub zoom_step: f64,
    /// Fixed screen offset of the world origin
    pub origin_x: f64,
    pub origin_y: f64,
    /// Maximum pointer travel (screen px) for a press/release to count as a click
    pub click_slop: f64,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            min_zoom: 0.1,
            max_zoom: 5.0,
            zoom_step: 1.1,
            origin_x: 400.0,
            origin_y: 50.0,
            click_slop: 3.0,
        }
    }
}

/// Drawing attributes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub node_width: f64,
    pub node_height: f64,
    pub corner_radius: f64,
    pub node_stroke_width: f64,
    pub edge_width: f64,
    pub highlight_edge_width: f64,
    pub arrow_length: f64,
    pub arrow_width: f64,
    /// Opacity of nodes and edges outside the focused neighborhood
    pub dim_opacity: f64,
    pub title_max_chars: usize,
    pub title_font_size: f64,
    pub status_font_size: f64,
    pub glow_blur: f64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            node_width: 120.0,
            node_height: 40.0,
            corner_radius: 5.0,
            node_stroke_width: 2.0,
            edge_width: 2.0,
            highlight_edge_width: 3.0,
            arrow_length: 10.0,
            arrow_width: 7.0,
            dim_opacity: 0.1,
            title_max_chars: 15,
            title_font_size: 12.0,
            status_font_size: 10.0,
            glow_blur: 12.0,
        }
    }
}

impl RenderConfig {
    #[must_use]
    pub fn node_box(&self) -> NodeBox {
        NodeBox::new(self.node_width, self.node_height)
    }
}

/// Complete graph view configuration
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    pub render: RenderConfig,
}

impl GraphConfig {
    /// Parse and validate a TOML document
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Parse` for malformed TOML and
    /// `ConfigError::Invalid` for out-of-range values.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file with validation
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Read` if the file cannot be read, otherwise the
    /// errors of [`GraphConfig::from_toml_str`].
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_toml_str(&content)
    }

    /// Check every value is usable
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Invalid` naming the first offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        positive("layout.slot_width", layout.slot_width)?;
        positive("layout.level_height", layout.level_height)?;
        finite("layout.top_margin", layout.top_margin)?;

        let viewport = &self.viewport;
        positive("viewport.min_zoom", viewport.min_zoom)?;
        finite("viewport.max_zoom", viewport.max_zoom)?;
        if viewport.min_zoom > 1.0 || viewport.max_zoom < 1.0 {
            return Err(ConfigError::Invalid(format!(
                "zoom bounds [{}, {}] must include 1.0",
                viewport.min_zoom, viewport.max_zoom
            )));
        }
        if !(viewport.zoom_step.is_finite() && viewport.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport.zoom_step must be greater than 1, got {}",
                viewport.zoom_step
            )));
        }
        finite("viewport.origin_x", viewport.origin_x)?;
        finite("viewport.origin_y", viewport.origin_y)?;
        non_negative("viewport.click_slop", viewport.click_slop)?;

        let render = &self.render;
        positive("render.node_width", render.node_width)?;
        positive("render.node_height", render.node_height)?;
        non_negative("render.corner_radius", render.corner_radius)?;
        positive("render.node_stroke_width", render.node_stroke_width)?;
        positive("render.edge_width", render.edge_width)?;
        positive("render.highlight_edge_width", render.highlight_edge_width)?;
        positive("render.arrow_length", render.arrow_length)?;
        positive("render.arrow_width", render.arrow_width)?;
        positive("render.title_font_size", render.title_font_size)?;
        positive("render.status_font_size", render.status_font_size)?;
        non_negative("render.glow_blur", render.glow_blur)?;
        if !(0.0..=1.0).contains(&render.dim_opacity) {
            return Err(ConfigError::Invalid(format!(
                "render.dim_opacity must be within [0, 1], got {}",
                render.dim_opacity
            )));
        }
        if render.title_max_chars == 0 {
            return Err(ConfigError::Invalid(
                "render.title_max_chars must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

fn finite(key: &str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{key} must be finite, got {value}")))
    }
}

fn positive(key: &str, value: f64) -> Result<(), ConfigError> {
    finite(key, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!("{key} must be positive, got {value}")))
    }
}

fn non_negative(key: &str, value: f64) -> Result<(), ConfigError> {
    finite(key, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid(format!(
            "{key} must not be negative, got {value}"
        )))
    }
}
