//! Layout configuration.
//!
//! Supports YAML loading; field names also accept the option names used by
//! older dot-matrix chart configs (`dot_radius`, `no_of_circles_in_a_row`,
//! `dot_padding_*`).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Immutable geometry for one layout run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Marker radius. Must be finite and > 0.
    #[serde(default = "default_marker_radius", alias = "dot_radius")]
    pub marker_radius: f64,

    /// Markers per row before wrapping. Must be >= 1.
    #[serde(default = "default_row_capacity", alias = "no_of_circles_in_a_row")]
    pub row_capacity: usize,

    /// Space left of each marker cell.
    #[serde(default = "default_padding", alias = "dot_padding_left")]
    pub padding_left: f64,

    /// Space right of each marker cell.
    #[serde(default = "default_padding", alias = "dot_padding_right")]
    pub padding_right: f64,

    /// Space above each marker cell.
    #[serde(default = "default_padding", alias = "dot_padding_top")]
    pub padding_top: f64,

    /// Space below each marker cell.
    #[serde(default = "default_padding", alias = "dot_padding_bottom")]
    pub padding_bottom: f64,
}

fn default_marker_radius() -> f64 {
    6.0
}
fn default_row_capacity() -> usize {
    10
}
fn default_padding() -> f64 {
    3.0
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            marker_radius: default_marker_radius(),
            row_capacity: default_row_capacity(),
            padding_left: default_padding(),
            padding_right: default_padding(),
            padding_top: default_padding(),
            padding_bottom: default_padding(),
        }
    }
}

impl LayoutConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the marker radius.
    #[must_use]
    pub fn with_marker_radius(mut self, radius: f64) -> Self {
        self.marker_radius = radius;
        self
    }

    /// Set the row capacity.
    #[must_use]
    pub fn with_row_capacity(mut self, capacity: usize) -> Self {
        self.row_capacity = capacity;
        self
    }

    /// Set left and right padding.
    #[must_use]
    pub fn with_horizontal_padding(mut self, left: f64, right: f64) -> Self {
        self.padding_left = left;
        self.padding_right = right;
        self
    }

    /// Set top and bottom padding.
    #[must_use]
    pub fn with_vertical_padding(mut self, top: f64, bottom: f64) -> Self {
        self.padding_top = top;
        self.padding_bottom = bottom;
        self
    }

    /// Set all four paddings to the same value.
    #[must_use]
    pub fn with_padding(self, padding: f64) -> Self {
        self.with_horizontal_padding(padding, padding)
            .with_vertical_padding(padding, padding)
    }

    /// Check every field against its constraint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        if !self.marker_radius.is_finite() || self.marker_radius <= 0.0 {
            return Err(Error::invalid_config(
                "marker_radius",
                format!("{} must be finite and > 0", self.marker_radius),
            ));
        }
        if self.row_capacity == 0 {
            return Err(Error::invalid_config("row_capacity", "must be at least 1"));
        }

        let paddings = [
            ("padding_left", self.padding_left),
            ("padding_right", self.padding_right),
            ("padding_top", self.padding_top),
            ("padding_bottom", self.padding_bottom),
        ];
        for (field, value) in paddings {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_config(
                    field,
                    format!("{value} must be finite and >= 0"),
                ));
            }
        }

        Ok(())
    }

    /// Width of one marker cell: `2r + padding_left + padding_right`.
    #[must_use]
    pub fn cell_width(&self) -> f64 {
        2.0 * self.marker_radius + self.padding_left + self.padding_right
    }

    /// Height of one marker cell: `2r + padding_top + padding_bottom`.
    #[must_use]
    pub fn cell_height(&self) -> f64 {
        2.0 * self.marker_radius + self.padding_top + self.padding_bottom
    }

    /// Parses and validates a configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] with the line number if parsing fails,
    /// or [`Error::InvalidConfig`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::ConfigParse {
                line,
                message: e.to_string(),
            }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Serializes the configuration to YAML.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigParse`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml_ng::to_string(self).map_err(|e| Error::ConfigParse {
            line: 0,
            message: e.to_string(),
        })
    }
}
