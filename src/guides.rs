//! Axis label, legend and frame geometry for a dot grid.
//!
//! Everything here is derived from a finished [`DotLayout`] and scales with
//! the marker radius: margins are 10r top/bottom and 15r left/right, labels
//! use a 3r font, and legend rows are 4r apart.

use std::sync::Arc;

use serde::Serialize;

use crate::geometry::{Line, Point, Rect};
use crate::layout::{DotLayout, LayoutConfig};

/// Space around the plot area.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Margins {
    /// Above the plot area.
    pub top: f64,
    /// Right of the plot area (legend lives here).
    pub right: f64,
    /// Below the plot area.
    pub bottom: f64,
    /// Left of the plot area (group labels live here).
    pub left: f64,
}

impl Margins {
    /// Margins proportional to the marker radius.
    #[must_use]
    pub fn for_radius(radius: f64) -> Self {
        Self {
            top: radius * 10.0,
            right: radius * 15.0,
            bottom: radius * 10.0,
            left: radius * 15.0,
        }
    }
}

/// Axis label for one group band.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupLabel {
    /// Group name.
    pub group: Arc<str>,
    /// Band index.
    pub band: usize,
    /// Text anchor: right-aligned, vertically centered on the band.
    pub anchor: Point,
    /// Band extent in document coordinates.
    pub band_rect: Rect,
}

/// Legend swatch and label for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendEntry {
    /// Category name.
    pub category: Arc<str>,
    /// Category index (palette index).
    pub index: usize,
    /// Swatch center.
    pub swatch: Point,
    /// Label text anchor: left-aligned, vertically centered on the swatch.
    pub label: Point,
}

/// Supporting geometry for rendering a [`DotLayout`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Guides {
    /// Margins around the plot area.
    pub margins: Margins,
    /// Plot area in document coordinates.
    pub frame: Rect,
    /// One label per group, including empty groups.
    pub group_labels: Vec<GroupLabel>,
    /// One entry per category in first-seen order.
    pub legend: Vec<LegendEntry>,
    /// Vertical rule along the right edge of the plot area.
    pub separator: Line,
    /// Font size for labels and legend text.
    pub font_size: f64,
    /// Full document width.
    pub document_width: f64,
    /// Full document height.
    pub document_height: f64,
}

impl Guides {
    /// Compute guides for `layout` drawn with `config`.
    #[must_use]
    pub fn compute(layout: &DotLayout, config: &LayoutConfig) -> Self {
        let r = config.marker_radius;
        let margins = Margins::for_radius(r);
        let frame = Rect::new(margins.left, margins.top, layout.width, layout.height);
        let band_height = layout.band_height(config);

        let group_labels = layout
            .groups
            .iter()
            .enumerate()
            .map(|(band, group)| {
                let band_rect = Rect::new(
                    frame.x,
                    frame.y + band as f64 * band_height,
                    frame.width,
                    band_height,
                );
                GroupLabel {
                    group: Arc::clone(group),
                    band,
                    anchor: Point::new(frame.x - 2.0 * r, band_rect.center().y),
                    band_rect,
                }
            })
            .collect();

        let legend = layout
            .categories
            .iter()
            .enumerate()
            .map(|(index, category)| {
                let swatch = Point::new(frame.right() + 4.0 * r, frame.y + r + index as f64 * 4.0 * r);
                LegendEntry {
                    category: Arc::clone(category),
                    index,
                    swatch,
                    label: swatch.offset(3.0 * r, 0.0),
                }
            })
            .collect();

        Self {
            margins,
            frame,
            group_labels,
            legend,
            separator: Line::from_coords(frame.right(), frame.y, frame.right(), frame.bottom()),
            font_size: 3.0 * r,
            document_width: frame.width + margins.left + margins.right,
            document_height: frame.height + margins.top + margins.bottom,
        }
    }

    /// Convert a point in plot coordinates to document coordinates.
    #[must_use]
    pub fn to_document(&self, point: Point) -> Point {
        point.offset(self.frame.x, self.frame.y)
    }

    /// Convert a point in document coordinates to plot coordinates.
    #[must_use]
    pub fn to_plot(&self, point: Point) -> Point {
        point.offset(-self.frame.x, -self.frame.y)
    }
}
