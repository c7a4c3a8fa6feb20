//! Dot-matrix (unit) chart.
//!
//! One circle per unit of count, grouped into labelled row bands and colored
//! by category, with a legend on the right.

use std::path::Path;

use tracing::debug;

use crate::color::{CategoryPalette, Rgba};
use crate::error::Result;
use crate::geometry::Point;
use crate::guides::Guides;
use crate::hit_test::HitTester;
use crate::layout::{layout, DotLayout, LayoutConfig, Marker};
use crate::output::{SvgElement, SvgEncoder, TextAnchor};
use crate::record::CountRecord;

/// Builder for creating dot-matrix charts.
#[derive(Debug, Clone)]
pub struct DotMatrixChart {
    records: Vec<CountRecord>,
    config: LayoutConfig,
    palette: CategoryPalette,
    background: Option<Rgba>,
    text_color: Rgba,
    rule_color: Rgba,
    band_rule_color: Rgba,
    show_legend: bool,
    show_labels: bool,
}

impl Default for DotMatrixChart {
    fn default() -> Self {
        Self::new()
    }
}

impl DotMatrixChart {
    /// Create a new dot-matrix chart builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            config: LayoutConfig::default(),
            palette: CategoryPalette::default(),
            background: Some(Rgba::WHITE),
            text_color: Rgba::BLACK,
            rule_color: Rgba::BLACK,
            band_rule_color: Rgba::GRAY,
            show_legend: true,
            show_labels: true,
        }
    }

    /// Set the input records.
    #[must_use]
    pub fn records(mut self, records: &[CountRecord]) -> Self {
        self.records = records.to_vec();
        self
    }

    /// Set the layout configuration.
    #[must_use]
    pub fn config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the category palette.
    #[must_use]
    pub fn palette(mut self, palette: CategoryPalette) -> Self {
        self.palette = palette;
        self
    }

    /// Set the background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Set the color of the rules between group bands.
    #[must_use]
    pub fn band_rule_color(mut self, color: Rgba) -> Self {
        self.band_rule_color = color;
        self
    }

    /// Show or hide the category legend.
    #[must_use]
    pub fn legend(mut self, show: bool) -> Self {
        self.show_legend = show;
        self
    }

    /// Show or hide group labels.
    #[must_use]
    pub fn labels(mut self, show: bool) -> Self {
        self.show_labels = show;
        self
    }

    /// Run the layout and build the chart.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfig`] or [`crate::Error::InvalidRecord`]
    /// if the configuration or a record count is invalid.
    pub fn build(self) -> Result<BuiltDotMatrix> {
        let layout = layout(&self.records, &self.config)?;
        let guides = Guides::compute(&layout, &self.config);

        Ok(BuiltDotMatrix {
            layout,
            guides,
            config: self.config,
            palette: self.palette,
            background: self.background,
            text_color: self.text_color,
            rule_color: self.rule_color,
            band_rule_color: self.band_rule_color,
            show_legend: self.show_legend,
            show_labels: self.show_labels,
        })
    }
}

/// A laid-out dot-matrix chart, ready to render.
#[derive(Debug, Clone)]
pub struct BuiltDotMatrix {
    layout: DotLayout,
    guides: Guides,
    config: LayoutConfig,
    palette: CategoryPalette,
    background: Option<Rgba>,
    text_color: Rgba,
    rule_color: Rgba,
    band_rule_color: Rgba,
    show_legend: bool,
    show_labels: bool,
}

impl BuiltDotMatrix {
    /// The computed layout.
    #[must_use]
    pub fn layout(&self) -> &DotLayout {
        &self.layout
    }

    /// Configuration the layout was computed with.
    #[must_use]
    pub fn config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Label, legend and frame geometry.
    #[must_use]
    pub fn guides(&self) -> &Guides {
        &self.guides
    }

    /// Fill color of a marker.
    #[must_use]
    pub fn marker_color(&self, marker: &Marker) -> Rgba {
        self.palette.color(marker.category_index)
    }

    /// Marker under a pointer given in document coordinates.
    #[must_use]
    pub fn hit(&self, point: Point) -> Option<&Marker> {
        HitTester::new(&self.layout, &self.config).hit(self.guides.to_plot(point))
    }

    /// Build the SVG document.
    #[must_use]
    pub fn to_svg(&self) -> SvgEncoder {
        let guides = &self.guides;
        let r = self.config.marker_radius;
        let mut svg = SvgEncoder::new(guides.document_width, guides.document_height).background(self.background);

        if self.show_labels {
            for label in &guides.group_labels {
                let rule_y = label.band_rect.y;
                svg = svg.line(
                    guides.frame.x - 2.0 * r,
                    rule_y,
                    guides.frame.right(),
                    rule_y,
                    self.band_rule_color,
                    1.0,
                );
                svg.add_element(SvgElement::Text {
                    x: label.anchor.x,
                    y: label.anchor.y,
                    text: label.group.to_string(),
                    font_size: guides.font_size,
                    fill: self.text_color,
                    anchor: TextAnchor::Middle,
                    rotate: Some(-90.0),
                });
            }
        }

        let sep = guides.separator;
        svg = svg.line(sep.start.x, sep.start.y, sep.end.x, sep.end.y, self.rule_color, 1.0);

        for marker in &self.layout.markers {
            let center = guides.to_document(self.layout.pixel_center(marker, &self.config));
            svg.add_element(SvgElement::Circle {
                cx: center.x,
                cy: center.y,
                r,
                fill: self.marker_color(marker),
                class: Some(format!("dot band-{} category-{}", marker.band, marker.category_index)),
            });
        }

        if self.show_legend {
            for entry in &guides.legend {
                svg = svg
                    .circle(entry.swatch.x, entry.swatch.y, r, self.palette.color(entry.index))
                    .text(
                        entry.label.x,
                        entry.label.y,
                        &entry.category,
                        guides.font_size,
                        self.text_color,
                        TextAnchor::Start,
                    );
            }
        }

        debug!(
            markers = self.layout.markers.len(),
            elements = svg.elements().len(),
            "built dot matrix svg"
        );
        svg
    }

    /// Render to an SVG string.
    #[must_use]
    pub fn render_svg(&self) -> String {
        self.to_svg().render()
    }

    /// Write the SVG document to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_svg<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.to_svg().write_to_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::CATEGORY10;
    use crate::error::Error;

    fn records() -> Vec<CountRecord> {
        vec![
            CountRecord::new("Sheep", "Otago", 7.0),
            CountRecord::new("Cattle", "Otago", 2.0),
            CountRecord::new("Cattle", "Canterbury", 4.0),
            CountRecord::new("Deer", "Southland", 0.0),
        ]
    }

    fn chart() -> BuiltDotMatrix {
        DotMatrixChart::new()
            .records(&records())
            .config(LayoutConfig::new().with_marker_radius(3.0).with_row_capacity(5))
            .build()
            .unwrap()
    }

    #[test]
    fn test_dot_matrix_builder() {
        let built = chart();
        assert_eq!(built.layout().marker_count(), 13);
        assert_eq!(built.layout().rows_per_group, 2);
        assert_eq!(built.guides().group_labels.len(), 3);
        assert_eq!(built.guides().legend.len(), 3);
    }

    #[test]
    fn test_dot_matrix_invalid_config() {
        let result = DotMatrixChart::new()
            .records(&records())
            .config(LayoutConfig::new().with_row_capacity(0))
            .build();
        assert!(matches!(result, Err(Error::InvalidConfig { .. })));
    }

    #[test]
    fn test_dot_matrix_invalid_record() {
        let result = DotMatrixChart::new()
            .records(&[CountRecord::new("A", "G", 1.5)])
            .build();
        assert!(matches!(result, Err(Error::InvalidRecord { .. })));
    }

    #[test]
    fn test_dot_matrix_svg_contents() {
        let svg = chart().render_svg();

        assert_eq!(svg.matches("class=\"dot ").count(), 13);
        // 13 markers + 3 legend swatches
        assert_eq!(svg.matches("<circle").count(), 16);
        assert!(svg.contains(">Otago</text>"));
        assert!(svg.contains(">Southland</text>"));
        assert!(svg.contains(">Deer</text>"));
        assert!(svg.contains(&CATEGORY10[0].to_css()));
    }

    #[test]
    fn test_dot_matrix_legend_text_at_label_anchor() {
        let built = chart();
        let svg = built.render_svg();

        for entry in &built.guides().legend {
            let text = format!(r#"<text x="{}" y="{}""#, entry.label.x, entry.label.y);
            assert!(svg.contains(&text), "missing {text}");
            assert_eq!(entry.label.y, entry.swatch.y);
        }
    }

    #[test]
    fn test_dot_matrix_band_rules() {
        let svg = chart().render_svg();
        assert_eq!(svg.matches(r#"stroke="rgb(128,128,128)""#).count(), 3);

        let svg = DotMatrixChart::new()
            .records(&records())
            .band_rule_color(Rgba::WHITE)
            .build()
            .unwrap()
            .render_svg();
        assert_eq!(svg.matches(r#"stroke="rgb(255,255,255)""#).count(), 3);
    }

    #[test]
    fn test_dot_matrix_hide_guides() {
        let built = DotMatrixChart::new()
            .records(&records())
            .legend(false)
            .labels(false)
            .background(None)
            .build()
            .unwrap();
        let svg = built.render_svg();

        assert_eq!(svg.matches("<circle").count(), 13);
        assert!(!svg.contains("<text"));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_dot_matrix_marker_colors_follow_category() {
        let built = DotMatrixChart::new()
            .records(&records())
            .palette(CategoryPalette::new(vec![Rgba::BLACK, Rgba::WHITE]))
            .build()
            .unwrap();

        for marker in &built.layout().markers {
            let expected = if marker.category.as_ref() == "Sheep" { Rgba::BLACK } else { Rgba::WHITE };
            assert_eq!(built.marker_color(marker), expected);
        }
    }

    #[test]
    fn test_dot_matrix_hit_in_document_space() {
        let built = chart();
        let marker = &built.layout().markers[8];
        let center = built
            .guides()
            .to_document(built.layout().pixel_center(marker, built.config()));

        assert_eq!(built.hit(center), Some(marker));
        assert!(built.hit(Point::ORIGIN).is_none());
    }

    #[test]
    fn test_dot_matrix_empty() {
        let built = DotMatrixChart::new().build().unwrap();
        let svg = built.render_svg();
        assert_eq!(svg.matches("<circle").count(), 0);
    }

    #[test]
    fn test_dot_matrix_write_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("livestock.svg");
        chart().write_svg(&path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
