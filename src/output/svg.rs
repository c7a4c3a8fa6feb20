//! SVG output encoder.
//!
//! Vector output for dot grids: circles for markers, lines for rules and
//! text for labels. Coordinates are written as given (document space).

use crate::color::Rgba;
use crate::error::Result;
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// SVG document builder.
#[derive(Debug, Clone)]
pub struct SvgEncoder {
    /// SVG width
    width: f64,
    /// SVG height
    height: f64,
    /// Background color (None for transparent)
    background: Option<Rgba>,
    /// SVG elements
    elements: Vec<SvgElement>,
}

/// An SVG element.
///
/// Field names are self-documenting and match SVG attribute names.
#[derive(Debug, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum SvgElement {
    /// Rectangle
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Rgba,
    },
    /// Circle, optionally tagged with a CSS class
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Rgba,
        class: Option<String>,
    },
    /// Line
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Rgba,
        stroke_width: f64,
    },
    /// Text, optionally rotated (degrees) about its anchor
    Text {
        x: f64,
        y: f64,
        text: String,
        font_size: f64,
        fill: Rgba,
        anchor: TextAnchor,
        rotate: Option<f64>,
    },
}

/// Text anchor position for SVG text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAnchor {
    /// Align text start at position (left-aligned for LTR)
    #[default]
    Start,
    /// Center text at position
    Middle,
    /// Align text end at position (right-aligned for LTR)
    End,
}

impl TextAnchor {
    fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

impl SvgEncoder {
    /// Create a new SVG encoder with given dimensions.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            background: Some(Rgba::WHITE),
            elements: Vec::new(),
        }
    }

    /// Set background color (None for transparent).
    #[must_use]
    pub fn background(mut self, color: Option<Rgba>) -> Self {
        self.background = color;
        self
    }

    /// Add a circle.
    #[must_use]
    pub fn circle(mut self, cx: f64, cy: f64, r: f64, fill: Rgba) -> Self {
        self.elements.push(SvgElement::Circle {
            cx,
            cy,
            r,
            fill,
            class: None,
        });
        self
    }

    /// Add a line.
    #[must_use]
    pub fn line(mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: Rgba, stroke_width: f64) -> Self {
        self.elements.push(SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        });
        self
    }

    /// Add text with anchor.
    #[must_use]
    pub fn text(mut self, x: f64, y: f64, text: &str, font_size: f64, fill: Rgba, anchor: TextAnchor) -> Self {
        self.elements.push(SvgElement::Text {
            x,
            y,
            text: text.to_string(),
            font_size,
            fill,
            anchor,
            rotate: None,
        });
        self
    }

    /// Add a raw element.
    pub fn add_element(&mut self, element: SvgElement) {
        self.elements.push(element);
    }

    /// Elements added so far, in paint order.
    #[must_use]
    pub fn elements(&self) -> &[SvgElement] {
        &self.elements
    }

    /// Render to SVG string.
    #[must_use]
    pub fn render(&self) -> String {
        let mut svg = String::with_capacity(256 + self.elements.len() * 96);

        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#,
            w = self.width,
            h = self.height,
        );

        if let Some(bg) = self.background {
            let _ = writeln!(svg, r#"  <rect width="100%" height="100%" fill="{}"/>"#, bg.to_css());
        }

        for element in &self.elements {
            svg.push_str("  ");
            write_element(&mut svg, element);
            svg.push('\n');
        }

        svg.push_str("</svg>\n");
        svg
    }

    /// Write to a file.
    ///
    /// # Errors
    ///
    /// Returns an error if file writing fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(self.render().as_bytes())?;
        Ok(())
    }
}

/// Escape XML special characters in text and attribute values.
fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn write_element(out: &mut String, element: &SvgElement) {
    let _ = match element {
        SvgElement::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => write!(
            out,
            r#"<rect x="{x}" y="{y}" width="{width}" height="{height}" fill="{}"/>"#,
            fill.to_css()
        ),
        SvgElement::Circle { cx, cy, r, fill, class } => {
            let class_attr = class
                .as_deref()
                .map(|c| format!(r#" class="{}""#, escape(c)))
                .unwrap_or_default();
            write!(
                out,
                r#"<circle{class_attr} cx="{cx}" cy="{cy}" r="{r}" fill="{}"/>"#,
                fill.to_css()
            )
        }
        SvgElement::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => write!(
            out,
            r#"<line x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}" stroke="{}" stroke-width="{stroke_width}"/>"#,
            stroke.to_css()
        ),
        SvgElement::Text {
            x,
            y,
            text,
            font_size,
            fill,
            anchor,
            rotate,
        } => {
            let transform = rotate
                .map(|deg| format!(r#" transform="rotate({deg} {x} {y})""#))
                .unwrap_or_default();
            write!(
                out,
                r#"<text x="{x}" y="{y}" font-size="{font_size}" fill="{}" text-anchor="{}" dominant-baseline="middle" font-family="sans-serif"{transform}>{}</text>"#,
                fill.to_css(),
                anchor.as_str(),
                escape(text)
            )
        }
    };
}
