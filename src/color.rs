//! Color types and the categorical palette used for marker fills.
//!
//! The layout engine never picks colors. Renderers map a marker's
//! `category_index` through a [`CategoryPalette`], which keeps legend
//! swatches and markers consistent.

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Mid gray used for group band rules.
    pub const GRAY: Self = Self::new(128, 128, 128, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        let channel = |i: usize| u8::from_str_radix(digits.get(i..i + 2)?, 16).ok();
        match digits.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::new(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }

    /// CSS color string (`rgb(..)` when opaque, `rgba(..)` otherwise).
    #[must_use]
    pub fn to_css(self) -> String {
        if self.a == 255 {
            format!("rgb({},{},{})", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                f32::from(self.a) / 255.0
            )
        }
    }
}

/// Ten-color categorical scheme (d3 `schemeCategory10`).
pub const CATEGORY10: [Rgba; 10] = [
    Rgba::rgb(0x1f, 0x77, 0xb4),
    Rgba::rgb(0xff, 0x7f, 0x0e),
    Rgba::rgb(0x2c, 0xa0, 0x2c),
    Rgba::rgb(0xd6, 0x27, 0x28),
    Rgba::rgb(0x94, 0x67, 0xbd),
    Rgba::rgb(0x8c, 0x56, 0x4b),
    Rgba::rgb(0xe3, 0x77, 0xc2),
    Rgba::rgb(0x7f, 0x7f, 0x7f),
    Rgba::rgb(0xbc, 0xbd, 0x22),
    Rgba::rgb(0x17, 0xbe, 0xcf),
];

/// Stable category index → color mapping. Cycles when it runs out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPalette {
    colors: Vec<Rgba>,
}

impl Default for CategoryPalette {
    fn default() -> Self {
        Self::category10()
    }
}

impl CategoryPalette {
    /// The ten-color categorical scheme.
    #[must_use]
    pub fn category10() -> Self {
        Self {
            colors: CATEGORY10.to_vec(),
        }
    }

    /// Custom palette; falls back to [`CATEGORY10`] when `colors` is empty.
    #[must_use]
    pub fn new(colors: Vec<Rgba>) -> Self {
        if colors.is_empty() {
            Self::category10()
        } else {
            Self { colors }
        }
    }

    /// Color for the category at `index` in first-seen order.
    #[must_use]
    pub fn color(&self, index: usize) -> Rgba {
        self.colors[index % self.colors.len()]
    }

    /// Number of distinct colors before the palette repeats.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always false; a palette holds at least one color.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}
