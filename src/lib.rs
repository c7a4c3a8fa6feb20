//! # dotgrid-viz
//!
//! Layout engine for unit dot-matrix charts: every marker stands for one unit
//! of a quantity, markers are grouped into labelled row bands, and each
//! marker is colored by its category.
//!
//! The core is a pure function from `(category, group, count)` records and a
//! [`LayoutConfig`](layout::LayoutConfig) to grid positions. Guides (labels,
//! legend), hit testing and SVG output are thin layers on top of it.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dotgrid_viz::prelude::*;
//!
//! let records = [
//!     CountRecord::new("Sheep", "Otago", 12.0),
//!     CountRecord::new("Cattle", "Otago", 3.0),
//!     CountRecord::new("Sheep", "Canterbury", 9.0),
//! ];
//!
//! let layout = layout(&records, &LayoutConfig::new().with_row_capacity(5))?;
//! assert_eq!(layout.markers.len(), 24);
//!
//! DotMatrixChart::new().records(&records).build()?.write_svg("livestock.svg")?;
//! ```

// Allow unwrap() in tests only
#![cfg_attr(test, allow(clippy::unwrap_used))]

// ============================================================================
// Core Modules
// ============================================================================

/// Input records and unit pre-scaling.
pub mod record;

/// First-seen ordered aggregation of records.
pub mod aggregate;

/// Dot grid layout engine.
pub mod layout;

/// Geometric primitives (points, lines, rectangles).
pub mod geometry;

// ============================================================================
// Presentation Modules
// ============================================================================

/// Axis label, legend and frame geometry.
pub mod guides;


/// Color types and the categorical palette.
pub mod color;

/// Output encoders (SVG).
pub mod output;

/// High-level plot types.
pub mod plots;

// ============================================================================
// Error Types
// ============================================================================

/// Error types for dotgrid-viz operations.
pub mod error;

pub use error::{Error, Result};

// ============================================================================
// Prelude
// ============================================================================

/// Commonly used types and functions for convenient imports.
///
/// ```rust,ignore
/// use dotgrid_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::aggregate::{aggregate, Aggregation};
    pub use crate::color::{CategoryPalette, Rgba};
    pub use crate::error::{Error, Result};
    pub use crate::geometry::{Line, Point, Rect};
    pub use crate::guides::{GroupLabel, Guides, LegendEntry, Margins};
    pub use crate::hit_test::HitTester;
    pub use crate::layout::{layout, rows_per_group, DotLayout, LayoutConfig, Marker};
    pub use crate::plots::{BuiltDotMatrix, DotMatrixChart};
    pub use crate::record::{to_units, CountRecord, Rounding};
}
