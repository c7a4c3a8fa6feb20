//! Dot grid layout engine.
//!
//! Turns `(category, group, count)` records into one [`Marker`] per unit.
//! Each group owns a horizontal row band; all bands share the same height,
//! set by the group that needs the most rows. Inside a band markers fill
//! rows left to right and wrap after `row_capacity` columns.
//!
//! The engine returns grid coordinates, not pixels: `column` is a cell
//! index and `row` is measured in bands (band `g` spans `[g, g + 1)`).
//! [`DotLayout::pixel_center`] maps them onto a drawing surface.

mod config;

use std::ops::Range;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info_span, trace};

use crate::aggregate::{aggregate, Aggregation};
use crate::error::Result;
use crate::geometry::Point;
use crate::record::CountRecord;

pub use config::LayoutConfig;

/// One unit of a quantity, placed on the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Category the unit belongs to.
    pub category: Arc<str>,
    /// Group the unit belongs to.
    pub group: Arc<str>,
    /// Index of `category` in [`DotLayout::categories`].
    pub category_index: usize,
    /// Band index, i.e. index of `group` in [`DotLayout::groups`].
    pub band: usize,
    /// Row within the band (0-based).
    pub line: usize,
    /// Column within the row, in `[0, row_capacity)`.
    pub column: usize,
    /// Vertical coordinate in band units: `band + (line + 0.5) / rows_per_group`.
    pub row: f64,
}

/// Result of one layout run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DotLayout {
    /// Canvas width: `row_capacity * cell_width`.
    pub width: f64,
    /// Canvas height: `rows_per_group * groups * cell_height`.
    pub height: f64,
    /// All markers, group by group in band order.
    pub markers: Vec<Marker>,
    /// Rows reserved per band, shared by every group.
    pub rows_per_group: usize,
    /// Categories in first-seen order (legend order).
    pub categories: Vec<Arc<str>>,
    /// Groups in first-seen order (band order).
    pub groups: Vec<Arc<str>>,
    /// `markers[group_spans[g].clone()]` are the markers of band `g`.
    pub group_spans: Vec<Range<usize>>,
}

/// Per-group packing state. Lives for a single [`layout`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct GroupState {
    markers_emitted: u64,
    line: usize,
    column: usize,
}

impl GroupState {
    /// State after placing one more marker, and the cell that marker takes.
    fn advance(self, row_capacity: usize) -> (Self, usize, usize) {
        let (line, column) = if self.markers_emitted == 0 {
            (0, 0)
        } else if self.markers_emitted % row_capacity as u64 == 0 {
            (self.line + 1, 0)
        } else {
            (self.line, self.column + 1)
        };

        let next = Self {
            markers_emitted: self.markers_emitted + 1,
            line,
            column,
        };
        (next, line, column)
    }
}

/// Rows needed so that the largest group fits: `ceil(max_total / capacity)`.
///
/// Depends only on the multiset of totals, never on record order.
#[must_use]
pub fn rows_per_group(aggregation: &Aggregation, row_capacity: usize) -> usize {
    if row_capacity == 0 {
        return 0;
    }
    aggregation.max_total().div_ceil(row_capacity as u64) as usize
}

/// Lay out one marker per unit count.
///
/// Records are visited group by group in first-seen group order; within a
/// group they keep their input order, so earlier records take the earlier
/// cells. Groups with a zero total still get a band.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidConfig`] or [`crate::Error::InvalidRecord`].
/// Both are detected before any marker is placed.
pub fn layout(records: &[CountRecord], config: &LayoutConfig) -> Result<DotLayout> {
    let _span = info_span!("dotgrid.layout", records = records.len()).entered();

    config.validate().map_err(|e| {
        debug!(error = %e, "rejected layout config");
        e
    })?;
    let aggregation = aggregate(records).map_err(|e| {
        debug!(error = %e, "rejected records");
        e
    })?;

    Ok(layout_aggregation(&aggregation, config))
}

/// Lay out an already aggregated dataset. `config` must be valid.
pub(crate) fn layout_aggregation(aggregation: &Aggregation, config: &LayoutConfig) -> DotLayout {
    let capacity = config.row_capacity;
    let rows = rows_per_group(aggregation, capacity);
    let group_count = aggregation.groups.len();

    let width = capacity as f64 * config.cell_width();
    let height = (rows * group_count) as f64 * config.cell_height();

    debug!(
        groups = group_count,
        categories = aggregation.categories.len(),
        rows_per_group = rows,
        markers = aggregation.grand_total(),
        width,
        height,
        "computed dot grid extent"
    );

    let mut by_group: Vec<Vec<usize>> = vec![Vec::new(); group_count];
    for (i, entry) in aggregation.entries.iter().enumerate() {
        by_group[entry.group].push(i);
    }

    let total = usize::try_from(aggregation.grand_total()).unwrap_or(0);
    let mut markers = Vec::with_capacity(total);
    let mut group_spans = Vec::with_capacity(group_count);
    let mut states = vec![GroupState::default(); group_count];

    for (band, entry_ids) in by_group.iter().enumerate() {
        let start = markers.len();
        let group = &aggregation.groups[band];

        for &id in entry_ids {
            let entry = aggregation.entries[id];
            let category = &aggregation.categories[entry.category];

            for _ in 0..entry.units {
                let (next, line, column) = states[band].advance(capacity);
                states[band] = next;
                markers.push(Marker {
                    category: Arc::clone(category),
                    group: Arc::clone(group),
                    category_index: entry.category,
                    band,
                    line,
                    column,
                    row: band as f64 + (line as f64 + 0.5) / rows as f64,
                });
            }
        }

        trace!(
            group = %group,
            band,
            markers = states[band].markers_emitted,
            lines = states[band].line + usize::from(states[band].markers_emitted > 0),
            "packed group"
        );
        group_spans.push(start..markers.len());
    }

    DotLayout {
        width,
        height,
        markers,
        rows_per_group: rows,
        categories: aggregation.categories.clone(),
        groups: aggregation.groups.clone(),
        group_spans,
    }
}

impl DotLayout {
    /// Height of one group's band on the canvas.
    #[must_use]
    pub fn band_height(&self, config: &LayoutConfig) -> f64 {
        self.rows_per_group as f64 * config.cell_height()
    }

    /// Center of `marker` in canvas pixels (y grows downwards).
    #[must_use]
    pub fn pixel_center(&self, marker: &Marker, config: &LayoutConfig) -> Point {
        let x = marker.column as f64 * config.cell_width() + config.marker_radius + config.padding_left;
        let y = marker.row * self.band_height(config);
        Point::new(x, y)
    }

    /// Markers of the group at `band`.
    #[must_use]
    pub fn group_markers(&self, band: usize) -> &[Marker] {
        self.group_spans
            .get(band)
            .map_or(&[][..], |span| &self.markers[span.clone()])
    }

    /// Number of markers placed.
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// True when no marker was placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use approx::assert_relative_eq;

    fn rec(category: &str, group: &str, count: f64) -> CountRecord {
        CountRecord::new(category, group, count)
    }

    fn config(capacity: usize) -> LayoutConfig {
        LayoutConfig::new()
            .with_marker_radius(5.0)
            .with_row_capacity(capacity)
            .with_padding(1.0)
    }

    #[test]
    fn test_group_state_advance() {
        let mut state = GroupState::default();
        let mut cells = Vec::new();
        for _ in 0..5 {
            let (next, line, column) = state.advance(2);
            assert_eq!(next.markers_emitted, state.markers_emitted + 1);
            cells.push((line, column));
            state = next;
        }
        assert_eq!(cells, [(0, 0), (0, 1), (1, 0), (1, 1), (2, 0)]);
    }

    #[test]
    fn test_two_category_scenario() {
        let layout = layout(&[rec("A", "G1", 3.0), rec("B", "G1", 2.0)], &config(4)).unwrap();

        assert_eq!(layout.rows_per_group, 2);
        assert_eq!(layout.markers.len(), 5);

        let cells: Vec<_> = layout.markers.iter().map(|m| (m.line, m.column)).collect();
        assert_eq!(cells, [(0, 0), (0, 1), (0, 2), (0, 3), (1, 0)]);

        let cats: Vec<&str> = layout.markers.iter().map(|m| m.category.as_ref()).collect();
        assert_eq!(cats, ["A", "A", "A", "B", "B"]);
        assert!(layout.markers.iter().all(|m| m.group.as_ref() == "G1"));

        assert_relative_eq!(layout.markers[0].row, 0.25);
        assert_relative_eq!(layout.markers[4].row, 0.75);
    }

    #[test]
    fn test_canvas_extent() {
        let cfg = config(4);
        let layout = layout(&[rec("A", "G1", 5.0), rec("A", "G2", 1.0), rec("A", "G3", 0.0)], &cfg).unwrap();

        // cell = 2*5 + 1 + 1 = 12
        assert_relative_eq!(layout.width, 48.0);
        assert_relative_eq!(layout.height, 2.0 * 3.0 * 12.0);
    }

    #[test]
    fn test_capacity_one() {
        let layout = layout(&[rec("A", "G", 3.0)], &config(1)).unwrap();

        assert_eq!(layout.rows_per_group, 3);
        assert!(layout.markers.iter().all(|m| m.column == 0));
        let lines: Vec<_> = layout.markers.iter().map(|m| m.line).collect();
        assert_eq!(lines, [0, 1, 2]);
        assert_relative_eq!(layout.markers[2].row, 2.5 / 3.0);
    }

    #[test]
    fn test_zero_group_reserves_band() {
        let layout = layout(&[rec("A", "Empty", 0.0), rec("A", "Full", 2.0)], &config(4)).unwrap();

        assert_eq!(layout.groups.len(), 2);
        assert!(layout.group_markers(0).is_empty());
        assert_eq!(layout.group_markers(1).len(), 2);
        assert!(layout.markers.iter().all(|m| m.band == 1));
        assert_relative_eq!(layout.markers[0].row, 1.5);
    }

    #[test]
    fn test_empty_input() {
        let layout = layout(&[], &config(4)).unwrap();
        assert_eq!(layout.rows_per_group, 0);
        assert!(layout.is_empty());
        assert_relative_eq!(layout.height, 0.0);
        assert_relative_eq!(layout.width, 48.0);
    }

    #[test]
    fn test_all_zero_totals() {
        let layout = layout(&[rec("A", "G1", 0.0), rec("B", "G2", 0.0)], &config(4)).unwrap();
        assert_eq!(layout.rows_per_group, 0);
        assert!(layout.markers.is_empty());
        assert_eq!(layout.groups.len(), 2);
        assert_eq!(layout.group_spans, vec![0..0, 0..0]);
    }

    #[test]
    fn test_groups_pack_independently() {
        let input = [
            rec("A", "G1", 3.0),
            rec("A", "G2", 2.0),
            rec("B", "G1", 2.0),
            rec("B", "G2", 1.0),
        ];
        let layout = layout(&input, &config(4)).unwrap();

        let g1: Vec<_> = layout.group_markers(0).iter().map(|m| (m.category.as_ref(), m.line, m.column)).collect();
        assert_eq!(
            g1,
            [("A", 0, 0), ("A", 0, 1), ("A", 0, 2), ("B", 0, 3), ("B", 1, 0)]
        );

        let g2: Vec<_> = layout.group_markers(1).iter().map(|m| (m.category.as_ref(), m.line, m.column)).collect();
        assert_eq!(g2, [("A", 0, 0), ("A", 0, 1), ("B", 0, 2)]);
    }

    #[test]
    fn test_category_index_follows_first_seen() {
        let layout = layout(&[rec("B", "G", 1.0), rec("A", "G", 1.0)], &config(4)).unwrap();
        assert_eq!(layout.markers[0].category_index, 0);
        assert_eq!(layout.markers[1].category_index, 1);
    }

    #[test]
    fn test_invalid_config_before_records() {
        let err = layout(&[rec("A", "G", -1.0)], &config(0)).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { field: "row_capacity", .. }));
    }

    #[test]
    fn test_invalid_records() {
        for bad in [-1.0, 2.5] {
            let err = layout(&[rec("A", "G", 1.0), rec("B", "G", bad)], &config(4)).unwrap_err();
            assert!(matches!(err, Error::InvalidRecord { .. }));
        }
    }

    #[test]
    fn test_pixel_center() {
        let cfg = config(4);
        let layout = layout(&[rec("A", "G1", 5.0), rec("A", "G2", 1.0)], &cfg).unwrap();

        // band height = 2 rows * 12
        assert_relative_eq!(layout.band_height(&cfg), 24.0);

        let first = layout.pixel_center(&layout.markers[0], &cfg);
        assert_relative_eq!(first.x, 6.0);
        assert_relative_eq!(first.y, 6.0);

        let wrapped = layout.pixel_center(&layout.markers[4], &cfg);
        assert_relative_eq!(wrapped.x, 6.0);
        assert_relative_eq!(wrapped.y, 18.0);

        let second_band = layout.pixel_center(&layout.markers[5], &cfg);
        assert_relative_eq!(second_band.y, 30.0);
    }

    #[test]
    fn test_rerun_is_identical() {
        let input = [rec("A", "G1", 7.0), rec("B", "G2", 3.0), rec("C", "G1", 4.0)];
        assert_eq!(layout(&input, &config(3)).unwrap(), layout(&input, &config(3)).unwrap());
    }

    #[test]
    fn test_rerun_serializes_identically() {
        let input = [rec("B", "G2", 3.0), rec("A", "G1", 7.0), rec("C", "G1", 4.0)];
        let first = serde_yaml_ng::to_string(&layout(&input, &config(3)).unwrap()).unwrap();
        let second = serde_yaml_ng::to_string(&layout(&input, &config(3)).unwrap()).unwrap();
        assert_eq!(first, second);
        assert!(first.find("G2").unwrap() < first.find("G1").unwrap());
    }
}
