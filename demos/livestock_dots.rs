//! Livestock dot-matrix demo.
//!
//! Scales regional head counts into units of 100,000 animals, lays them out
//! and writes `livestock_dots.svg`.
//!
//! Run: cargo run --example livestock_dots

use dotgrid_viz::prelude::*;

fn main() -> Result<()> {
    let raw = [
        CountRecord::new("Sheep", "Canterbury", 5_012_345.0),
        CountRecord::new("Beef cattle", "Canterbury", 492_000.0),
        CountRecord::new("Dairy cattle", "Canterbury", 1_275_000.0),
        CountRecord::new("Deer", "Canterbury", 240_000.0),
        CountRecord::new("Sheep", "Otago", 4_380_000.0),
        CountRecord::new("Beef cattle", "Otago", 330_000.0),
        CountRecord::new("Dairy cattle", "Otago", 285_000.0),
        CountRecord::new("Sheep", "Southland", 3_920_000.0),
        CountRecord::new("Dairy cattle", "Southland", 690_000.0),
        CountRecord::new("Deer", "West Coast", 0.0),
    ];

    let units = to_units(&raw, 100_000.0, Rounding::Ceil)?;

    let config = LayoutConfig::new()
        .with_marker_radius(5.0)
        .with_row_capacity(12)
        .with_padding(2.0);

    let chart = DotMatrixChart::new().records(&units).config(config).build()?;
    let layout = chart.layout();

    println!(
        "{} markers, {} groups, {} rows per group, canvas {}x{}",
        layout.marker_count(),
        layout.groups.len(),
        layout.rows_per_group,
        layout.width,
        layout.height
    );

    for label in &chart.guides().group_labels {
        println!("  {:<12} {:>3} markers", label.group, layout.group_markers(label.band).len());
    }

    let probe = chart.guides().to_document(Point::new(7.0, 7.0));
    if let Some(marker) = chart.hit(probe) {
        println!("marker under {probe:?}: {} / {}", marker.group, marker.category);
    }

    chart.write_svg("livestock_dots.svg")?;
    println!("wrote livestock_dots.svg");
    Ok(())
}
