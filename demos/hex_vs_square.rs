use cellgroup::{
    Config, HexGrid, Point, ProfileOptions, Rect, SquareGrid, SquareSizing, Tiling,
    compare_tilings, group_cells, interior_cells,
};
use geo::coord;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== Hexagons vs Squares ===\n");

    let config = Config::default().with_resolution(9);
    let hex = HexGrid::from_config(&config)?;
    let square = SquareGrid::from_config(&config)?;

    // === REGION GROUPING ===
    println!("1. Gangnam region at resolution {}", config.resolution);
    println!("-----------------------------------");

    let region = Rect::new(
        coord! { x: 127.035, y: 37.485 },
        coord! { x: 127.065, y: 37.515 },
    );
    let hex_cells = interior_cells(&hex, &region, config.sample_step_degrees)?;
    let square_cells = interior_cells(&square, &region, config.sample_step_degrees)?;
    println!(
        "   {} hexagons, {} squares",
        hex_cells.len(),
        square_cells.len()
    );
    println!(
        "   {} hexagon groups, {} square groups\n",
        group_cells(hex_cells, &hex)?.len(),
        group_cells(square_cells, &square)?.len()
    );

    // === PROFILES ===
    println!("2. Profiles over scattered points");
    println!("---------------------------------");

    let mut points = Vec::new();
    for i in 0..40 {
        for j in 0..40 {
            // Leave a gap down the middle to split the sample in two.
            if (18..22).contains(&i) {
                continue;
            }
            points.push(Point::new(126.96 + i as f64 * 0.0008, 37.55 + j as f64 * 0.0008));
        }
    }

    let options = ProfileOptions::from_config(&config, Point::new(126.976, 37.566), 1_000.0);
    let report = compare_tilings(&hex, &square, &points, &options)?;
    for profile in [&report.first, &report.second] {
        println!(
            "   {:8} cells={:4} groups={:2} rings={:?} coverage={:.2}",
            profile.tiling,
            profile.unique_cells,
            profile.groups.group_count,
            profile.ring_sizes,
            profile.coverage.ratio
        );
    }
    println!(
        "   squares per hexagon: {:.2}\n",
        report.cell_count_ratio()
    );

    // === HALVING SIZING ===
    println!("3. Halving square sizing");
    println!("------------------------");

    let halving = square.with_sizing(SquareSizing::Halving { base_degrees: 0.1 });
    for res in [6, 8, 10] {
        println!(
            "   res {:2}: {:.6}° squares, {:.4} km²",
            res,
            halving.cell_size(res),
            halving.cell_area_km2(&halving.cell_id(37.5665, 126.9780, res)?)?
        );
    }

    println!("\n{}", report.to_json()?);
    Ok(())
}
