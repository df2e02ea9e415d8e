use cellgroup::{
    CellGroupAnalyzer, Config, GeohashGrid, GroupStats, Point, SquareGrid, Tiling, group_cells,
};
use std::collections::HashMap;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (set RUST_LOG=debug to see detailed logs)
    env_logger::init();

    println!("=== Connected Cell Groups ===\n");

    // === ABSTRACT ADJACENCY ===
    println!("1. Groups over an arbitrary graph");
    println!("---------------------------------");

    let mut edges: HashMap<&str, Vec<&str>> = HashMap::new();
    for (a, b) in [("A", "B"), ("B", "C"), ("D", "E")] {
        edges.entry(a).or_default().push(b);
        edges.entry(b).or_default().push(a);
    }

    let groups = CellGroupAnalyzer::new().group_by_adjacency(["A", "B", "C", "D", "E"], |cell| {
        edges.get(cell).cloned().unwrap_or_default()
    })?;
    for (i, group) in groups.iter().enumerate() {
        println!("   Group {}: {:?}", i, group.cells());
    }
    println!();

    // === SQUARE GRID ===
    println!("2. Square grid around Seoul City Hall");
    println!("-------------------------------------");

    let config = Config::default().with_resolution(9);
    let grid = SquareGrid::from_config(&config)?;
    println!(
        "   Resolution {} cells are {:.5}° wide ({:?} metric)",
        grid.resolution(),
        grid.cell_size(grid.resolution()),
        grid.metric()
    );

    let points = [
        Point::new(126.9780, 37.5665),
        Point::new(126.9810, 37.5665),
        Point::new(126.9840, 37.5670),
        Point::new(127.0500, 37.5000),
    ];
    let mut cells = Vec::new();
    for point in &points {
        let cell = grid.cell_at(point)?;
        println!("   ({:.4}, {:.4}) -> {}", point.y(), point.x(), cell);
        cells.push(cell);
    }

    let groups = group_cells(cells, &grid)?;
    let stats = GroupStats::from_groups(&groups);
    println!(
        "   {} cells form {} groups (largest {}, {} singletons)\n",
        stats.cell_count, stats.group_count, stats.largest, stats.singletons
    );

    // === GEOHASH ===
    println!("3. Geohash cells");
    println!("----------------");

    let geohash = GeohashGrid::from_config(&config)?;
    let hashes = points
        .iter()
        .map(|p| geohash.cell_at(p))
        .collect::<Result<Vec<_>, _>>()?;
    println!("   Cells: {:?}", hashes);

    let groups = group_cells(hashes, &geohash)?;
    println!("   {} geohash groups", groups.len());

    #[cfg(feature = "geojson")]
    {
        let text = cellgroup::groups_to_geojson(&geohash, &groups)?;
        println!("   GeoJSON export: {} bytes", text.len());
    }

    println!("\n=== Done ===");
    Ok(())
}
