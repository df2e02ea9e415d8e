use cellgroup::{
    AdjacencyOracle, CachedTiling, CellGroupAnalyzer, GeohashGrid, GridMetric, HexGrid, Point,
    SquareGrid, Tiling, group_cells,
};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

fn scattered_points(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let t = i as f64;
            Point::new(126.9 + (t * 0.618).fract() * 0.2, 37.4 + (t * 0.414).fract() * 0.2)
        })
        .collect()
}

fn benchmark_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    let point = Point::new(126.9780, 37.5665);

    let hex = HexGrid::new(9).unwrap();
    let square = SquareGrid::new(9).unwrap();
    let geohash = GeohashGrid::new(7).unwrap();
    let cached = CachedTiling::new(HexGrid::new(9).unwrap(), 4);

    group.bench_function("hexagon", |b| b.iter(|| hex.cell_at(black_box(&point)).unwrap()));
    group.bench_function("square", |b| b.iter(|| square.cell_at(black_box(&point)).unwrap()));
    group.bench_function("geohash", |b| {
        b.iter(|| geohash.cell_at(black_box(&point)).unwrap())
    });
    group.bench_function("cached_hexagon", |b| {
        b.iter(|| cached.cell_at(black_box(&point)).unwrap())
    });

    group.finish();
}

fn benchmark_neighbors(c: &mut Criterion) {
    let mut group = c.benchmark_group("neighbors");
    let point = Point::new(126.9780, 37.5665);

    let hex = HexGrid::new(9).unwrap();
    let manhattan = SquareGrid::new(9).unwrap();
    let chebyshev = SquareGrid::new(9).unwrap().with_metric(GridMetric::Chebyshev);
    let hex_cell = hex.cell_at(&point).unwrap();
    let square_cell = manhattan.cell_at(&point).unwrap();

    for k in 1..=5u32 {
        group.bench_with_input(BenchmarkId::new("hexagon", k), &k, |b, &k| {
            b.iter(|| hex.neighbors(black_box(&hex_cell), k).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("square_manhattan", k), &k, |b, &k| {
            b.iter(|| manhattan.neighbors(black_box(&square_cell), k).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("square_chebyshev", k), &k, |b, &k| {
            b.iter(|| chebyshev.neighbors(black_box(&square_cell), k).unwrap())
        });
    }

    group.finish();
}

fn benchmark_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");
    let hex = HexGrid::new(8).unwrap();
    let square = SquareGrid::new(8).unwrap();

    for size in [100, 1_000, 10_000] {
        let points = scattered_points(size);
        let hex_cells: Vec<_> = points.iter().map(|p| hex.cell_at(p).unwrap()).collect();
        let square_cells: Vec<_> = points.iter().map(|p| square.cell_at(p).unwrap()).collect();

        group.bench_with_input(BenchmarkId::new("hexagon", size), &hex_cells, |b, cells| {
            b.iter(|| group_cells(black_box(cells.iter().copied()), &hex).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("square", size), &square_cells, |b, cells| {
            b.iter(|| group_cells(black_box(cells.iter().copied()), &square).unwrap())
        });
    }

    // Adjacency-list graph without any tiling: a long path.
    let analyzer = CellGroupAnalyzer::new();
    group.bench_function("path_graph_10000", |b| {
        b.iter(|| {
            analyzer
                .group_by_adjacency(0u32..10_000, |&v| [v.wrapping_sub(1), v + 1])
                .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_indexing,
    benchmark_neighbors,
    benchmark_grouping
);
criterion_main!(benches);
