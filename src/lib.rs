//! Connectivity grouping over spatial cells with interchangeable tilings.
//!
//! ## Features
//! - **Grouping**: partition any cell set into maximal connected groups (BFS)
//! - **Tilings**: H3 hexagons, equal-area squares and geohashes behind one
//!   adjacency oracle trait
//! - **Analyses**: region sampling, circle coverage, per-cell aggregation,
//!   bucketed range queries and side-by-side tiling reports
//! - **Export**: connected groups as GeoJSON (`geojson` feature)
//!
//! ```rust
//! use cellgroup::{CellGroupAnalyzer, Point, SquareGrid, Tiling};
//!
//! let grid = SquareGrid::new(9)?;
//! let cells = [
//!     grid.cell_at(&Point::new(126.9780, 37.5665))?,
//!     grid.cell_at(&Point::new(126.9810, 37.5665))?,
//!     grid.cell_at(&Point::new(127.0500, 37.5000))?,
//! ];
//!
//! let groups = CellGroupAnalyzer::new().group_with_oracle(cells, &grid)?;
//! assert_eq!(groups.len(), 2);
//! # Ok::<(), cellgroup::CellGroupError>(())
//! ```

pub mod compute;
pub mod config;
pub mod error;
pub mod tiling;

pub use config::Config;
pub use error::{CellGroupError, Result};

pub use geo::{Point, Polygon, Rect};

pub use compute::aggregate::{CellStats, aggregate};
pub use compute::buckets::CellBuckets;
pub use compute::compare::{
    ComparisonReport, CoverageSummary, ProfileOptions, TilingProfile, compare_tilings,
    profile_tiling,
};
pub use compute::coverage::{Coverage, circle_coverage};
#[cfg(feature = "geojson")]
pub use compute::geojson::{groups_to_feature_collection, groups_to_geojson};
pub use compute::grouping::{CellGroupAnalyzer, ConnectedGroup, GroupStats, group_cells};
pub use compute::region::{covering_cells, interior_cells};

pub use tiling::{
    AdjacencyOracle, CacheStats, CachedTiling, GeohashGrid, GridMetric, SquareCell, SquareGrid,
    SquareSizing, Tiling,
};
#[cfg(feature = "hex")]
pub use tiling::HexGrid;

#[cfg(feature = "hex")]
pub use h3o::CellIndex as HexCell;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{CellGroupAnalyzer, CellGroupError, Config, ConnectedGroup, Result};

    pub use crate::{AdjacencyOracle, Tiling};

    pub use crate::{GeohashGrid, GridMetric, SquareCell, SquareGrid, SquareSizing};

    #[cfg(feature = "hex")]
    pub use crate::{HexCell, HexGrid};

    pub use geo::{Point, Rect};
}
