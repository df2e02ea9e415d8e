//! Compute layer: algorithms that run over any [`Tiling`](crate::tiling::Tiling).
//!
//! - Connected-component grouping of cell sets
//! - Region sampling and circle coverage
//! - Per-cell aggregation and bucketed range queries
//! - Tiling comparison reports
//! - GeoJSON export (feature `geojson`)

pub mod aggregate;
pub mod buckets;
pub mod compare;
pub mod coverage;
#[cfg(feature = "geojson")]
pub mod geojson;
pub mod grouping;
pub mod region;
pub mod validation;
