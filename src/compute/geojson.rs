//! GeoJSON export of connected groups.

use crate::compute::grouping::ConnectedGroup;
use crate::error::{CellGroupError, Result};
use crate::tiling::Tiling;
use geo::Polygon;
use geojson::{Feature, FeatureCollection, Geometry, Value};
use serde_json::{Map, json};
use std::fmt::Display;

fn polygon_value(polygon: &Polygon) -> Value {
    let ring = |ls: &geo::LineString| ls.coords().map(|c| vec![c.x, c.y]).collect::<Vec<_>>();
    let mut rings = vec![ring(polygon.exterior())];
    rings.extend(polygon.interiors().iter().map(ring));
    Value::Polygon(rings)
}

/// Builds a FeatureCollection with one polygon feature per cell.
///
/// Each feature carries `cell` (the cell's display form), `group` (index in
/// `groups`) and `group_size` properties.
pub fn groups_to_feature_collection<T>(
    tiling: &T,
    groups: &[ConnectedGroup<T::Cell>],
) -> Result<FeatureCollection>
where
    T: Tiling + ?Sized,
    T::Cell: Display,
{
    let mut features = Vec::with_capacity(groups.iter().map(ConnectedGroup::len).sum());
    for (idx, group) in groups.iter().enumerate() {
        for cell in group {
            let boundary = tiling.boundary(cell)?;

            let mut properties = Map::new();
            properties.insert("cell".to_string(), json!(cell.to_string()));
            properties.insert("group".to_string(), json!(idx));
            properties.insert("group_size".to_string(), json!(group.len()));

            features.push(Feature {
                bbox: None,
                geometry: Some(Geometry::new(polygon_value(&boundary))),
                id: None,
                properties: Some(properties),
                foreign_members: None,
            });
        }
    }

    Ok(FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    })
}

/// Serializes groups as a GeoJSON string.
pub fn groups_to_geojson<T>(tiling: &T, groups: &[ConnectedGroup<T::Cell>]) -> Result<String>
where
    T: Tiling + ?Sized,
    T::Cell: Display,
{
    let collection = groups_to_feature_collection(tiling, groups)?;
    serde_json::to_string(&collection).map_err(|e| {
        CellGroupError::SerializationErrorWithContext(format!(
            "Failed to serialize groups: {}",
            e
        ))
    })
}
