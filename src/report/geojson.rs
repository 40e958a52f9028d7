use serde_json::{Value, json};

use super::ParcelReport;

/// GeoJSON FeatureCollection for map displays: the parcel polygon followed by
/// one point feature per beacon. Returns `None` when the report was computed
/// without a projection, since GeoJSON positions must be WGS84.
pub fn to_geojson(report: &ParcelReport) -> Option<Value> {
    let geographic = report.geographic.as_ref()?;

    let ring: Vec<[f64; 2]> = geographic.ring.iter().map(|&(lon, lat)| [lon, lat]).collect();

    let mut features = vec![json!({
        "type": "Feature",
        "geometry": { "type": "Polygon", "coordinates": [ring] },
        "properties": {
            "area_m2": report.area,
            "perimeter_m": report.perimeter,
            "source_crs": format!("EPSG:{}", geographic.epsg),
        },
    })];

    // Skip the closing vertex; it repeats P1
    let beacons = &geographic.ring[..geographic.ring.len().saturating_sub(1)];
    for (rec, &(lon, lat)) in report.records.iter().zip(beacons) {
        features.push(json!({
            "type": "Feature",
            "geometry": { "type": "Point", "coordinates": [lon, lat] },
            "properties": {
                "label": rec.label(),
                "easting": rec.start.easting,
                "northing": rec.start.northing,
            },
        }));
    }

    Some(json!({
        "type": "FeatureCollection",
        "features": features,
    }))
}
