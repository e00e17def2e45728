//! Query string construction for the ArcGIS REST `query` operation

use geo::Coord;

/// Response format requested from the service
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    GeoJson,
    PrettyJson,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::GeoJson => "geojson",
            OutputFormat::PrettyJson => "pjson",
        }
    }
}

/// Spatial "features within a distance of a point" query
#[derive(Clone, Debug)]
pub struct PointQuery<'a> {
    pub point: Coord<f64>,
    pub distance_meters: f64,
    pub spatial_reference: u32,
    pub out_fields: &'a [&'a str],
    pub return_geometry: bool,
    pub format: OutputFormat,
}

impl PointQuery<'_> {
    /// Key/value pairs, left unencoded (the HTTP client encodes them)
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let srs = self.spatial_reference.to_string();
        vec![
            ("geometry", format!("{},{}", self.point.x, self.point.y)),
            ("geometryType", "esriGeometryPoint".to_string()),
            ("inSR", srs.clone()),
            ("spatialRel", "esriSpatialRelIntersects".to_string()),
            ("distance", self.distance_meters.to_string()),
            ("units", "esriSRUnit_Meter".to_string()),
            ("outFields", self.out_fields.join(",")),
            ("returnGeometry", self.return_geometry.to_string()),
            ("outSR", srs),
            ("returnZ", "false".to_string()),
            ("returnM", "false".to_string()),
            ("f", self.format.as_str().to_string()),
        ]
    }
}
