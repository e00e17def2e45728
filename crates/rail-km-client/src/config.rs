//! Endpoint and query settings for the feature services

use std::time::Duration;

/// Hectometer reference points (`KMLINT`, `KM_GEOCODE_T`)
pub const DEFAULT_REFERENCE_POINTS_URL: &str =
    "https://mapservices.prorail.nl/arcgis/rest/services/Referentiesysteem_004/FeatureServer/1/query";

/// Schematic drawing sheets (`DOCUMENTNAAM`, `DOCUMENTNUMMER`, `DOCUMENTVERSIE`)
pub const DEFAULT_DOCUMENTS_URL: &str = "https://mapservices.prorail.nl/arcgis/rest/services/Tekeningen_schematisch_002/FeatureServer/0/query";

/// Amersfoort / RD New
pub const DEFAULT_SPATIAL_REFERENCE: u32 = 28992;

pub const DEFAULT_DOCUMENT_RADIUS_METERS: f64 = 1.0;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for [`ArcGisClient`](crate::ArcGisClient)
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// `query` endpoint of the reference point layer
    pub reference_points_url: String,
    /// `query` endpoint of the drawing sheet layer
    pub documents_url: String,
    /// Spatial reference id of both input and output coordinates
    pub spatial_reference: u32,
    /// Search radius for drawing sheets in meters
    pub document_radius_meters: f64,
    /// Timeout of a single HTTP request
    pub timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            reference_points_url: DEFAULT_REFERENCE_POINTS_URL.to_string(),
            documents_url: DEFAULT_DOCUMENTS_URL.to_string(),
            spatial_reference: DEFAULT_SPATIAL_REFERENCE,
            document_radius_meters: DEFAULT_DOCUMENT_RADIUS_METERS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}
