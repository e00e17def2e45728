//! Rail KM Client - Feature Service Access
//!
//! Fetches hectometer reference points and schematic drawing sheets around a point from
//! ArcGIS FeatureServer layers. [`ArcGisClient`] implements
//! [`ReferencePointSource`](rail_km_lib::ReferencePointSource) so it can back a
//! [`KilometerQuery`](rail_km_lib::KilometerQuery).
//!
//! Transport errors, non-success HTTP statuses, service error payloads and locale
//! formatted geocodes are all dealt with here; the kilometer engine only sees numbers.

mod client;
mod config;
pub mod features;
mod params;

// Public API exports
pub use client::ArcGisClient;
pub use config::{
    DEFAULT_DOCUMENT_RADIUS_METERS, DEFAULT_DOCUMENTS_URL, DEFAULT_REFERENCE_POINTS_URL,
    DEFAULT_SPATIAL_REFERENCE, DEFAULT_TIMEOUT, ServiceConfig,
};
pub use features::DocumentAttributes;
pub use params::{OutputFormat, PointQuery};

/// Error types for the feature service client
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! Status: {0}")]
    Status(u16),

    #[error("Feature service error {code}: {message}")]
    Service { code: i64, message: String },

    #[error("Invalid response body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid geocode: {0:?}")]
    InvalidGeocode(String),

    #[error(transparent)]
    Marker(#[from] rail_km_lib::KmError),
}

pub type Result<T> = std::result::Result<T, ClientError>;
