//! Response payloads of the feature services and their conversion to domain types

use crate::{ClientError, Result};
use rail_km_lib::ReferenceMarker;
use serde::{Deserialize, Serialize};

/// Error object the service returns in place of features (often with HTTP 200)
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

/// GeoJSON feature collection (`f=geojson`)
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection<P> {
    #[serde(default = "Vec::new")]
    pub features: Vec<Feature<P>>,
    #[serde(default)]
    pub error: Option<ServiceError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature<P> {
    #[serde(default)]
    pub geometry: Option<Geometry>,
    pub properties: P,
}

/// Only point geometries carry a usable marker position
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Point { coordinates: Vec<f64> },
    #[serde(other)]
    Other,
}

/// Geocode as delivered: a locale formatted string ("12,345") or a plain number
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawGeocode {
    Number(f64),
    Text(String),
}

impl RawGeocode {
    /// Numeric geocode in kilometers
    pub fn to_kilometers(&self) -> Result<f64> {
        match self {
            RawGeocode::Number(value) => Ok(*value),
            RawGeocode::Text(text) => parse_geocode(text),
        }
    }
}

/// Parse a geocode string, accepting a comma as decimal separator
pub fn parse_geocode(text: &str) -> Result<f64> {
    let normalized = text.trim().replacen(',', ".", 1);
    normalized
        .parse::<f64>()
        .map_err(|_| ClientError::InvalidGeocode(text.to_string()))
}

/// Attributes of a hectometer reference point
#[derive(Debug, Clone, Deserialize)]
pub struct HectometerProperties {
    #[serde(rename = "KMLINT", default)]
    pub line_id: Option<String>,
    #[serde(rename = "KM_GEOCODE_T", default)]
    pub geocode: Option<RawGeocode>,
}

impl Feature<HectometerProperties> {
    /// Convert into a marker
    ///
    /// # Returns
    /// `Ok(None)` for features without a point geometry or line id, an error when the
    /// geocode or the coordinates are not valid numbers.
    pub fn to_marker(&self) -> Result<Option<ReferenceMarker>> {
        let (x, y) = match &self.geometry {
            Some(Geometry::Point { coordinates }) if coordinates.len() >= 2 => {
                (coordinates[0], coordinates[1])
            }
            _ => return Ok(None),
        };
        let Some(line_id) = self.properties.line_id.as_deref() else {
            return Ok(None);
        };
        let Some(geocode) = &self.properties.geocode else {
            return Ok(None);
        };

        let geocode = geocode.to_kilometers()?;
        Ok(Some(ReferenceMarker::from_xy(line_id, geocode, x, y)?))
    }
}

/// Decode a reference point response into markers
///
/// Features that cannot be turned into a marker are skipped with a warning, so one bad
/// record does not hide the rest of the line.
pub fn decode_reference_markers(body: &str) -> Result<Vec<ReferenceMarker>> {
    let collection: FeatureCollection<HectometerProperties> = serde_json::from_str(body)?;
    if let Some(error) = collection.error {
        return Err(ClientError::Service {
            code: error.code,
            message: error.message,
        });
    }

    let mut markers = Vec::with_capacity(collection.features.len());
    for feature in &collection.features {
        match feature.to_marker() {
            Ok(Some(marker)) => markers.push(marker),
            Ok(None) => {
                tracing::warn!(
                    "Skipping reference point without point geometry, line or geocode: {:?}",
                    feature.properties
                );
            }
            Err(e) => {
                tracing::warn!("Skipping invalid reference point: {e}");
            }
        }
    }
    Ok(markers)
}

/// Attributes of a schematic drawing sheet
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentAttributes {
    #[serde(rename = "DOCUMENTNAAM", default)]
    pub name: Option<String>,
    #[serde(rename = "DOCUMENTNUMMER", default)]
    pub number: Option<String>,
    #[serde(rename = "DOCUMENTVERSIE", default)]
    pub version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct AttributeFeature {
    attributes: DocumentAttributes,
}

/// Esri JSON feature set (`f=pjson`)
#[derive(Debug, Clone, Deserialize)]
struct AttributeFeatureSet {
    #[serde(default)]
    features: Vec<AttributeFeature>,
    #[serde(default)]
    error: Option<ServiceError>,
}

/// Decode a drawing sheet response
pub fn decode_documents(body: &str) -> Result<Vec<DocumentAttributes>> {
    let set: AttributeFeatureSet = serde_json::from_str(body)?;
    if let Some(error) = set.error {
        return Err(ClientError::Service {
            code: error.code,
            message: error.message,
        });
    }
    Ok(set.features.into_iter().map(|f| f.attributes).collect())
}
