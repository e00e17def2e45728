//! HTTP client for the reference point and drawing sheet feature services

use crate::features::{self, DocumentAttributes};
use crate::params::{OutputFormat, PointQuery};
use crate::{ClientError, Result, ServiceConfig};
use geo::Coord;
use rail_km_lib::{ReferenceMarker, ReferencePointSource};
use std::future::Future;

const REFERENCE_POINT_FIELDS: &[&str] = &["KMLINT", "KM_GEOCODE_T"];
const DOCUMENT_FIELDS: &[&str] = &["DOCUMENTNAAM", "DOCUMENTNUMMER", "DOCUMENTVERSIE"];

/// Client for the ArcGIS FeatureServer `query` endpoints
///
/// Every call performs one request; nothing is cached.
#[derive(Debug, Clone)]
pub struct ArcGisClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl ArcGisClient {
    /// Create a new client
    ///
    /// # Errors
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http, config })
    }

    #[inline]
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// GET `url` with `params` and return the body of a successful response
    async fn get_text(&self, url: &str, params: &[(&'static str, String)]) -> Result<String> {
        tracing::debug!("GET {url} {params:?}");

        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Feature service responded with HTTP {status}");
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.text().await?)
    }

    /// Reference markers within `radius_meters` of `point`
    pub async fn fetch_reference_markers(
        &self,
        point: Coord<f64>,
        radius_meters: f64,
    ) -> Result<Vec<ReferenceMarker>> {
        let query = PointQuery {
            point,
            distance_meters: radius_meters,
            spatial_reference: self.config.spatial_reference,
            out_fields: REFERENCE_POINT_FIELDS,
            return_geometry: true,
            format: OutputFormat::GeoJson,
        };

        let body = self
            .get_text(&self.config.reference_points_url, &query.to_params())
            .await?;
        let markers = features::decode_reference_markers(&body)?;
        tracing::debug!("Decoded {} reference markers", markers.len());
        Ok(markers)
    }

    /// Drawing sheets covering `point`
    pub async fn fetch_documents(&self, point: Coord<f64>) -> Result<Vec<DocumentAttributes>> {
        let query = PointQuery {
            point,
            distance_meters: self.config.document_radius_meters,
            spatial_reference: self.config.spatial_reference,
            out_fields: DOCUMENT_FIELDS,
            return_geometry: false,
            format: OutputFormat::PrettyJson,
        };

        let body = self
            .get_text(&self.config.documents_url, &query.to_params())
            .await?;
        features::decode_documents(&body)
    }
}

impl ReferencePointSource for ArcGisClient {
    type Error = ClientError;

    fn reference_markers(
        &self,
        point: Coord<f64>,
        radius_meters: f64,
    ) -> impl Future<Output = Result<Vec<ReferenceMarker>>> + Send {
        self.fetch_reference_markers(point, radius_meters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::Router;
    use axum::http::StatusCode;
    use axum::routing::get;
    use rail_km_lib::{KilometerQuery, KmError};
    use std::time::Duration;

    const SERVICE_ERROR: &str =
        r#"{"error":{"code":400,"message":"Unable to complete operation.","details":[]}}"#;

    const LINE_A: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [0.0, 0.0] },
              "properties": { "KMLINT": "A", "KM_GEOCODE_T": "5,0" } },
            { "type": "Feature",
              "geometry": { "type": "Point", "coordinates": [1000.0, 0.0] },
              "properties": { "KMLINT": "A", "KM_GEOCODE_T": "6,0" } }
        ]
    }"#;

    /// Serve a fixed response on `/query` from an ephemeral local port
    async fn feature_service(status: StatusCode, body: &'static str) -> ServiceConfig {
        let app = Router::new().route("/query", get(move || async move { (status, body) }));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/query", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ServiceConfig {
            reference_points_url: url.clone(),
            documents_url: url,
            timeout: Duration::from_secs(5),
            ..Default::default()
        }
    }

    fn unreachable_config() -> ServiceConfig {
        // Port 9 (discard) on localhost is not expected to serve HTTP
        ServiceConfig {
            reference_points_url: "http://127.0.0.1:9/query".to_string(),
            documents_url: "http://127.0.0.1:9/query".to_string(),
            timeout: Duration::from_secs(2),
            ..Default::default()
        }
    }

    #[test]
    fn test_client_creation() {
        let client = ArcGisClient::new(ServiceConfig::default()).unwrap();
        assert_eq!(client.config().spatial_reference, 28992);
    }

    #[tokio::test]
    async fn test_transport_failure_is_http_error() {
        let client = ArcGisClient::new(unreachable_config()).unwrap();
        let result = client
            .fetch_reference_markers(Coord { x: 0.0, y: 0.0 }, 300.0)
            .await;
        assert!(matches!(result, Err(ClientError::Http(_))));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates_through_query() {
        let client = ArcGisClient::new(unreachable_config()).unwrap();
        let query = KilometerQuery::with_defaults(client);

        let result = query.all_lines(Coord { x: 0.0, y: 0.0 }).await;
        assert!(matches!(result, Err(KmError::Source(_))));
    }

    #[tokio::test]
    async fn test_non_success_status() {
        let config = feature_service(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable").await;
        let client = ArcGisClient::new(config).unwrap();

        let result = client
            .fetch_reference_markers(Coord { x: 0.0, y: 0.0 }, 300.0)
            .await;
        assert!(matches!(result, Err(ClientError::Status(503))));

        let result = client.fetch_documents(Coord { x: 0.0, y: 0.0 }).await;
        assert!(matches!(result, Err(ClientError::Status(503))));
    }

    #[tokio::test]
    async fn test_status_message_through_query() {
        let config = feature_service(StatusCode::INTERNAL_SERVER_ERROR, "").await;
        let query = KilometerQuery::with_defaults(ArcGisClient::new(config).unwrap());

        match query.all_lines(Coord { x: 0.0, y: 0.0 }).await {
            Err(KmError::Source(e)) => assert_eq!(e.to_string(), "HTTP error! Status: 500"),
            other => panic!("expected source error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_error_payload_with_ok_status() {
        let config = feature_service(StatusCode::OK, SERVICE_ERROR).await;
        let client = ArcGisClient::new(config).unwrap();

        match client
            .fetch_reference_markers(Coord { x: 0.0, y: 0.0 }, 300.0)
            .await
        {
            Err(ClientError::Service { code, message }) => {
                assert_eq!(code, 400);
                assert_eq!(message, "Unable to complete operation.");
            }
            other => panic!("expected service error, got {other:?}"),
        }

        let result = client.fetch_documents(Coord { x: 0.0, y: 0.0 }).await;
        assert!(matches!(result, Err(ClientError::Service { code: 400, .. })));
    }

    #[tokio::test]
    async fn test_kilometer_from_served_markers() {
        let config = feature_service(StatusCode::OK, LINE_A).await;
        let query = KilometerQuery::with_defaults(ArcGisClient::new(config).unwrap());

        let value = query
            .kilometer_on_line(Coord { x: 300.0, y: 0.0 }, "A")
            .await
            .unwrap();
        assert!((value.unwrap() - 5300.0).abs() < 1e-9);
    }
}
