//! Kilometer queries against a remote source of reference markers
//!
//! [`KilometerQuery`] fetches the markers around a point from a [`ReferencePointSource`]
//! and runs the [engine](crate::engine) on them.

use crate::{KmError, LineKilometer, ReferenceMarker, Result, engine, utils};
use geo::Coord;
use std::future::Future;

/// Default search radius around the query point in meters
pub const DEFAULT_SEARCH_RADIUS_METERS: f64 = 300.0;

/// Provider of the reference markers near a point
///
/// Implementations own transport, decoding and locale number normalization; the
/// markers they return are taken as valid.
pub trait ReferencePointSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All markers within `radius_meters` of `point`
    fn reference_markers(
        &self,
        point: Coord<f64>,
        radius_meters: f64,
    ) -> impl Future<Output = std::result::Result<Vec<ReferenceMarker>, Self::Error>> + Send;
}

/// Query configuration
#[derive(Debug, Clone)]
pub struct QueryConfig {
    /// Radius in meters in which reference markers are requested
    pub search_radius_meters: f64,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            search_radius_meters: DEFAULT_SEARCH_RADIUS_METERS,
        }
    }
}

/// Kilometer lookups for points, backed by a marker source
#[derive(Debug, Clone)]
pub struct KilometerQuery<S> {
    source: S,
    config: QueryConfig,
}

impl<S: ReferencePointSource> KilometerQuery<S> {
    pub fn new(source: S, config: QueryConfig) -> Self {
        Self { source, config }
    }

    pub fn with_defaults(source: S) -> Self {
        Self::new(source, QueryConfig::default())
    }

    #[inline]
    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    #[inline]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Kilometer values of the point on every line within the search radius
    ///
    /// # Errors
    /// [`KmError::InvalidCoordinate`] for a non-finite point, before the source is queried.
    pub async fn all_lines(&self, point: Coord<f64>) -> Result<Vec<LineKilometer>> {
        if !utils::is_finite_coord(&point) {
            return Err(KmError::InvalidCoordinate {
                x: point.x,
                y: point.y,
            });
        }

        let markers = self
            .source
            .reference_markers(point, self.config.search_radius_meters)
            .await
            .map_err(|e| KmError::Source(Box::new(e)))?;

        tracing::debug!(
            "Fetched {} reference markers within {} m of ({}, {})",
            markers.len(),
            self.config.search_radius_meters,
            point.x,
            point.y
        );

        engine::locate(point, &markers)
    }

    /// Identifiers of every line the point can be located on
    pub async fn line_ids(&self, point: Coord<f64>) -> Result<Vec<String>> {
        Ok(self
            .all_lines(point)
            .await?
            .into_iter()
            .map(|km| km.line_id)
            .collect())
    }

    /// Kilometer value of the point on `line_id`
    ///
    /// `Ok(None)` means the point could not be located on that line within the search radius.
    pub async fn kilometer_on_line(&self, point: Coord<f64>, line_id: &str) -> Result<Option<f64>> {
        let results = self.all_lines(point).await?;
        Ok(engine::find_line(&results, line_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Debug, thiserror::Error)]
    #[error("service unavailable")]
    struct Unavailable;

    /// In-memory source that records the radius it was asked for
    #[derive(Default)]
    struct StaticSource {
        markers: Vec<ReferenceMarker>,
        fail: bool,
        requested_radius: Mutex<Option<f64>>,
        calls: AtomicUsize,
    }

    impl ReferencePointSource for StaticSource {
        type Error = Unavailable;

        async fn reference_markers(
            &self,
            _point: Coord<f64>,
            radius_meters: f64,
        ) -> std::result::Result<Vec<ReferenceMarker>, Unavailable> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Ok(mut radius) = self.requested_radius.lock() {
                *radius = Some(radius_meters);
            }
            if self.fail {
                return Err(Unavailable);
            }
            Ok(self.markers.clone())
        }
    }

    fn two_line_source() -> StaticSource {
        StaticSource {
            markers: vec![
                ReferenceMarker::from_xy("A", 5.0, 0.0, 0.0).unwrap(),
                ReferenceMarker::from_xy("A", 6.0, 1000.0, 0.0).unwrap(),
                ReferenceMarker::from_xy("B", 42.0, 0.0, 100.0).unwrap(),
                ReferenceMarker::from_xy("B", 42.1, 0.0, 200.0).unwrap(),
            ],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_all_lines() {
        let query = KilometerQuery::with_defaults(two_line_source());

        let results = query.all_lines(Coord { x: 300.0, y: 0.0 }).await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].line_id, "A");
        assert!((results[0].kilometer_value_meters - 5300.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_line_ids() {
        let query = KilometerQuery::with_defaults(two_line_source());

        // (0, 150) is at the start of line A's span and halfway line B's span
        let ids = query.line_ids(Coord { x: 0.0, y: 150.0 }).await.unwrap();
        assert_eq!(ids, vec!["A".to_string(), "B".to_string()]);
    }

    #[tokio::test]
    async fn test_kilometer_on_line() {
        let query = KilometerQuery::with_defaults(two_line_source());
        let point = Coord { x: 0.0, y: 150.0 };

        let on_b = query.kilometer_on_line(point, "B").await.unwrap();
        assert!((on_b.unwrap() - 42050.0).abs() < 1e-9);

        let on_c = query.kilometer_on_line(point, "C").await.unwrap();
        assert_eq!(on_c, None);
    }

    #[tokio::test]
    async fn test_search_radius_is_forwarded() {
        let config = QueryConfig {
            search_radius_meters: 125.0,
        };
        let query = KilometerQuery::new(two_line_source(), config);

        query.all_lines(Coord { x: 1.0, y: 1.0 }).await.unwrap();
        let radius = *query.source().requested_radius.lock().unwrap();
        assert_eq!(radius, Some(125.0));
    }

    #[tokio::test]
    async fn test_source_failure_propagates() {
        let query = KilometerQuery::with_defaults(StaticSource {
            fail: true,
            ..Default::default()
        });

        let result = query.all_lines(Coord { x: 0.0, y: 0.0 }).await;
        match result {
            Err(KmError::Source(e)) => assert_eq!(e.to_string(), "service unavailable"),
            other => panic!("expected source error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_point_fails_before_fetch() {
        let query = KilometerQuery::with_defaults(StaticSource {
            fail: true,
            ..Default::default()
        });

        for point in [
            Coord { x: f64::NAN, y: 0.0 },
            Coord {
                x: 0.0,
                y: f64::INFINITY,
            },
        ] {
            let result = query.all_lines(point).await;
            assert!(matches!(result, Err(KmError::InvalidCoordinate { .. })));

            let result = query.kilometer_on_line(point, "A").await;
            assert!(matches!(result, Err(KmError::InvalidCoordinate { .. })));
        }
        assert_eq!(query.source().calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_valid_point_queries_source_once() {
        let query = KilometerQuery::with_defaults(two_line_source());
        query.all_lines(Coord { x: 0.0, y: 0.0 }).await.unwrap();
        assert_eq!(query.source().calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_default_config() {
        assert_eq!(
            QueryConfig::default().search_radius_meters,
            DEFAULT_SEARCH_RADIUS_METERS
        );
    }
}
