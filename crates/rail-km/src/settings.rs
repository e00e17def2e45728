use clap::{Args, Parser, Subcommand};
use rail_km_client::{
    DEFAULT_DOCUMENT_RADIUS_METERS, DEFAULT_DOCUMENTS_URL, DEFAULT_REFERENCE_POINTS_URL,
    DEFAULT_SPATIAL_REFERENCE, ServiceConfig,
};
use rail_km_lib::{DEFAULT_SEARCH_RADIUS_METERS, QueryConfig};
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Rail KM - Kilometer positions and drawing sheets for points along the rail network
pub struct Settings {
    /// Query endpoint of the hectometer reference point layer
    #[clap(long, global = true, env = "RAIL_KM_REFERENCE_URL", default_value = DEFAULT_REFERENCE_POINTS_URL)]
    pub reference_url: String,

    /// Query endpoint of the schematic drawing sheet layer
    #[clap(long, global = true, env = "RAIL_KM_DOCUMENT_URL", default_value = DEFAULT_DOCUMENTS_URL)]
    pub document_url: String,

    /// Search radius for reference points in meters
    #[clap(long, global = true, env = "RAIL_KM_SEARCH_RADIUS", default_value_t = DEFAULT_SEARCH_RADIUS_METERS, value_parser = positive_meters)]
    pub search_radius: f64,

    /// Search radius for drawing sheets in meters
    #[clap(long, global = true, env = "RAIL_KM_DOCUMENT_RADIUS", default_value_t = DEFAULT_DOCUMENT_RADIUS_METERS, value_parser = positive_meters)]
    pub document_radius: f64,

    /// Spatial reference id of the input coordinates
    #[clap(long, global = true, env = "RAIL_KM_SRS", default_value_t = DEFAULT_SPATIAL_REFERENCE)]
    pub srs: u32,

    /// HTTP request timeout in seconds
    #[clap(long, global = true, env = "RAIL_KM_TIMEOUT_SECS", default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout_secs: u64,

    #[clap(subcommand)]
    pub command: Command,
}

/// Distance in meters; must be finite and greater than zero
fn positive_meters(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(format!("{s} is not a positive number of meters"))
    }
}

/// Planar coordinate in the configured spatial reference
#[derive(Args, Debug, Clone, Copy)]
pub struct PointArgs {
    /// X coordinate (easting)
    pub x: f64,
    /// Y coordinate (northing)
    pub y: f64,
}

impl PointArgs {
    pub fn coord(&self) -> geo::Coord<f64> {
        geo::Coord {
            x: self.x,
            y: self.y,
        }
    }
}

/// Cell functions
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Lines (kmLint) the point can be located on, comma separated
    #[clap(name = "km-linten", allow_negative_numbers = true)]
    KmLinten {
        #[clap(flatten)]
        point: PointArgs,
    },

    /// Kilometer value in meters of the point on one line
    #[clap(allow_negative_numbers = true)]
    Km {
        #[clap(flatten)]
        point: PointArgs,
        /// Line identifier (kmLint)
        lint: String,
    },

    /// Kilometer values on every line, one `lint<TAB>meters` row per line
    #[clap(name = "km-all", allow_negative_numbers = true)]
    KmAll {
        #[clap(flatten)]
        point: PointArgs,
    },

    /// Names of the drawing sheets covering the point
    #[clap(name = "obe-naam", allow_negative_numbers = true)]
    ObeNaam {
        #[clap(flatten)]
        point: PointArgs,
    },

    /// Numbers of the drawing sheets covering the point
    #[clap(name = "obe-nummer", allow_negative_numbers = true)]
    ObeNummer {
        #[clap(flatten)]
        point: PointArgs,
    },

    /// Versions of the drawing sheets covering the point
    #[clap(name = "obe-versie", allow_negative_numbers = true)]
    ObeVersie {
        #[clap(flatten)]
        point: PointArgs,
    },

    /// X coordinate of the first point of a WKT geometry
    #[clap(name = "wkt-x")]
    WktX {
        /// Geometry text, e.g. "POINT (155000 463000)"
        wkt: String,
    },

    /// Y coordinate of the first point of a WKT geometry
    #[clap(name = "wkt-y")]
    WktY {
        /// Geometry text, e.g. "POINT (155000 463000)"
        wkt: String,
    },
}

impl Settings {
    /// Parse from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            reference_points_url: self.reference_url.clone(),
            documents_url: self.document_url.clone(),
            spatial_reference: self.srs,
            document_radius_meters: self.document_radius,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn query_config(&self) -> QueryConfig {
        QueryConfig {
            search_radius_meters: self.search_radius,
        }
    }
}
