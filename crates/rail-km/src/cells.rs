//! Cell functions: each command evaluates to a single printable value

use crate::geometry::{self, WktError};
use crate::settings::{Command, Settings};
use rail_km_client::{ArcGisClient, ClientError, DocumentAttributes};
use rail_km_lib::{KilometerQuery, KmError, LineKilometer};

/// Value printed when a point cannot be located on the requested line
pub const NOT_FOUND: &str = "#N/A";

#[derive(Debug, thiserror::Error)]
pub enum CellError {
    #[error(transparent)]
    Km(#[from] KmError),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error(transparent)]
    Wkt(#[from] WktError),
}

/// Render an error the way a failing cell shows it
pub fn error_cell(error: &CellError) -> String {
    // Show the innermost message, not the wrapping chain
    let message = match error {
        CellError::Km(KmError::Source(source)) => source.to_string(),
        other => other.to_string(),
    };
    format!("Error: {message}")
}

/// Drawing sheet attribute selected by a cell function
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentField {
    Name,
    Number,
    Version,
}

/// Comma separated values of one attribute over all sheets
pub fn join_documents(documents: &[DocumentAttributes], field: DocumentField) -> String {
    documents
        .iter()
        .map(|doc| {
            let value = match field {
                DocumentField::Name => &doc.name,
                DocumentField::Number => &doc.number,
                DocumentField::Version => &doc.version,
            };
            value.as_deref().unwrap_or_default()
        })
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn join_line_ids(line_ids: &[String]) -> String {
    line_ids.join(", ")
}

pub fn format_kilometer(value: Option<f64>) -> String {
    match value {
        Some(meters) => meters.to_string(),
        None => NOT_FOUND.to_string(),
    }
}

pub fn format_all_lines(results: &[LineKilometer]) -> String {
    results
        .iter()
        .map(|km| format!("{}\t{}", km.line_id, km.kilometer_value_meters))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Evaluate the command selected in `settings`
///
/// Only the commands that need the feature services build an HTTP client.
pub async fn evaluate(settings: &Settings) -> Result<String, CellError> {
    match &settings.command {
        Command::KmLinten { point } => {
            let query = kilometer_query(settings)?;
            Ok(join_line_ids(&query.line_ids(point.coord()).await?))
        }
        Command::Km { point, lint } => {
            let query = kilometer_query(settings)?;
            let value = query.kilometer_on_line(point.coord(), lint).await?;
            if value.is_none() {
                tracing::info!(
                    "Point is not on line {lint} within {} m",
                    query.config().search_radius_meters
                );
            }
            Ok(format_kilometer(value))
        }
        Command::KmAll { point } => {
            let query = kilometer_query(settings)?;
            Ok(format_all_lines(&query.all_lines(point.coord()).await?))
        }
        Command::ObeNaam { point } => documents(settings, point.coord(), DocumentField::Name).await,
        Command::ObeNummer { point } => {
            documents(settings, point.coord(), DocumentField::Number).await
        }
        Command::ObeVersie { point } => {
            documents(settings, point.coord(), DocumentField::Version).await
        }
        Command::WktX { wkt } => Ok(geometry::wkt_x(wkt)?.to_string()),
        Command::WktY { wkt } => Ok(geometry::wkt_y(wkt)?.to_string()),
    }
}

fn kilometer_query(settings: &Settings) -> Result<KilometerQuery<ArcGisClient>, CellError> {
    let client = ArcGisClient::new(settings.service_config())?;
    Ok(KilometerQuery::new(client, settings.query_config()))
}

async fn documents(
    settings: &Settings,
    point: geo::Coord<f64>,
    field: DocumentField,
) -> Result<String, CellError> {
    let client = ArcGisClient::new(settings.service_config())?;
    let documents = client.fetch_documents(point).await?;
    tracing::debug!("Found {} drawing sheets", documents.len());
    Ok(join_documents(&documents, field))
}
