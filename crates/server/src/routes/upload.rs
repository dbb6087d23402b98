//! Bulk upload endpoints.
//!
//! Both uploads answer with the batch report: accepted records plus one
//! error per rejected row. Only uploads that cannot be read at all are
//! answered with an error status.

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;
use axum::body::Bytes;
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::rejection::BytesRejection;
use axum::extract::{Multipart, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use contract_intake::{import, template_csv, BatchReport, SourceFormat, TEMPLATE_FILE_NAME};
use std::sync::Arc;
use tracing::info;

/// Multipart field carrying the CSV file.
pub const FILE_FIELD: &str = "file";

const FILE_REQUIRED: &str = "CSV file is required under the \"file\" field.";
const CSV_REQUIRED: &str = "Please upload a CSV file.";

/// Upload a CSV file (multipart, field `file`)
///
/// # Errors
///
/// - 400 when the `file` field is missing or the file name does not end in `.csv`
/// - 413 when the upload exceeds `max_upload_mb`
/// - 422 when the CSV cannot be parsed
pub async fn bulk_upload_csv(
    State(state): State<Arc<ServerState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ServerResult<Json<BatchReport>> {
    // Not a multipart request at all: there is no file to read.
    let Ok(mut multipart) = multipart else {
        return Err(ServerError::BadRequest(FILE_REQUIRED.to_string()));
    };

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| multipart_error(err, &state))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        // A plain form value named `file` is not a file.
        let Some(file_name) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|err| multipart_error(err, &state))?;
        upload = Some((file_name, data));
        break;
    }

    let Some((file_name, data)) = upload else {
        return Err(ServerError::BadRequest(FILE_REQUIRED.to_string()));
    };
    if !file_name.to_ascii_lowercase().ends_with(".csv") {
        return Err(ServerError::BadRequest(CSV_REQUIRED.to_string()));
    }

    let bytes = data.len();
    let report = run_import(state, data, SourceFormat::Csv).await?;
    info!(
        file_name = %file_name,
        bytes,
        inserted = report.inserted,
        failed = report.failed,
        "csv_upload_processed"
    );
    Ok(Json(report))
}

/// Upload records as JSON (`{ "records": [...] }`)
///
/// # Errors
///
/// - 400 when `records` is missing, not an array, or empty
/// - 413 when the body exceeds `max_upload_mb`
/// - 422 when the body is not valid JSON
pub async fn bulk_upload_json(
    State(state): State<Arc<ServerState>>,
    body: Result<Bytes, BytesRejection>,
) -> ServerResult<Json<BatchReport>> {
    let body = body.map_err(|rejection| {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ServerError::PayloadTooLarge(state.config.max_upload_mb)
        } else {
            ServerError::BadRequest(rejection.body_text())
        }
    })?;

    let report = run_import(state, body, SourceFormat::Json).await?;
    info!(
        inserted = report.inserted,
        failed = report.failed,
        "json_upload_processed"
    );
    Ok(Json(report))
}

/// Download the CSV upload template
pub async fn template(State(state): State<Arc<ServerState>>) -> ServerResult<impl IntoResponse> {
    let body = template_csv(state.config.ingest.delimiter_byte())
        .map_err(|err| ServerError::Internal(format!("template rendering failed: {err}")))?;
    Ok((
        [
            (CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{TEMPLATE_FILE_NAME}\""),
            ),
        ],
        body,
    ))
}

/// Parse and process on the blocking pool; large uploads are CPU-bound.
async fn run_import(
    state: Arc<ServerState>,
    bytes: Bytes,
    format: SourceFormat,
) -> ServerResult<BatchReport> {
    let report = tokio::task::spawn_blocking(move || import(&bytes, format, &state.ingest_env()))
        .await
        .map_err(|err| ServerError::Internal(format!("upload worker failed: {err}")))??;
    Ok(report)
}

fn multipart_error(err: MultipartError, state: &ServerState) -> ServerError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ServerError::PayloadTooLarge(state.config.max_upload_mb)
    } else {
        ServerError::BadRequest(err.body_text())
    }
}
