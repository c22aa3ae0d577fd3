//! HTTP request handlers for the URL shortener API
//!
//! This module exposes the resolver over HTTP:
//! - Creating, reading, listing, updating and deleting records by id
//! - Minting the public short code of an id
//! - Redirecting a short code to its original destination

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::error::{Error, Result};
use crate::model::{HashResponse, UrlId, UrlRequest, UrlResponse};
use crate::route::AppState;

/// Creates a new short URL
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
///
/// # Response
///
/// - **201 Created** - record with its assigned id and short code
pub async fn create_url(
    State(state): State<AppState>,
    Json(payload): Json<UrlRequest>,
) -> Result<impl IntoResponse> {
    let record = state.resolver.create(payload.url).await?;
    let code = state.resolver.mint_code(record.id)?;

    Ok((StatusCode::CREATED, Json(UrlResponse::new(record, code))))
}

/// Fetches a record by its numeric id
///
/// - **200 OK** - the record
/// - **404 Not Found** - no record with this id
pub async fn get_url(
    Path(id): Path<UrlId>,
    State(state): State<AppState>,
) -> Result<Response> {
    let Some(record) = state.resolver.read(id).await? else {
        return Ok(not_found());
    };
    let code = state.resolver.mint_code(record.id)?;

    Ok(Json(UrlResponse::new(record, code)).into_response())
}

/// Returns the public short code for an id
///
/// The id is not checked against storage.
pub async fn create_hash(
    Path(id): Path<UrlId>,
    State(state): State<AppState>,
) -> Result<Json<HashResponse>> {
    let hash = state.resolver.mint_code(id)?;
    Ok(Json(HashResponse { hash }))
}

/// Lists every stored record, ordered by id
pub async fn list_urls(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let records = state.resolver.list().await?;

    let mut data = Vec::with_capacity(records.len());
    for record in records {
        let code = state.resolver.mint_code(record.id)?;
        data.push(UrlResponse::new(record, code));
    }

    Ok(Json(data))
}

/// Replaces the target of a record
///
/// Always answers **200 OK**, also when the id does not exist.
pub async fn update_url(
    Path(id): Path<UrlId>,
    State(state): State<AppState>,
    Json(payload): Json<UrlRequest>,
) -> Result<StatusCode> {
    state.resolver.update(id, payload.url).await?;
    Ok(StatusCode::OK)
}

/// Deletes a record
///
/// Always answers **200 OK**, also when the id does not exist.
pub async fn delete_url(
    Path(id): Path<UrlId>,
    State(state): State<AppState>,
) -> Result<StatusCode> {
    state.resolver.delete(id).await?;
    Ok(StatusCode::OK)
}

/// Redirects a short code to its original destination
///
/// # Response
///
/// - **308 Permanent Redirect** - to the stored target
/// - **404 Not Found** - the code is malformed, reserved or unassigned
///   (all three answer with the same body)
/// - **500 Internal Server Error** - the stored target cannot be used as a
///   `Location` header
pub async fn redirect_url(
    Path(hash): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    match state.resolver.resolve_code(&hash).await {
        Ok(Some(target)) => {
            let location =
                HeaderValue::try_from(target).map_err(|_| Error::InvalidRedirectTarget)?;
            Ok((StatusCode::PERMANENT_REDIRECT, [(header::LOCATION, location)]).into_response())
        }
        Ok(None) => Ok(not_found()),
        Err(Error::MalformedCode(err)) => {
            tracing::debug!(code = %hash, error = %err, "rejected malformed short code");
            Ok(not_found())
        }
        Err(err) => Err(err),
    }
}

fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "URL not found",
            "code": "not_found"
        })),
    )
        .into_response()
}
