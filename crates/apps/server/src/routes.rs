//! HTTP routes: status, metrics and cube generation.

use crate::server::AppState;
use axum::{
    extract::{ConnectInfo, Path, Query, Request, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use cube::{CubeError, Move, OutputFormat, NOTATION};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Response header carrying the per-process request number
pub const REQUEST_ID_HEADER: &str = "x-request-id";

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Errors returned to HTTP clients
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("the following formats are supported: gltf, glb")]
    UnsupportedFormat,
    #[error("specify either extension or format")]
    AmbiguousFormat,
    #[error("alg must only use \"{}\"", NOTATION.join(" "))]
    InvalidAlgorithm,
    #[error("is_unlit must be true or false")]
    InvalidUnlit,
    #[error("not found")]
    NotFound,
    #[error("cube generation timed out")]
    Timeout,
    #[error("cube generation failed: {0}")]
    Generation(#[from] CubeError),
    #[error("generation task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedFormat
            | ApiError::AmbiguousFormat
            | ApiError::InvalidAlgorithm
            | ApiError::InvalidUnlit => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Timeout => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Generation(_) | ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn is_rejection(&self) -> bool {
        self.status_code() == StatusCode::BAD_REQUEST
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub status_code: u16,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = if status.is_server_error() {
            tracing::error!("{}", self);
            match self {
                ApiError::Timeout => self.to_string(),
                _ => "internal server error".to_string(),
            }
        } else {
            self.to_string()
        };
        let body = ErrorBody {
            status_code: status.as_u16(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

/// Raw query parameters of a cube request
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CubeQuery {
    pub fmt: Option<String>,
    pub alg: Option<String>,
    pub is_unlit: Option<String>,
}

impl CubeQuery {
    /// Collect decoded query pairs. A repeated key keeps its first value;
    /// unknown keys are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut query = Self::default();
        for (key, value) in pairs {
            let field = match key.as_str() {
                "fmt" => &mut query.fmt,
                "alg" => &mut query.alg,
                "is_unlit" => &mut query.is_unlit,
                _ => continue,
            };
            if field.is_none() {
                *field = Some(value);
            }
        }
        query
    }
}

/// A validated cube request
#[derive(Debug, Clone, PartialEq)]
pub struct CubeRequest {
    pub format: OutputFormat,
    pub algorithm: Vec<String>,
    pub unlit: bool,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn parse_format(value: &str) -> Result<OutputFormat, ApiError> {
    value.parse().map_err(|_| ApiError::UnsupportedFormat)
}

impl CubeRequest {
    /// Validate the path extension (if any) and query parameters.
    ///
    /// Checks run in order: format, algorithm, unlit flag. Empty parameters
    /// count as absent.
    pub fn from_parts(extension: Option<&str>, query: &CubeQuery) -> Result<Self, ApiError> {
        let mut format = extension.map(parse_format).transpose()?;

        if let Some(fmt) = non_empty(&query.fmt) {
            if format.is_some() {
                return Err(ApiError::AmbiguousFormat);
            }
            format = Some(parse_format(fmt)?);
        }

        let algorithm = match non_empty(&query.alg) {
            Some(alg) => alg
                .split(' ')
                .map(|token| {
                    token
                        .parse::<Move>()
                        .map(|_| token.to_string())
                        .map_err(|_| ApiError::InvalidAlgorithm)
                })
                .collect::<Result<Vec<_>, _>>()?,
            None => Vec::new(),
        };

        let unlit = match non_empty(&query.is_unlit) {
            Some("true") => true,
            Some("false") | None => false,
            Some(_) => return Err(ApiError::InvalidUnlit),
        };

        Ok(Self {
            format: format.unwrap_or_default(),
            algorithm,
            unlit,
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(status))
        .route("/metrics", get(metrics))
        .route("/cube", get(cube))
        .route("/:file", get(cube_with_extension))
        .fallback(not_found)
        .layer(middleware::from_fn(access_log))
        .with_state(state)
}

fn header_str<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

/// Client address: `X-Real-IP`, then the first `X-Forwarded-For` hop, then
/// the peer address of the connection.
fn client_addr(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(real_ip) = header_str(headers, "x-real-ip") {
        return real_ip.to_string();
    }
    if let Some(hop) = header_str(headers, "x-forwarded-for").and_then(|v| v.split(',').next()) {
        return hop.trim().to_string();
    }
    peer.map_or_else(|| "-".to_string(), |addr| addr.ip().to_string())
}

/// One access line per request, tagged with a request id
async fn access_log(request: Request, next: Next) -> Response {
    let id = NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed);
    let started = Instant::now();
    let method = request.method().clone();
    let uri = request.uri().clone();
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let remote = client_addr(request.headers(), peer);

    let mut response = next.run(request).await;
    response
        .headers_mut()
        .insert(REQUEST_ID_HEADER, HeaderValue::from(id));

    tracing::info!(
        id,
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        %remote,
        "request"
    );
    response
}

async fn status() -> StatusCode {
    StatusCode::OK
}

async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.to_prometheus(),
    )
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

async fn cube(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    respond(state, None, CubeQuery::from_pairs(pairs)).await
}

/// `/cube.<ext>`; any other file name is not a route
async fn cube_with_extension(
    State(state): State<AppState>,
    Path(file): Path<String>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    match file.rsplit_once('.') {
        Some(("cube", extension)) => {
            respond(state, Some(extension), CubeQuery::from_pairs(pairs)).await
        }
        _ => ApiError::NotFound.into_response(),
    }
}

async fn respond(state: AppState, extension: Option<&str>, query: CubeQuery) -> Response {
    state.metrics.record_request();
    match generate(&state, extension, &query).await {
        Ok((format, body)) => {
            state.metrics.record_generated(body.len());
            ([(header::CONTENT_TYPE, format.content_type())], body).into_response()
        }
        Err(err) => {
            if err.is_rejection() {
                state.metrics.record_rejected();
                tracing::warn!(?query, "rejected cube request: {}", err);
            } else {
                state.metrics.record_failure();
            }
            err.into_response()
        }
    }
}

async fn generate(
    state: &AppState,
    extension: Option<&str>,
    query: &CubeQuery,
) -> Result<(OutputFormat, Vec<u8>), ApiError> {
    let request = CubeRequest::from_parts(extension, query)?;
    let started = Instant::now();

    let service = Arc::clone(&state.cube);
    let CubeRequest {
        format,
        algorithm,
        unlit,
    } = request;
    let moves = algorithm.len();
    let task =
        tokio::task::spawn_blocking(move || service.generate(&algorithm, format, unlit));

    let body = tokio::time::timeout(state.timeout, task)
        .await
        .map_err(|_| ApiError::Timeout)???;

    tracing::info!(
        %format,
        moves,
        unlit,
        bytes = body.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "generated cube"
    );
    Ok((format, body))
}
