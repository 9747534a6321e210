use axum::{
    body::Body,
    extract::State,
    http::{Method, StatusCode, Uri, header},
    response::IntoResponse,
};
use tracing::debug;

use super::{error::ApiError, state::AppState};
use crate::request::Request;
use crate::response::Response;

/// Health check endpoint (GET /_health)
pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// Page endpoint, mounted as the router fallback
///
/// Every GET/HEAD path runs through the site pipeline on the blocking pool;
/// templates are read and rendered synchronously.
pub async fn serve_page(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<axum::response::Response, ApiError> {
    if method != Method::GET && method != Method::HEAD {
        return Err(ApiError::MethodNotAllowed(method.to_string()));
    }

    let head = method == Method::HEAD;
    let req = Request::builder()
        .method(method)
        .path(uri.path())
        .maybe_query(uri.query())
        .build();

    let site = state.site.clone();
    let (ctx, resp) = tokio::task::spawn_blocking(move || site.serve(&req)).await?;

    debug!(
        request_id = %ctx.request_id(),
        status = resp.status().as_u16(),
        bytes = resp.size(),
        failure = ctx.failure(),
        "page served"
    );

    let mut response = into_http(resp);
    if head {
        *response.body_mut() = Body::empty();
    }
    Ok(response)
}

/// Convert a pipeline response into an HTTP response.
///
/// An error response whose engine produced no body carries its message as
/// plain text instead.
pub fn into_http(resp: Response) -> axum::response::Response {
    let status = resp.status();
    let error = resp.error().map(str::to_owned);
    let content_type = resp.content_type().to_string();
    let body = resp.into_body();

    match error {
        Some(message) if body.is_empty() => (
            status,
            [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.to_string())],
            message,
        )
            .into_response(),
        _ => (status, [(header::CONTENT_TYPE, content_type)], body).into_response(),
    }
}
