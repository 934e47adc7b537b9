use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs method, uri, status and latency of every request.
///
/// Install with `axum::middleware::from_fn(log_requests)`.
pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    tracing::debug!(%method, %uri, "--> request");

    let response = next.run(request).await;
    let status = response.status();
    let elapsed = start.elapsed();

    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), ?elapsed, "<-- response");
    } else if status.is_client_error() {
        tracing::warn!(%method, %uri, status = status.as_u16(), ?elapsed, "<-- response");
    } else {
        tracing::info!(%method, %uri, status = status.as_u16(), ?elapsed, "<-- response");
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::StatusCode, middleware, routing::get};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_passes_response_through() {
        let app = Router::new()
            .route("/teapot", get(|| async { (StatusCode::IM_A_TEAPOT, "short and stout") }))
            .layer(middleware::from_fn(log_requests));

        let response = app
            .oneshot(Request::builder().uri("/teapot").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::IM_A_TEAPOT);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"short and stout");
    }
}
