//! Request extractors that reject with the error envelope.
//!
//! Axum's stock extractors answer malformed paths, query strings, and
//! JSON bodies with plain-text 400s. These wrappers funnel those
//! rejections through [`error_response`] so transport-level failures
//! leave the service in the same shape as application errors.

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;
use axum::response::Response;
use serde::de::DeserializeOwned;

use crate::error::error_response;
use fintrack_shared::AppError;

fn reject(detail: &str) -> Response {
    error_response(&AppError::Validation(detail.to_string()))
}

/// `axum::Json` with the envelope on malformed bodies.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(&rejection.body_text())),
        }
    }
}

/// `axum::extract::Query` with the envelope on malformed parameters.
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(&rejection.body_text())),
        }
    }
}

/// `axum::extract::Path` with the envelope on malformed segments.
pub struct ApiPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<T>::from_request_parts(parts, state).await {
            Ok(Path(value)) => Ok(Self(value)),
            Err(rejection) => Err(reject(&rejection.body_text())),
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use sea_orm::DatabaseConnection;
    use std::sync::Arc;
    use tower::ServiceExt;
    use uuid::Uuid;

    use crate::{AppState, create_router};

    // The handlers under test reject before any query runs, so a
    // disconnected pool is enough.
    fn app() -> axum::Router {
        create_router(AppState {
            db: Arc::new(DatabaseConnection::default()),
        })
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn assert_envelope(body: &serde_json::Value, status_code: u16) {
        assert!(body["message"].is_string());
        assert_eq!(body["statusCode"], status_code);
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn test_malformed_query_gets_envelope() {
        let uri = format!("/api/v1/summary/users/{}?month=march&year=2025", Uuid::new_v4());
        let response = app()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_envelope(&body_json(response).await, 400);
    }

    #[tokio::test]
    async fn test_malformed_json_body_gets_envelope() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/v1/users")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_envelope(&body_json(response).await, 400);
    }

    #[tokio::test]
    async fn test_malformed_path_id_gets_envelope() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/users/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_envelope(&body_json(response).await, 400);
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
