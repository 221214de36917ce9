//! Low-cardinality labels describing a request, shared by the logging and
//! metrics middlewares.

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
};

/// Label used for requests that matched no route.
pub const UNMATCHED_ROUTE: &str = "unmatched";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteLabel {
    pub method: String,
    /// The route template, e.g. `/api/users/{id}`, never the raw path.
    pub path: String,
}

impl RouteLabel {
    pub fn of(req: &Request) -> Self {
        let path = req
            .extensions()
            .get::<MatchedPath>()
            .map(|p| p.as_str().to_owned())
            .unwrap_or_else(|| UNMATCHED_ROUTE.to_owned());

        Self {
            method: req.method().as_str().to_owned(),
            path,
        }
    }
}

pub fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    use axum::{Router, body::Body, middleware, middleware::Next, response::Response, routing::get};
    use tower::ServiceExt;

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(StatusCode::OK), "2xx");
        assert_eq!(status_class(StatusCode::NO_CONTENT), "2xx");
        assert_eq!(status_class(StatusCode::NOT_MODIFIED), "3xx");
        assert_eq!(status_class(StatusCode::UNAUTHORIZED), "4xx");
        assert_eq!(status_class(StatusCode::SERVICE_UNAVAILABLE), "5xx");
    }

    #[test]
    fn test_request_without_route_is_unmatched() {
        let req = axum::http::Request::builder()
            .method("DELETE")
            .uri("/api/users/123")
            .body(Body::empty())
            .unwrap();

        let label = RouteLabel::of(&req);

        assert_eq!(label.method, "DELETE");
        assert_eq!(label.path, UNMATCHED_ROUTE);
    }

    #[tokio::test]
    async fn test_matched_request_uses_route_template() {
        let seen: Arc<Mutex<Vec<RouteLabel>>> = Arc::default();
        let recorder = seen.clone();

        let app = Router::new()
            .route("/users/{id}", get(|| async { "ok" }))
            .fallback(|| async { StatusCode::NOT_FOUND })
            .layer(middleware::from_fn(move |req: Request, next: Next| {
                let recorder = recorder.clone();
                async move {
                    recorder.lock().unwrap().push(RouteLabel::of(&req));
                    let response: Response = next.run(req).await;
                    response
                }
            }));

        for uri in ["/users/1", "/users/2", "/nowhere"] {
            app.clone()
                .oneshot(axum::http::Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
        }

        let paths: Vec<String> = seen.lock().unwrap().iter().map(|l| l.path.clone()).collect();
        assert_eq!(paths, ["/users/{id}", "/users/{id}", UNMATCHED_ROUTE]);
    }
}
