use axum::http::{HeaderValue, Method, header};
use std::time::Duration;
use tower_http::cors::{AllowOrigin, CorsLayer};

/// CORS layer for the JSON API.
///
/// With no configured origins the request origin is mirrored back, which
/// suits local development. Otherwise only the listed origins are allowed.
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::mirror_request()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, body::Body, http::Request, routing::get};
    use tower::ServiceExt;

    async fn allowed_origin(layer: CorsLayer, origin: &str) -> Option<HeaderValue> {
        let response = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(layer)
            .oneshot(
                Request::get("/")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .cloned()
    }

    #[tokio::test]
    async fn test_unconfigured_mirrors_origin() {
        let origin = allowed_origin(cors_layer(&[]), "http://localhost:5173").await;
        assert_eq!(origin.unwrap(), "http://localhost:5173");
    }

    #[tokio::test]
    async fn test_configured_list_is_enforced() {
        let origins = vec!["https://shop.example.com".to_string()];
        assert!(
            allowed_origin(cors_layer(&origins), "https://evil.example.com")
                .await
                .is_none()
        );
        assert_eq!(
            allowed_origin(cors_layer(&origins), "https://shop.example.com")
                .await
                .unwrap(),
            "https://shop.example.com"
        );
    }
}
