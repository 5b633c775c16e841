//! # HTTP Server for Text Conversion
//!
//! Exposes the conversion engine as a JSON API so an editor UI (or a script)
//! can recompute outputs on every edit.
//!
//! ## Usage
//!
//! ```bash
//! asciify serve --listen 127.0.0.1:8080
//! ```
//!
//! ## Routes
//!
//! | Method | Path | Body | Response |
//! |--------|------|------|----------|
//! | GET | `/api/mappings` | | `{available, active}` |
//! | GET | `/api/mappings/active` | | `{name, entries, default_replacement}` |
//! | PUT | `/api/mappings/active` | `{name}` | `{name, entries, default_replacement}` |
//! | POST | `/api/convert` | `{text}` | `{converted}` |
//! | POST | `/api/transform` | `{text, template}` | `{converted, transformed}` |
//! | POST | `/api/expand` | `{template, original, converted}` | `{result}` |
//! | POST | `/api/filter` | `{text}` | `{text}` |

mod handlers;
mod state;

pub use state::{ActiveMapping, AppState, ServerConfig};

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::{AsciifyError, Result};

/// Build the API router over `state`.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Mapping API
        .route("/api/mappings", get(handlers::mappings::list))
        .route(
            "/api/mappings/active",
            get(handlers::mappings::active).put(handlers::mappings::set_active),
        )
        // Text API
        .route("/api/convert", post(handlers::text::convert))
        .route("/api/transform", post(handlers::text::transform))
        .route("/api/expand", post(handlers::text::expand))
        .route("/api/filter", post(handlers::text::filter))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server.
///
/// ## Example
///
/// ```no_run
/// use asciify::server::{serve, ServerConfig};
///
/// # async fn example() -> Result<(), asciify::error::AsciifyError> {
/// let config = ServerConfig {
///     listen_addr: "127.0.0.1:8080".to_string(),
///     mappings_dir: "mappings".into(),
///     initial_mapping: None,
///     no_mapping: false,
/// };
///
/// serve(config).await?;
/// # Ok(())
/// # }
/// ```
pub async fn serve(config: ServerConfig) -> Result<()> {
    let app_state = Arc::new(AppState::new(config.clone())?);
    let active = app_state.active().await;

    info!(
        listen = %config.listen_addr,
        mappings_dir = %app_state.mappings.path().display(),
        mapping = active.name.as_deref().unwrap_or("<none>"),
        "asciify HTTP server starting"
    );

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .map_err(|e| {
            AsciifyError::Server(format!("Failed to bind to {}: {}", config.listen_addr, e))
        })?;

    axum::serve(listener, router(app_state))
        .await
        .map_err(|e| AsciifyError::Server(format!("Server error: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::dir::tests::scratch_dir;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::fs;
    use tower::ServiceExt;

    fn test_state(label: &str) -> Arc<AppState> {
        let dir = scratch_dir(label);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("french.map8u"), "default=_\né=e\n").unwrap();
        fs::write(dir.join("german.map8u"), "ü=ue\n").unwrap();
        fs::write(dir.join("latin1.map8u"), [b'\xE9', b'=', b'e']).unwrap();

        let config = ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            mappings_dir: dir,
            initial_mapping: None,
            no_mapping: false,
        };
        Arc::new(AppState::new(config).unwrap())
    }

    async fn call(
        state: &Arc<AppState>,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let body = match body {
            Some(value) => Body::from(value.to_string()),
            None => Body::empty(),
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = router(state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    #[tokio::test]
    async fn test_list_mappings() {
        let state = test_state("srv-list");
        let (status, body) = call(&state, Method::GET, "/api/mappings", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "available": ["french.map8u", "german.map8u", "latin1.map8u"],
                "active": "french.map8u"
            })
        );
    }

    #[tokio::test]
    async fn test_convert_and_transform() {
        let state = test_state("srv-convert");

        let (status, body) = call(
            &state,
            Method::POST,
            "/api/convert",
            Some(json!({"text": "café\nok"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"converted": "cafe\nok\n"}));

        let request = json!({"text": "café", "template": "mv \"$1\" \"$2\""});
        let (status, body) = call(&state, Method::POST, "/api/transform", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"converted": "cafe\n", "transformed": "mv \"café\" \"cafe\"\n"})
        );
    }

    #[tokio::test]
    async fn test_transform_without_template_converts() {
        let state = test_state("srv-blank");
        let (_, body) = call(
            &state,
            Method::POST,
            "/api/transform",
            Some(json!({"text": "café"})),
        )
        .await;
        assert_eq!(body["transformed"], json!("cafe\n"));
    }

    #[tokio::test]
    async fn test_expand() {
        let state = test_state("srv-expand");
        let request = json!({"template": "\\\\$1 \\$2", "original": "A", "converted": "B"});
        let (status, body) = call(&state, Method::POST, "/api/expand", Some(request)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"result": "\\A $2"}));
    }

    #[tokio::test]
    async fn test_filter() {
        let state = test_state("srv-filter");
        let request = json!({"text": "a\ncafé\nb\nthé"});
        let (_, body) = call(&state, Method::POST, "/api/filter", Some(request)).await;
        assert_eq!(body, json!({"text": "café\nthé"}));
    }

    #[tokio::test]
    async fn test_select_mapping() {
        let state = test_state("srv-select");

        let (status, body) = call(
            &state,
            Method::PUT,
            "/api/mappings/active",
            Some(json!({"name": "german.map8u"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"name": "german.map8u", "entries": 1, "default_replacement": "?"})
        );

        let (_, body) = call(
            &state,
            Method::POST,
            "/api/convert",
            Some(json!({"text": "über café"})),
        )
        .await;
        assert_eq!(body, json!({"converted": "ueber caf?\n"}));

        let (status, body) = call(
            &state,
            Method::PUT,
            "/api/mappings/active",
            Some(json!({"name": null})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], Value::Null);
        assert_eq!(body["entries"], json!(0));
    }

    #[tokio::test]
    async fn test_select_unknown_mapping() {
        let state = test_state("srv-unknown");
        let (status, _) = call(
            &state,
            Method::PUT,
            "/api/mappings/active",
            Some(json!({"name": "nope.map8u"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_bad_encoding_keeps_active_mapping() {
        let state = test_state("srv-encoding");
        let (status, body) = call(
            &state,
            Method::PUT,
            "/api/mappings/active",
            Some(json!({"name": "latin1.map8u"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body, json!("Mapping file is not UTF-8 encoded: latin1.map8u"));

        let (_, body) = call(&state, Method::GET, "/api/mappings/active", None).await;
        assert_eq!(body["name"], json!("french.map8u"));
        assert_eq!(body["default_replacement"], json!("_"));
    }
}
