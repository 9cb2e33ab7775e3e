//! Servidor HTTP que expõe o app para o hospedeiro.
//!
//! | Método | Rota     | Ação                                     |
//! |--------|----------|------------------------------------------|
//! | GET    | `/`      | metadados do app                         |
//! | POST   | `/`      | `annotate` do MMIF no corpo              |
//! | PUT    | `/`      | idem (hospedeiros mais antigos usam PUT) |
//! | POST   | `/sniff` | `{"sniff": bool}`                        |
//!
//! `annotate` aceita os parâmetros de query `pretty` e `raise_error`.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tok_core::{AnnotateParams, AppMetadata, ClamsApp, Mmif, TokenizerApp};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Endereço de escuta do servidor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 5000,
        }
    }
}

/// Estado compartilhado da aplicação
struct AppState {
    app: TokenizerApp,
}

#[derive(Debug, Serialize, Deserialize)]
struct SniffResponse {
    sniff: bool,
}

/// Erro do app convertido em resposta JSON `{"error": ...}`.
struct ApiError(tok_core::Error);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        use tok_core::Error;

        let status = match &self.0 {
            Error::Mmif(_)
            | Error::Document(_)
            | Error::UnsupportedLocation(_)
            | Error::ViewNotFound(_) => StatusCode::BAD_REQUEST,
            Error::Io { .. } | Error::Requested => StatusCode::INTERNAL_SERVER_ERROR,
        };
        warn!(status = status.as_u16(), "annotate falhou: {}", self.0);
        (status, Json(serde_json::json!({ "error": self.0.to_string() }))).into_response()
    }
}

impl From<tok_core::Error> for ApiError {
    fn from(err: tok_core::Error) -> Self {
        Self(err)
    }
}

/// Monta as rotas em volta de um app.
pub fn router(app: TokenizerApp) -> Router {
    let state = Arc::new(AppState { app });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(metadata_handler).post(annotate_handler).put(annotate_handler))
        .route("/sniff", post(sniff_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Sobe o servidor e bloqueia até ele parar.
pub async fn start_server(config: ServerConfig) -> anyhow::Result<()> {
    let app = router(TokenizerApp::new());

    let listener = tokio::net::TcpListener::bind((config.host.as_str(), config.port)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    info!("Servidor do tokenizador iniciado em http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn metadata_handler(State(state): State<Arc<AppState>>) -> Json<AppMetadata> {
    Json(state.app.metadata().clone())
}

/// Anota o MMIF recebido no corpo da requisição.
async fn annotate_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<AnnotateParams>,
    body: String,
) -> Result<Response, ApiError> {
    info!(bytes = body.len(), pretty = params.pretty, "annotate recebido");

    // annotate é síncrono (pode ler arquivos e trava o gerador de ids)
    let result = tokio::task::spawn_blocking(move || state.app.annotate_str(&body, &params)).await;

    match result {
        Ok(out) => {
            let out = out?;
            Ok(([(axum::http::header::CONTENT_TYPE, "application/json")], out).into_response())
        }
        Err(join_err) => Ok((
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": join_err.to_string() })),
        )
            .into_response()),
    }
}

async fn sniff_handler(
    State(state): State<Arc<AppState>>,
    body: String,
) -> Result<Json<SniffResponse>, ApiError> {
    let mmif = Mmif::from_json(&body)?;
    Ok(Json(SniffResponse {
        sniff: state.app.sniff(&mmif),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Method, Request};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const MMIF: &str = r#"{
        "metadata": { "mmif": "http://mmif.clams.ai/0.2.1" },
        "documents": [{
            "@type": "http://mmif.clams.ai/0.2.1/vocabulary/TextDocument",
            "properties": { "id": "m1", "text": { "@value": "Hello, world!" } }
        }],
        "views": []
    }"#;

    async fn send(method: Method, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = router(TokenizerApp::new()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_default_config() {
        let config = ServerConfig::default();
        assert_eq!((config.host.as_str(), config.port), ("0.0.0.0", 5000));
    }

    #[tokio::test]
    async fn test_get_metadata() {
        let (status, body) = send(Method::GET, "/", "").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Tokenizer Wrapper");
        assert_eq!(body["mmif-spec-version"], "0.2.1");
    }

    #[tokio::test]
    async fn test_post_and_put_annotate() {
        for method in [Method::POST, Method::PUT] {
            let (status, body) = send(method, "/", MMIF).await;
            assert_eq!(status, StatusCode::OK);
            let anns = body["views"][0]["annotations"].as_array().unwrap();
            let texts: Vec<&str> = anns
                .iter()
                .map(|a| a["properties"]["text"].as_str().unwrap())
                .collect();
            assert_eq!(texts, vec!["Hello", "world"]);
        }
    }

    #[tokio::test]
    async fn test_raise_error_is_500() {
        let (status, body) = send(Method::POST, "/?raise_error=true", MMIF).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_mmif_is_400() {
        let (status, body) = send(Method::POST, "/", "not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().contains("mmif"));
    }

    #[tokio::test]
    async fn test_sniff() {
        let (status, body) = send(Method::POST, "/sniff", MMIF).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "sniff": true }));
    }
}
