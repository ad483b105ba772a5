use axum::{
    Router,
    routing::{get, post},
};
use http::HeaderValue;
use std::net::SocketAddr;
use tower_http::compression::CompressionLevel;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::error::Result as AppResult;
use crate::state::AppState;

pub mod error;
pub mod handlers;

pub use self::error::WebError;

pub fn app_router(app_state: AppState) -> Router {
    Router::new()
        .route("/api/trivia", get(handlers::get_trivia_handler))
        .route("/api/categories", get(handlers::get_categories_handler))
        .route("/api/game", post(handlers::create_game_handler))
        .route(
            "/api/game/{session_id}",
            get(handlers::get_game_handler).delete(handlers::delete_game_handler),
        )
        .route(
            "/api/game/{session_id}/answer",
            post(handlers::submit_answer_handler),
        )
        .route(
            "/api/game/{session_id}/next",
            post(handlers::advance_game_handler),
        )
        .route(
            "/api/game/{session_id}/restart",
            post(handlers::restart_game_handler),
        )
        .route(
            "/api/game/{session_id}/results",
            get(handlers::get_results_handler),
        )
        .with_state(app_state)
}

#[tracing::instrument(skip(app_state, server_config), fields(
    server.port = server_config.port,
    cors.origins.count = server_config.cors_origins.len()
))]
pub async fn run_server(app_state: AppState, server_config: ServerConfig) -> AppResult<()> {
    let cors_origins_result: Result<Vec<HeaderValue>, _> = server_config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse()
                .map_err(|e| format!("Invalid CORS origin '{origin}': {e}"))
        })
        .collect();

    let cors_origins = cors_origins_result.unwrap_or_else(|e| {
        tracing::error!(error = %e, "CORS config error. Defaulting to restrictive");
        vec![]
    });

    let cors = if !cors_origins.is_empty() {
        tracing::info!(
            cors.origins.count = cors_origins.len(),
            "CORS configured with allowed origins"
        );
        CorsLayer::new()
            .allow_methods(vec![http::Method::GET, http::Method::POST, http::Method::DELETE])
            .allow_origin(cors_origins)
            .allow_headers(vec![http::header::CONTENT_TYPE, http::header::ACCEPT])
    } else {
        tracing::info!("Restrictive CORS policy applied (no origins configured)");
        CorsLayer::new()
    };

    let app = app_router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(
            CompressionLayer::new()
                .quality(CompressionLevel::Default)
                .gzip(true),
        )
        .layer(cors);

    let addr = SocketAddr::from(([0, 0, 0, 0], server_config.port));
    tracing::info!(server.address = %addr, "HTTP server starting");

    axum::serve(tokio::net::TcpListener::bind(addr).await?, app)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::store::SessionStore;
    use crate::trivia::client::TriviaApiClient;
    use axum::routing::get as axum_get;
    use serde_json::Value;
    use std::sync::Arc;

    const THREE_EASY: &str = r#"{
        "response_code": 0,
        "results": [
            {"category":"Geography","type":"multiple","difficulty":"easy","question":"Capital of Sweden?","correct_answer":"Stockholm","incorrect_answers":["Oslo","Copenhagen","Helsinki"]},
            {"category":"Geography","type":"multiple","difficulty":"easy","question":"Capital of Norway?","correct_answer":"Oslo","incorrect_answers":["Bergen","Stockholm","Reykjavik"]},
            {"category":"History","type":"multiple","difficulty":"easy","question":"First Roman emperor?","correct_answer":"Augustus","incorrect_answers":["Nero","Caesar","Trajan"]}
        ]
    }"#;

    async fn spawn_upstream(body: &'static str) -> String {
        let app = Router::new().route(
            "/api.php",
            axum_get(move || async move {
                ([(http::header::CONTENT_TYPE, "application/json")], body)
            }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Serves the full application against a fake upstream and returns the
    /// app's base URL.
    async fn spawn_app(upstream_body: &'static str) -> String {
        let upstream = spawn_upstream(upstream_body).await;
        let app_state = AppState {
            trivia: Arc::new(TriviaApiClient::new(upstream)),
            sessions: Arc::new(SessionStore::new()),
        };
        let app = app_router(app_state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_trivia_route_returns_normalized_questions() {
        let base = spawn_app(THREE_EASY).await;
        let response = reqwest::get(format!("{base}/api/trivia?amount=3&difficulty=easy"))
            .await
            .unwrap();
        assert_eq!(response.status(), 200);

        let body: Value = response.json().await.unwrap();
        let questions = body["questions"].as_array().unwrap();
        assert_eq!(questions.len(), 3);
        for question in questions {
            assert_eq!(question["difficulty"], "easy");
            assert_eq!(question["all_answers"].as_array().unwrap().len(), 4);
            assert!(question["id"].as_str().unwrap().starts_with("q_"));
        }
    }

    #[tokio::test]
    async fn test_trivia_route_maps_upstream_rejection_to_400() {
        let base = spawn_app(r#"{"response_code": 1, "results": []}"#).await;
        let response = reqwest::get(format!("{base}/api/trivia?amount=50&category=18"))
            .await
            .unwrap();
        assert_eq!(response.status(), 400);

        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Failed to get questions");
        assert_eq!(body["code"], 1);
    }

    #[tokio::test]
    async fn test_trivia_route_maps_malformed_upstream_to_500() {
        let base = spawn_app(r#"{"response_code": 0}"#).await;
        let response = reqwest::get(format!("{base}/api/trivia")).await.unwrap();
        assert_eq!(response.status(), 500);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("results"));
        assert!(body.get("code").is_none());
    }

    #[tokio::test]
    async fn test_categories_route_lists_catalog() {
        let base = spawn_app(THREE_EASY).await;
        let body: Value = reqwest::get(format!("{base}/api/categories"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let categories = body.as_array().unwrap();
        assert_eq!(categories[0]["name"], "Any Category");
        assert!(categories.iter().any(|c| c["id"] == "9"));
    }

    #[tokio::test]
    async fn test_full_session_flow() {
        let base = spawn_app(THREE_EASY).await;
        let client = reqwest::Client::new();

        // Setup screen settings start the game; the backend fetches once.
        let created: Value = client
            .post(format!("{base}/api/game"))
            .json(&serde_json::json!({ "difficulty": "easy", "amount": 3 }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let session_id = created["session_id"].as_str().unwrap().to_string();
        assert_eq!(created["state"]["screen"], "quiz");
        let correct: Vec<String> = created["state"]["questions"]
            .as_array()
            .unwrap()
            .iter()
            .map(|q| q["correct_answer"].as_str().unwrap().to_string())
            .collect();

        // Two right answers, one wrong.
        let first: Value = client
            .post(format!("{base}/api/game/{session_id}/answer"))
            .json(&serde_json::json!({ "question_index": 0, "answer": correct[0] }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(first["ignored"], false);
        assert_eq!(first["is_correct"], true);
        assert_eq!(first["points"], 10);

        // Duplicate submission for the same question is a no-op.
        let duplicate: Value = client
            .post(format!("{base}/api/game/{session_id}/answer"))
            .json(&serde_json::json!({ "question_index": 0, "answer": "anything" }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(duplicate["ignored"], true);

        client
            .post(format!("{base}/api/game/{session_id}/answer"))
            .json(&serde_json::json!({ "question_index": 1, "answer": correct[1] }))
            .send()
            .await
            .unwrap();
        client
            .post(format!("{base}/api/game/{session_id}/answer"))
            .json(&serde_json::json!({ "question_index": 2, "answer": "not it" }))
            .send()
            .await
            .unwrap();

        // Walk to the results screen.
        for _ in 0..3 {
            client
                .post(format!("{base}/api/game/{session_id}/next"))
                .send()
                .await
                .unwrap();
        }
        let state: Value = client
            .get(format!("{base}/api/game/{session_id}"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(state["screen"], "results");
        assert_eq!(state["score"], 20);
        assert_eq!(state["correct_answers"], 2);

        let results: Value = client
            .get(format!("{base}/api/game/{session_id}/results"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(results["accuracy"], 67);
        assert_eq!(results["by_difficulty"][0]["difficulty"], "easy");
        assert_eq!(results["by_difficulty"][0]["total"], 3);

        // Restart replaces the session wholesale.
        let fresh: Value = client
            .post(format!("{base}/api/game/{session_id}/restart"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(fresh["screen"], "setup");
        assert_eq!(fresh["score"], 0);
        assert_eq!(fresh["questions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_session_error_paths() {
        let base = spawn_app(r#"{"response_code": 2, "results": []}"#).await;
        let client = reqwest::Client::new();

        // No session is created when the fetch fails.
        let response = client
            .post(format!("{base}/api/game"))
            .json(&serde_json::json!({ "difficulty": "hard" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["code"], 2);

        // Unknown session id.
        let missing = uuid::Uuid::new_v4();
        let response = client
            .get(format!("{base}/api/game/{missing}"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
    }

    #[tokio::test]
    async fn test_out_of_range_answer_index_is_rejected() {
        let base = spawn_app(THREE_EASY).await;
        let client = reqwest::Client::new();

        let created: Value = client
            .post(format!("{base}/api/game"))
            .json(&serde_json::json!({ "amount": 3 }))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        let session_id = created["session_id"].as_str().unwrap();

        let response = client
            .post(format!("{base}/api/game/{session_id}/answer"))
            .json(&serde_json::json!({ "question_index": 99, "answer": "x" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 400);
    }
}
