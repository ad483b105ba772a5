use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::error::{Result as WebResult, WebError};
use crate::game::session::{SessionState, SubmitOutcome};
use crate::game::summary::ResultsSummary;
use crate::state::AppState;
use crate::trivia::types::{
    CATEGORIES, Category, DEFAULT_AMOUNT, DifficultyFilter, GameSettings, NormalizedQuestion,
    QuestionType,
};

#[derive(Deserialize, Debug, Default)]
pub struct TriviaQuery {
    pub amount: Option<u32>,
    pub difficulty: Option<DifficultyFilter>,
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub question_type: Option<QuestionType>,
}

impl TriviaQuery {
    /// An absent difficulty behaves like the `random` sentinel: nothing is
    /// passed upstream.
    fn into_settings(self) -> GameSettings {
        GameSettings {
            difficulty: self.difficulty.unwrap_or(DifficultyFilter::Random),
            category: self.category.unwrap_or_default(),
            amount: self.amount.unwrap_or(DEFAULT_AMOUNT),
            question_type: self.question_type,
        }
    }
}

#[derive(Serialize, Debug)]
pub struct TriviaResponse {
    pub questions: Vec<NormalizedQuestion>,
}

/// The plain proxy route: fetch, decode, shuffle, return.
pub async fn get_trivia_handler(
    State(app_state): State<AppState>,
    Query(query): Query<TriviaQuery>,
) -> WebResult<Json<TriviaResponse>> {
    tracing::info!("HTTP: Received trivia request: {:?}", query);

    let settings = query.into_settings();
    let questions = app_state
        .trivia
        .fetch_questions(&settings)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch trivia questions");
            WebError::from(e)
        })?;

    Ok(Json(TriviaResponse { questions }))
}

pub async fn get_categories_handler() -> Json<Vec<Category>> {
    Json(CATEGORIES.to_vec())
}

#[derive(Serialize, Debug)]
pub struct CreateGameResponse {
    pub session_id: Uuid,
    pub state: SessionState,
}

/// Creates a quiz session: performs the one fetch for this session, then
/// stores a quiz-screen state. On fetch failure no session is created.
pub async fn create_game_handler(
    State(app_state): State<AppState>,
    Json(settings): Json<GameSettings>,
) -> WebResult<Json<CreateGameResponse>> {
    tracing::info!("HTTP: Received create_game request: {:?}", settings);

    let questions = app_state
        .trivia
        .fetch_questions(&settings)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch questions for new session");
            WebError::from(e)
        })?;

    let (session_id, state) = app_state.sessions.create(settings, questions).await;
    tracing::info!(
        session.id = %session_id,
        questions.count = state.questions.len(),
        "Created quiz session"
    );

    Ok(Json(CreateGameResponse { session_id, state }))
}

pub async fn get_game_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> WebResult<Json<SessionState>> {
    app_state
        .sessions
        .snapshot(session_id)
        .await
        .map(Json)
        .ok_or(WebError::SessionNotFound(session_id))
}

#[derive(Deserialize, Debug)]
pub struct SubmitAnswerRequest {
    pub question_index: usize,
    pub answer: String,
}

#[derive(Serialize, Debug)]
pub struct SubmitAnswerResponse {
    /// True for a duplicate or out-of-phase submission: nothing changed.
    pub ignored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct_answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub newly_won: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<SessionState>,
}

pub async fn submit_answer_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SubmitAnswerRequest>,
) -> WebResult<Json<SubmitAnswerResponse>> {
    let current = app_state
        .sessions
        .snapshot(session_id)
        .await
        .ok_or(WebError::SessionNotFound(session_id))?;
    if payload.question_index >= current.questions.len() {
        return Err(WebError::BadRequest(format!(
            "question_index {} out of range",
            payload.question_index
        )));
    }

    let outcome = app_state
        .sessions
        .submit_answer(session_id, payload.question_index, &payload.answer)
        .await
        .ok_or(WebError::SessionNotFound(session_id))?;

    let response = match outcome {
        SubmitOutcome::Ignored => SubmitAnswerResponse {
            ignored: true,
            is_correct: None,
            points: None,
            correct_answer: None,
            newly_won: None,
            state: None,
        },
        SubmitOutcome::Scored {
            state,
            points,
            is_correct,
            newly_won,
        } => {
            tracing::debug!(
                session.id = %session_id,
                question.index = payload.question_index,
                answer.correct = is_correct,
                "Answer scored"
            );
            let correct_answer = state
                .questions
                .get(payload.question_index)
                .map(|q| q.correct_answer.clone());
            SubmitAnswerResponse {
                ignored: false,
                is_correct: Some(is_correct),
                points: Some(points),
                correct_answer,
                newly_won: Some(newly_won),
                state: Some(state),
            }
        }
    };

    Ok(Json(response))
}

pub async fn advance_game_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> WebResult<Json<SessionState>> {
    app_state
        .sessions
        .advance(session_id)
        .await
        .map(Json)
        .ok_or(WebError::SessionNotFound(session_id))
}

pub async fn restart_game_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> WebResult<Json<SessionState>> {
    app_state
        .sessions
        .restart(session_id)
        .await
        .map(Json)
        .ok_or(WebError::SessionNotFound(session_id))
}

pub async fn get_results_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> WebResult<Json<ResultsSummary>> {
    let state = app_state
        .sessions
        .snapshot(session_id)
        .await
        .ok_or(WebError::SessionNotFound(session_id))?;
    Ok(Json(ResultsSummary::for_session(&state)))
}

pub async fn delete_game_handler(
    State(app_state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> WebResult<StatusCode> {
    if app_state.sessions.remove(session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(WebError::SessionNotFound(session_id))
    }
}
