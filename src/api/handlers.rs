use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog;
use crate::engine::{self, dialogue};
use crate::error::AppResult;
use crate::models::{ConversationContext, Message, Plan, RawProfile, Role, ViewerProfile};

use super::state::Session;
use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    /// Omitted on the first turn; a new session is created
    pub session_id: Option<Uuid>,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub session_id: Uuid,
    pub reply: String,
    pub thoughts: Vec<String>,
    pub context: ConversationContext,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_id: Uuid,
    pub context: ConversationContext,
    pub messages: Vec<Message>,
}

#[derive(Debug, Deserialize)]
pub struct FallbackRequest {
    pub messages: Vec<FallbackMessage>,
}

#[derive(Debug, Deserialize)]
pub struct FallbackMessage {
    pub role: Role,
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct FallbackResponse {
    pub reply: String,
}

#[derive(Debug, Deserialize)]
pub struct AvailabilityRequest {
    pub title: String,
    pub country: String,
    pub budget: f64,
    #[serde(default = "default_watch_count")]
    pub watch_count: u32,
}

fn default_watch_count() -> u32 {
    1
}

#[derive(Debug, Serialize)]
pub struct MoviesResponse {
    pub titles: Vec<&'static str>,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Advances one dialogue turn for a session, creating it if needed
pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatResponse> {
    let session_id = request.session_id.unwrap_or_else(Uuid::new_v4);

    let mut inner = state.inner.write().await;
    let session = inner.sessions.entry(session_id).or_insert_with(Session::default);

    let turn = dialogue::advance(&request.message, &session.context);

    tracing::info!(
        session_id = %session_id,
        intent = ?turn.context.intent,
        "Dialogue turn processed"
    );

    session.messages.push(Message::user(request.message));
    session
        .messages
        .push(Message::assistant(turn.reply.clone(), turn.thoughts.clone()));
    session.context = turn.context.clone();

    Json(ChatResponse {
        session_id,
        reply: turn.reply,
        thoughts: turn.thoughts,
        context: turn.context,
    })
}

/// Returns a session's transcript and current context
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<SessionResponse>> {
    let inner = state.inner.read().await;
    let session = inner
        .sessions
        .get(&session_id)
        .ok_or_else(|| crate::error::AppError::NotFound(format!("Unknown session {session_id}")))?;

    Ok(Json(SessionResponse {
        session_id,
        context: session.context.clone(),
        messages: session.messages.clone(),
    }))
}

/// Stateless pattern-matching responder over a supplied history
pub async fn fallback_chat(Json(request): Json<FallbackRequest>) -> Json<FallbackResponse> {
    let messages: Vec<Message> = request
        .messages
        .into_iter()
        .map(|m| match m.role {
            Role::User => Message::user(m.text),
            Role::Assistant => Message::assistant(m.text, vec![]),
        })
        .collect();

    Json(FallbackResponse {
        reply: engine::fallback_reply(&messages),
    })
}

/// The full plan catalog
pub async fn get_plans() -> Json<Vec<Plan>> {
    Json(catalog::PLANS.clone())
}

/// Titles the engine knows about
pub async fn get_movies() -> Json<MoviesResponse> {
    Json(MoviesResponse {
        titles: catalog::known_titles(),
    })
}

/// Scores the plan catalog against a raw profile
pub async fn advice(Json(raw): Json<RawProfile>) -> Json<engine::PlanAdvice> {
    let profile = ViewerProfile::normalize(&raw);
    Json(engine::score_plans(&profile, &catalog::PLANS))
}

/// Compares the ways to watch a movie within budget
pub async fn availability(
    Json(request): Json<AvailabilityRequest>,
) -> AppResult<Json<engine::AvailabilityReport>> {
    let report = engine::compare_availability(
        &request.title,
        &request.country,
        request.budget,
        request.watch_count,
    )?;
    Ok(Json(report))
}
