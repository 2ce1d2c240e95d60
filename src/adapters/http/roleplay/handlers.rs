//! HTTP handlers for roleplay endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{invalid_id, scenario_error_response, ErrorResponse};
use crate::application::handlers::roleplay::{
    EndSessionCommand, EndSessionHandler, GetSessionHandler, GetSessionQuery,
    RoleplayCommandError, SendMessageCommand, SendMessageHandler, StartRoleplayCommand,
    StartRoleplayHandler,
};
use crate::domain::foundation::{ScenarioId, SessionId};
use crate::domain::roleplay::RoleplayError;

use super::dto::{ChatRequest, ChatResponse, MessageResponse, SessionResponse, StartChatRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct RoleplayHandlers {
    start_handler: Arc<StartRoleplayHandler>,
    send_handler: Arc<SendMessageHandler>,
    get_handler: Arc<GetSessionHandler>,
    end_handler: Arc<EndSessionHandler>,
}

impl RoleplayHandlers {
    pub fn new(
        start_handler: Arc<StartRoleplayHandler>,
        send_handler: Arc<SendMessageHandler>,
        get_handler: Arc<GetSessionHandler>,
        end_handler: Arc<EndSessionHandler>,
    ) -> Self {
        Self {
            start_handler,
            send_handler,
            get_handler,
            end_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /start_chat - Start or resume a roleplay session
pub async fn start_chat(
    State(handlers): State<RoleplayHandlers>,
    Json(req): Json<StartChatRequest>,
) -> Response {
    let (session_id, scenario_id) = match parse_ids(&req.session_id, &req.scenario_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = StartRoleplayCommand {
        session_id,
        scenario_id,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: ChatResponse = result.reply.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_roleplay_error(e),
    }
}

/// POST /chat - Send a trainee message
pub async fn chat(State(handlers): State<RoleplayHandlers>, Json(req): Json<ChatRequest>) -> Response {
    let (session_id, scenario_id) = match parse_ids(&req.session_id, &req.scenario_id) {
        Ok(ids) => ids,
        Err(response) => return response,
    };

    let cmd = SendMessageCommand {
        session_id,
        scenario_id,
        message: req.message,
    };

    match handlers.send_handler.handle(cmd).await {
        Ok(reply) => {
            let response: ChatResponse = reply.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_roleplay_error(e),
    }
}

/// GET /sessions/:id - Inspect a live session
pub async fn get_session(
    State(handlers): State<RoleplayHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("session_id", &session_id),
    };

    match handlers.get_handler.handle(GetSessionQuery { session_id }).await {
        Ok(view) => {
            let response: SessionResponse = view.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_roleplay_error(e),
    }
}

/// DELETE /sessions/:id - End a session
pub async fn end_session(
    State(handlers): State<RoleplayHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match session_id.parse::<SessionId>() {
        Ok(id) => id,
        Err(_) => return invalid_id("session_id", &session_id),
    };

    let cmd = EndSessionCommand {
        session_id: session_id.clone(),
    };

    match handlers.end_handler.handle(cmd).await {
        Ok(()) => {
            let response = MessageResponse {
                message: format!("Session {} ended", session_id),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_roleplay_error(e),
    }
}

#[allow(clippy::result_large_err)]
fn parse_ids(session_id: &str, scenario_id: &str) -> Result<(SessionId, ScenarioId), Response> {
    let session = SessionId::new(session_id).map_err(|_| invalid_id("session_id", session_id))?;
    let scenario =
        ScenarioId::new(scenario_id).map_err(|_| invalid_id("scenario_id", scenario_id))?;
    Ok((session, scenario))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

pub(crate) fn handle_roleplay_error(error: RoleplayCommandError) -> Response {
    match error {
        RoleplayCommandError::Scenario(e) => scenario_error_response(e),
        RoleplayCommandError::SessionNotFound(id) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found("Session", id.as_str())),
        )
            .into_response(),
        RoleplayCommandError::MissingTranscript => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request(
                RoleplayCommandError::MissingTranscript.to_string(),
            )),
        )
            .into_response(),
        RoleplayCommandError::Roleplay(e) => match e {
            RoleplayError::EmptyMessage => (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response(),
            RoleplayError::ScenarioMismatch { .. } | RoleplayError::StaleTurn(_) => (
                StatusCode::CONFLICT,
                Json(ErrorResponse::conflict(e.to_string())),
            )
                .into_response(),
            RoleplayError::EmptyReply => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(e.to_string())),
            )
                .into_response(),
        },
        RoleplayCommandError::Storage(msg) => {
            tracing::error!(error = %msg, "Scenario storage failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal(msg)),
            )
                .into_response()
        }
    }
}
