//! HTTP adapter for roleplay endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, MessageResponse, SessionResponse, StartChatRequest, TurnResponse};
pub use handlers::RoleplayHandlers;
pub(crate) use handlers::handle_roleplay_error;
pub(crate) use dto::string_or_number;
pub use routes::roleplay_routes;
