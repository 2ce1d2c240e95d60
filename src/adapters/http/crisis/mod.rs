//! HTTP adapter for PR crisis briefs.

mod dto;
mod handlers;
mod routes;

pub use dto::{GenerateCrisisRequest, GenerateCrisisResponse};
pub use handlers::CrisisHandlers;
pub use routes::crisis_routes;
