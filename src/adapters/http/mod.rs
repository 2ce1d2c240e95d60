//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter (`dto`, `handlers`, `routes`);
//! `router` merges them behind the shared layers.

pub mod crisis;
pub mod error;
pub mod feedback;
pub mod roleplay;
pub mod router;
pub mod scenario;

// Re-export key types for convenience
pub use error::ErrorResponse;
pub use router::{app_router, AppServices, HealthResponse, RouterSettings};
