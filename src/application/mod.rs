//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Command handlers (start, send, end, add, reload) are kept apart from
//! query handlers (get session, list, export).

pub mod handlers;

pub use handlers::{
    // Roleplay handlers
    EndSessionCommand, EndSessionHandler, GetSessionHandler, GetSessionQuery,
    RoleplayCommandError, RoleplayReply, SendMessageCommand, SendMessageHandler, SessionView,
    StartRoleplayCommand, StartRoleplayHandler, StartRoleplayResult, StartStatus,
    // Feedback and crisis handlers
    CrisisResult, FeedbackResult, GenerateCrisisCommand, GenerateCrisisHandler,
    GenerateFeedbackCommand, GenerateFeedbackHandler,
    // Scenario handlers
    AddScenarioCommand, AddScenarioHandler, ExportScenariosHandler, ListScenariosHandler,
    ReloadScenariosHandler,
};
