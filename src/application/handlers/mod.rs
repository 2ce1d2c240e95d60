//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod crisis;
pub mod feedback;
pub mod roleplay;
pub mod scenario;

pub use crisis::{CrisisResult, GenerateCrisisCommand, GenerateCrisisHandler};
pub use feedback::{FeedbackResult, GenerateFeedbackCommand, GenerateFeedbackHandler};
pub use roleplay::{
    EndSessionCommand, EndSessionHandler, GetSessionHandler, GetSessionQuery,
    RoleplayCommandError, RoleplayReply, SendMessageCommand, SendMessageHandler, SessionView,
    StartRoleplayCommand, StartRoleplayHandler, StartRoleplayResult, StartStatus,
};
pub use scenario::{
    AddScenarioCommand, AddScenarioHandler, ExportScenariosHandler, ListScenariosHandler,
    ReloadScenariosHandler,
};
