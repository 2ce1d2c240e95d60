//! Scenario catalog handlers.

mod manage_scenarios;

pub use manage_scenarios::{
    AddScenarioCommand, AddScenarioHandler, ExportScenariosHandler, ListScenariosHandler,
    ReloadScenariosHandler,
};
