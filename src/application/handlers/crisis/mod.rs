//! Crisis brief handlers.

mod generate_crisis;

pub use generate_crisis::{CrisisResult, GenerateCrisisCommand, GenerateCrisisHandler};
