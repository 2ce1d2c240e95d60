//! Crisis module - PR crisis brief generation.

mod brief;

pub use brief::{CrisisError, CrisisRequest, Severity};
