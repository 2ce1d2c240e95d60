//! Persona Trainer - roleplay practice against an LLM-played persona.
//!
//! A trainee talks to a simulated customer (or PR-crisis stakeholder)
//! whose persona and goal questions come from a scenario document. The
//! persona keeps pressing until every goal question has been answered,
//! after which the trainee can ask for coaching feedback.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
