//! wfm-core - Core library for workforce planning
//!
//! Turns a remote call-volume forecast and a remote staffing schedule into one
//! consistent, observable state:
//!
//! - **validation**: range and presence checks on user input
//! - **client**: forecast and schedule service clients
//! - **orchestrator**: the forecast-to-schedule state machine
//! - **types**: value objects and wire payloads

pub mod client;
pub mod error;
pub mod orchestrator;
pub mod types;
pub mod validation;

// Re-export commonly used types
pub use error::{Error, ErrorKind, Result};
pub use orchestrator::{OrchestrationState, Orchestrator, StageStatus};
