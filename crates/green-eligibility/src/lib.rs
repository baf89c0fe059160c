//! Decision engine and HTTP plumbing for the renewable-energy program eligibility service.

pub mod config;
pub mod eligibility;
pub mod error;
pub mod telemetry;
