//! BitGenius demo runner
//!
//! Walks the Maestro Bitcoin API and the Hiro contract explorer once and
//! logs simulated DCA, arbitrage and mixing scenarios.

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use application::DemoRunner;
pub use config::DemoConfig;
pub use domain::outcome::StepOutcome;
pub use report::RunReport;
