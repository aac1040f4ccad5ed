//! Application layer - the demo sequence

pub mod demo_runner;

pub use demo_runner::DemoRunner;
