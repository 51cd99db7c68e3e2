//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod command_discovery;
pub mod dispatcher;
pub mod project_detector;
