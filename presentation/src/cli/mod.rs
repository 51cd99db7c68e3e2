//! Command-line surface: host options and the command dispatcher

pub mod commands;
pub mod dispatcher;
