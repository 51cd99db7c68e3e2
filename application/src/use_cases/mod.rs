//! Use cases
//!
//! - [`build_command_table`] - detect, discover, merge and register commands

pub mod build_command_table;
