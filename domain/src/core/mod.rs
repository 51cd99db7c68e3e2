//! Core domain types shared by every module

pub mod diagnostic;
pub mod error;
