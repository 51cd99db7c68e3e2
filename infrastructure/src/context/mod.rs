//! Project context detection
//!
//! This module provides the filesystem implementation of the
//! [`ProjectDetectorPort`] trait defined in the application layer.
//!
//! # Components
//!
//! - [`FsProjectDetector`] - Classifies a Cargo project from its manifest and sources
//! - [`markers`] - Framework names, file names and text markers used for classification
//!
//! [`ProjectDetectorPort`]: artisan_application::ProjectDetectorPort

mod detector;
pub mod markers;

pub use detector::FsProjectDetector;
