//! Project context module
//!
//! Types describing the host project the pipeline runs against.
//!
//! - [`ProjectType`] - Classification of the project
//! - [`ProjectContext`] - Classification plus detected features
//! - [`PropertyKey`] - Known manifest properties
//!
//! # Example
//!
//! ```
//! use artisan_domain::project::{ProjectContext, ProjectType};
//!
//! let ctx = ProjectContext::generic("/work/empty");
//! assert_eq!(ctx.project_type, ProjectType::Generic);
//! assert!(ctx.manifest_path.is_none());
//! assert!(ctx.properties.is_empty());
//! ```

pub mod entities;
pub mod value_objects;

pub use entities::{ProjectContext, ProjectType};
pub use value_objects::PropertyKey;
