//! Template composition core for phishing-awareness email templates.
//!
//! The crate is free of I/O and is shared by the backend service and any
//! other consumer that needs to build, substitute or render a template:
//!
//! - [`model::component`]: the catalog of placeable blocks and their defaults.
//! - [`model::document`]: the ordered sequence of placed components.
//! - [`substitution`]: `{{variable}}` replacement against a recipient profile.
//! - [`render`]: serialization of a document into a self-contained HTML page.
//! - [`model::template`]: template metadata, validation and stored records.

pub mod error;
pub mod model;
pub mod render;
pub mod requests;
pub mod substitution;

pub use error::{Result, TemplateError};
