//! Reference documentation generation for the charm.
//!
//! Renders markdown pages for the configuration options and the action
//! parameters from the same schemas the charm validates with at runtime,
//! so the reference can never drift from the code.

mod generator;
mod markdown;
mod schema;


pub use generator::{DocsError, DocsGenerator};
pub use markdown::{actions_page, config_page, generate_property_table};
pub use schema::{PropertyInfo, extract_property_info};
