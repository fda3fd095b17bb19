use std::fs;
use std::path::Path;

use thiserror::Error;

use super::markdown::{actions_page, config_page};

/// Generates markdown reference pages for the charm.
///
/// One page documents the configuration options, one the actions and their
/// parameters. Both are derived from schemas, never hand-maintained.
pub struct DocsGenerator {
    output_dir: String,
}

impl Default for DocsGenerator {
    fn default() -> Self {
        Self {
            output_dir: "docs/reference".to_string(),
        }
    }
}

impl DocsGenerator {
    /// Creates a generator writing to the default output directory.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom output directory for generated pages.
    #[must_use]
    pub fn with_output_dir(mut self, output_dir: impl Into<String>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Generates every reference page.
    ///
    /// # Errors
    /// Returns [`DocsError`] when a schema cannot be rendered or a page
    /// cannot be written.
    pub fn generate_all(&self) -> Result<(), DocsError> {
        self.generate_config()?;
        self.generate_actions()
    }

    /// Generates the configuration reference page.
    ///
    /// # Errors
    /// Returns [`DocsError`] when the schema cannot be rendered or the page
    /// cannot be written.
    pub fn generate_config(&self) -> Result<(), DocsError> {
        self.write_page("config.md", &config_page()?)
    }

    /// Generates the actions reference page.
    ///
    /// # Errors
    /// Returns [`DocsError`] when a schema cannot be rendered or the page
    /// cannot be written.
    pub fn generate_actions(&self) -> Result<(), DocsError> {
        self.write_page("actions.md", &actions_page()?)
    }

    fn write_page(&self, filename: &str, content: &str) -> Result<(), DocsError> {
        fs::create_dir_all(&self.output_dir).map_err(|err| DocsError::FileWrite {
            path: self.output_dir.clone(),
            details: err.to_string(),
        })?;

        let filepath = Path::new(&self.output_dir).join(filename);
        fs::write(&filepath, content).map_err(|err| DocsError::FileWrite {
            path: filepath.display().to_string(),
            details: err.to_string(),
        })?;

        println!("Generated {}", filepath.display());
        Ok(())
    }
}

/// Errors that can occur during documentation generation.
#[derive(Error, Debug)]
pub enum DocsError {
    /// A page or its directory could not be written.
    #[error("failed to write '{path}': {details}")]
    FileWrite {
        /// Target path
        path: String,
        /// I/O error details
        details: String,
    },

    /// A schema could not be rendered to JSON.
    #[error("failed to render the schema for {target}: {details}")]
    SchemaConversion {
        /// The surface being documented
        target: String,
        /// Serialization error details
        details: String,
    },
}
