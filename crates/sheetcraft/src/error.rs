//! Error types for sheetcraft

use thiserror::Error;

/// Errors raised by a [`GridSurface`](crate::GridSurface)
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// A sheet with this name already exists (committed or pending)
    #[error("A worksheet named '{0}' already exists")]
    DuplicateName(String),

    /// The sheet is unknown to the surface
    #[error("Worksheet not found: {0}")]
    SheetNotFound(String),

    /// The host has nothing selected
    #[error("No range is selected")]
    NoSelection,

    /// The grid rejected an operation
    #[error(transparent)]
    Grid(#[from] sheetcraft_core::Error),
}

/// Errors raised while rendering a template
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// The request input does not satisfy the template
    #[error("{0}")]
    InvalidInput(String),

    /// The template definition itself is malformed
    #[error("Template {template}: {message}")]
    Template {
        template: &'static str,
        message: String,
    },

    /// The surface failed while applying the plan
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl RenderError {
    pub(crate) fn template<S: Into<String>>(template: &'static str, message: S) -> Self {
        RenderError::Template {
            template,
            message: message.into(),
        }
    }
}

/// Errors raised by a [`SettingsStore`](crate::settings::SettingsStore)
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Reading or writing the settings file failed
    #[error("Settings I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for surface operations
pub type SurfaceResult<T> = std::result::Result<T, SurfaceError>;

/// Result type for rendering
pub type RenderResult<T> = std::result::Result<T, RenderError>;
