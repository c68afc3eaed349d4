use thiserror::Error;

/// Errors raised by the template composition core.
///
/// Malformed component props never show up here: the renderer falls back to
/// the component type's default value instead of failing.
#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Unknown component type: {0}")]
    UnknownComponentType(String),

    #[error("Component not found: {0}")]
    ComponentNotFound(String),

    #[error("Invalid template: {0}")]
    Validation(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TemplateError>;
