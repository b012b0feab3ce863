use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum CoreError {
    #[error("A message or a budget and preferences pair is required")]
    EmptyInput,

    #[error("External service error: {0}")]
    ExternalServiceError(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Menu catalog error: {0}")]
    MenuCatalog(String),

    #[error("No reply could be produced for this turn")]
    Unrecoverable,
}
