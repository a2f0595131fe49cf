/// Convenience result type used across glaze.
pub type GlazeResult<T> = Result<T, GlazeError>;

/// Top-level error taxonomy used by the renderer and its boundary.
#[derive(thiserror::Error, Debug)]
pub enum GlazeError {
    /// The style catalog JSON could not be parsed.
    #[error("catalog parse error: {0}")]
    CatalogParse(String),

    /// The default style catalog resource is missing or unreadable.
    #[error("catalog fetch error: {0}")]
    CatalogFetch(String),

    /// A source image could not be decoded.
    #[error("image load error: {0}")]
    ImageLoad(String),

    /// Invalid user-provided parameters or buffers.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while executing a render pass.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlazeError {
    /// Build a [`GlazeError::CatalogParse`] value.
    pub fn catalog_parse(msg: impl Into<String>) -> Self {
        Self::CatalogParse(msg.into())
    }

    /// Build a [`GlazeError::CatalogFetch`] value.
    pub fn catalog_fetch(msg: impl Into<String>) -> Self {
        Self::CatalogFetch(msg.into())
    }

    /// Build a [`GlazeError::ImageLoad`] value.
    pub fn image_load(msg: impl Into<String>) -> Self {
        Self::ImageLoad(msg.into())
    }

    /// Build a [`GlazeError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlazeError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`GlazeError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Short, user-facing status line for boundary errors.
    ///
    /// Session code surfaces this instead of the full error chain.
    pub fn status_message(&self) -> String {
        match self {
            Self::CatalogParse(_) => "failed to read catalog JSON".to_owned(),
            Self::CatalogFetch(_) => "no default catalog available".to_owned(),
            Self::ImageLoad(_) => "failed to load image".to_owned(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
