/// Convenience result type used across the card renderer.
pub type CardResult<T> = Result<T, CardError>;

/// Top-level error taxonomy for card rendering.
///
/// Every variant is fatal for the render that produced it: no partial buffer is returned.
#[derive(thiserror::Error, Debug)]
pub enum CardError {
    /// Unknown theme identifier where a fixed registry entry was required.
    #[error("invalid theme `{given}`, use: {}", valid.join(" | "))]
    InvalidTheme {
        /// Identifier supplied by the caller.
        given: String,
        /// Every identifier the registry accepts, in registry order.
        valid: Vec<String>,
    },

    /// A pipeline step that is neither a built-in module name nor a callable module.
    #[error("`{0}` is not a valid module")]
    InvalidModule(String),

    /// A background or avatar bitmap could not be fetched or decoded.
    #[error("failed to load image `{locator}`")]
    ImageLoad {
        /// Locator (path, URL or a short description of in-memory bytes).
        locator: String,
        /// Underlying fetch or decode failure.
        #[source]
        source: anyhow::Error,
    },

    /// Invalid caller-provided options or geometry.
    #[error("validation error: {0}")]
    Validation(String),

    /// Rasterization or text layout failure.
    #[error("render error: {0}")]
    Render(String),

    /// Failure while encoding the finished surface.
    #[error("encode error: {0}")]
    Encode(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CardError {
    /// Build a [`CardError::InvalidTheme`] value.
    pub fn invalid_theme<I, S>(given: impl Into<String>, valid: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::InvalidTheme {
            given: given.into(),
            valid: valid.into_iter().map(Into::into).collect(),
        }
    }

    /// Build a [`CardError::InvalidModule`] value.
    pub fn invalid_module(entry: impl Into<String>) -> Self {
        Self::InvalidModule(entry.into())
    }

    /// Build a [`CardError::ImageLoad`] value.
    pub fn image_load(locator: impl Into<String>, source: impl Into<anyhow::Error>) -> Self {
        Self::ImageLoad {
            locator: locator.into(),
            source: source.into(),
        }
    }

    /// Build a [`CardError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`CardError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`CardError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
