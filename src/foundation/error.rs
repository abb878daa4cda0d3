/// Convenience result type used across lollipop.
pub type LollipopResult<T> = Result<T, LollipopError>;

/// Top-level error taxonomy used by renderer APIs.
///
/// Every kind is fatal for the run: failures come from configuration or missing static
/// resources, never from transient conditions, so nothing here is retried.
#[derive(thiserror::Error, Debug)]
pub enum LollipopError {
    /// Invalid user-provided configuration values.
    #[error("validation error: {0}")]
    Validation(String),

    /// A required external resource (palette image, font file, font family) is unavailable.
    #[error("resource missing: {0}")]
    ResourceMissing(String),

    /// Geometry or sampling inputs for which the pipeline is undefined.
    #[error("degenerate geometry: {0}")]
    GeometryDegenerate(String),

    /// Output directory or frame file could not be created or written.
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LollipopError {
    /// Build a [`LollipopError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`LollipopError::ResourceMissing`] value.
    pub fn resource_missing(msg: impl Into<String>) -> Self {
        Self::ResourceMissing(msg.into())
    }

    /// Build a [`LollipopError::GeometryDegenerate`] value.
    pub fn degenerate(msg: impl Into<String>) -> Self {
        Self::GeometryDegenerate(msg.into())
    }

    /// Build a [`LollipopError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
