/// Convenience result type used across glyphwave.
pub type GlyphwaveResult<T> = Result<T, GlyphwaveError>;

/// Error taxonomy for configuration and host-facing failures.
///
/// The per-frame animation path does not produce these for not-ready layouts or
/// misconfigured channels; those are reported as skipped frames instead.
#[derive(thiserror::Error, Debug)]
pub enum GlyphwaveError {
    /// Invalid descriptor or layout data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Curve, gradient or noise source construction errors.
    #[error("animation error: {0}")]
    Animation(String),

    /// The render sink rejected a commit.
    #[error("sink error: {0}")]
    Sink(String),

    /// Errors when serializing or deserializing descriptors.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GlyphwaveError {
    /// Build a [`GlyphwaveError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`GlyphwaveError::Animation`] value.
    pub fn animation(msg: impl Into<String>) -> Self {
        Self::Animation(msg.into())
    }

    /// Build a [`GlyphwaveError::Sink`] value.
    pub fn sink(msg: impl Into<String>) -> Self {
        Self::Sink(msg.into())
    }

    /// Build a [`GlyphwaveError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
