/// Convenience result type used across gaze-aura.
pub type AuraResult<T> = Result<T, AuraError>;

/// Top-level error taxonomy used by overlay APIs.
#[derive(thiserror::Error, Debug)]
pub enum AuraError {
    /// Invalid options or caller-provided data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A signal sample fell outside the heatmap range (or was not finite).
    #[error("signal out of range: {value} is outside [{min}, {max}]")]
    SignalOutOfRange {
        /// Offending sample.
        value: f64,
        /// Lower bound of the heatmap range.
        min: f64,
        /// Upper bound of the heatmap range.
        max: f64,
    },

    /// The heatmap range collapses to a single value.
    #[error("degenerate range: min == max == {0}")]
    DegenerateRange(f64),

    /// A gaze coordinate does not lie inside the frame.
    #[error("dimension mismatch: gaze ({x}, {y}) is outside the {width}x{height} frame")]
    DimensionMismatch {
        /// Gaze x coordinate.
        x: i32,
        /// Gaze y coordinate.
        y: i32,
        /// Frame width in pixels.
        width: u32,
        /// Frame height in pixels.
        height: u32,
    },

    /// The frame source failed to produce a frame.
    #[error("source read error: {0}")]
    SourceRead(String),

    /// The frame sink failed to accept a frame.
    #[error("sink write error: {0}")]
    SinkWrite(String),

    /// Errors when serializing or deserializing inputs and options.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AuraError {
    /// Build an [`AuraError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build an [`AuraError::SourceRead`] value.
    pub fn source_read(msg: impl Into<String>) -> Self {
        Self::SourceRead(msg.into())
    }

    /// Build an [`AuraError::SinkWrite`] value.
    pub fn sink_write(msg: impl Into<String>) -> Self {
        Self::SinkWrite(msg.into())
    }

    /// Build an [`AuraError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
