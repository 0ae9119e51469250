//! Error types for animatable value parsing and timing queries.

use crate::reader::JsonToken;

/// Failures raised by [`crate::reader::JsonReader`] while walking a description.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum StreamError {
    /// The input text is not valid JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The next token did not have the shape the caller asked for.
    #[error("expected {expected:?} but found {found:?} at {path}")]
    UnexpectedToken {
        expected: JsonToken,
        found: JsonToken,
        path: String,
    },

    /// A value was requested after the document was fully consumed.
    #[error("unexpected end of document at {path}")]
    EndOfDocument { path: String },

    /// A number could not be represented as a finite `f64`.
    #[error("number out of range at {path}")]
    InvalidNumber { path: String },

    /// Well-formed tokens that do not make a value of the requested kind.
    #[error("invalid value at {path}: {reason}")]
    InvalidValue { reason: String, path: String },
}

/// Errors surfaced by the animatable value engine.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum AnimatableError {
    /// The property object never supplied a usable value.
    #[error("malformed animatable description: {reason}")]
    MalformedDescription { reason: String },

    /// A timing query was made on a value without keyframes.
    #[error("there are no keyframes")]
    NoKeyframes,

    /// The composition context cannot drive timing or scaling.
    #[error("invalid composition: {reason}")]
    InvalidComposition { reason: String },

    /// Propagated unchanged from the token stream.
    #[error(transparent)]
    Stream(#[from] StreamError),
}

impl AnimatableError {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedDescription {
            reason: reason.into(),
        }
    }

    /// Error category for logging.
    #[inline]
    pub fn category(&self) -> &'static str {
        match self {
            Self::MalformedDescription { .. } => "input",
            Self::NoKeyframes => "usage",
            Self::InvalidComposition { .. } => "config",
            Self::Stream(_) => "stream",
        }
    }
}

impl From<serde_json::Error> for AnimatableError {
    fn from(err: serde_json::Error) -> Self {
        Self::Stream(StreamError::Json(err))
    }
}
