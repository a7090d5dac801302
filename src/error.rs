//! Error types for TMD design and optimization.

use thiserror::Error;

/// Result type alias for crate operations.
pub type TmdResult<T> = Result<T, TmdError>;

/// Errors raised while configuring or running a TMD optimization.
///
/// A singular transmissibility response is not an error: it is reported as
/// `f64::INFINITY` by [`crate::transmissibility::transmissibility`].
#[derive(Debug, Error)]
pub enum TmdError {
    /// Invalid hyperparameters, bounds, sweep or host-system parameters.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The objective function itself failed; the run is aborted.
    #[error("objective evaluation failed: {0}")]
    Evaluation(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The objective returned NaN, which cannot be ranked.
    #[error("objective returned a non-rankable value ({value}) at {position:?}")]
    NonFiniteObjective { value: f64, position: Vec<f64> },

    /// A design vector had the wrong number of components.
    #[error("design vector has {actual} components, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The requested optimization algorithm is declared but not implemented.
    #[error("optimization algorithm '{name}' is not implemented")]
    UnsupportedAlgorithm { name: String },

    /// JSON export failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TmdError {
    /// Create a configuration error with a message.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Wrap an objective failure.
    pub fn evaluation<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Evaluation(Box::new(source))
    }

    /// True for errors raised before any objective evaluation took place.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Error)]
    #[error("solver diverged")]
    struct Diverged;

    #[test]
    fn configuration_message_is_displayed() {
        let err = TmdError::configuration("e must be smaller than m");
        assert!(err.is_configuration());
        assert_eq!(err.to_string(), "configuration error: e must be smaller than m");
    }

    #[test]
    fn evaluation_error_keeps_source() {
        let err = TmdError::evaluation(Diverged);
        assert!(!err.is_configuration());
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("solver diverged"));
    }
}
