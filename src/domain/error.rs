//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for adltrader.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("insufficient data: have {bars} bars, need {required}")]
    InsufficientData { bars: usize, required: usize },

    #[error("empty price series")]
    EmptySeries,

    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("invalid bar at index {index} ({date}): {reason}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        reason: String,
    },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("report error: {reason}")]
    Report { reason: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl TraderError {
    pub(crate) fn invalid_parameter(name: &str, reason: impl Into<String>) -> Self {
        TraderError::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    /// Process exit status for this kind of failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            TraderError::Io(_) | TraderError::Report { .. } => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. } => 2,
            TraderError::Data { .. } => 3,
            TraderError::InvalidParameter { .. } | TraderError::InvalidBar { .. } => 4,
            TraderError::InsufficientData { .. } | TraderError::EmptySeries => 5,
        }
    }

    /// True for the input-validation class: bad parameters and malformed bars.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            TraderError::InvalidParameter { .. } | TraderError::InvalidBar { .. }
        )
    }
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        std::process::ExitCode::from(err.exit_code())
    }
}
