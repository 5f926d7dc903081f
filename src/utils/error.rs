use thiserror::Error;

#[derive(Error, Debug)]
pub enum MobilityError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("reference data error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("the city \"{city}\" is not present in the code table")]
    UnknownCity { city: String },

    #[error("malformed response: {message}")]
    MalformedResponse { message: String },

    #[error("invalid date \"{value}\" (expected YYYY-MM-DD)")]
    InvalidDate { value: String },

    #[error("invalid date range \"{value}\": {reason}")]
    InvalidDateRange { value: String, reason: String },

    #[error("{message}")]
    InvalidArgument { message: String },
}

impl MobilityError {
    /// Exit code used by `main`: 2 for argument/date validation failures
    /// caught before the run starts, 1 for everything after.
    pub fn exit_code(&self) -> i32 {
        match self {
            MobilityError::InvalidDate { .. }
            | MobilityError::InvalidDateRange { .. }
            | MobilityError::InvalidArgument { .. } => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, MobilityError>;
