use itemsync_client::ClientError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("remote error: {0}")]
    Remote(#[from] ClientError),

    #[error("{operation} matched {found} objects, expected exactly one")]
    AmbiguousMatch { operation: &'static str, found: usize },

    #[error("record has no remote identity")]
    MissingIdentity,

    /// A prototype's discovery rule is fixed once it exists.
    #[error("discovery rule of a prototype cannot change ({current} to {declared})")]
    RuleChanged { declared: String, current: String },

    #[error("record already created as {0}")]
    AlreadyCreated(String),
}

pub type EngineResult<T> = Result<T, EngineError>;
