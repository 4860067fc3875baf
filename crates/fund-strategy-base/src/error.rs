use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StrategyError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: {msg}")]
    Unauthorized { msg: String },

    #[error("InvalidState: {msg}")]
    InvalidState { msg: String },

    #[error("Insufficient: {msg}")]
    Insufficient { msg: String },

    #[error("Restricted: {msg}")]
    Restricted { msg: String },
}

impl StrategyError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        StrategyError::Unauthorized { msg: msg.into() }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        StrategyError::InvalidState { msg: msg.into() }
    }

    pub fn insufficient(msg: impl Into<String>) -> Self {
        StrategyError::Insufficient { msg: msg.into() }
    }

    pub fn restricted(msg: impl Into<String>) -> Self {
        StrategyError::Restricted { msg: msg.into() }
    }
}
