use cosmwasm_std::{OverflowError, StdError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Governance(#[from] fund_library::governance::GovernanceError),

    #[error("{0}")]
    Strategy(#[from] fund_strategy_base::StrategyError),

    #[error("{0}")]
    Cw20Base(#[from] cw20_base::ContractError),

    #[error("{0}")]
    Payment(#[from] cw_utils::PaymentError),

    #[error("{0}")]
    Overflow(#[from] OverflowError),

    #[error("Unauthorized: {msg}")]
    Unauthorized { msg: String },

    #[error("InvalidState: {msg}")]
    InvalidState { msg: String },

    #[error("Insufficient: {msg}")]
    Insufficient { msg: String },
}

impl ContractError {
    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ContractError::Unauthorized { msg: msg.into() }
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        ContractError::InvalidState { msg: msg.into() }
    }

    pub fn insufficient(msg: impl Into<String>) -> Self {
        ContractError::Insufficient { msg: msg.into() }
    }
}
