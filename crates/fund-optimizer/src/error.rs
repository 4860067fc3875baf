use cosmwasm_std::StdError;
use fund_strategy_base::StrategyError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("{0}")]
    Strategy(#[from] StrategyError),

    #[error("{0}")]
    Payment(#[from] cw_utils::PaymentError),
}
