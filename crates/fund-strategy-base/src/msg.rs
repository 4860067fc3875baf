use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

/// Strategy `ExecuteMsg`, to be implemented by every strategy contract.
/// The fund (or optimizer) owning the strategy drives it exclusively through these messages.
#[cw_serde]
pub enum StrategyExecuteMsg {
    /// ExecuteMsg DoHardWork invests the idle balance of the strategy according to its own logic.
    /// Callable by the owning fund, the fund manager or the relayer.
    DoHardWork {},

    /// ExecuteMsg WithdrawToFund liquidates `amount` of the position and transfers it to the owner.
    /// Only callable by the owning fund (single writer per position).
    WithdrawToFund { amount: Uint128 },

    /// ExecuteMsg WithdrawAllToFund liquidates the whole position and transfers it to the owner.
    /// Only callable by the owning fund (single writer per position).
    WithdrawAllToFund {},

    /// ExecuteMsg SetInvestActivated pauses (or resumes) new investment.
    /// Harvesting and withdrawals are still permitted while paused.
    SetInvestActivated { activated: bool },

    /// ExecuteMsg Sweep transfers the whole balance of a non-core `token` to `recipient`.
    /// Governance only, the strategy's own underlying (and reward tokens) can never be swept.
    Sweep { token: String, recipient: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum StrategyQueryMsg {
    /// QueryMsg Fund: the owner of the strategy, immutable after instantiation.
    #[returns(Addr)]
    Fund {},

    /// QueryMsg Underlying: the CW20 asset of the strategy, always the owner's asset.
    #[returns(Addr)]
    Underlying {},

    /// QueryMsg InvestedUnderlyingBalance: the current valuation of the position in underlying units.
    #[returns(Uint128)]
    InvestedUnderlyingBalance {},

    /// QueryMsg Apr: estimated annualized return, only used to compare strategies.
    #[returns(Uint128)]
    Apr {},

    /// QueryMsg Creator: the address receiving the creator fee of this strategy.
    #[returns(Addr)]
    Creator {},

    #[returns(bool)]
    InvestActivated {},

    /// QueryMsg Name: adapter label of the strategy.
    #[returns(String)]
    Name {},

    /// QueryMsg CanNotSweep: whether `token` is restricted from [StrategyExecuteMsg::Sweep].
    #[returns(bool)]
    CanNotSweep { token: String },
}

/// Both the Fund & the Optimizer own strategies.
/// Strategies resolve their roles by querying their owner with [FundQueryMsg],
/// so both owners must answer this subset with the same JSON shape.
#[cw_serde]
#[derive(QueryResponses)]
pub enum FundQueryMsg {
    #[returns(Addr)]
    Governance {},

    #[returns(Addr)]
    FundManager {},

    #[returns(Addr)]
    Relayer {},

    #[returns(Addr)]
    Underlying {},
}
