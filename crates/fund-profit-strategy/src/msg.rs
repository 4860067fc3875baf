use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// The owner of the strategy, a Fund or an Optimizer.
    pub fund: String,
    pub apr: Uint128,
    /// When set, must be the owner's underlying.
    pub underlying: Option<String>,
    /// Token earned by the position, it can't be swept.
    pub reward_token: Option<String>,
}

/// Accepts every [fund_strategy_base::msg::StrategyExecuteMsg] with the same JSON shape,
/// plus knobs to simulate a position.
#[cw_serde]
pub enum ExecuteMsg {
    DoHardWork {},

    WithdrawToFund { amount: Uint128 },

    WithdrawAllToFund {},

    SetInvestActivated { activated: bool },

    Sweep { token: String, recipient: String },

    /// ExecuteMsg SetApr reported by [QueryMsg::Apr], governance or fund manager.
    SetApr { apr: Uint128 },

    /// ExecuteMsg SetLocked makes `amount` of the position impossible to liquidate,
    /// governance or fund manager.
    SetLocked { amount: Uint128 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Addr)]
    Fund {},

    #[returns(Addr)]
    Underlying {},

    #[returns(Uint128)]
    InvestedUnderlyingBalance {},

    #[returns(Uint128)]
    Apr {},

    #[returns(Addr)]
    Creator {},

    #[returns(bool)]
    InvestActivated {},

    #[returns(String)]
    Name {},

    #[returns(bool)]
    CanNotSweep { token: String },

    #[returns(Option<Addr>)]
    RewardToken {},

    #[returns(Uint128)]
    Locked {},
}

#[cw_serde]
pub struct MigrateMsg {}
