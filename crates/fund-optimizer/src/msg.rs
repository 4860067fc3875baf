use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};

#[cw_serde]
pub struct InstantiateMsg {
    /// The owning fund, the optimizer's underlying is the fund's underlying.
    pub fund: String,
    /// Defaults to `OptimizerStrategy`.
    pub name: Option<String>,
}

/// Accepts every [fund_strategy_base::msg::StrategyExecuteMsg] with the same JSON shape.
#[cw_serde]
pub enum ExecuteMsg {
    /// ExecuteMsg DoHardWork re-selects the member with the highest apr,
    /// migrates the position to it and invests the idle balance.
    DoHardWork {},

    WithdrawToFund { amount: Uint128 },

    WithdrawAllToFund {},

    SetInvestActivated { activated: bool },

    Sweep { token: String, recipient: String },

    /// ExecuteMsg AddStrategy appends a member, it must be owned by this optimizer.
    /// Governance or fund manager.
    AddStrategy { strategy: String },

    /// ExecuteMsg RemoveStrategy withdraws everything from a member and drops it.
    /// Governance or fund manager.
    RemoveStrategy { strategy: String },

    /// Callback investing the idle balance into the active member,
    /// only callable by the optimizer itself.
    InvestIdle {},

    /// Callback of [ExecuteMsg::WithdrawAllToFund], only callable by the optimizer itself.
    TransferIdleToFund {},
}

#[cw_serde]
pub struct StrategyInfo {
    pub name: String,
    pub address: Addr,
    pub invested: Uint128,
    pub apr: Uint128,
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Addr)]
    Fund {},

    #[returns(Addr)]
    Underlying {},

    /// QueryMsg InvestedUnderlyingBalance: idle balance plus every member's valuation.
    #[returns(Uint128)]
    InvestedUnderlyingBalance {},

    /// QueryMsg Apr: the apr of the active member, 0 without one.
    #[returns(Uint128)]
    Apr {},

    /// QueryMsg Creator: the creator of the active member, the deployer without one.
    #[returns(Addr)]
    Creator {},

    #[returns(bool)]
    InvestActivated {},

    #[returns(String)]
    Name {},

    #[returns(bool)]
    CanNotSweep { token: String },

    /// QueryMsg Governance: forwarded to the owning fund, members resolve roles through it.
    #[returns(Addr)]
    Governance {},

    #[returns(Addr)]
    FundManager {},

    #[returns(Addr)]
    Relayer {},

    #[returns(Option<Addr>)]
    ActiveStrategy {},

    #[returns(Vec<StrategyInfo>)]
    Strategies {},

    #[returns(Addr)]
    Deployer {},
}

#[cw_serde]
pub struct MigrateMsg {}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::{from_json, to_json_binary};
    use fund_strategy_base::msg::{FundQueryMsg, StrategyExecuteMsg, StrategyQueryMsg};

    #[test]
    fn test_answers_owner_queries() {
        for (owner_msg, msg) in [
            (FundQueryMsg::Governance {}, QueryMsg::Governance {}),
            (FundQueryMsg::FundManager {}, QueryMsg::FundManager {}),
            (FundQueryMsg::Relayer {}, QueryMsg::Relayer {}),
            (FundQueryMsg::Underlying {}, QueryMsg::Underlying {}),
        ] {
            let decoded: QueryMsg = from_json(to_json_binary(&owner_msg).unwrap()).unwrap();
            assert_eq!(decoded, msg);
        }
    }

    #[test]
    fn test_accepts_strategy_messages() {
        let decoded: ExecuteMsg =
            from_json(to_json_binary(&StrategyExecuteMsg::WithdrawAllToFund {}).unwrap()).unwrap();
        assert_eq!(decoded, ExecuteMsg::WithdrawAllToFund {});

        let decoded: QueryMsg = from_json(to_json_binary(&StrategyQueryMsg::Apr {}).unwrap()).unwrap();
        assert_eq!(decoded, QueryMsg::Apr {});
    }
}
