use crate::msg::{StrategyExecuteMsg, StrategyQueryMsg};
use cosmwasm_std::{to_json_binary, Addr, CosmosMsg, QuerierWrapper, StdResult, Uint128, WasmMsg};

fn execute(strategy: &Addr, msg: &StrategyExecuteMsg) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: strategy.to_string(),
        msg: to_json_binary(msg)?,
        funds: vec![],
    }
    .into())
}

/// New `DoHardWork` (sub_message) to `strategy`
pub fn do_hard_work(strategy: &Addr) -> StdResult<CosmosMsg> {
    execute(strategy, &StrategyExecuteMsg::DoHardWork {})
}

/// New `WithdrawToFund` (sub_message) to `strategy`
pub fn withdraw_to_fund(strategy: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    execute(strategy, &StrategyExecuteMsg::WithdrawToFund { amount })
}

/// New `WithdrawAllToFund` (sub_message) to `strategy`
pub fn withdraw_all_to_fund(strategy: &Addr) -> StdResult<CosmosMsg> {
    execute(strategy, &StrategyExecuteMsg::WithdrawAllToFund {})
}

pub fn query_fund(querier: &QuerierWrapper, strategy: &Addr) -> StdResult<Addr> {
    querier.query_wasm_smart(strategy.to_string(), &StrategyQueryMsg::Fund {})
}

pub fn query_underlying(querier: &QuerierWrapper, strategy: &Addr) -> StdResult<Addr> {
    querier.query_wasm_smart(strategy.to_string(), &StrategyQueryMsg::Underlying {})
}

/// Current valuation of the position held by `strategy`
pub fn query_invested_underlying_balance(
    querier: &QuerierWrapper,
    strategy: &Addr,
) -> StdResult<Uint128> {
    querier.query_wasm_smart(
        strategy.to_string(),
        &StrategyQueryMsg::InvestedUnderlyingBalance {},
    )
}

pub fn query_apr(querier: &QuerierWrapper, strategy: &Addr) -> StdResult<Uint128> {
    querier.query_wasm_smart(strategy.to_string(), &StrategyQueryMsg::Apr {})
}

pub fn query_creator(querier: &QuerierWrapper, strategy: &Addr) -> StdResult<Addr> {
    querier.query_wasm_smart(strategy.to_string(), &StrategyQueryMsg::Creator {})
}

pub fn query_name(querier: &QuerierWrapper, strategy: &Addr) -> StdResult<String> {
    querier.query_wasm_smart(strategy.to_string(), &StrategyQueryMsg::Name {})
}
