use cosmwasm_std::{
    to_json_binary, Addr, CosmosMsg, Deps, Env, QueryRequest, StdError, StdResult, Storage,
    Uint128, WasmMsg, WasmQuery,
};
use cw20::{BalanceResponse, Cw20ExecuteMsg, Cw20QueryMsg, TokenInfoResponse};
use cw_storage_plus::Item;

const UNDERLYING: Item<Addr> = Item::new("underlying");

/// Set the underlying token of the contract during instantiation
/// This is internal, no checks are done
pub fn set_underlying(storage: &mut dyn Storage, underlying: &Addr) -> StdResult<()> {
    UNDERLYING.save(storage, underlying)
}

/// Get the underlying token of the contract from storage
pub fn get_underlying(storage: &dyn Storage) -> StdResult<Addr> {
    UNDERLYING.load(storage)
}

/// Get the token info of the underlying token
pub fn get_token_info(deps: &Deps) -> StdResult<TokenInfoResponse> {
    let token_addr = UNDERLYING.load(deps.storage)?;
    deps.querier.query(
        &WasmQuery::Smart {
            contract_addr: token_addr.to_string(),
            msg: to_json_binary(&Cw20QueryMsg::TokenInfo {})?,
        }
        .into(),
    )
}

/// One whole underlying token in base units, `10^decimals`.
/// Price per share is scaled by this unit.
pub fn get_unit(deps: &Deps) -> StdResult<Uint128> {
    let decimals = get_token_info(deps)?.decimals;
    Uint128::new(10)
        .checked_pow(decimals.into())
        .map_err(StdError::from)
}

/// Get the underlying token balance of the contract (aka idle balance)
pub fn query_balance(deps: &Deps, env: &Env) -> StdResult<Uint128> {
    let token_addr = UNDERLYING.load(deps.storage)?;
    query_balance_of(deps, &token_addr, &env.contract.address)
}

/// Get the balance of `address` for any CW20 `token`
pub fn query_balance_of(deps: &Deps, token: &Addr, address: &Addr) -> StdResult<Uint128> {
    let query = WasmQuery::Smart {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20QueryMsg::Balance {
            address: address.to_string(),
        })?,
    };

    let res: BalanceResponse = deps.querier.query(&QueryRequest::Wasm(query))?;
    Ok(res.balance)
}

/// New transfer (sub_message) of the underlying to recipient
pub fn execute_new_transfer(
    storage: &dyn Storage,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    let token_addr = UNDERLYING.load(storage)?;
    transfer(&token_addr, recipient, amount)
}

/// New transfer (sub_message) of any CW20 `token` to recipient
pub fn transfer(token: &Addr, recipient: &Addr, amount: Uint128) -> StdResult<CosmosMsg> {
    Ok(WasmMsg::Execute {
        contract_addr: token.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::Transfer {
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }
    .into())
}

/// New transfer_from (sub_message) of the underlying from owner to recipient
pub fn execute_transfer_from(
    storage: &dyn Storage,
    owner: &Addr,
    recipient: &Addr,
    amount: Uint128,
) -> StdResult<CosmosMsg> {
    let underlying = UNDERLYING.load(storage)?;

    Ok(WasmMsg::Execute {
        contract_addr: underlying.to_string(),
        msg: to_json_binary(&Cw20ExecuteMsg::TransferFrom {
            owner: owner.to_string(),
            recipient: recipient.to_string(),
            amount,
        })?,
        funds: vec![],
    }
    .into())
}
