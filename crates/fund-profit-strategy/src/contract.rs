#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult, Uint128,
};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{APR, CREATOR, LOCKED, REWARD_TOKEN};
use fund_strategy_base::setup::setup_strategy;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const NAME: &str = "ProfitStrategy";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let (fund, underlying) = setup_strategy(&mut deps, &msg.fund, msg.underlying.as_deref())?;

    let reward_token = msg
        .reward_token
        .map(|token| deps.api.addr_validate(&token))
        .transpose()?;

    APR.save(deps.storage, &msg.apr)?;
    CREATOR.save(deps.storage, &info.sender)?;
    REWARD_TOKEN.save(deps.storage, &reward_token)?;
    LOCKED.save(deps.storage, &Uint128::zero())?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("fund", fund)
        .add_attribute("underlying", underlying)
        .add_attribute("creator", info.sender)
        .add_attribute("apr", msg.apr))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    cw_utils::nonpayable(&info)?;

    match msg {
        ExecuteMsg::DoHardWork {} => execute::do_hard_work(deps, env, info),
        ExecuteMsg::WithdrawToFund { amount } => {
            execute::withdraw_to_fund(deps, env, info, amount)
        }
        ExecuteMsg::WithdrawAllToFund {} => execute::withdraw_all_to_fund(deps, env, info),
        ExecuteMsg::SetInvestActivated { activated } => {
            execute::set_invest_activated(deps, info, activated)
        }
        ExecuteMsg::Sweep { token, recipient } => execute::sweep(deps, env, info, token, recipient),
        ExecuteMsg::SetApr { apr } => execute::set_apr(deps, info, apr),
        ExecuteMsg::SetLocked { amount } => execute::set_locked(deps, info, amount),
    }
}

mod execute {
    use crate::state::{APR, LOCKED};
    use crate::ContractError;
    use cosmwasm_std::{DepsMut, Env, Event, MessageInfo, Response, Uint128};
    use fund_strategy_base::{auth, invest, sweep, token, StrategyError};

    /// The position is the underlying held by the contract, there is nothing to invest into.
    pub fn do_hard_work(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_or_manager_or_relayer(&deps.as_ref(), &info)?;

        let balance = token::query_balance(&deps.as_ref(), &env)?;
        Ok(Response::new().add_event(
            Event::new("DoHardWork")
                .add_attribute("sender", info.sender.to_string())
                .add_attribute("invested", balance.to_string()),
        ))
    }

    fn liquid_balance(deps: &DepsMut, env: &Env) -> Result<(Uint128, Uint128), ContractError> {
        let balance = token::query_balance(&deps.as_ref(), env)?;
        let locked = LOCKED.load(deps.storage)?;
        Ok((balance, balance.saturating_sub(locked)))
    }

    pub fn withdraw_to_fund(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        amount: Uint128,
    ) -> Result<Response, ContractError> {
        auth::assert_fund(deps.storage, &info)?;

        let (_, liquid) = liquid_balance(&deps, &env)?;
        if amount > liquid {
            return Err(StrategyError::insufficient("Not enough liquidity").into());
        }

        let mut response = Response::new().add_event(
            Event::new("WithdrawToFund").add_attribute("amount", amount.to_string()),
        );
        if !amount.is_zero() {
            response =
                response.add_message(token::execute_new_transfer(deps.storage, &info.sender, amount)?);
        }
        Ok(response)
    }

    pub fn withdraw_all_to_fund(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_fund(deps.storage, &info)?;

        let (balance, liquid) = liquid_balance(&deps, &env)?;
        if liquid < balance {
            return Err(StrategyError::insufficient("Not enough liquidity").into());
        }

        let mut response = Response::new().add_event(
            Event::new("WithdrawAllToFund").add_attribute("amount", balance.to_string()),
        );
        if !balance.is_zero() {
            response = response.add_message(token::execute_new_transfer(
                deps.storage,
                &info.sender,
                balance,
            )?);
        }
        Ok(response)
    }

    pub fn set_invest_activated(
        deps: DepsMut,
        info: MessageInfo,
        activated: bool,
    ) -> Result<Response, ContractError> {
        auth::assert_governance_or_fund_manager(&deps.as_ref(), &info)?;
        let event = invest::set_invest_activated(deps.storage, activated)?;
        Ok(Response::new().add_event(event))
    }

    pub fn sweep(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        token: String,
        recipient: String,
    ) -> Result<Response, ContractError> {
        auth::assert_governance(&deps.as_ref(), &info)?;

        let (token, recipient) = sweep::validate(deps.api, &token, &recipient)?;
        sweep::assert_can_sweep(&super::restricted_tokens(deps.as_ref())?, &token)?;
        Ok(sweep::sweep(deps.as_ref(), &env, &token, &recipient)?)
    }

    pub fn set_apr(
        deps: DepsMut,
        info: MessageInfo,
        apr: Uint128,
    ) -> Result<Response, ContractError> {
        auth::assert_governance_or_fund_manager(&deps.as_ref(), &info)?;
        APR.save(deps.storage, &apr)?;

        Ok(Response::new().add_event(Event::new("AprUpdated").add_attribute("apr", apr.to_string())))
    }

    pub fn set_locked(
        deps: DepsMut,
        info: MessageInfo,
        amount: Uint128,
    ) -> Result<Response, ContractError> {
        auth::assert_governance_or_fund_manager(&deps.as_ref(), &info)?;
        LOCKED.save(deps.storage, &amount)?;

        Ok(Response::new()
            .add_event(Event::new("LockedUpdated").add_attribute("amount", amount.to_string())))
    }
}

/// The underlying and the reward token, if any.
fn restricted_tokens(deps: Deps) -> StdResult<Vec<Addr>> {
    let mut restricted = vec![fund_strategy_base::token::get_underlying(deps.storage)?];
    if let Some(reward_token) = REWARD_TOKEN.load(deps.storage)? {
        restricted.push(reward_token);
    }
    Ok(restricted)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    use fund_strategy_base::{auth, invest, token};

    match msg {
        QueryMsg::Fund {} => to_json_binary(&auth::get_fund(deps.storage)?),
        QueryMsg::Underlying {} => to_json_binary(&token::get_underlying(deps.storage)?),
        QueryMsg::InvestedUnderlyingBalance {} => {
            to_json_binary(&token::query_balance(&deps, &env)?)
        }
        QueryMsg::Apr {} => to_json_binary(&APR.load(deps.storage)?),
        QueryMsg::Creator {} => to_json_binary(&CREATOR.load(deps.storage)?),
        QueryMsg::InvestActivated {} => to_json_binary(&invest::is_invest_activated(deps.storage)?),
        QueryMsg::Name {} => to_json_binary(NAME),
        QueryMsg::CanNotSweep { token } => {
            let token = deps.api.addr_validate(&token)?;
            to_json_binary(&restricted_tokens(deps)?.contains(&token))
        }
        QueryMsg::RewardToken {} => to_json_binary(&REWARD_TOKEN.load(deps.storage)?),
        QueryMsg::Locked {} => to_json_binary(&LOCKED.load(deps.storage)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    cw2::ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
