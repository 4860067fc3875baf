#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::set_contract_version;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{ACTIVE, DEPLOYER, NAME, STRATEGIES};
use fund_strategy_base::setup::setup_strategy;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_NAME: &str = "OptimizerStrategy";

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    let (fund, underlying) = setup_strategy(&mut deps, &msg.fund, None)?;
    let name = msg.name.unwrap_or(DEFAULT_NAME.to_string());

    STRATEGIES.save(deps.storage, &vec![])?;
    ACTIVE.save(deps.storage, &None)?;
    DEPLOYER.save(deps.storage, &info.sender)?;
    NAME.save(deps.storage, &name)?;

    Ok(Response::new()
        .add_attribute("method", "instantiate")
        .add_attribute("fund", fund)
        .add_attribute("underlying", underlying)
        .add_attribute("deployer", info.sender)
        .add_attribute("name", name))
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
        ExecuteMsg::AddStrategy { strategy } => execute::add_strategy(deps, env, info, strategy),
        ExecuteMsg::RemoveStrategy { strategy } => {
            execute::remove_strategy(deps, env, info, strategy)
        }
        ExecuteMsg::InvestIdle {} => execute::invest_idle(deps, env, info),
        ExecuteMsg::TransferIdleToFund {} => execute::transfer_idle_to_fund(deps, env, info),
    }
}

mod execute {
    use crate::msg::ExecuteMsg;
    use crate::selection;
    use crate::state::{ACTIVE, STRATEGIES};
    use crate::ContractError;
    use cosmwasm_std::{
        to_json_binary, Addr, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, StdResult,
        Uint128, WasmMsg,
    };
    use fund_strategy_base::{auth, invest, strategy, sweep, token, StrategyError};

    fn callback(env: &Env, msg: &ExecuteMsg) -> StdResult<CosmosMsg> {
        Ok(WasmMsg::Execute {
            contract_addr: env.contract.address.to_string(),
            msg: to_json_binary(msg)?,
            funds: vec![],
        }
        .into())
    }

    fn assert_self(env: &Env, info: &MessageInfo) -> Result<(), ContractError> {
        if info.sender != env.contract.address {
            return Err(StrategyError::unauthorized("Only callable by the optimizer itself").into());
        }
        Ok(())
    }

    /// Point [ACTIVE] at the member with the highest apr.
    ///
    /// When invest is activated, every other member holding a position is withdrawn
    /// and the idle balance is invested into the active member by [ExecuteMsg::InvestIdle].
    /// When it is not, positions stay where they are.
    fn reselect(
        deps: &mut DepsMut,
        env: &Env,
        members: &[Addr],
    ) -> Result<(Vec<CosmosMsg>, Vec<Event>), ContractError> {
        let current = ACTIVE
            .load(deps.storage)?
            .filter(|active| members.contains(active));

        let candidates = members
            .iter()
            .map(|member| Ok((member.clone(), strategy::query_apr(&deps.querier, member)?)))
            .collect::<StdResult<Vec<_>>>()?;
        let winner = selection::select(&candidates, current.as_ref());
        ACTIVE.save(deps.storage, &winner)?;

        let mut events = vec![];
        let Some(winner) = winner else {
            return Ok((vec![], events));
        };
        if current.as_ref() != Some(&winner) {
            events.push(
                Event::new("ActiveStrategyChangedOptimizer")
                    .add_attribute("strategy", winner.to_string()),
            );
        }

        let mut messages = vec![];
        if invest::is_invest_activated(deps.storage)? {
            for member in members.iter().filter(|member| **member != winner) {
                if !strategy::query_invested_underlying_balance(&deps.querier, member)?.is_zero() {
                    messages.push(strategy::withdraw_all_to_fund(member)?);
                }
            }
            messages.push(callback(env, &ExecuteMsg::InvestIdle {})?);
        }
        Ok((messages, events))
    }

    pub fn do_hard_work(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_or_manager_or_relayer(&deps.as_ref(), &info)?;

        let members = STRATEGIES.load(deps.storage)?;
        let (messages, events) = reselect(&mut deps, &env, &members)?;

        Ok(Response::new()
            .add_event(Event::new("DoHardWork").add_attribute("sender", info.sender.to_string()))
            .add_events(events)
            .add_messages(messages))
    }

    /// Move the idle balance into the active member and let it invest.
    pub fn invest_idle(deps: DepsMut, env: Env, info: MessageInfo) -> Result<Response, ContractError> {
        assert_self(&env, &info)?;

        let mut response = Response::new();
        if !invest::is_invest_activated(deps.storage)? {
            return Ok(response);
        }
        let Some(active) = ACTIVE.load(deps.storage)? else {
            return Ok(response);
        };

        let idle = token::query_balance(&deps.as_ref(), &env)?;
        if !idle.is_zero() {
            response = response.add_message(token::execute_new_transfer(deps.storage, &active, idle)?);
        }
        Ok(response
            .add_event(
                Event::new("InvestIdle")
                    .add_attribute("strategy", active.to_string())
                    .add_attribute("amount", idle.to_string()),
            )
            .add_message(strategy::do_hard_work(&active)?))
    }

    /// Transfer `amount` to the fund: idle first, then the active member, then the others.
    pub fn withdraw_to_fund(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        amount: Uint128,
    ) -> Result<Response, ContractError> {
        auth::assert_fund(deps.storage, &info)?;

        let idle = token::query_balance(&deps.as_ref(), &env)?;
        let mut remaining = amount.saturating_sub(idle);

        let members = STRATEGIES.load(deps.storage)?;
        let active = ACTIVE.load(deps.storage)?;
        let ordered = active
            .iter()
            .chain(members.iter().filter(|member| Some(*member) != active.as_ref()));

        let mut messages = vec![];
        for member in ordered {
            if remaining.is_zero() {
                break;
            }
            let invested = strategy::query_invested_underlying_balance(&deps.querier, member)?;
            if invested.is_zero() {
                continue;
            }
            if invested <= remaining {
                messages.push(strategy::withdraw_all_to_fund(member)?);
                remaining -= invested;
            } else {
                messages.push(strategy::withdraw_to_fund(member, remaining)?);
                remaining = Uint128::zero();
            }
        }
        if !remaining.is_zero() {
            return Err(StrategyError::insufficient("Not enough liquidity").into());
        }

        if !amount.is_zero() {
            messages.push(token::execute_new_transfer(deps.storage, &info.sender, amount)?);
        }

        Ok(Response::new()
            .add_event(Event::new("WithdrawToFund").add_attribute("amount", amount.to_string()))
            .add_messages(messages))
    }

    /// Every member withdraws everything, then [ExecuteMsg::TransferIdleToFund]
    /// sends the whole idle balance to the fund.
    pub fn withdraw_all_to_fund(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_fund(deps.storage, &info)?;

        let mut messages = vec![];
        for member in STRATEGIES.load(deps.storage)? {
            if !strategy::query_invested_underlying_balance(&deps.querier, &member)?.is_zero() {
                messages.push(strategy::withdraw_all_to_fund(&member)?);
            }
        }
        messages.push(callback(&env, &ExecuteMsg::TransferIdleToFund {})?);

        Ok(Response::new()
            .add_event(Event::new("WithdrawAllToFund"))
            .add_messages(messages))
    }

    pub fn transfer_idle_to_fund(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        assert_self(&env, &info)?;

        let fund = auth::get_fund(deps.storage)?;
        let idle = token::query_balance(&deps.as_ref(), &env)?;

        let mut response = Response::new().add_event(
            Event::new("TransferIdleToFund").add_attribute("amount", idle.to_string()),
        );
        if !idle.is_zero() {
            response = response.add_message(token::execute_new_transfer(deps.storage, &fund, idle)?);
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
        let underlying = token::get_underlying(deps.storage)?;
        sweep::assert_can_sweep(&[underlying], &token)?;
        Ok(sweep::sweep(deps.as_ref(), &env, &token, &recipient)?)
    }

    pub fn add_strategy(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
        new_strategy: String,
    ) -> Result<Response, ContractError> {
        auth::assert_governance_or_fund_manager(&deps.as_ref(), &info)?;

        if new_strategy.trim().is_empty() {
            return Err(StrategyError::invalid_state("newStrategy cannot be empty").into());
        }
        let new_strategy = deps.api.addr_validate(&new_strategy)?;
        if strategy::query_fund(&deps.querier, &new_strategy)? != env.contract.address {
            return Err(StrategyError::invalid_state(
                "The strategy does not belong to this optimizer",
            )
            .into());
        }

        let mut members = STRATEGIES.load(deps.storage)?;
        if members.contains(&new_strategy) {
            return Err(StrategyError::invalid_state(
                "The strategy is already added in this optimizer",
            )
            .into());
        }
        members.push(new_strategy.clone());
        STRATEGIES.save(deps.storage, &members)?;

        let (messages, events) = reselect(&mut deps, &env, &members)?;

        Ok(Response::new()
            .add_event(
                Event::new("StrategyAddedOptimizer")
                    .add_attribute("strategy", new_strategy.to_string()),
            )
            .add_events(events)
            .add_messages(messages))
    }

    pub fn remove_strategy(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
        old_strategy: String,
    ) -> Result<Response, ContractError> {
        auth::assert_governance_or_fund_manager(&deps.as_ref(), &info)?;

        let old_strategy = deps.api.addr_validate(&old_strategy)?;
        let mut members = STRATEGIES.load(deps.storage)?;
        let index = members
            .iter()
            .position(|member| *member == old_strategy)
            .ok_or(StrategyError::invalid_state(
                "The strategy is not added in this optimizer",
            ))?;
        members.remove(index);
        STRATEGIES.save(deps.storage, &members)?;

        // the removed position lands in idle before the callback re-reads it
        let withdraw_msg = strategy::withdraw_all_to_fund(&old_strategy)?;
        let (messages, events) = reselect(&mut deps, &env, &members)?;

        Ok(Response::new()
            .add_event(
                Event::new("StrategyRemovedOptimizer")
                    .add_attribute("strategy", old_strategy.to_string()),
            )
            .add_events(events)
            .add_message(withdraw_msg)
            .add_messages(messages))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    use fund_strategy_base::{auth, invest, token};

    match msg {
        QueryMsg::Fund {} => to_json_binary(&auth::get_fund(deps.storage)?),
        QueryMsg::Underlying {} => to_json_binary(&token::get_underlying(deps.storage)?),
        QueryMsg::InvestedUnderlyingBalance {} => {
            to_json_binary(&query::invested_underlying_balance(deps, &env)?)
        }
        QueryMsg::Apr {} => to_json_binary(&query::apr(deps)?),
        QueryMsg::Creator {} => to_json_binary(&query::creator(deps)?),
        QueryMsg::InvestActivated {} => to_json_binary(&invest::is_invest_activated(deps.storage)?),
        QueryMsg::Name {} => to_json_binary(&NAME.load(deps.storage)?),
        QueryMsg::CanNotSweep { token: candidate } => {
            let candidate = deps.api.addr_validate(&candidate)?;
            to_json_binary(&(candidate == token::get_underlying(deps.storage)?))
        }
        QueryMsg::Governance {} => to_json_binary(&auth::query_governance(&deps)?),
        QueryMsg::FundManager {} => to_json_binary(&auth::query_fund_manager(&deps)?),
        QueryMsg::Relayer {} => to_json_binary(&auth::query_relayer(&deps)?),
        QueryMsg::ActiveStrategy {} => to_json_binary(&ACTIVE.load(deps.storage)?),
        QueryMsg::Strategies {} => to_json_binary(&query::strategies(deps)?),
        QueryMsg::Deployer {} => to_json_binary(&DEPLOYER.load(deps.storage)?),
    }
}

mod query {
    use crate::msg::StrategyInfo;
    use crate::state::{ACTIVE, DEPLOYER, STRATEGIES};
    use cosmwasm_std::{Addr, Deps, Env, StdError, StdResult, Uint128};
    use fund_strategy_base::{strategy, token};

    /// `idle + Σ members`
    pub fn invested_underlying_balance(deps: Deps, env: &Env) -> StdResult<Uint128> {
        let idle = token::query_balance(&deps, env)?;
        STRATEGIES
            .load(deps.storage)?
            .iter()
            .try_fold(idle, |total, member| {
                let invested = strategy::query_invested_underlying_balance(&deps.querier, member)?;
                total.checked_add(invested).map_err(StdError::from)
            })
    }

    pub fn apr(deps: Deps) -> StdResult<Uint128> {
        match ACTIVE.load(deps.storage)? {
            Some(active) => strategy::query_apr(&deps.querier, &active),
            None => Ok(Uint128::zero()),
        }
    }

    /// The member holding the largest position, the active member on a tie.
    /// Falls back to the active member when no member holds anything.
    ///
    /// While invest is deactivated the position can stay in a member that is no longer active.
    fn funded(deps: Deps) -> StdResult<Option<Addr>> {
        let members = STRATEGIES.load(deps.storage)?;
        let active = ACTIVE.load(deps.storage)?;
        let ordered = active
            .iter()
            .chain(members.iter().filter(|member| Some(*member) != active.as_ref()));

        let mut funded: Option<(&Addr, Uint128)> = None;
        for member in ordered {
            let invested = strategy::query_invested_underlying_balance(&deps.querier, member)?;
            match funded {
                Some((_, largest)) if invested <= largest => {}
                _ if invested.is_zero() => {}
                _ => funded = Some((member, invested)),
            }
        }
        Ok(funded.map(|(member, _)| member.clone()).or(active))
    }

    /// Creator of the member that earned the profit, the deployer while there is none.
    pub fn creator(deps: Deps) -> StdResult<Addr> {
        match funded(deps)? {
            Some(member) => strategy::query_creator(&deps.querier, &member),
            None => DEPLOYER.load(deps.storage),
        }
    }

    pub fn strategies(deps: Deps) -> StdResult<Vec<StrategyInfo>> {
        STRATEGIES
            .load(deps.storage)?
            .into_iter()
            .map(|address| {
                Ok(StrategyInfo {
                    name: strategy::query_name(&deps.querier, &address)?,
                    invested: strategy::query_invested_underlying_balance(&deps.querier, &address)?,
                    apr: strategy::query_apr(&deps.querier, &address)?,
                    address,
                })
            })
            .collect()
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    cw2::ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
