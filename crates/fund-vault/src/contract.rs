#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdError, StdResult,
    Uint128,
};
use cw2::set_contract_version;
use cw20_base::contract::instantiate as base_instantiate;

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg};
use crate::state::{self, FeeConfig};
use crate::upgrade;
use fund_strategy_base::token;

const CONTRACT_NAME: &str = concat!("crates.io:", env!("CARGO_PKG_NAME"));
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    mut deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    let underlying = deps.api.addr_validate(&msg.underlying)?;
    token::set_underlying(deps.storage, &underlying)?;

    // Assert that the underlying is a CW20 the fund can query,
    // shares use the same decimals.
    let underlying_info = token::get_token_info(&deps.as_ref())?;
    let unit = token::get_unit(&deps.as_ref())?;
    state::UNIT.save(deps.storage, &unit)?;

    let governance = match msg.governance {
        Some(governance) => deps.api.addr_validate(&governance)?,
        None => info.sender.clone(),
    };
    let fund_manager = match msg.fund_manager {
        Some(fund_manager) => deps.api.addr_validate(&fund_manager)?,
        None => governance.clone(),
    };
    let relayer = match msg.relayer {
        Some(relayer) => deps.api.addr_validate(&relayer)?,
        None => governance.clone(),
    };
    fund_library::governance::set_governance(deps.storage, &governance)?;
    state::FUND_MANAGER.save(deps.storage, &fund_manager)?;
    state::RELAYER.save(deps.storage, &relayer)?;

    state::STRATEGIES.save(deps.storage, &vec![])?;
    state::DEPOSIT_LIMIT.save(deps.storage, &Uint128::zero())?;
    state::DEPOSITS_PAUSED.save(deps.storage, &false)?;
    state::SHOULD_REBALANCE.save(deps.storage, &false)?;
    state::FEE_CONFIG.save(
        deps.storage,
        &FeeConfig {
            performance_fee_bps: 0,
            platform_fee_bps: 0,
            platform_rewards: None,
        },
    )?;
    state::LAST_PLATFORM_FEE_CHARGE.save(deps.storage, &env.block.time)?;

    let upgrade_delay = msg
        .upgrade_delay
        .unwrap_or(upgrade::DEFAULT_UPGRADE_DELAY);
    upgrade::instantiate(deps.storage, upgrade_delay)?;

    let response = base_instantiate(
        deps.branch(),
        env,
        info,
        cw20_base::msg::InstantiateMsg {
            name: msg.name,
            symbol: msg.symbol,
            decimals: underlying_info.decimals,
            initial_balances: vec![],
            mint: None,
            marketing: None,
        },
    )?;

    // cw20-base sets its own version, the fund's must be the one recorded
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(response
        .add_attribute("method", "instantiate")
        .add_attribute("underlying", underlying)
        .add_attribute("governance", governance)
        .add_attribute("fund_manager", fund_manager)
        .add_attribute("relayer", relayer)
        .add_attribute("upgrade_delay", upgrade_delay.to_string()))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Transfer { recipient, amount } => share_token::execute_base(
            deps,
            env,
            info,
            cw20_base::msg::ExecuteMsg::Transfer { recipient, amount },
        ),
        ExecuteMsg::Send {
            contract,
            amount,
            msg,
        } => share_token::execute_base(
            deps,
            env,
            info,
            cw20_base::msg::ExecuteMsg::Send {
                contract,
                amount,
                msg,
            },
        ),
        ExecuteMsg::IncreaseAllowance {
            spender,
            amount,
            expires,
        } => share_token::execute_base(
            deps,
            env,
            info,
            cw20_base::msg::ExecuteMsg::IncreaseAllowance {
                spender,
                amount,
                expires,
            },
        ),
        ExecuteMsg::DecreaseAllowance {
            spender,
            amount,
            expires,
        } => share_token::execute_base(
            deps,
            env,
            info,
            cw20_base::msg::ExecuteMsg::DecreaseAllowance {
                spender,
                amount,
                expires,
            },
        ),
        ExecuteMsg::TransferFrom {
            owner,
            recipient,
            amount,
        } => share_token::execute_base(
            deps,
            env,
            info,
            cw20_base::msg::ExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount,
            },
        ),
        ExecuteMsg::SendFrom {
            owner,
            contract,
            amount,
            msg,
        } => share_token::execute_base(
            deps,
            env,
            info,
            cw20_base::msg::ExecuteMsg::SendFrom {
                owner,
                contract,
                amount,
                msg,
            },
        ),
        msg => {
            cw_utils::nonpayable(&info)?;
            fund_execute::execute(deps, env, info, msg)
        }
    }
}

/// cw20 compliant share messages are passed to the `cw20-base` contract.
/// Shares are only ever minted and burned by the fund itself.
mod share_token {
    use crate::ContractError;
    use cosmwasm_std::{Addr, DepsMut, Env, MessageInfo, Response, StdResult, Uint128};
    use cw20_base::allowances::{
        execute_decrease_allowance, execute_increase_allowance, execute_send_from,
        execute_transfer_from,
    };
    use cw20_base::contract::{execute_send, execute_transfer};
    use cw20_base::state::{BALANCES as SHARE_BALANCES, TOKEN_INFO as SHARE_TOKEN_INFO};

    /// Mint `amount` shares to `recipient` without a minter check,
    /// returns the new total supply.
    pub fn mint(deps: DepsMut, recipient: &Addr, amount: Uint128) -> StdResult<Uint128> {
        let mut config = SHARE_TOKEN_INFO.load(deps.storage)?;
        config.total_supply = config.total_supply.checked_add(amount)?;
        SHARE_TOKEN_INFO.save(deps.storage, &config)?;

        SHARE_BALANCES.update(
            deps.storage,
            recipient,
            |balance: Option<Uint128>| -> StdResult<_> {
                Ok(balance.unwrap_or_default().checked_add(amount)?)
            },
        )?;
        Ok(config.total_supply)
    }

    pub fn total_supply(deps: cosmwasm_std::Deps) -> StdResult<Uint128> {
        Ok(SHARE_TOKEN_INFO.load(deps.storage)?.total_supply)
    }

    pub fn execute_base(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: cw20_base::msg::ExecuteMsg,
    ) -> Result<Response, ContractError> {
        let response = match msg {
            cw20_base::msg::ExecuteMsg::Transfer { recipient, amount } => {
                execute_transfer(deps, env, info, recipient, amount)
            }
            cw20_base::msg::ExecuteMsg::Send {
                contract,
                amount,
                msg,
            } => execute_send(deps, env, info, contract, amount, msg),
            cw20_base::msg::ExecuteMsg::IncreaseAllowance {
                spender,
                amount,
                expires,
            } => execute_increase_allowance(deps, env, info, spender, amount, expires),
            cw20_base::msg::ExecuteMsg::DecreaseAllowance {
                spender,
                amount,
                expires,
            } => execute_decrease_allowance(deps, env, info, spender, amount, expires),
            cw20_base::msg::ExecuteMsg::TransferFrom {
                owner,
                recipient,
                amount,
            } => execute_transfer_from(deps, env, info, owner, recipient, amount),
            cw20_base::msg::ExecuteMsg::SendFrom {
                owner,
                contract,
                amount,
                msg,
            } => execute_send_from(deps, env, info, owner, contract, amount, msg),
            _ => Err(cw20_base::ContractError::Unauthorized {}),
        }?;
        Ok(response)
    }
}

mod fund_execute {
    use super::share_token;
    use crate::allocation::{self, Allocation};
    use crate::auth;
    use crate::error::ContractError;
    use crate::fees::{self, MAX_BPS};
    use crate::msg::{ExecuteMsg, MigrateMsg};
    use crate::nav::{Holdings, Nav};
    use crate::state::{self, StrategyRecord};
    use crate::upgrade;
    use cosmwasm_std::{
        to_json_binary, CosmosMsg, DepsMut, Env, Event, MessageInfo, Response, StdError,
        Uint128, WasmMsg,
    };
    use cw20_base::contract::execute_burn as share_burn;
    use cw20_base::contract::query_balance as query_share_balance;
    use fund_library::governance;
    use fund_strategy_base::{strategy, token};

    pub fn execute(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        msg: ExecuteMsg,
    ) -> Result<Response, ContractError> {
        match msg {
            ExecuteMsg::Deposit { amount } => deposit(deps, env, info, amount),
            ExecuteMsg::Withdraw { shares } => withdraw(deps, env, info, shares),
            ExecuteMsg::DoHardWork {} => do_hard_work(deps, env, info),
            ExecuteMsg::CompleteHardWork {} => complete_hard_work(deps, env, info),
            ExecuteMsg::Rebalance {} => rebalance(deps, env, info),
            ExecuteMsg::AddStrategy {
                strategy,
                weightage_bps,
                fee_bps,
            } => add_strategy(deps, env, info, strategy, weightage_bps, fee_bps),
            ExecuteMsg::RemoveStrategy { strategy } => remove_strategy(deps, info, strategy),
            ExecuteMsg::UpdateStrategyWeightage {
                strategy,
                weightage_bps,
            } => update_strategy_weightage(deps, info, strategy, weightage_bps),
            ExecuteMsg::SetShouldRebalance { should_rebalance } => {
                set_should_rebalance(deps, info, should_rebalance)
            }
            ExecuteMsg::SetFundManager { fund_manager } => set_fund_manager(deps, info, fund_manager),
            ExecuteMsg::SetRelayer { relayer } => set_relayer(deps, info, relayer),
            ExecuteMsg::SetPerformanceFeeFund { fee_bps } => {
                set_performance_fee_fund(deps, info, fee_bps)
            }
            ExecuteMsg::SetPlatformFee { fee_bps } => set_platform_fee(deps, info, fee_bps),
            ExecuteMsg::SetPlatformRewards { recipient } => {
                set_platform_rewards(deps, info, recipient)
            }
            ExecuteMsg::SetDepositLimit { limit } => set_deposit_limit(deps, info, limit),
            ExecuteMsg::PauseDeposits { paused } => pause_deposits(deps, info, paused),
            ExecuteMsg::UpdateGovernance { new_governance } => {
                governance::update_governance(deps.api, deps.storage, &info, &new_governance)
                    .map_err(Into::into)
            }
            ExecuteMsg::AcceptGovernance {} => {
                governance::accept_governance(deps.storage, &info).map_err(Into::into)
            }
            ExecuteMsg::ScheduleUpgrade { new_code_id } => {
                schedule_upgrade(deps, env, info, new_code_id)
            }
            ExecuteMsg::Upgrade { expected_code_id } => {
                finalize_upgrade(deps, env, info, expected_code_id)
            }
            _ => Err(StdError::generic_err("Share token messages are handled by the share token").into()),
        }
    }

    /// Transfer `amount` of underlying from the sender (pre-approved allowance) and
    /// mint shares valued at the TVL before the deposit.
    ///
    /// ### CW20 Variant Warning
    ///
    /// Underlying assets with a fee-on-transfer mechanism are not supported,
    /// shares are minted for the full `amount`.
    pub fn deposit(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
        amount: Uint128,
    ) -> Result<Response, ContractError> {
        if amount.is_zero() {
            return Err(ContractError::invalid_state("Amount should be greater than 0"));
        }
        if state::DEPOSITS_PAUSED.load(deps.storage)? {
            return Err(ContractError::invalid_state("Deposits are paused"));
        }

        let holdings = Holdings::load(deps.as_ref(), &env)?;
        let total_value_locked = holdings.total_value_locked()?;
        let limit = state::DEPOSIT_LIMIT.load(deps.storage)?;
        if !limit.is_zero() && total_value_locked.checked_add(amount)? > limit {
            return Err(ContractError::invalid_state("Deposit limit exceeded"));
        }

        let nav = Nav::new(
            total_value_locked,
            share_token::total_supply(deps.as_ref())?,
            state::UNIT.load(deps.storage)?,
        );
        let shares = nav.shares_for_deposit(amount)?;
        if shares.is_zero() {
            return Err(ContractError::invalid_state("Deposit too small to mint shares"));
        }

        let total_shares = share_token::mint(deps.branch(), &info.sender, shares)?;

        let transfer_msg = token::execute_transfer_from(
            deps.storage,
            &info.sender,
            &env.contract.address,
            amount,
        )?;

        Ok(Response::new()
            .add_event(
                Event::new("Deposit")
                    .add_attribute("user", info.sender.to_string())
                    .add_attribute("amount", amount.to_string())
                    .add_attribute("shares", shares.to_string())
                    .add_attribute("total_shares", total_shares.to_string()),
            )
            .add_message(transfer_msg))
    }

    /// Burn `shares` from the sender and transfer their value in underlying.
    ///
    /// The idle balance is used first, the shortfall is withdrawn from strategies in order.
    /// If strategies cannot cover it, the whole withdrawal fails.
    pub fn withdraw(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        shares: Uint128,
    ) -> Result<Response, ContractError> {
        let total_supply = share_token::total_supply(deps.as_ref())?;
        if total_supply.is_zero() {
            return Err(ContractError::invalid_state("Fund has no shares"));
        }
        if shares.is_zero() {
            return Err(ContractError::invalid_state("Shares should be greater than 0"));
        }
        let balance = query_share_balance(deps.as_ref(), info.sender.to_string())?.balance;
        if balance < shares {
            return Err(ContractError::insufficient("Not enough shares"));
        }

        let holdings = Holdings::load(deps.as_ref(), &env)?;
        let nav = Nav::new(
            holdings.total_value_locked()?,
            total_supply,
            state::UNIT.load(deps.storage)?,
        );
        let amount = nav.underlying_from_shares(shares)?;

        let mut messages: Vec<CosmosMsg> = vec![];
        if holdings.idle < amount {
            let mut remaining = amount.checked_sub(holdings.idle)?;
            let mut records = Vec::with_capacity(holdings.strategies.len());

            for (mut record, invested) in holdings.strategies {
                if !remaining.is_zero() && !invested.is_zero() {
                    let drawn = if invested <= remaining {
                        messages.push(strategy::withdraw_all_to_fund(&record.strategy)?);
                        invested
                    } else {
                        messages.push(strategy::withdraw_to_fund(&record.strategy, remaining)?);
                        remaining
                    };
                    // profit drawn before it was harvested is never charged,
                    // fees only apply to growth observed by CompleteHardWork
                    record.accounted_balance = record.accounted_balance.saturating_sub(drawn);
                    remaining = remaining.checked_sub(drawn)?;
                }
                records.push(record);
            }

            if !remaining.is_zero() {
                return Err(ContractError::insufficient(
                    "Not enough liquidity to cover the withdrawal",
                ));
            }
            state::STRATEGIES.save(deps.storage, &records)?;
        }

        messages.push(token::execute_new_transfer(
            deps.storage,
            &info.sender,
            amount,
        )?);

        // shares are burned before any underlying leaves the fund
        share_burn(deps, env, info.clone(), shares)?;

        Ok(Response::new()
            .add_event(
                Event::new("Withdraw")
                    .add_attribute("user", info.sender.to_string())
                    .add_attribute("shares", shares.to_string())
                    .add_attribute("amount", amount.to_string())
                    .add_attribute(
                        "total_shares",
                        total_supply.checked_sub(shares)?.to_string(),
                    ),
            )
            .add_messages(messages))
    }

    /// Move every strategy toward `TVL * weightage / 10000`.
    ///
    /// All divestments are ordered first so the idle balance covers the investments.
    /// Accounted balances move by the invested and divested deltas.
    fn reallocate(
        deps: &mut DepsMut,
        holdings: &Holdings,
        harvest_all: bool,
    ) -> Result<(Vec<CosmosMsg>, Vec<Allocation>), ContractError> {
        let plan = allocation::plan(holdings)?;

        let mut divest_msgs: Vec<CosmosMsg> = vec![];
        let mut invest_msgs: Vec<CosmosMsg> = vec![];
        let mut records: Vec<StrategyRecord> = Vec::with_capacity(plan.len());

        for ((record, _), allocation) in holdings.strategies.iter().zip(plan.iter()) {
            let mut record = record.clone();
            if !allocation.divest.is_zero() {
                divest_msgs.push(strategy::withdraw_to_fund(
                    &allocation.strategy,
                    allocation.divest,
                )?);
                record.accounted_balance = record
                    .accounted_balance
                    .saturating_sub(allocation.divest);
            }
            if !allocation.invest.is_zero() {
                invest_msgs.push(token::execute_new_transfer(
                    deps.storage,
                    &allocation.strategy,
                    allocation.invest,
                )?);
                record.accounted_balance =
                    record.accounted_balance.checked_add(allocation.invest)?;
            }
            if harvest_all || !allocation.invest.is_zero() {
                invest_msgs.push(strategy::do_hard_work(&allocation.strategy)?);
            }
            records.push(record);
        }

        state::STRATEGIES.save(deps.storage, &records)?;

        divest_msgs.extend(invest_msgs);
        Ok((divest_msgs, plan))
    }

    fn allocation_event(name: &str, allocation: &Allocation) -> Event {
        Event::new(name)
            .add_attribute("strategy", allocation.strategy.to_string())
            .add_attribute("current", allocation.current.to_string())
            .add_attribute("target", allocation.target.to_string())
    }

    /// Reallocate and harvest every strategy,
    /// fees are charged by the [ExecuteMsg::CompleteHardWork] callback once the
    /// strategies have run.
    pub fn do_hard_work(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager_or_relayer(deps.storage, &info)?;

        let holdings = Holdings::load(deps.as_ref(), &env)?;
        let (messages, plan) = reallocate(&mut deps, &holdings, true)?;

        let callback = WasmMsg::Execute {
            contract_addr: env.contract.address.to_string(),
            msg: to_json_binary(&ExecuteMsg::CompleteHardWork {})?,
            funds: vec![],
        };

        Ok(Response::new()
            .add_event(
                Event::new("DoHardWork")
                    .add_attribute("sender", info.sender.to_string())
                    .add_attribute(
                        "total_value_locked",
                        holdings.total_value_locked()?.to_string(),
                    ),
            )
            .add_events(plan.iter().map(|a| allocation_event("StrategyAllocation", a)))
            .add_messages(messages)
            .add_message(callback))
    }

    /// Re-read every valuation after the strategies ran and charge fees on the profit:
    /// the creator fee, then the fund manager fee, per strategy in order,
    /// then the time-prorated platform fee on the TVL.
    pub fn complete_hard_work(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_self(&env, &info)?;

        let holdings = Holdings::load(deps.as_ref(), &env)?;
        let total_value_locked = holdings.total_value_locked()?;
        let mut nav = Nav::new(
            total_value_locked,
            share_token::total_supply(deps.as_ref())?,
            state::UNIT.load(deps.storage)?,
        );
        let fee_config = state::FEE_CONFIG.load(deps.storage)?;
        let fund_manager = state::get_fund_manager(deps.storage)?;

        let mut events: Vec<Event> = vec![];
        let mut records: Vec<StrategyRecord> = Vec::with_capacity(holdings.strategies.len());

        for (mut record, balance) in holdings.strategies {
            let profit = balance.saturating_sub(record.accounted_balance);
            record.accounted_balance = balance;

            if !profit.is_zero() {
                let charged = fees::charge_strategy_fees(
                    &mut nav,
                    profit,
                    record.fee_bps,
                    fee_config.performance_fee_bps,
                )?;

                if !charged.creator_shares.is_zero() {
                    let creator = strategy::query_creator(&deps.querier, &record.strategy)?;
                    share_token::mint(deps.branch(), &creator, charged.creator_shares)?;
                }
                if !charged.fund_manager_shares.is_zero() {
                    share_token::mint(deps.branch(), &fund_manager, charged.fund_manager_shares)?;
                }

                events.push(
                    Event::new("StrategyRewards")
                        .add_attribute("strategy", record.strategy.to_string())
                        .add_attribute("profit", charged.profit.to_string())
                        .add_attribute("creator_fee", charged.creator_shares.to_string()),
                );
                events.push(
                    Event::new("FundManagerRewards")
                        .add_attribute("profit", charged.remaining_profit.to_string())
                        .add_attribute("fund_fee", charged.fund_manager_shares.to_string()),
                );
            }
            records.push(record);
        }
        state::STRATEGIES.save(deps.storage, &records)?;

        let last_charge = state::LAST_PLATFORM_FEE_CHARGE.load(deps.storage)?;
        let elapsed = env.block.time.seconds().saturating_sub(last_charge.seconds());
        if fee_config.platform_fee_bps > 0 {
            let fee = fees::platform_fee(total_value_locked, fee_config.platform_fee_bps, elapsed)?;
            let shares = nav.shares_from_underlying(fee)?;
            nav.mint(shares)?;

            let recipient = match fee_config.platform_rewards {
                Some(recipient) => recipient,
                None => governance::get_governance(deps.storage)?,
            };
            if !shares.is_zero() {
                share_token::mint(deps.branch(), &recipient, shares)?;
            }

            events.push(
                Event::new("PlatformRewards")
                    .add_attribute("tvl", total_value_locked.to_string())
                    .add_attribute("elapsed", elapsed.to_string())
                    .add_attribute("fee", fee.to_string())
                    .add_attribute("shares", shares.to_string())
                    .add_attribute("recipient", recipient.to_string()),
            );
        }
        state::LAST_PLATFORM_FEE_CHARGE.save(deps.storage, &env.block.time)?;

        events.push(
            Event::new("HardWorkDone")
                .add_attribute("total_value_locked", total_value_locked.to_string())
                .add_attribute("price_per_share", nav.price_per_share()?.to_string()),
        );

        Ok(Response::new().add_events(events))
    }

    /// Reallocate toward the target weights without harvesting or charging fees.
    pub fn rebalance(
        mut deps: DepsMut,
        env: Env,
        info: MessageInfo,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager_or_relayer(deps.storage, &info)?;
        if !state::SHOULD_REBALANCE.load(deps.storage)? {
            return Err(ContractError::invalid_state("Rebalance is not enabled"));
        }

        let holdings = Holdings::load(deps.as_ref(), &env)?;
        let (messages, plan) = reallocate(&mut deps, &holdings, false)?;

        Ok(Response::new()
            .add_event(
                Event::new("Rebalance")
                    .add_attribute("sender", info.sender.to_string())
                    .add_attribute(
                        "total_value_locked",
                        holdings.total_value_locked()?.to_string(),
                    ),
            )
            .add_events(plan.iter().map(|a| allocation_event("StrategyAllocation", a)))
            .add_messages(messages))
    }

    fn assert_bps(bps: u16, what: &str) -> Result<(), ContractError> {
        if bps > MAX_BPS {
            return Err(ContractError::invalid_state(format!(
                "{what} cannot exceed {MAX_BPS}"
            )));
        }
        Ok(())
    }

    pub fn add_strategy(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        strategy: String,
        weightage_bps: u16,
        fee_bps: u16,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager(deps.storage, &info)?;

        let strategy = deps.api.addr_validate(&strategy)?;
        if strategy::query_fund(&deps.querier, &strategy)? != env.contract.address {
            return Err(ContractError::invalid_state(
                "The strategy does not belong to this fund",
            ));
        }
        if strategy::query_underlying(&deps.querier, &strategy)?
            != token::get_underlying(deps.storage)?
        {
            return Err(ContractError::invalid_state("Underlying do not match"));
        }
        assert_bps(fee_bps, "Fee")?;

        let mut records = state::STRATEGIES.load(deps.storage)?;
        if state::find_strategy(&records, &strategy).is_some() {
            return Err(ContractError::invalid_state(
                "This strategy is already active in this fund",
            ));
        }
        if state::total_weightage(&records) + u32::from(weightage_bps) > u32::from(MAX_BPS) {
            return Err(ContractError::invalid_state(
                "Total weightage cannot exceed 10000",
            ));
        }

        // a position the strategy already holds is not profit of this fund
        let accounted_balance =
            strategy::query_invested_underlying_balance(&deps.querier, &strategy)?;
        records.push(StrategyRecord {
            strategy: strategy.clone(),
            weightage_bps,
            fee_bps,
            accounted_balance,
        });
        state::STRATEGIES.save(deps.storage, &records)?;

        Ok(Response::new().add_event(
            Event::new("StrategyAdded")
                .add_attribute("strategy", strategy.to_string())
                .add_attribute("weightage", weightage_bps.to_string())
                .add_attribute("fee", fee_bps.to_string()),
        ))
    }

    /// Remove `strategy` and pull its whole position back to the fund,
    /// the TVL is unchanged.
    pub fn remove_strategy(
        deps: DepsMut,
        info: MessageInfo,
        strategy: String,
    ) -> Result<Response, ContractError> {
        auth::assert_governance_or_fund_manager(deps.storage, &info)?;

        let strategy = deps.api.addr_validate(&strategy)?;
        let mut records = state::STRATEGIES.load(deps.storage)?;
        let index = state::find_strategy(&records, &strategy).ok_or(
            ContractError::invalid_state("This strategy is not active in this fund"),
        )?;
        records.remove(index);
        state::STRATEGIES.save(deps.storage, &records)?;

        Ok(Response::new()
            .add_event(
                Event::new("StrategyRemoved").add_attribute("strategy", strategy.to_string()),
            )
            .add_message(strategy::withdraw_all_to_fund(&strategy)?))
    }

    pub fn update_strategy_weightage(
        deps: DepsMut,
        info: MessageInfo,
        strategy: String,
        weightage_bps: u16,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager(deps.storage, &info)?;

        let strategy = deps.api.addr_validate(&strategy)?;
        let mut records = state::STRATEGIES.load(deps.storage)?;
        let index = state::find_strategy(&records, &strategy).ok_or(
            ContractError::invalid_state("This strategy is not active in this fund"),
        )?;
        records[index].weightage_bps = weightage_bps;
        if state::total_weightage(&records) > u32::from(MAX_BPS) {
            return Err(ContractError::invalid_state(
                "Total weightage cannot exceed 10000",
            ));
        }
        state::STRATEGIES.save(deps.storage, &records)?;

        Ok(Response::new().add_event(
            Event::new("StrategyWeightageUpdated")
                .add_attribute("strategy", strategy.to_string())
                .add_attribute("weightage", weightage_bps.to_string()),
        ))
    }

    pub fn set_should_rebalance(
        deps: DepsMut,
        info: MessageInfo,
        should_rebalance: bool,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager(deps.storage, &info)?;
        state::SHOULD_REBALANCE.save(deps.storage, &should_rebalance)?;

        Ok(Response::new().add_event(
            Event::new("ShouldRebalanceUpdated")
                .add_attribute("should_rebalance", should_rebalance.to_string()),
        ))
    }

    pub fn set_fund_manager(
        deps: DepsMut,
        info: MessageInfo,
        fund_manager: String,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;
        let fund_manager = deps.api.addr_validate(&fund_manager)?;
        state::FUND_MANAGER.save(deps.storage, &fund_manager)?;

        Ok(Response::new().add_event(
            Event::new("FundManagerUpdated")
                .add_attribute("fund_manager", fund_manager.to_string()),
        ))
    }

    pub fn set_relayer(
        deps: DepsMut,
        info: MessageInfo,
        relayer: String,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager(deps.storage, &info)?;
        let relayer = deps.api.addr_validate(&relayer)?;
        state::RELAYER.save(deps.storage, &relayer)?;

        Ok(Response::new()
            .add_event(Event::new("RelayerUpdated").add_attribute("relayer", relayer.to_string())))
    }

    pub fn set_performance_fee_fund(
        deps: DepsMut,
        info: MessageInfo,
        fee_bps: u16,
    ) -> Result<Response, ContractError> {
        auth::assert_fund_manager(deps.storage, &info)?;
        assert_bps(fee_bps, "Performance fee")?;
        state::FEE_CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
            config.performance_fee_bps = fee_bps;
            Ok(config)
        })?;

        Ok(Response::new().add_event(
            Event::new("PerformanceFeeFundUpdated").add_attribute("fee", fee_bps.to_string()),
        ))
    }

    pub fn set_platform_fee(
        deps: DepsMut,
        info: MessageInfo,
        fee_bps: u16,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;
        assert_bps(fee_bps, "Platform fee")?;
        state::FEE_CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
            config.platform_fee_bps = fee_bps;
            Ok(config)
        })?;

        Ok(Response::new()
            .add_event(Event::new("PlatformFeeUpdated").add_attribute("fee", fee_bps.to_string())))
    }

    pub fn set_platform_rewards(
        deps: DepsMut,
        info: MessageInfo,
        recipient: String,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;
        let recipient = deps.api.addr_validate(&recipient)?;
        state::FEE_CONFIG.update(deps.storage, |mut config| -> Result<_, ContractError> {
            config.platform_rewards = Some(recipient.clone());
            Ok(config)
        })?;

        Ok(Response::new().add_event(
            Event::new("PlatformRewardsUpdated")
                .add_attribute("recipient", recipient.to_string()),
        ))
    }

    pub fn set_deposit_limit(
        deps: DepsMut,
        info: MessageInfo,
        limit: Uint128,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;
        state::DEPOSIT_LIMIT.save(deps.storage, &limit)?;

        Ok(Response::new()
            .add_event(Event::new("DepositLimitUpdated").add_attribute("limit", limit.to_string())))
    }

    pub fn pause_deposits(
        deps: DepsMut,
        info: MessageInfo,
        paused: bool,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;
        state::DEPOSITS_PAUSED.save(deps.storage, &paused)?;

        Ok(Response::new()
            .add_event(Event::new("DepositsPaused").add_attribute("paused", paused.to_string())))
    }

    pub fn schedule_upgrade(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        new_code_id: u64,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;

        let current_code_id = upgrade::get_current_code_id(&deps.as_ref(), &env)?;
        let event = upgrade::schedule(deps.storage, env.block.time, current_code_id, new_code_id)?;

        Ok(Response::new().add_event(event))
    }

    /// Migrate the fund to the scheduled code id.
    /// The fund must be its own admin for the migration to be accepted.
    pub fn finalize_upgrade(
        deps: DepsMut,
        env: Env,
        info: MessageInfo,
        expected_code_id: u64,
    ) -> Result<Response, ContractError> {
        governance::assert_governance(deps.storage, &info)?;

        let new_code_id = upgrade::finalize(deps.storage, env.block.time, expected_code_id)?;

        Ok(Response::new()
            .add_event(
                Event::new("Upgraded").add_attribute("implementation", new_code_id.to_string()),
            )
            .add_message(WasmMsg::Migrate {
                contract_addr: env.contract.address.to_string(),
                new_code_id,
                msg: to_json_binary(&MigrateMsg {})?,
            }))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Underlying {} => to_json_binary(&token::get_underlying(deps.storage)?),
        QueryMsg::UnderlyingUnit {} => to_json_binary(&state::UNIT.load(deps.storage)?),
        QueryMsg::TotalValueLocked {} => to_json_binary(&fund_query::total_value_locked(deps, &env)?),
        QueryMsg::PricePerShare {} => to_json_binary(&fund_query::nav(deps, &env)?.price_per_share()?),
        QueryMsg::UnderlyingFromShares { shares } => {
            to_json_binary(&fund_query::nav(deps, &env)?.underlying_from_shares(shares)?)
        }
        QueryMsg::UnderlyingBalanceWithInvestmentForHolder { holder } => to_json_binary(
            &fund_query::underlying_balance_with_investment_for_holder(deps, &env, holder)?,
        ),
        QueryMsg::StrategyList {} => to_json_binary(&fund_query::strategy_list(deps)?),
        QueryMsg::Strategy { strategy } => to_json_binary(&fund_query::strategy(deps, strategy)?),
        QueryMsg::DepositLimit {} => to_json_binary(&state::DEPOSIT_LIMIT.load(deps.storage)?),
        QueryMsg::DepositsPaused {} => to_json_binary(&state::DEPOSITS_PAUSED.load(deps.storage)?),
        QueryMsg::ShouldRebalance {} => {
            to_json_binary(&state::SHOULD_REBALANCE.load(deps.storage)?)
        }
        QueryMsg::FeeConfig {} => to_json_binary(&state::FEE_CONFIG.load(deps.storage)?),
        QueryMsg::Governance {} => {
            to_json_binary(&fund_library::governance::get_governance(deps.storage)?)
        }
        QueryMsg::PendingGovernance {} => {
            to_json_binary(&fund_library::governance::get_pending_governance(deps.storage)?)
        }
        QueryMsg::FundManager {} => to_json_binary(&state::get_fund_manager(deps.storage)?),
        QueryMsg::Relayer {} => to_json_binary(&state::get_relayer(deps.storage)?),
        QueryMsg::Implementation {} => {
            to_json_binary(&upgrade::get_current_code_id(&deps, &env)?)
        }
        QueryMsg::UpgradeSchedule {} => to_json_binary(&upgrade::get_upgrade_state(deps.storage)?),
        msg => {
            let base_msg: cw20_base::msg::QueryMsg =
                msg.try_into().map_err(StdError::generic_err)?;
            cw20_base::contract::query(deps, env, base_msg)
        }
    }
}

mod fund_query {
    use crate::nav::{Holdings, Nav};
    use crate::state::{self, StrategyRecord};
    use cosmwasm_std::{Addr, Deps, Env, StdError, StdResult, Uint128};

    pub fn total_value_locked(deps: Deps, env: &Env) -> StdResult<Uint128> {
        Holdings::load(deps, env)?.total_value_locked()
    }

    pub fn nav(deps: Deps, env: &Env) -> StdResult<Nav> {
        Ok(Nav::new(
            total_value_locked(deps, env)?,
            super::share_token::total_supply(deps)?,
            state::UNIT.load(deps.storage)?,
        ))
    }

    /// The value in underlying of every share held by `holder`.
    pub fn underlying_balance_with_investment_for_holder(
        deps: Deps,
        env: &Env,
        holder: String,
    ) -> StdResult<Uint128> {
        let shares = cw20_base::contract::query_balance(deps, holder)?.balance;
        nav(deps, env)?.underlying_from_shares(shares)
    }

    pub fn strategy_list(deps: Deps) -> StdResult<Vec<Addr>> {
        Ok(state::STRATEGIES
            .load(deps.storage)?
            .into_iter()
            .map(|record| record.strategy)
            .collect())
    }

    pub fn strategy(deps: Deps, strategy: String) -> StdResult<StrategyRecord> {
        let strategy = deps.api.addr_validate(&strategy)?;
        state::STRATEGIES
            .load(deps.storage)?
            .into_iter()
            .find(|record| record.strategy == strategy)
            .ok_or(StdError::not_found("strategy"))
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    cw2::ensure_from_older_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    Ok(Response::default())
}
