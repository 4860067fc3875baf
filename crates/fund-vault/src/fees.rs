//! The fee waterfall applied to each strategy's profit on hard work,
//! and the time-prorated platform fee on the TVL.
//!
//! Fees are charged in underlying terms and paid out by minting shares,
//! so existing holders are diluted by exactly the fee value.

use crate::nav::Nav;
use cosmwasm_std::{StdError, StdResult, Uint128};
use fund_library::time::YEAR;

pub const MAX_BPS: u16 = 10_000;

fn bps_of(amount: Uint128, bps: u16) -> StdResult<Uint128> {
    amount
        .checked_multiply_ratio(bps, MAX_BPS)
        .map_err(|e| StdError::generic_err(e.to_string()))
}

/// `profit * fee_bps / 10000`, returned with the profit left after it.
pub fn creator_fee(profit: Uint128, fee_bps: u16) -> StdResult<(Uint128, Uint128)> {
    let fee = bps_of(profit, fee_bps)?;
    Ok((fee, profit.checked_sub(fee).map_err(StdError::from)?))
}

/// `remaining_profit * performance_fee_bps / 10000`
pub fn fund_manager_fee(remaining_profit: Uint128, performance_fee_bps: u16) -> StdResult<Uint128> {
    bps_of(remaining_profit, performance_fee_bps)
}

/// `TVL * platform_fee_bps * elapsed / (10000 * YEAR)`
pub fn platform_fee(
    total_value_locked: Uint128,
    platform_fee_bps: u16,
    elapsed_seconds: u64,
) -> StdResult<Uint128> {
    let numerator = Uint128::from(platform_fee_bps)
        .checked_mul(Uint128::from(elapsed_seconds))
        .map_err(StdError::from)?;
    let denominator = Uint128::from(MAX_BPS)
        .checked_mul(Uint128::from(YEAR))
        .map_err(StdError::from)?;
    total_value_locked
        .checked_multiply_ratio(numerator, denominator)
        .map_err(|e| StdError::generic_err(e.to_string()))
}

/// Outcome of charging one strategy's profit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StrategyFees {
    pub profit: Uint128,
    pub creator_fee: Uint128,
    pub creator_shares: Uint128,
    pub remaining_profit: Uint128,
    pub fund_manager_fee: Uint128,
    pub fund_manager_shares: Uint128,
}

/// Charge the creator fee then the fund manager fee on `profit`.
///
/// Each fee is converted to shares at the price per share observed before its own mint,
/// `nav` is updated with both mints.
pub fn charge_strategy_fees(
    nav: &mut Nav,
    profit: Uint128,
    fee_bps: u16,
    performance_fee_bps: u16,
) -> StdResult<StrategyFees> {
    let (creator_fee, remaining_profit) = creator_fee(profit, fee_bps)?;
    let creator_shares = nav.shares_from_underlying(creator_fee)?;
    nav.mint(creator_shares)?;

    let fund_manager_fee = fund_manager_fee(remaining_profit, performance_fee_bps)?;
    let fund_manager_shares = nav.shares_from_underlying(fund_manager_fee)?;
    nav.mint(fund_manager_shares)?;

    Ok(StrategyFees {
        profit,
        creator_fee,
        creator_shares,
        remaining_profit,
        fund_manager_fee,
        fund_manager_shares,
    })
}
