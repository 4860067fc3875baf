use crate::state::{StrategyRecord, STRATEGIES};
use cosmwasm_std::{Deps, Env, StdError, StdResult, Uint128};
use fund_strategy_base::{strategy, token};

/// Everything the fund owns at a point in time:
/// the idle underlying and the valuation of each strategy, in insertion order.
#[derive(Debug)]
pub struct Holdings {
    pub idle: Uint128,
    pub strategies: Vec<(StrategyRecord, Uint128)>,
}

impl Holdings {
    /// Query the idle balance and every strategy's `InvestedUnderlyingBalance`.
    pub fn load(deps: Deps, env: &Env) -> StdResult<Self> {
        let idle = token::query_balance(&deps, env)?;
        let strategies = STRATEGIES
            .load(deps.storage)?
            .into_iter()
            .map(|record| {
                let balance =
                    strategy::query_invested_underlying_balance(&deps.querier, &record.strategy)?;
                Ok((record, balance))
            })
            .collect::<StdResult<Vec<_>>>()?;
        Ok(Self { idle, strategies })
    }

    /// `idle + Σ strategy valuations`
    pub fn total_value_locked(&self) -> StdResult<Uint128> {
        self.strategies
            .iter()
            .try_fold(self.idle, |total, (_, balance)| total.checked_add(*balance))
            .map_err(StdError::from)
    }
}

/// Net asset value of the fund: the TVL against the shares in circulation.
///
/// Every conversion truncates, so rounding dust always stays with the fund.
#[derive(Debug, Clone, PartialEq)]
pub struct Nav {
    total_value_locked: Uint128,
    total_supply: Uint128,
    unit: Uint128,
}

fn ratio(value: Uint128, numerator: Uint128, denominator: Uint128) -> StdResult<Uint128> {
    value
        .checked_multiply_ratio(numerator, denominator)
        .map_err(|e| StdError::generic_err(e.to_string()))
}

impl Nav {
    pub fn new(total_value_locked: Uint128, total_supply: Uint128, unit: Uint128) -> Self {
        Self {
            total_value_locked,
            total_supply,
            unit,
        }
    }

    pub fn total_value_locked(&self) -> Uint128 {
        self.total_value_locked
    }

    pub fn total_supply(&self) -> Uint128 {
        self.total_supply
    }

    /// `unit` for an empty fund, else `TVL * unit / total_supply`
    pub fn price_per_share(&self) -> StdResult<Uint128> {
        if self.total_supply.is_zero() {
            return Ok(self.unit);
        }
        ratio(self.total_value_locked, self.unit, self.total_supply)
    }

    /// Shares minted for a deposit of `amount`, valued before the deposit lands.
    /// The first deposit into an empty fund mints exactly `amount`.
    pub fn shares_for_deposit(&self, amount: Uint128) -> StdResult<Uint128> {
        if self.total_supply.is_zero() {
            return Ok(amount);
        }
        ratio(amount, self.total_supply, self.total_value_locked)
    }

    /// `shares * price_per_share / unit`
    pub fn underlying_from_shares(&self, shares: Uint128) -> StdResult<Uint128> {
        ratio(shares, self.price_per_share()?, self.unit)
    }

    /// Shares worth `amount` of underlying at the current price per share.
    /// A drained fund (price per share truncated to 0) mints nothing.
    pub fn shares_from_underlying(&self, amount: Uint128) -> StdResult<Uint128> {
        let price_per_share = self.price_per_share()?;
        if amount.is_zero() || price_per_share.is_zero() {
            return Ok(Uint128::zero());
        }
        ratio(amount, self.unit, price_per_share)
    }

    /// Account for newly minted shares, the TVL is unchanged.
    pub fn mint(&mut self, shares: Uint128) -> StdResult<()> {
        self.total_supply = self
            .total_supply
            .checked_add(shares)
            .map_err(StdError::from)?;
        Ok(())
    }
}
