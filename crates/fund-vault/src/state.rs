use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, StdError, StdResult, Storage, Timestamp, Uint128};
use cw_storage_plus::Item;

/// A strategy the fund allocates to, kept in insertion order.
#[cw_serde]
pub struct StrategyRecord {
    pub strategy: Addr,
    /// Target share of the TVL in basis points.
    pub weightage_bps: u16,
    /// Creator fee charged on this strategy's profit, in basis points.
    pub fee_bps: u16,
    /// The valuation of the strategy the fund last accounted for.
    /// Profit on the next hard work is measured against it.
    pub accounted_balance: Uint128,
}

#[cw_serde]
pub struct FeeConfig {
    /// Fund manager fee on profit left after the creator fee.
    pub performance_fee_bps: u16,
    /// Annualized platform fee on the TVL, prorated by elapsed time.
    pub platform_fee_bps: u16,
    /// Recipient of the platform fee, the current governance when `None`.
    pub platform_rewards: Option<Addr>,
}

pub const STRATEGIES: Item<Vec<StrategyRecord>> = Item::new("strategies");

/// `10^decimals` of the underlying, fixed at instantiate.
pub const UNIT: Item<Uint128> = Item::new("unit");

pub const FUND_MANAGER: Item<Addr> = Item::new("fund_manager");

pub const RELAYER: Item<Addr> = Item::new("relayer");

/// 0 means unlimited.
pub const DEPOSIT_LIMIT: Item<Uint128> = Item::new("deposit_limit");

pub const DEPOSITS_PAUSED: Item<bool> = Item::new("deposits_paused");

pub const SHOULD_REBALANCE: Item<bool> = Item::new("should_rebalance");

pub const FEE_CONFIG: Item<FeeConfig> = Item::new("fee_config");

pub const LAST_PLATFORM_FEE_CHARGE: Item<Timestamp> = Item::new("last_platform_fee_charge");

/// Position of `strategy` in [STRATEGIES], if active.
pub fn find_strategy(records: &[StrategyRecord], strategy: &Addr) -> Option<usize> {
    records.iter().position(|r| &r.strategy == strategy)
}

/// Sum of all weightages, widened so an overflow past 10000 stays visible.
pub fn total_weightage(records: &[StrategyRecord]) -> u32 {
    records.iter().map(|r| u32::from(r.weightage_bps)).sum()
}

pub fn get_fund_manager(storage: &dyn Storage) -> StdResult<Addr> {
    FUND_MANAGER
        .may_load(storage)?
        .ok_or(StdError::not_found("fund_manager"))
}

pub fn get_relayer(storage: &dyn Storage) -> StdResult<Addr> {
    RELAYER
        .may_load(storage)?
        .ok_or(StdError::not_found("relayer"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::{mock_dependencies, MockApi};

    fn record(name: &str, weightage_bps: u16) -> StrategyRecord {
        StrategyRecord {
            strategy: MockApi::default().addr_make(name),
            weightage_bps,
            fee_bps: 0,
            accounted_balance: Uint128::zero(),
        }
    }

    #[test]
    fn test_find_strategy() {
        let records = vec![record("a", 1000), record("b", 2000)];
        let b = MockApi::default().addr_make("b");
        let c = MockApi::default().addr_make("c");

        assert_eq!(find_strategy(&records, &b), Some(1));
        assert_eq!(find_strategy(&records, &c), None);
    }

    #[test]
    fn test_total_weightage() {
        assert_eq!(total_weightage(&[]), 0);
        let records = vec![record("a", 6000), record("b", 4000), record("c", 1)];
        assert_eq!(total_weightage(&records), 10001);
    }

    #[test]
    fn test_get_fund_manager_not_set() {
        let deps = mock_dependencies();
        assert_eq!(
            get_fund_manager(&deps.storage).unwrap_err(),
            StdError::not_found("fund_manager")
        );
    }
}
