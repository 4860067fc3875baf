use crate::fees::MAX_BPS;
use crate::nav::Holdings;
use cosmwasm_std::{Addr, StdError, StdResult, Uint128};

/// Movement of underlying required to bring one strategy to its target weight.
/// At most one of `invest` and `divest` is non-zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Allocation {
    pub strategy: Addr,
    pub current: Uint128,
    pub target: Uint128,
    pub invest: Uint128,
    pub divest: Uint128,
}

/// Target of every strategy is `TVL * weightage / 10000`, in insertion order.
/// Whatever the weights leave unallocated stays idle in the fund.
pub fn plan(holdings: &Holdings) -> StdResult<Vec<Allocation>> {
    let total_value_locked = holdings.total_value_locked()?;

    holdings
        .strategies
        .iter()
        .map(|(record, current)| {
            let target = total_value_locked
                .checked_multiply_ratio(record.weightage_bps, MAX_BPS)
                .map_err(|e| StdError::generic_err(e.to_string()))?;
            let (invest, divest) = if target > *current {
                (target - *current, Uint128::zero())
            } else {
                (Uint128::zero(), *current - target)
            };
            Ok(Allocation {
                strategy: record.strategy.clone(),
                current: *current,
                target,
                invest,
                divest,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StrategyRecord;
    use cosmwasm_std::testing::MockApi;

    fn holdings(idle: u128, strategies: &[(&str, u16, u128)]) -> Holdings {
        let api = MockApi::default();
        Holdings {
            idle: Uint128::new(idle),
            strategies: strategies
                .iter()
                .map(|(name, weightage_bps, balance)| {
                    (
                        StrategyRecord {
                            strategy: api.addr_make(name),
                            weightage_bps: *weightage_bps,
                            fee_bps: 0,
                            accounted_balance: Uint128::new(*balance),
                        },
                        Uint128::new(*balance),
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn test_plan_first_allocation() {
        let plan = plan(&holdings(50_000_000, &[("a", 5000, 0)])).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan[0].target, Uint128::new(25_000_000));
        assert_eq!(plan[0].invest, Uint128::new(25_000_000));
        assert_eq!(plan[0].divest, Uint128::zero());
    }

    #[test]
    fn test_plan_invest_and_divest() {
        // TVL 100: a holds 70 with 40% target, b holds 0 with 50% target
        let plan = plan(&holdings(30, &[("a", 4000, 70), ("b", 5000, 0)])).unwrap();

        assert_eq!(plan[0].target, Uint128::new(40));
        assert_eq!(plan[0].divest, Uint128::new(30));
        assert_eq!(plan[0].invest, Uint128::zero());

        assert_eq!(plan[1].target, Uint128::new(50));
        assert_eq!(plan[1].invest, Uint128::new(50));
        assert_eq!(plan[1].divest, Uint128::zero());
    }

    #[test]
    fn test_plan_zero_weight_divests_all() {
        let plan = plan(&holdings(0, &[("a", 0, 70)])).unwrap();
        assert_eq!(plan[0].divest, Uint128::new(70));
    }

    #[test]
    fn test_plan_on_target() {
        let plan = plan(&holdings(50, &[("a", 5000, 50)])).unwrap();
        assert_eq!(plan[0].invest, Uint128::zero());
        assert_eq!(plan[0].divest, Uint128::zero());
    }
}
