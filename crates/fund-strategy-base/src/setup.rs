use crate::msg::FundQueryMsg;
use crate::{auth, token, StrategyError};
use cosmwasm_std::{Addr, DepsMut};

/// Validates and stores the owner and underlying of a strategy during `instantiate`.
///
/// - `fund` can't be empty, it is the owning Fund or Optimizer.
/// - The underlying is always the owner's underlying,
///   if `expected_underlying` is provided it must match.
pub fn setup_strategy(
    deps: &mut DepsMut,
    fund: &str,
    expected_underlying: Option<&str>,
) -> Result<(Addr, Addr), StrategyError> {
    if fund.trim().is_empty() {
        return Err(StrategyError::invalid_state("Fund cannot be empty"));
    }
    let fund = deps.api.addr_validate(fund)?;

    let underlying: Addr = deps
        .querier
        .query_wasm_smart(fund.to_string(), &FundQueryMsg::Underlying {})?;

    if let Some(expected) = expected_underlying {
        let expected = deps.api.addr_validate(expected)?;
        if expected != underlying {
            return Err(StrategyError::invalid_state("Underlying do not match"));
        }
    }

    auth::set_fund(deps.storage, &fund)?;
    token::set_underlying(deps.storage, &underlying)?;
    Ok((fund, underlying))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::mock_dependencies;
    use cosmwasm_std::{to_json_binary, ContractResult, SystemError, SystemResult, WasmQuery};

    #[test]
    fn test_setup_strategy() {
        let mut deps = mock_dependencies();
        let fund = deps.api.addr_make("fund");
        let underlying = deps.api.addr_make("underlying");

        let u = underlying.clone();
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { .. } => {
                SystemResult::Ok(ContractResult::Ok(to_json_binary(&u).unwrap()))
            }
            _ => SystemResult::Err(SystemError::Unknown {}),
        });

        let (f, u) = setup_strategy(&mut deps.as_mut(), fund.as_str(), None).unwrap();
        assert_eq!(f, fund);
        assert_eq!(u, underlying);
        assert_eq!(auth::get_fund(&deps.storage).unwrap(), fund);
        assert_eq!(token::get_underlying(&deps.storage).unwrap(), underlying);
    }

    #[test]
    fn test_setup_strategy_empty_fund() {
        let mut deps = mock_dependencies();
        let err = setup_strategy(&mut deps.as_mut(), "", None).unwrap_err();
        assert_eq!(err.to_string(), "InvalidState: Fund cannot be empty");
    }

    #[test]
    fn test_setup_strategy_underlying_mismatch() {
        let mut deps = mock_dependencies();
        let fund = deps.api.addr_make("fund");
        let underlying = deps.api.addr_make("underlying");
        let other = deps.api.addr_make("other");

        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { .. } => {
                SystemResult::Ok(ContractResult::Ok(to_json_binary(&underlying).unwrap()))
            }
            _ => SystemResult::Err(SystemError::Unknown {}),
        });

        let err = setup_strategy(&mut deps.as_mut(), fund.as_str(), Some(other.as_str()))
            .unwrap_err();
        assert_eq!(err.to_string(), "InvalidState: Underlying do not match");
        assert!(auth::get_fund(&deps.storage).is_err());
    }
}
