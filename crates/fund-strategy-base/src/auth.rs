use crate::msg::FundQueryMsg;
use crate::StrategyError;
use cosmwasm_std::{Addr, Deps, MessageInfo, StdError, StdResult, Storage};
use cw_storage_plus::Item;

const FUND: Item<Addr> = Item::new("fund");

/// Set the owning fund, called once during `instantiate`.
/// The owner is a Fund or an Optimizer and is immutable afterward.
pub fn set_fund(storage: &mut dyn Storage, fund: &Addr) -> StdResult<()> {
    FUND.save(storage, fund)
}

/// Get the owning fund.
/// If [set_fund] has not been called, it will return an [StdError::NotFound]
pub fn get_fund(storage: &dyn Storage) -> StdResult<Addr> {
    FUND.may_load(storage)?.ok_or(StdError::not_found("fund"))
}

/// Asserts that the sender is the owning fund.
/// Withdrawal entry points must only be callable by their owner.
pub fn assert_fund(storage: &dyn Storage, info: &MessageInfo) -> Result<(), StrategyError> {
    let fund = FUND
        .may_load(storage)?
        .ok_or(StrategyError::unauthorized("The sender has to be the fund"))?;
    if info.sender != fund {
        return Err(StrategyError::unauthorized("The sender has to be the fund"));
    }
    Ok(())
}

/// Query the governance of the owning fund
pub fn query_governance(deps: &Deps) -> StdResult<Addr> {
    query_fund(deps, &FundQueryMsg::Governance {})
}

/// Query the fund manager of the owning fund
pub fn query_fund_manager(deps: &Deps) -> StdResult<Addr> {
    query_fund(deps, &FundQueryMsg::FundManager {})
}

/// Query the relayer of the owning fund
pub fn query_relayer(deps: &Deps) -> StdResult<Addr> {
    query_fund(deps, &FundQueryMsg::Relayer {})
}

fn query_fund(deps: &Deps, msg: &FundQueryMsg) -> StdResult<Addr> {
    let fund = get_fund(deps.storage)?;
    deps.querier.query_wasm_smart(fund.to_string(), msg)
}

/// Asserts that the sender is the governance of the owning fund.
pub fn assert_governance(deps: &Deps, info: &MessageInfo) -> Result<(), StrategyError> {
    if info.sender != query_governance(deps)? {
        return Err(StrategyError::unauthorized("Not governance"));
    }
    Ok(())
}

/// Asserts that the sender is either the governance or the fund manager of the owning fund.
pub fn assert_governance_or_fund_manager(
    deps: &Deps,
    info: &MessageInfo,
) -> Result<(), StrategyError> {
    if info.sender == query_governance(deps)? || info.sender == query_fund_manager(deps)? {
        return Ok(());
    }
    Err(StrategyError::unauthorized(
        "The sender has to be the governance or fund manager",
    ))
}

/// Asserts that the sender can trigger hard work on a strategy:
/// the owning fund itself, its fund manager or its relayer.
pub fn assert_fund_or_manager_or_relayer(
    deps: &Deps,
    info: &MessageInfo,
) -> Result<(), StrategyError> {
    if info.sender == get_fund(deps.storage)? {
        return Ok(());
    }
    if info.sender == query_fund_manager(deps)? || info.sender == query_relayer(deps)? {
        return Ok(());
    }
    Err(StrategyError::unauthorized(
        "The sender has to be the relayer or fund manager",
    ))
}

#[cfg(test)]
mod tests {
    use crate::auth::*;
    use crate::msg::FundQueryMsg;
    use cosmwasm_std::testing::{message_info, mock_dependencies, MockApi};
    use cosmwasm_std::{
        from_json, to_json_binary, ContractResult, OwnedDeps, SystemError, SystemResult,
        WasmQuery,
    };
    use cosmwasm_std::testing::{MockQuerier, MockStorage};

    fn mock_fund_roles(deps: &mut OwnedDeps<MockStorage, MockApi, MockQuerier>) -> [Addr; 4] {
        let fund = deps.api.addr_make("fund");
        let governance = deps.api.addr_make("governance");
        let manager = deps.api.addr_make("manager");
        let relayer = deps.api.addr_make("relayer");
        set_fund(deps.as_mut().storage, &fund).unwrap();

        let (g, m, r) = (governance.clone(), manager.clone(), relayer.clone());
        deps.querier.update_wasm(move |query| match query {
            WasmQuery::Smart { msg, .. } => {
                let addr = match from_json::<FundQueryMsg>(msg).unwrap() {
                    FundQueryMsg::Governance {} => &g,
                    FundQueryMsg::FundManager {} => &m,
                    FundQueryMsg::Relayer {} => &r,
                    FundQueryMsg::Underlying {} => return SystemResult::Err(SystemError::Unknown {}),
                };
                SystemResult::Ok(ContractResult::Ok(to_json_binary(addr).unwrap()))
            }
            _ => SystemResult::Err(SystemError::Unknown {}),
        });

        [fund, governance, manager, relayer]
    }

    #[test]
    fn test_get_fund() {
        let mut deps = mock_dependencies();

        let fund = deps.api.addr_make("fund");
        set_fund(deps.as_mut().storage, &fund).unwrap();

        assert_eq!(get_fund(&deps.storage).unwrap(), fund);
    }

    #[test]
    fn test_get_fund_not_set() {
        let deps = mock_dependencies();
        let err = get_fund(&deps.storage).unwrap_err();
        assert_eq!(err, StdError::not_found("fund"));
    }

    #[test]
    fn test_assert_fund() {
        let mut deps = mock_dependencies();

        let fund = deps.api.addr_make("fund");
        set_fund(deps.as_mut().storage, &fund).unwrap();

        assert_fund(&deps.storage, &message_info(&fund, &[])).unwrap();

        let not_fund = deps.api.addr_make("not_fund");
        let err = assert_fund(&deps.storage, &message_info(&not_fund, &[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unauthorized: The sender has to be the fund"
        );
    }

    #[test]
    fn test_assert_governance() {
        let mut deps = mock_dependencies();
        let [fund, governance, manager, _] = mock_fund_roles(&mut deps);

        assert_governance(&deps.as_ref(), &message_info(&governance, &[])).unwrap();

        for sender in [fund, manager] {
            let err = assert_governance(&deps.as_ref(), &message_info(&sender, &[])).unwrap_err();
            assert_eq!(err, StrategyError::unauthorized("Not governance"));
        }
    }

    #[test]
    fn test_assert_governance_or_fund_manager() {
        let mut deps = mock_dependencies();
        let [fund, governance, manager, relayer] = mock_fund_roles(&mut deps);

        assert_governance_or_fund_manager(&deps.as_ref(), &message_info(&governance, &[]))
            .unwrap();
        assert_governance_or_fund_manager(&deps.as_ref(), &message_info(&manager, &[])).unwrap();

        for sender in [fund, relayer] {
            let err =
                assert_governance_or_fund_manager(&deps.as_ref(), &message_info(&sender, &[]))
                    .unwrap_err();
            assert_eq!(
                err.to_string(),
                "Unauthorized: The sender has to be the governance or fund manager"
            );
        }
    }

    #[test]
    fn test_assert_fund_or_manager_or_relayer() {
        let mut deps = mock_dependencies();
        let [fund, governance, manager, relayer] = mock_fund_roles(&mut deps);

        for sender in [fund, manager, relayer] {
            assert_fund_or_manager_or_relayer(&deps.as_ref(), &message_info(&sender, &[]))
                .unwrap();
        }

        let err = assert_fund_or_manager_or_relayer(&deps.as_ref(), &message_info(&governance, &[]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unauthorized: The sender has to be the relayer or fund manager"
        );
    }
}
