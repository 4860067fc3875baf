use crate::state::{get_fund_manager, get_relayer};
use crate::ContractError;
use cosmwasm_std::{Env, MessageInfo, Storage};

pub fn assert_fund_manager(storage: &dyn Storage, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != get_fund_manager(storage)? {
        return Err(ContractError::unauthorized("Not fund manager"));
    }
    Ok(())
}

pub fn assert_fund_manager_or_relayer(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<(), ContractError> {
    if info.sender == get_fund_manager(storage)? || info.sender == get_relayer(storage)? {
        return Ok(());
    }
    Err(ContractError::unauthorized("Not fund manager or relayer"))
}

pub fn assert_governance_or_fund_manager(
    storage: &dyn Storage,
    info: &MessageInfo,
) -> Result<(), ContractError> {
    if info.sender == fund_library::governance::get_governance(storage)?
        || info.sender == get_fund_manager(storage)?
    {
        return Ok(());
    }
    Err(ContractError::unauthorized(
        "The sender has to be the governance or fund manager",
    ))
}

/// Callbacks are only ever dispatched by the fund to itself.
pub fn assert_self(env: &Env, info: &MessageInfo) -> Result<(), ContractError> {
    if info.sender != env.contract.address {
        return Err(ContractError::unauthorized("Only callable by the fund itself"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{FUND_MANAGER, RELAYER};
    use cosmwasm_std::testing::{message_info, mock_dependencies, mock_env};

    #[test]
    fn test_assert_fund_manager() {
        let mut deps = mock_dependencies();
        let manager = deps.api.addr_make("manager");
        let relayer = deps.api.addr_make("relayer");
        FUND_MANAGER.save(&mut deps.storage, &manager).unwrap();
        RELAYER.save(&mut deps.storage, &relayer).unwrap();

        assert_fund_manager(&deps.storage, &message_info(&manager, &[])).unwrap();
        let err = assert_fund_manager(&deps.storage, &message_info(&relayer, &[])).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Not fund manager");
    }

    #[test]
    fn test_assert_fund_manager_or_relayer() {
        let mut deps = mock_dependencies();
        let manager = deps.api.addr_make("manager");
        let relayer = deps.api.addr_make("relayer");
        FUND_MANAGER.save(&mut deps.storage, &manager).unwrap();
        RELAYER.save(&mut deps.storage, &relayer).unwrap();

        assert_fund_manager_or_relayer(&deps.storage, &message_info(&manager, &[])).unwrap();
        assert_fund_manager_or_relayer(&deps.storage, &message_info(&relayer, &[])).unwrap();

        let random = deps.api.addr_make("random");
        let err =
            assert_fund_manager_or_relayer(&deps.storage, &message_info(&random, &[])).unwrap_err();
        assert_eq!(err.to_string(), "Unauthorized: Not fund manager or relayer");
    }

    #[test]
    fn test_assert_governance_or_fund_manager() {
        let mut deps = mock_dependencies();
        let governance = deps.api.addr_make("governance");
        let manager = deps.api.addr_make("manager");
        fund_library::governance::set_governance(&mut deps.storage, &governance).unwrap();
        FUND_MANAGER.save(&mut deps.storage, &manager).unwrap();

        assert_governance_or_fund_manager(&deps.storage, &message_info(&governance, &[])).unwrap();
        assert_governance_or_fund_manager(&deps.storage, &message_info(&manager, &[])).unwrap();

        let random = deps.api.addr_make("random");
        let err = assert_governance_or_fund_manager(&deps.storage, &message_info(&random, &[]))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unauthorized: The sender has to be the governance or fund manager"
        );
    }

    #[test]
    fn test_assert_self() {
        let deps = mock_dependencies();
        let env = mock_env();
        assert_self(&env, &message_info(&env.contract.address, &[])).unwrap();

        let random = deps.api.addr_make("random");
        let err = assert_self(&env, &message_info(&random, &[])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Unauthorized: Only callable by the fund itself"
        );
    }
}
