use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Api, Event, MessageInfo, Response, StdError, StdResult, Storage};
use cw_storage_plus::Item;

/// Governance slot of a contract.
/// A handover is only complete once the pending governance accepts it.
#[cw_serde]
pub enum GovernanceState {
    Active { governance: Addr },
    PendingTransfer { governance: Addr, pending: Addr },
}

impl GovernanceState {
    pub fn governance(&self) -> &Addr {
        match self {
            GovernanceState::Active { governance } => governance,
            GovernanceState::PendingTransfer { governance, .. } => governance,
        }
    }

    pub fn pending(&self) -> Option<&Addr> {
        match self {
            GovernanceState::Active { .. } => None,
            GovernanceState::PendingTransfer { pending, .. } => Some(pending),
        }
    }
}

const GOVERNANCE: Item<GovernanceState> = Item::new("_governance");

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum GovernanceError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized: Not governance")]
    NotGovernance,

    #[error("Unauthorized: Not pending governance")]
    NotPendingGovernance,

    #[error("InvalidState: new governance shouldn't be empty")]
    EmptyGovernance,
}

/// Set the governance of the contract (this is internal, no checks are done).
/// Any pending handover is discarded.
pub fn set_governance(storage: &mut dyn Storage, governance: &Addr) -> StdResult<()> {
    GOVERNANCE.save(
        storage,
        &GovernanceState::Active {
            governance: governance.clone(),
        },
    )
}

/// Get the current governance of the contract.
/// If [set_governance] has not been called, it will return an [StdError::NotFound]
pub fn get_governance(storage: &dyn Storage) -> StdResult<Addr> {
    load(storage).map(|state| state.governance().clone())
}

/// Get the governance waiting to accept the handover, if any.
pub fn get_pending_governance(storage: &dyn Storage) -> StdResult<Option<Addr>> {
    load(storage).map(|state| state.pending().cloned())
}

fn load(storage: &dyn Storage) -> StdResult<GovernanceState> {
    GOVERNANCE
        .may_load(storage)?
        .ok_or(StdError::not_found("governance"))
}

/// Asserts that the sender of the message is the current governance
pub fn assert_governance(storage: &dyn Storage, info: &MessageInfo) -> Result<(), GovernanceError> {
    let governance = get_governance(storage)?;
    if info.sender != governance {
        return Err(GovernanceError::NotGovernance);
    }
    Ok(())
}

/// Start a handover to `new_governance`.
/// The current governance stays in control until [accept_governance] is called
/// by `new_governance`. Calling this again replaces the pending governance.
pub fn update_governance(
    api: &dyn Api,
    storage: &mut dyn Storage,
    info: &MessageInfo,
    new_governance: &str,
) -> Result<Response, GovernanceError> {
    assert_governance(storage, info)?;

    if new_governance.trim().is_empty() {
        return Err(GovernanceError::EmptyGovernance);
    }
    let pending = api.addr_validate(new_governance)?;

    let governance = get_governance(storage)?;
    GOVERNANCE.save(
        storage,
        &GovernanceState::PendingTransfer {
            governance: governance.clone(),
            pending: pending.clone(),
        },
    )?;

    Ok(Response::new().add_event(
        Event::new("GovernanceTransferPending")
            .add_attribute("governance", governance.as_str())
            .add_attribute("pending_governance", pending.as_str()),
    ))
}

/// Complete the handover, only callable by the pending governance.
pub fn accept_governance(
    storage: &mut dyn Storage,
    info: &MessageInfo,
) -> Result<Response, GovernanceError> {
    let (old_governance, new_governance) = match load(storage)? {
        GovernanceState::PendingTransfer {
            governance,
            pending,
        } if pending == info.sender => (governance, pending),
        _ => return Err(GovernanceError::NotPendingGovernance),
    };

    set_governance(storage, &new_governance)?;

    Ok(Response::new().add_event(
        Event::new("GovernanceUpdated")
            .add_attribute("new_governance", new_governance.as_str())
            .add_attribute("old_governance", old_governance.as_str()),
    ))
}
