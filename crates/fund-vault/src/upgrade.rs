use crate::ContractError;
use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Deps, Env, Event, StdResult, Storage, Timestamp};
use cw_storage_plus::Item;
use fund_library::time::HOURS;

pub const DEFAULT_UPGRADE_DELAY: u64 = 12 * HOURS;

/// Timelocked code swap of the fund.
/// A scheduled target can only be applied once its `eta` is reached.
#[cw_serde]
pub enum UpgradeState {
    NoPendingUpgrade,
    PendingUpgrade { target: u64, eta: Timestamp },
}

const UPGRADE: Item<UpgradeState> = Item::new("upgrade");

/// Seconds between scheduling and the earliest finalization, fixed at instantiate.
const UPGRADE_DELAY: Item<u64> = Item::new("upgrade_delay");

pub fn instantiate(storage: &mut dyn Storage, delay: u64) -> StdResult<()> {
    UPGRADE_DELAY.save(storage, &delay)?;
    UPGRADE.save(storage, &UpgradeState::NoPendingUpgrade)
}

pub fn get_upgrade_state(storage: &dyn Storage) -> StdResult<UpgradeState> {
    UPGRADE
        .may_load(storage)
        .map(|state| state.unwrap_or(UpgradeState::NoPendingUpgrade))
}

pub fn get_upgrade_delay(storage: &dyn Storage) -> StdResult<u64> {
    UPGRADE_DELAY
        .may_load(storage)
        .map(|delay| delay.unwrap_or(DEFAULT_UPGRADE_DELAY))
}

/// The code id currently running at this contract address.
pub fn get_current_code_id(deps: &Deps, env: &Env) -> StdResult<u64> {
    let info = deps
        .querier
        .query_wasm_contract_info(env.contract.address.to_string())?;
    Ok(info.code_id)
}

/// Schedule `new_code_id` for `now + delay`, replacing any pending upgrade.
/// Authorization is done by the caller.
pub fn schedule(
    storage: &mut dyn Storage,
    now: Timestamp,
    current_code_id: u64,
    new_code_id: u64,
) -> Result<Event, ContractError> {
    if new_code_id == 0 {
        return Err(ContractError::invalid_state(
            "New implementation cannot be empty",
        ));
    }
    if new_code_id == current_code_id {
        return Err(ContractError::invalid_state(
            "New implementation is the current implementation",
        ));
    }

    let eta = now.plus_seconds(get_upgrade_delay(storage)?);
    UPGRADE.save(
        storage,
        &UpgradeState::PendingUpgrade {
            target: new_code_id,
            eta,
        },
    )?;

    Ok(Event::new("UpgradeScheduled")
        .add_attribute("implementation", new_code_id.to_string())
        .add_attribute("eta", eta.seconds().to_string()))
}

/// Consume the pending upgrade, returning the code id to migrate to.
/// A missing schedule and an immature one are reported the same way.
pub fn finalize(
    storage: &mut dyn Storage,
    now: Timestamp,
    expected_code_id: u64,
) -> Result<u64, ContractError> {
    let target = match get_upgrade_state(storage)? {
        UpgradeState::PendingUpgrade { target, eta } if now >= eta => target,
        _ => return Err(ContractError::invalid_state("Upgrade not scheduled")),
    };
    if target != expected_code_id {
        return Err(ContractError::invalid_state(
            "NewImplementation is not same",
        ));
    }

    UPGRADE.save(storage, &UpgradeState::NoPendingUpgrade)?;
    Ok(target)
}
