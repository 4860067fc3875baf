use cosmwasm_std::Addr;
use cw_storage_plus::Item;

/// Members in insertion order.
pub const STRATEGIES: Item<Vec<Addr>> = Item::new("strategies");

/// The member currently holding the optimizer's position.
pub const ACTIVE: Item<Option<Addr>> = Item::new("active");

/// Receives the creator fee while no member is active.
pub const DEPLOYER: Item<Addr> = Item::new("deployer");

pub const NAME: Item<String> = Item::new("name");
