use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::Item;

pub const APR: Item<Uint128> = Item::new("apr");

/// Receives the creator fee charged by the fund on this strategy's profit.
pub const CREATOR: Item<Addr> = Item::new("creator");

pub const REWARD_TOKEN: Item<Option<Addr>> = Item::new("reward_token");

/// Part of the position that cannot be liquidated.
pub const LOCKED: Item<Uint128> = Item::new("locked");
