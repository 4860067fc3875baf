use cosmwasm_std::{Event, StdResult, Storage};
use cw_storage_plus::Item;

const INVEST_ACTIVATED: Item<bool> = Item::new("invest_activated");

/// Whether new investment is allowed, defaults to `true` when never set.
pub fn is_invest_activated(storage: &dyn Storage) -> StdResult<bool> {
    INVEST_ACTIVATED
        .may_load(storage)
        .map(|activated| activated.unwrap_or(true))
}

/// Set the invest activation flag (this is internal, no checks are done)
pub fn set_invest_activated(storage: &mut dyn Storage, activated: bool) -> StdResult<Event> {
    INVEST_ACTIVATED.save(storage, &activated)?;
    Ok(Event::new("InvestActivated").add_attribute("activated", activated.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockStorage;

    #[test]
    fn test_default_activated() {
        let storage = MockStorage::new();
        assert!(is_invest_activated(&storage).unwrap());
    }

    #[test]
    fn test_set_invest_activated() {
        let mut storage = MockStorage::new();

        let event = set_invest_activated(&mut storage, false).unwrap();
        assert!(!is_invest_activated(&storage).unwrap());
        assert_eq!(
            event,
            Event::new("InvestActivated").add_attribute("activated", "false")
        );

        set_invest_activated(&mut storage, true).unwrap();
        assert!(is_invest_activated(&storage).unwrap());
    }
}
