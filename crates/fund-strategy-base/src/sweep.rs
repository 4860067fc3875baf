use crate::token;
use crate::StrategyError;
use cosmwasm_std::{Addr, Api, Deps, Env, Event, Response};

/// Asserts that `token` is not in the `restricted` set of the contract.
/// Restricted tokens are rejected with [StrategyError::Restricted],
/// distinct from an authorization failure.
pub fn assert_can_sweep(restricted: &[Addr], token: &Addr) -> Result<(), StrategyError> {
    if restricted.contains(token) {
        return Err(StrategyError::restricted("Token is restricted"));
    }
    Ok(())
}

/// Validates the sweep arguments, the recipient can't be empty.
pub fn validate(api: &dyn Api, token: &str, recipient: &str) -> Result<(Addr, Addr), StrategyError> {
    if recipient.trim().is_empty() {
        return Err(StrategyError::invalid_state("Can not sweep to zero address"));
    }
    let token = api.addr_validate(token)?;
    let recipient = api.addr_validate(recipient)?;
    Ok((token, recipient))
}

/// Transfers the whole balance of `token` held by this contract to `recipient`.
/// Authorization and [assert_can_sweep] must be done by the caller.
pub fn sweep(
    deps: Deps,
    env: &Env,
    token: &Addr,
    recipient: &Addr,
) -> Result<Response, StrategyError> {
    let balance = token::query_balance_of(&deps, token, &env.contract.address)?;

    let mut response = Response::new().add_event(
        Event::new("Sweep")
            .add_attribute("token", token.as_str())
            .add_attribute("recipient", recipient.as_str())
            .add_attribute("amount", balance.to_string()),
    );
    if !balance.is_zero() {
        response = response.add_message(token::transfer(token, recipient, balance)?);
    }
    Ok(response)
}
