pub mod error;

/// Messages every strategy accepts and every strategy owner (fund or optimizer) answers.
pub mod msg;

/// Owner (aka fund) authorization for strategies.
/// Roles other than the owner are resolved by querying the owner.
pub mod auth;

/// Calls and queries made by an owner into its strategies.
pub mod strategy;

/// Underlying CW20 asset of a strategy or fund.
pub mod token;

/// Invest activation flag.
pub mod invest;

/// Rescue of tokens accidentally held by a contract.
pub mod sweep;

/// Shared instantiate checks for strategies.
pub mod setup;

pub use crate::error::StrategyError;
