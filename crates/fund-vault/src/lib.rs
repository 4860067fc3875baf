pub mod contract;
pub mod msg;
pub mod state;
pub mod testing;

mod auth;
pub mod allocation;
pub mod error;
pub mod fees;
pub mod nav;
pub mod upgrade;

pub use crate::error::ContractError;
