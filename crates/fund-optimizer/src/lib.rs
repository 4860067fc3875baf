pub mod contract;
pub mod msg;
pub mod selection;
pub mod testing;

mod error;
mod state;

pub use crate::error::ContractError;
