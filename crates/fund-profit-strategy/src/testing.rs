#![cfg(not(target_arch = "wasm32"))]

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use cosmwasm_std::{Addr, Empty, Env, Uint128};
use cw_multi_test::{App, Contract, ContractWrapper};
use fund_library::testing::TestingContract;
use serde::{Deserialize, Serialize};

/// Testing wrapper around the ProfitStrategy contract.
/// Deployed by `creator`, which receives the creator fee, and owned by the fund labelled "fund".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ProfitStrategyContract {
    pub addr: Addr,
    pub init: InstantiateMsg,
}

impl TestingContract<InstantiateMsg, ExecuteMsg, QueryMsg> for ProfitStrategyContract {
    fn wrapper() -> Box<dyn Contract<Empty>> {
        Box::new(
            ContractWrapper::new(
                crate::contract::execute,
                crate::contract::instantiate,
                crate::contract::query,
            )
            .with_migrate(crate::contract::migrate),
        )
    }

    fn default_init(app: &mut App, _env: &Env) -> InstantiateMsg {
        InstantiateMsg {
            fund: Self::get_contract_addr(app, "fund").to_string(),
            apr: Uint128::new(500),
            underlying: None,
            reward_token: None,
        }
    }

    fn new(app: &mut App, env: &Env, msg: Option<InstantiateMsg>) -> Self {
        let init = msg.unwrap_or(Self::default_init(app, env));
        let code_id = Self::store_code(app);
        let creator = app.api().addr_make("creator");
        let addr = Self::instantiate_from(app, code_id, "profit_strategy", &creator, &init);
        Self { addr, init }
    }

    fn addr(&self) -> &Addr {
        &self.addr
    }
}

impl ProfitStrategyContract {
    /// Deploy another strategy with an explicit owner and apr, labelled `label`.
    pub fn deploy(app: &mut App, label: &str, fund: &Addr, apr: u128) -> Self {
        let init = InstantiateMsg {
            fund: fund.to_string(),
            apr: Uint128::new(apr),
            underlying: None,
            reward_token: None,
        };
        let code_id = Self::store_code(app);
        let creator = app.api().addr_make("creator");
        let addr = Self::instantiate_from(app, code_id, label, &creator, &init);
        Self { addr, init }
    }

    pub fn creator(app: &App) -> Addr {
        app.api().addr_make("creator")
    }

    pub fn set_apr(&self, app: &mut App, sender: &Addr, apr: u128) {
        let msg = ExecuteMsg::SetApr {
            apr: Uint128::new(apr),
        };
        self.execute(app, sender, &msg).unwrap();
    }

    pub fn set_locked(&self, app: &mut App, sender: &Addr, amount: u128) {
        let msg = ExecuteMsg::SetLocked {
            amount: Uint128::new(amount),
        };
        self.execute(app, sender, &msg).unwrap();
    }

    pub fn invested(&self, app: &App) -> u128 {
        let res: Uint128 = self
            .query(app, &QueryMsg::InvestedUnderlyingBalance {})
            .unwrap();
        res.u128()
    }
}
