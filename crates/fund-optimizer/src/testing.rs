#![cfg(not(target_arch = "wasm32"))]

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use cosmwasm_std::{Addr, Empty, Env, Uint128};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper};
use fund_library::testing::TestingContract;
use serde::{Deserialize, Serialize};

/// Testing wrapper around the Optimizer contract, owned by the fund labelled "fund".
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct OptimizerContract {
    pub addr: Addr,
    pub init: InstantiateMsg,
}

impl TestingContract<InstantiateMsg, ExecuteMsg, QueryMsg> for OptimizerContract {
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
            name: None,
        }
    }

    fn new(app: &mut App, env: &Env, msg: Option<InstantiateMsg>) -> Self {
        let init = msg.unwrap_or(Self::default_init(app, env));
        let code_id = Self::store_code(app);
        let deployer = app.api().addr_make("deployer");
        let addr = Self::instantiate_from(app, code_id, "optimizer", &deployer, &init);
        Self { addr, init }
    }

    fn addr(&self) -> &Addr {
        &self.addr
    }
}

impl OptimizerContract {
    pub fn deployer(app: &App) -> Addr {
        app.api().addr_make("deployer")
    }

    pub fn add_strategy(
        &self,
        app: &mut App,
        sender: &Addr,
        strategy: &Addr,
    ) -> AnyResult<AppResponse> {
        let msg = ExecuteMsg::AddStrategy {
            strategy: strategy.to_string(),
        };
        self.execute(app, sender, &msg)
    }

    pub fn remove_strategy(
        &self,
        app: &mut App,
        sender: &Addr,
        strategy: &Addr,
    ) -> AnyResult<AppResponse> {
        let msg = ExecuteMsg::RemoveStrategy {
            strategy: strategy.to_string(),
        };
        self.execute(app, sender, &msg)
    }

    pub fn do_hard_work(&self, app: &mut App, sender: &Addr) -> AnyResult<AppResponse> {
        self.execute(app, sender, &ExecuteMsg::DoHardWork {})
    }

    pub fn active_strategy(&self, app: &App) -> Option<Addr> {
        self.query(app, &QueryMsg::ActiveStrategy {}).unwrap()
    }

    pub fn invested(&self, app: &App) -> u128 {
        let res: Uint128 = self
            .query(app, &QueryMsg::InvestedUnderlyingBalance {})
            .unwrap();
        res.u128()
    }
}
