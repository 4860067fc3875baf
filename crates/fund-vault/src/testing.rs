#![cfg(not(target_arch = "wasm32"))]

use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use cosmwasm_std::{Addr, Empty, Env, Uint128, WasmMsg};
use cw_multi_test::error::AnyResult;
use cw_multi_test::{App, AppResponse, Contract, ContractWrapper, Executor};
use fund_library::testing::TestingContract;
use serde::{Deserialize, Serialize};

/// This is a testing wrapper around the Fund contract.
/// The fund is made its own admin, so scheduled upgrades can migrate it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FundContract {
    pub addr: Addr,
    pub init: InstantiateMsg,
}

impl TestingContract<InstantiateMsg, ExecuteMsg, QueryMsg> for FundContract {
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
            underlying: Self::get_contract_addr(app, "cw20").to_string(),
            name: "Generic Fund".to_string(),
            symbol: "GFUND".to_string(),
            governance: Some(app.api().addr_make("governance").to_string()),
            fund_manager: Some(app.api().addr_make("fund_manager").to_string()),
            relayer: Some(app.api().addr_make("relayer").to_string()),
            upgrade_delay: None,
        }
    }

    fn new(app: &mut App, env: &Env, msg: Option<InstantiateMsg>) -> Self {
        let init = msg.unwrap_or(Self::default_init(app, env));
        let code_id = Self::store_code(app);
        let addr = Self::instantiate(app, code_id, "fund", &init);

        let admin = app.api().addr_make("admin");
        app.execute(
            admin,
            WasmMsg::UpdateAdmin {
                contract_addr: addr.to_string(),
                admin: addr.to_string(),
            }
            .into(),
        )
        .unwrap();

        Self { addr, init }
    }

    fn addr(&self) -> &Addr {
        &self.addr
    }
}

impl FundContract {
    pub fn governance(app: &App) -> Addr {
        app.api().addr_make("governance")
    }

    pub fn fund_manager(app: &App) -> Addr {
        app.api().addr_make("fund_manager")
    }

    pub fn relayer(app: &App) -> Addr {
        app.api().addr_make("relayer")
    }

    /// Deposit `amount`, the allowance of `sender` must already cover it.
    pub fn deposit(&self, app: &mut App, sender: &Addr, amount: u128) -> AnyResult<AppResponse> {
        let msg = ExecuteMsg::Deposit {
            amount: Uint128::new(amount),
        };
        self.execute(app, sender, &msg)
    }

    pub fn withdraw(&self, app: &mut App, sender: &Addr, shares: u128) -> AnyResult<AppResponse> {
        let msg = ExecuteMsg::Withdraw {
            shares: Uint128::new(shares),
        };
        self.execute(app, sender, &msg)
    }

    pub fn do_hard_work(&self, app: &mut App) -> AnyResult<AppResponse> {
        let relayer = Self::relayer(app);
        self.execute(app, &relayer, &ExecuteMsg::DoHardWork {})
    }

    pub fn add_strategy(
        &self,
        app: &mut App,
        strategy: &Addr,
        weightage_bps: u16,
        fee_bps: u16,
    ) -> AnyResult<AppResponse> {
        let fund_manager = Self::fund_manager(app);
        let msg = ExecuteMsg::AddStrategy {
            strategy: strategy.to_string(),
            weightage_bps,
            fee_bps,
        };
        self.execute(app, &fund_manager, &msg)
    }

    pub fn price_per_share(&self, app: &App) -> u128 {
        let pps: Uint128 = self.query(app, &QueryMsg::PricePerShare {}).unwrap();
        pps.u128()
    }

    pub fn total_value_locked(&self, app: &App) -> u128 {
        let tvl: Uint128 = self.query(app, &QueryMsg::TotalValueLocked {}).unwrap();
        tvl.u128()
    }

    pub fn balance(&self, app: &App, address: &Addr) -> u128 {
        let query = QueryMsg::Balance {
            address: address.to_string(),
        };
        let res: cw20::BalanceResponse = self.query(app, &query).unwrap();
        res.balance.u128()
    }

    pub fn total_supply(&self, app: &App) -> u128 {
        let res: cw20::TokenInfoResponse = self.query(app, &QueryMsg::TokenInfo {}).unwrap();
        res.total_supply.u128()
    }
}
