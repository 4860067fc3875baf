use cosmwasm_std::testing::mock_env;
use cosmwasm_std::{Addr, Event, Uint128};
use cw_multi_test::App;
use fund_library::testing::{Cw20TokenContract, TestingContract};
use fund_optimizer::msg::{ExecuteMsg, QueryMsg, StrategyInfo};
use fund_optimizer::testing::OptimizerContract;
use fund_profit_strategy::testing::ProfitStrategyContract;
use fund_vault::testing::FundContract;

struct TestContracts {
    cw20: Cw20TokenContract,
    fund: FundContract,
    optimizer: OptimizerContract,
    low: ProfitStrategyContract,
    high: ProfitStrategyContract,
}

impl TestContracts {
    /// A fund with a single optimizer at full weight and two members:
    /// `low` at apr 100 and `high` at apr 300.
    fn init(app: &mut App) -> TestContracts {
        let env = mock_env();

        let cw20 = Cw20TokenContract::new(app, &env, None);
        let fund = FundContract::new(app, &env, None);
        let optimizer = OptimizerContract::new(app, &env, None);
        let low = ProfitStrategyContract::deploy(app, "low", optimizer.addr(), 100);
        let high = ProfitStrategyContract::deploy(app, "high", optimizer.addr(), 300);

        fund.add_strategy(app, optimizer.addr(), 10_000, 500).unwrap();

        Self {
            cw20,
            fund,
            optimizer,
            low,
            high,
        }
    }

    fn add_members(&self, app: &mut App) {
        let fund_manager = FundContract::fund_manager(app);
        self.optimizer
            .add_strategy(app, &fund_manager, self.low.addr())
            .unwrap();
        self.optimizer
            .add_strategy(app, &fund_manager, self.high.addr())
            .unwrap();
    }

    fn deposit(&self, app: &mut App, amount: u128) -> Addr {
        let user = app.api().addr_make("user");
        self.cw20.fund(app, &user, amount);
        self.cw20
            .increase_allowance(app, &user, self.fund.addr(), amount);
        self.fund.deposit(app, &user, amount).unwrap();
        user
    }
}

#[test]
fn test_instantiate() {
    let app = &mut App::default();
    let TestContracts {
        fund, optimizer, ..
    } = TestContracts::init(app);

    let owner: Addr = optimizer.query(app, &QueryMsg::Fund {}).unwrap();
    assert_eq!(&owner, fund.addr());

    let name: String = optimizer.query(app, &QueryMsg::Name {}).unwrap();
    assert_eq!(name, "OptimizerStrategy");

    // roles are resolved through the fund
    let governance: Addr = optimizer.query(app, &QueryMsg::Governance {}).unwrap();
    assert_eq!(governance, FundContract::governance(app));
    let relayer: Addr = optimizer.query(app, &QueryMsg::Relayer {}).unwrap();
    assert_eq!(relayer, FundContract::relayer(app));

    // no member yet
    assert_eq!(optimizer.active_strategy(app), None);
    let creator: Addr = optimizer.query(app, &QueryMsg::Creator {}).unwrap();
    assert_eq!(creator, OptimizerContract::deployer(app));
    let apr: Uint128 = optimizer.query(app, &QueryMsg::Apr {}).unwrap();
    assert_eq!(apr, Uint128::zero());
}

#[test]
fn test_add_selects_highest_apr() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    let TestContracts {
        optimizer,
        low,
        high,
        ..
    } = &contracts;

    let fund_manager = FundContract::fund_manager(app);
    let res = optimizer
        .add_strategy(app, &fund_manager, low.addr())
        .unwrap();
    assert!(res.has_event(
        &Event::new("wasm-ActiveStrategyChangedOptimizer")
            .add_attribute("strategy", low.addr().to_string())
    ));
    assert_eq!(optimizer.active_strategy(app), Some(low.addr().clone()));

    let res = optimizer
        .add_strategy(app, &fund_manager, high.addr())
        .unwrap();
    assert!(res.has_event(
        &Event::new("wasm-StrategyAddedOptimizer")
            .add_attribute("strategy", high.addr().to_string())
    ));
    assert_eq!(optimizer.active_strategy(app), Some(high.addr().clone()));

    let apr: Uint128 = optimizer.query(app, &QueryMsg::Apr {}).unwrap();
    assert_eq!(apr, Uint128::new(300));
    let creator: Addr = optimizer.query(app, &QueryMsg::Creator {}).unwrap();
    assert_eq!(creator, ProfitStrategyContract::creator(app));

    let members: Vec<StrategyInfo> = optimizer.query(app, &QueryMsg::Strategies {}).unwrap();
    assert_eq!(
        members,
        vec![
            StrategyInfo {
                name: "ProfitStrategy".to_string(),
                address: low.addr().clone(),
                invested: Uint128::zero(),
                apr: Uint128::new(100),
            },
            StrategyInfo {
                name: "ProfitStrategy".to_string(),
                address: high.addr().clone(),
                invested: Uint128::zero(),
                apr: Uint128::new(300),
            },
        ]
    );

    let err = optimizer
        .add_strategy(app, &fund_manager, high.addr())
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "InvalidState: The strategy is already added in this optimizer"
    );
}

#[test]
fn test_add_strategy_of_another_owner() {
    let app = &mut App::default();
    let TestContracts {
        fund, optimizer, ..
    } = TestContracts::init(app);

    // owned by the fund, not by the optimizer
    let direct = ProfitStrategyContract::deploy(app, "direct", fund.addr(), 900);

    let fund_manager = FundContract::fund_manager(app);
    let err = optimizer
        .add_strategy(app, &fund_manager, direct.addr())
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "InvalidState: The strategy does not belong to this optimizer"
    );

    let relayer = FundContract::relayer(app);
    let err = optimizer
        .add_strategy(app, &relayer, direct.addr())
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: The sender has to be the governance or fund manager"
    );
}

#[test]
fn test_fund_hard_work_invests_into_active() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        cw20,
        fund,
        optimizer,
        low,
        high,
    } = &contracts;

    contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    assert_eq!(high.invested(app), 10_000_000);
    assert_eq!(low.invested(app), 0);
    assert_eq!(cw20.balance(app, optimizer.addr()), 0);
    assert_eq!(optimizer.invested(app), 10_000_000);
    assert_eq!(fund.total_value_locked(app), 10_000_000);
}

#[test]
fn test_harvest_moves_to_new_best_and_ties_stay() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        fund,
        optimizer,
        low,
        high,
        ..
    } = &contracts;

    contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    let fund_manager = FundContract::fund_manager(app);
    let relayer = FundContract::relayer(app);

    low.set_apr(app, &fund_manager, 500);
    let res = optimizer.do_hard_work(app, &relayer).unwrap();
    assert!(res.has_event(
        &Event::new("wasm-ActiveStrategyChangedOptimizer")
            .add_attribute("strategy", low.addr().to_string())
    ));
    assert_eq!(optimizer.active_strategy(app), Some(low.addr().clone()));
    assert_eq!(low.invested(app), 10_000_000);
    assert_eq!(high.invested(app), 0);

    // a tie keeps the current member
    high.set_apr(app, &fund_manager, 500);
    let res = optimizer.do_hard_work(app, &relayer).unwrap();
    assert!(!res
        .events
        .iter()
        .any(|event| event.ty == "wasm-ActiveStrategyChangedOptimizer"));
    assert_eq!(optimizer.active_strategy(app), Some(low.addr().clone()));
    assert_eq!(low.invested(app), 10_000_000);

    // the whole position followed the active member, the fund saw no profit
    assert_eq!(optimizer.invested(app), 10_000_000);
    assert_eq!(fund.total_value_locked(app), 10_000_000);

    let stranger = app.api().addr_make("stranger");
    let err = optimizer.do_hard_work(app, &stranger).unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: The sender has to be the relayer or fund manager"
    );
}

#[test]
fn test_remove_active_strategy() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        fund,
        optimizer,
        low,
        high,
        ..
    } = &contracts;

    contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    let governance = FundContract::governance(app);
    let res = optimizer
        .remove_strategy(app, &governance, high.addr())
        .unwrap();
    assert!(res.has_event(
        &Event::new("wasm-StrategyRemovedOptimizer")
            .add_attribute("strategy", high.addr().to_string())
    ));

    assert_eq!(optimizer.active_strategy(app), Some(low.addr().clone()));
    assert_eq!(high.invested(app), 0);
    assert_eq!(low.invested(app), 10_000_000);
    assert_eq!(optimizer.invested(app), 10_000_000);

    optimizer
        .remove_strategy(app, &governance, low.addr())
        .unwrap();
    assert_eq!(optimizer.active_strategy(app), None);
    // nowhere to invest, the position waits idle in the optimizer
    assert_eq!(contracts.cw20.balance(app, optimizer.addr()), 10_000_000);
    assert_eq!(optimizer.invested(app), 10_000_000);

    let err = optimizer
        .remove_strategy(app, &governance, low.addr())
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "InvalidState: The strategy is not added in this optimizer"
    );
}

#[test]
fn test_invest_deactivated_keeps_positions() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        fund,
        optimizer,
        low,
        high,
        ..
    } = &contracts;

    contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    let fund_manager = FundContract::fund_manager(app);
    optimizer
        .execute(
            app,
            &fund_manager,
            &ExecuteMsg::SetInvestActivated { activated: false },
        )
        .unwrap();
    let activated: bool = optimizer
        .query(app, &QueryMsg::InvestActivated {})
        .unwrap();
    assert!(!activated);

    low.set_apr(app, &fund_manager, 900);
    let relayer = FundContract::relayer(app);
    optimizer.do_hard_work(app, &relayer).unwrap();

    // selection still follows the apr, positions do not
    assert_eq!(optimizer.active_strategy(app), Some(low.addr().clone()));
    assert_eq!(high.invested(app), 10_000_000);
    assert_eq!(low.invested(app), 0);

    // the fund keeps harvesting, new money waits in the optimizer
    contracts.deposit(app, 5_000_000);
    fund.do_hard_work(app).unwrap();
    assert_eq!(contracts.cw20.balance(app, optimizer.addr()), 5_000_000);
    assert_eq!(optimizer.invested(app), 15_000_000);
    assert_eq!(fund.total_value_locked(app), 15_000_000);
}

#[test]
fn test_profit_through_optimizer() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        cw20,
        fund,
        optimizer,
        high,
        ..
    } = &contracts;

    contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    cw20.fund(app, high.addr(), 1_000_000);
    assert_eq!(optimizer.invested(app), 11_000_000);

    let res = fund.do_hard_work(app).unwrap();
    // 5% of 1_000_000 at 1.1 underlying per share
    assert!(res.has_event(
        &Event::new("wasm-StrategyRewards")
            .add_attribute("strategy", optimizer.addr().to_string())
            .add_attribute("profit", "1000000")
            .add_attribute("creator_fee", "45454")
    ));

    // the creator of the active member is paid
    let creator = ProfitStrategyContract::creator(app);
    assert_eq!(fund.balance(app, &creator), 45_454);
}

#[test]
fn test_fund_withdraw_through_optimizer() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        cw20,
        fund,
        optimizer,
        high,
        ..
    } = &contracts;

    let user = contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    fund.withdraw(app, &user, 4_000_000).unwrap();
    assert_eq!(cw20.balance(app, &user), 4_000_000);
    assert_eq!(high.invested(app), 6_000_000);
    assert_eq!(optimizer.invested(app), 6_000_000);

    fund.withdraw(app, &user, 6_000_000).unwrap();
    assert_eq!(cw20.balance(app, &user), 10_000_000);
    assert_eq!(optimizer.invested(app), 0);
    assert_eq!(fund.total_supply(app), 0);

    // only the fund can pull from the optimizer
    let err = optimizer
        .execute(app, &user, &ExecuteMsg::WithdrawAllToFund {})
        .unwrap_err();
    assert_eq!(
        err.root_cause().to_string(),
        "Unauthorized: The sender has to be the fund"
    );
}

#[test]
fn test_fund_removes_optimizer() {
    let app = &mut App::default();
    let contracts = TestContracts::init(app);
    contracts.add_members(app);
    let TestContracts {
        cw20,
        fund,
        optimizer,
        high,
        ..
    } = &contracts;

    contracts.deposit(app, 10_000_000);
    fund.do_hard_work(app).unwrap();

    let fund_manager = FundContract::fund_manager(app);
    fund.execute(
        app,
        &fund_manager,
        &fund_vault::msg::ExecuteMsg::RemoveStrategy {
            strategy: optimizer.addr().to_string(),
        },
    )
    .unwrap();

    assert_eq!(high.invested(app), 0);
    assert_eq!(optimizer.invested(app), 0);
    assert_eq!(cw20.balance(app, fund.addr()), 10_000_000);
    assert_eq!(fund.total_value_locked(app), 10_000_000);
}

#[test]
fn test_sweep() {
    let app = &mut App::default();
    let TestContracts {
        cw20, optimizer, ..
    } = TestContracts::init(app);

    let airdrop = Cw20TokenContract::new(app, &mock_env(), None);
    airdrop.fund(app, optimizer.addr(), 7_000);
    cw20.fund(app, optimizer.addr(), 1_000);

    let governance = FundContract::governance(app);
    let recipient = app.api().addr_make("recipient");

    // the underlying can never be swept, even by governance
    let err = optimizer
        .execute(
            app,
            &governance,
            &ExecuteMsg::Sweep {
                token: cw20.addr().to_string(),
                recipient: recipient.to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Restricted: Token is restricted");
    let can_not_sweep: bool = optimizer
        .query(
            app,
            &QueryMsg::CanNotSweep {
                token: cw20.addr().to_string(),
            },
        )
        .unwrap();
    assert!(can_not_sweep);

    let fund_manager = FundContract::fund_manager(app);
    let err = optimizer
        .execute(
            app,
            &fund_manager,
            &ExecuteMsg::Sweep {
                token: airdrop.addr().to_string(),
                recipient: recipient.to_string(),
            },
        )
        .unwrap_err();
    assert_eq!(err.root_cause().to_string(), "Unauthorized: Not governance");

    let res = optimizer
        .execute(
            app,
            &governance,
            &ExecuteMsg::Sweep {
                token: airdrop.addr().to_string(),
                recipient: recipient.to_string(),
            },
        )
        .unwrap();
    assert!(res.has_event(
        &Event::new("wasm-Sweep")
            .add_attribute("token", airdrop.addr().to_string())
            .add_attribute("recipient", recipient.to_string())
            .add_attribute("amount", "7000")
    ));
    assert_eq!(airdrop.balance(app, &recipient), 7_000);
    assert_eq!(airdrop.balance(app, optimizer.addr()), 0);
    assert_eq!(cw20.balance(app, optimizer.addr()), 1_000);
}

#[test]
fn test_fund_splits_between_direct_strategy_and_optimizer() {
    let app = &mut App::default();
    let env = mock_env();

    let cw20 = Cw20TokenContract::new(app, &env, None);
    let fund = FundContract::new(app, &env, None);
    let direct = ProfitStrategyContract::deploy(app, "direct", fund.addr(), 100);
    let optimizer = OptimizerContract::new(app, &env, None);
    let member = ProfitStrategyContract::deploy(app, "member", optimizer.addr(), 200);

    let fund_manager = FundContract::fund_manager(app);
    fund.add_strategy(app, direct.addr(), 4_000, 0).unwrap();
    fund.add_strategy(app, optimizer.addr(), 6_000, 0).unwrap();
    optimizer
        .add_strategy(app, &fund_manager, member.addr())
        .unwrap();

    let user = app.api().addr_make("user");
    cw20.fund(app, &user, 1_000_000);
    cw20.increase_allowance(app, &user, fund.addr(), 1_000_000);
    fund.deposit(app, &user, 1_000_000).unwrap();
    assert_eq!(fund.balance(app, &user), 1_000_000);

    fund.do_hard_work(app).unwrap();
    assert_eq!(direct.invested(app), 400_000);
    assert_eq!(member.invested(app), 600_000);
    assert_eq!(optimizer.invested(app), 600_000);
    assert_eq!(cw20.balance(app, fund.addr()), 0);
    assert_eq!(fund.total_value_locked(app), 1_000_000);
}
