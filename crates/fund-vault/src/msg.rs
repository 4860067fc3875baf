use crate::state::{FeeConfig, StrategyRecord};
use crate::upgrade::UpgradeState;
use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Binary, Uint128};
use cw20::Expiration;

#[cw_serde]
pub struct InstantiateMsg {
    /// The CW20 asset of the fund, shares are denominated against it.
    pub underlying: String,
    /// name of the share token.
    pub name: String,
    /// symbol of the share token.
    pub symbol: String,
    /// Defaults to the instantiating sender.
    pub governance: Option<String>,
    /// Defaults to the governance.
    pub fund_manager: Option<String>,
    /// Defaults to the governance.
    pub relayer: Option<String>,
    /// Seconds between `ScheduleUpgrade` and the earliest `Upgrade`, defaults to 12 hours.
    pub upgrade_delay: Option<u64>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// ExecuteMsg Transfer is a base message to move shares to another account.
    Transfer { recipient: String, amount: Uint128 },

    /// ExecuteMsg Send is a base message to transfer shares to a contract and trigger an action
    /// on the receiving contract.
    Send {
        contract: String,
        amount: Uint128,
        msg: Binary,
    },

    IncreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },

    DecreaseAllowance {
        spender: String,
        amount: Uint128,
        expires: Option<Expiration>,
    },

    TransferFrom {
        owner: String,
        recipient: String,
        amount: Uint128,
    },

    SendFrom {
        owner: String,
        contract: String,
        amount: Uint128,
        msg: Binary,
    },

    /// ExecuteMsg Deposit `amount` of underlying from the sender (pre-approved allowance)
    /// and mint shares valued at the TVL before the deposit.
    Deposit { amount: Uint128 },

    /// ExecuteMsg Withdraw burns `shares` and transfers their value in underlying.
    /// Idle balance is used first, the shortfall is pulled from strategies in order.
    Withdraw { shares: Uint128 },

    /// ExecuteMsg DoHardWork reallocates toward the target weights, harvests every strategy
    /// and charges fees on the profit. Fund manager or relayer only.
    DoHardWork {},

    /// Callback of [ExecuteMsg::DoHardWork], only callable by the fund itself.
    CompleteHardWork {},

    /// ExecuteMsg Rebalance reallocates toward the target weights without charging fees.
    /// Only allowed while `should_rebalance` is set.
    Rebalance {},

    AddStrategy {
        strategy: String,
        weightage_bps: u16,
        fee_bps: u16,
    },

    RemoveStrategy { strategy: String },

    UpdateStrategyWeightage { strategy: String, weightage_bps: u16 },

    SetShouldRebalance { should_rebalance: bool },

    SetFundManager { fund_manager: String },

    SetRelayer { relayer: String },

    SetPerformanceFeeFund { fee_bps: u16 },

    SetPlatformFee { fee_bps: u16 },

    SetPlatformRewards { recipient: String },

    SetDepositLimit { limit: Uint128 },

    PauseDeposits { paused: bool },

    /// ExecuteMsg UpdateGovernance starts a two-step handover to `new_governance`.
    UpdateGovernance { new_governance: String },

    /// ExecuteMsg AcceptGovernance completes the handover, pending governance only.
    AcceptGovernance {},

    /// ExecuteMsg ScheduleUpgrade the fund to `new_code_id` after the upgrade delay.
    ScheduleUpgrade { new_code_id: u64 },

    /// ExecuteMsg Upgrade migrates the fund to the scheduled code id.
    /// `expected_code_id` must match the schedule.
    Upgrade { expected_code_id: u64 },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(cw20::BalanceResponse)]
    Balance { address: String },

    #[returns(cw20::TokenInfoResponse)]
    TokenInfo {},

    #[returns(cw20::AllowanceResponse)]
    Allowance { owner: String, spender: String },

    #[returns(cw20::AllAllowancesResponse)]
    AllAllowances {
        owner: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(cw20::AllSpenderAllowancesResponse)]
    AllSpenderAllowances {
        spender: String,
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(cw20::AllAccountsResponse)]
    AllAccounts {
        start_after: Option<String>,
        limit: Option<u32>,
    },

    #[returns(Addr)]
    Underlying {},

    /// QueryMsg UnderlyingUnit: `10^decimals` of the underlying.
    #[returns(Uint128)]
    UnderlyingUnit {},

    /// QueryMsg TotalValueLocked: idle balance plus every strategy's valuation.
    #[returns(Uint128)]
    TotalValueLocked {},

    #[returns(Uint128)]
    PricePerShare {},

    #[returns(Uint128)]
    UnderlyingFromShares { shares: Uint128 },

    #[returns(Uint128)]
    UnderlyingBalanceWithInvestmentForHolder { holder: String },

    /// QueryMsg StrategyList: active strategies in insertion order.
    #[returns(Vec<Addr>)]
    StrategyList {},

    #[returns(StrategyRecord)]
    Strategy { strategy: String },

    #[returns(Uint128)]
    DepositLimit {},

    #[returns(bool)]
    DepositsPaused {},

    #[returns(bool)]
    ShouldRebalance {},

    #[returns(FeeConfig)]
    FeeConfig {},

    #[returns(Addr)]
    Governance {},

    #[returns(Option<Addr>)]
    PendingGovernance {},

    #[returns(Addr)]
    FundManager {},

    #[returns(Addr)]
    Relayer {},

    /// QueryMsg Implementation: the code id currently running the fund.
    #[returns(u64)]
    Implementation {},

    #[returns(UpgradeState)]
    UpgradeSchedule {},
}

impl TryFrom<QueryMsg> for cw20_base::msg::QueryMsg {
    type Error = String;

    fn try_from(val: QueryMsg) -> Result<Self, Self::Error> {
        match val {
            QueryMsg::Balance { address } => Ok(cw20_base::msg::QueryMsg::Balance { address }),
            QueryMsg::TokenInfo {} => Ok(cw20_base::msg::QueryMsg::TokenInfo {}),
            QueryMsg::Allowance { owner, spender } => {
                Ok(cw20_base::msg::QueryMsg::Allowance { owner, spender })
            }
            QueryMsg::AllAllowances {
                owner,
                start_after,
                limit,
            } => Ok(cw20_base::msg::QueryMsg::AllAllowances {
                owner,
                start_after,
                limit,
            }),
            QueryMsg::AllSpenderAllowances {
                spender,
                start_after,
                limit,
            } => Ok(cw20_base::msg::QueryMsg::AllSpenderAllowances {
                spender,
                start_after,
                limit,
            }),
            QueryMsg::AllAccounts { start_after, limit } => {
                Ok(cw20_base::msg::QueryMsg::AllAccounts { start_after, limit })
            }
            _ => Err("This QueryMsg cannot be converted into cw20_base::msg::QueryMsg".to_string()),
        }
    }
}

#[cw_serde]
pub struct MigrateMsg {}
