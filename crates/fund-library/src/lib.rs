pub mod testing;

/// Two-step governance handover shared by the fund and its strategies.
/// - `update_governance` only records a pending governance.
/// - `accept_governance` must be called by the pending governance to take over.
pub mod governance;

pub mod time;
