use cosmwasm_std::{Addr, Uint128};

/// Pick the member with the highest apr.
///
/// The `current` member keeps its place on a tie with the best apr,
/// otherwise the first maximal member in insertion order wins.
/// `None` when there are no candidates.
pub fn select(candidates: &[(Addr, Uint128)], current: Option<&Addr>) -> Option<Addr> {
    let mut best: Option<&(Addr, Uint128)> = None;
    for candidate in candidates {
        match best {
            Some((_, apr)) if candidate.1 <= *apr => {}
            _ => best = Some(candidate),
        }
    }
    let (winner, max_apr) = best?;

    if let Some(current) = current {
        let current_ties = candidates
            .iter()
            .any(|(addr, apr)| addr == current && apr == max_apr);
        if current_ties {
            return Some(current.clone());
        }
    }
    Some(winner.clone())
}
