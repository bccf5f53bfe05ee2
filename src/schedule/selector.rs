use super::history::PairHistory;
use super::types::{Match, PlayerPair};

/// Picks the best four-player match from the free players.
///
/// Every combination of four players is enumerated in the order induced by
/// `available` (indices i < j < k < l). Each combination is split into one
/// fixed way only, first two vs last two, and scored by how often the two
/// would-be teams have already played together. The lowest total wins; on a
/// tie the earliest-enumerated combination wins. Returns None when fewer
/// than four players are free.
///
/// Full C(n, 4) enumeration on every call is fine at club scale (tens of
/// players). Pure function; the history is never mutated here.
pub fn select_match(available: &[String], history: &PairHistory) -> Option<Match> {
    let n = available.len();
    if n < 4 {
        return None;
    }

    let mut best: Option<(u32, Match)> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                for l in (k + 1)..n {
                    let team_a = PlayerPair::new(&available[i], &available[j]);
                    let team_b = PlayerPair::new(&available[k], &available[l]);
                    let score = history.count(&team_a) + history.count(&team_b);
                    // Strict < keeps the earliest combination on ties.
                    if best.as_ref().map_or(true, |(lowest, _)| score < *lowest) {
                        best = Some((score, Match { team_a, team_b }));
                    }
                }
            }
        }
    }

    best.map(|(_, matchup)| matchup)
}
