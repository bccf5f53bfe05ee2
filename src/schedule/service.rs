use std::collections::HashSet;

use super::courts::CourtState;
use super::error::ScheduleError;
use super::history::PairHistory;
use super::selector::select_match;
use super::types::{Court, Match, MatchLogEntry, PlayerPair};

/// Owns all scheduling state for one session: the roster, the pair history,
/// the courts and the match log. All mutation goes through the operations
/// below, so no caller can observe a half-updated history/court pair.
#[derive(Debug, Clone)]
pub struct ScheduleService {
    roster: Vec<String>,
    history: PairHistory,
    courts: CourtState,
    log: Vec<MatchLogEntry>,
    next_seq: u32,
}

impl ScheduleService {
    /// Creates a service for the given roster and court count.
    ///
    /// The roster must be non-empty and free of duplicate names: pair history
    /// keys on names, so two players sharing a name would share a history.
    pub fn new(roster: Vec<String>, court_count: usize) -> Result<Self, ScheduleError> {
        validate_roster(&roster)?;
        if court_count == 0 {
            return Err(ScheduleError::InvalidCourtCount);
        }
        Ok(ScheduleService {
            roster,
            history: PairHistory::new(),
            courts: CourtState::new(court_count),
            log: Vec::new(),
            next_seq: 1,
        })
    }

    /// Replaces the roster and court count, resetting all scheduling state.
    pub fn configure(&mut self, roster: Vec<String>, court_count: usize) -> Result<(), ScheduleError> {
        *self = ScheduleService::new(roster, court_count)?;
        Ok(())
    }

    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    pub fn courts(&self) -> &[Court] {
        self.courts.courts()
    }

    pub fn court_count(&self) -> usize {
        self.courts.court_count()
    }

    pub fn match_log(&self) -> &[MatchLogEntry] {
        &self.log
    }

    /// The roster in configured order, minus everyone in an active match.
    pub fn available_players(&self) -> Vec<String> {
        let busy = self.courts.busy_players();
        self.roster
            .iter()
            .filter(|name| !busy.contains(*name))
            .cloned()
            .collect()
    }

    /// Pair counts sorted by name, for display and debugging.
    pub fn pair_counts(&self) -> Vec<(PlayerPair, u32)> {
        self.history.snapshot()
    }

    /// Starts a match on the given court.
    ///
    /// Selects the best four free players, assigns them to the court
    /// (replacing any previous match there), records both teams in the pair
    /// history and appends to the match log. Nothing is mutated on failure.
    pub fn start_match(&mut self, court_id: usize) -> Result<Match, ScheduleError> {
        if court_id >= self.courts.court_count() {
            return Err(ScheduleError::InvalidCourt {
                court_id,
                court_count: self.courts.court_count(),
            });
        }
        let available = self.available_players();
        let matchup =
            select_match(&available, &self.history).ok_or(ScheduleError::InsufficientPlayers)?;
        self.apply_match(court_id, matchup.clone())?;
        Ok(matchup)
    }

    /// Starts matches on every idle court until the free players run out.
    ///
    /// Courts are filled in ascending id order; each assignment removes its
    /// four players from the pool for the rest of the pass. Returns the
    /// matches started, which may be empty.
    pub fn fill_idle_courts(&mut self) -> Vec<(usize, Match)> {
        let mut started = Vec::new();
        for court_id in self.courts.idle_courts() {
            let available = self.available_players();
            match select_match(&available, &self.history) {
                Some(matchup) => {
                    if self.apply_match(court_id, matchup.clone()).is_ok() {
                        started.push((court_id, matchup));
                    }
                }
                None => break,
            }
        }
        started
    }

    /// Clears the court and frees its players for later selection. The pair
    /// history and match log keep the finished match; Ok(None) when the
    /// court was already idle.
    pub fn finish_match(&mut self, court_id: usize) -> Result<Option<Match>, ScheduleError> {
        self.courts.clear_match(court_id)
    }

    /// Clears the pair history, the match log and all courts. The roster and
    /// court count stay as configured.
    pub fn reset(&mut self) {
        self.history.reset();
        self.courts.clear_all();
        self.log.clear();
        self.next_seq = 1;
    }

    fn apply_match(&mut self, court_id: usize, matchup: Match) -> Result<(), ScheduleError> {
        self.courts.set_match(court_id, matchup.clone())?;
        self.history.record(matchup.team_a.clone());
        self.history.record(matchup.team_b.clone());
        self.log.push(MatchLogEntry {
            seq: self.next_seq,
            court_id,
            matchup,
            started_at: chrono::Local::now().format("%H:%M:%S").to_string(),
        });
        self.next_seq += 1;
        Ok(())
    }
}

fn validate_roster(roster: &[String]) -> Result<(), ScheduleError> {
    if roster.is_empty() {
        return Err(ScheduleError::InvalidRoster { reason: "roster is empty".to_string() });
    }
    let mut seen = HashSet::new();
    for name in roster {
        if name.trim().is_empty() {
            return Err(ScheduleError::InvalidRoster { reason: "blank player name".to_string() });
        }
        if !seen.insert(name.as_str()) {
            return Err(ScheduleError::InvalidRoster {
                reason: format!("duplicate player name: {}", name),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn roster(names: &[&str]) -> Vec<String> {
        names.iter().map(|name| name.to_string()).collect()
    }

    fn active_players(service: &ScheduleService, court_id: usize) -> HashSet<String> {
        service.courts()[court_id]
            .current
            .as_ref()
            .map(|matchup| matchup.players().iter().map(|p| p.to_string()).collect())
            .unwrap_or_default()
    }

    #[test]
    fn rejects_bad_configurations() {
        assert_eq!(
            ScheduleService::new(Vec::new(), 1).unwrap_err(),
            ScheduleError::InvalidRoster { reason: "roster is empty".to_string() }
        );
        assert_eq!(
            ScheduleService::new(roster(&["A", "B", "A"]), 1).unwrap_err(),
            ScheduleError::InvalidRoster { reason: "duplicate player name: A".to_string() }
        );
        assert_eq!(
            ScheduleService::new(roster(&["A", "B", "C", "D"]), 0).unwrap_err(),
            ScheduleError::InvalidCourtCount
        );
    }

    #[test]
    fn four_players_one_court() {
        let mut service = ScheduleService::new(roster(&["A", "B", "C", "D"]), 1).unwrap();

        let matchup = service.start_match(0).unwrap();
        assert_eq!(matchup.team_a, PlayerPair::new("A", "B"));
        assert_eq!(matchup.team_b, PlayerPair::new("C", "D"));
        assert_eq!(
            service.pair_counts(),
            vec![(PlayerPair::new("A", "B"), 1), (PlayerPair::new("C", "D"), 1)]
        );
        assert_eq!(service.match_log().len(), 1);
        assert_eq!(service.match_log()[0].seq, 1);
        assert_eq!(service.match_log()[0].court_id, 0);

        // Everyone is still on court 0, so a second start finds nobody free
        // and mutates nothing.
        assert_eq!(service.start_match(0).unwrap_err(), ScheduleError::InsufficientPlayers);
        assert_eq!(service.match_log().len(), 1);
        assert_eq!(
            service.pair_counts(),
            vec![(PlayerPair::new("A", "B"), 1), (PlayerPair::new("C", "D"), 1)]
        );
    }

    #[test]
    fn eight_players_two_courts_get_disjoint_matches() {
        let mut service =
            ScheduleService::new(roster(&["A", "B", "C", "D", "E", "F", "G", "H"]), 2).unwrap();

        service.start_match(0).unwrap();
        service.start_match(1).unwrap();

        let first = active_players(&service, 0);
        let second = active_players(&service, 1);
        assert_eq!(first.len(), 4);
        assert_eq!(second.len(), 4);
        assert!(first.is_disjoint(&second));

        assert!(service.available_players().is_empty());
        assert_eq!(service.start_match(0).unwrap_err(), ScheduleError::InsufficientPlayers);
    }

    #[test]
    fn invalid_court_is_rejected_without_state_change() {
        let mut service = ScheduleService::new(roster(&["A", "B", "C", "D"]), 2).unwrap();
        assert_eq!(
            service.start_match(5).unwrap_err(),
            ScheduleError::InvalidCourt { court_id: 5, court_count: 2 }
        );
        assert!(service.match_log().is_empty());
        assert!(service.pair_counts().is_empty());
    }

    #[test]
    fn history_counts_track_every_team() {
        let mut service = ScheduleService::new(roster(&["A", "B", "C", "D"]), 1).unwrap();
        service.start_match(0).unwrap();
        service.finish_match(0).unwrap();
        service.start_match(0).unwrap();

        // Only one combination of four exists, so both pairs played twice.
        assert_eq!(
            service.pair_counts(),
            vec![(PlayerPair::new("A", "B"), 2), (PlayerPair::new("C", "D"), 2)]
        );
        assert_eq!(service.match_log().len(), 2);
        assert_eq!(service.match_log()[1].seq, 2);
    }

    #[test]
    fn finish_match_frees_players_and_rotation_avoids_repeats() {
        let mut service = ScheduleService::new(roster(&["A", "B", "C", "D", "E"]), 1).unwrap();

        service.start_match(0).unwrap();
        let finished = service.finish_match(0).unwrap();
        assert!(finished.is_some());
        assert_eq!(service.available_players().len(), 5);

        // {A,B} and {C,D} now cost 1 each, so the greedy pick moves on.
        let second = service.start_match(0).unwrap();
        assert_eq!(second.team_a, PlayerPair::new("A", "C"));
        assert_eq!(second.team_b, PlayerPair::new("D", "E"));
    }

    #[test]
    fn finish_on_idle_court_is_a_no_op() {
        let mut service = ScheduleService::new(roster(&["A", "B", "C", "D"]), 1).unwrap();
        assert_eq!(service.finish_match(0).unwrap(), None);
        assert_eq!(
            service.finish_match(3).unwrap_err(),
            ScheduleError::InvalidCourt { court_id: 3, court_count: 1 }
        );
    }

    #[test]
    fn fill_idle_courts_assigns_in_court_order_until_players_run_out() {
        let mut service = ScheduleService::new(
            roster(&["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"]),
            3,
        )
        .unwrap();

        let started = service.fill_idle_courts();
        // 10 players cover two courts; the third stays idle.
        assert_eq!(started.len(), 2);
        assert_eq!(started[0].0, 0);
        assert_eq!(started[1].0, 1);
        assert!(service.courts()[2].current.is_none());
        assert_eq!(service.available_players().len(), 2);

        let first = active_players(&service, 0);
        let second = active_players(&service, 1);
        assert!(first.is_disjoint(&second));

        // Another pass finds the remaining court but not the players.
        assert!(service.fill_idle_courts().is_empty());
    }

    #[test]
    fn reset_clears_history_log_and_courts_but_keeps_configuration() {
        let mut service =
            ScheduleService::new(roster(&["A", "B", "C", "D", "E", "F", "G", "H"]), 2).unwrap();
        service.fill_idle_courts();
        assert!(!service.match_log().is_empty());

        service.reset();

        assert!(service.pair_counts().is_empty());
        assert!(service.match_log().is_empty());
        assert!(service.courts().iter().all(|court| court.current.is_none()));
        assert_eq!(service.roster().len(), 8);
        assert_eq!(service.court_count(), 2);

        // Sequence numbers restart after a reset.
        service.start_match(0).unwrap();
        assert_eq!(service.match_log()[0].seq, 1);
    }

    #[test]
    fn configure_replaces_roster_and_resets_state() {
        let mut service = ScheduleService::new(roster(&["A", "B", "C", "D"]), 1).unwrap();
        service.start_match(0).unwrap();

        service.configure(roster(&["P", "Q", "R", "S", "T"]), 2).unwrap();
        assert_eq!(service.roster(), &roster(&["P", "Q", "R", "S", "T"])[..]);
        assert_eq!(service.court_count(), 2);
        assert!(service.match_log().is_empty());
        assert!(service.pair_counts().is_empty());

        // A bad reconfiguration leaves the previous state alone.
        let err = service.configure(Vec::new(), 2).unwrap_err();
        assert_eq!(err, ScheduleError::InvalidRoster { reason: "roster is empty".to_string() });
        assert_eq!(service.roster().len(), 5);
    }
}
