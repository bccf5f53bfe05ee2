use std::collections::HashSet;
use super::error::ScheduleError;
use super::types::{Court, Match};

/// The configured courts and whatever match each one is running.
#[derive(Debug, Clone)]
pub struct CourtState {
    courts: Vec<Court>,
}

impl CourtState {
    pub fn new(court_count: usize) -> Self {
        let courts = (0..court_count).map(|id| Court { id, current: None }).collect();
        CourtState { courts }
    }

    pub fn court_count(&self) -> usize {
        self.courts.len()
    }

    pub fn courts(&self) -> &[Court] {
        &self.courts
    }

    /// Every player currently in an active match on any court.
    pub fn busy_players(&self) -> HashSet<String> {
        let mut busy = HashSet::new();
        for court in &self.courts {
            if let Some(matchup) = &court.current {
                for name in matchup.players() {
                    busy.insert(name.to_string());
                }
            }
        }
        busy
    }

    /// Ids of courts with no active match, in ascending order.
    pub fn idle_courts(&self) -> Vec<usize> {
        self.courts
            .iter()
            .filter(|court| court.current.is_none())
            .map(|court| court.id)
            .collect()
    }

    /// Puts the match on the court, replacing any previous match there.
    pub fn set_match(&mut self, court_id: usize, matchup: Match) -> Result<(), ScheduleError> {
        let court_count = self.courts.len();
        let court = self
            .courts
            .get_mut(court_id)
            .ok_or(ScheduleError::InvalidCourt { court_id, court_count })?;
        court.current = Some(matchup);
        Ok(())
    }

    /// Clears the court, returning the match that was running on it.
    pub fn clear_match(&mut self, court_id: usize) -> Result<Option<Match>, ScheduleError> {
        let court_count = self.courts.len();
        let court = self
            .courts
            .get_mut(court_id)
            .ok_or(ScheduleError::InvalidCourt { court_id, court_count })?;
        Ok(court.current.take())
    }

    /// Sets every court back to idle.
    pub fn clear_all(&mut self) {
        for court in &mut self.courts {
            court.current = None;
        }
    }
}
