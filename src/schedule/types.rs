use serde::{Serialize, Deserialize};

/// An unordered pair of two distinct player names.
///
/// Names are stored in sorted order so that {a, b} and {b, a} compare and
/// hash identically. Used both as the pair-history key and as a team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerPair {
    first: String,
    second: String,
}

impl PlayerPair {
    pub fn new(a: &str, b: &str) -> Self {
        if a <= b {
            PlayerPair { first: a.to_string(), second: b.to_string() }
        } else {
            PlayerPair { first: b.to_string(), second: a.to_string() }
        }
    }

    pub fn first(&self) -> &str {
        &self.first
    }

    pub fn second(&self) -> &str {
        &self.second
    }
}

/// One doubles match: two teams of two, four distinct players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub team_a: PlayerPair,
    pub team_b: PlayerPair,
}

impl Match {
    /// All four player names, team A first.
    pub fn players(&self) -> [&str; 4] {
        [
            self.team_a.first(),
            self.team_a.second(),
            self.team_b.first(),
            self.team_b.second(),
        ]
    }
}

/// A court and the match currently running on it, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Court {
    pub id: usize,
    pub current: Option<Match>,
}

/// Append-only record of a started match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchLogEntry {
    pub seq: u32,
    pub court_id: usize,
    pub matchup: Match,
    pub started_at: String, // HH:MM:SS, for display
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_order_is_normalized() {
        assert_eq!(PlayerPair::new("Mika", "Aoi"), PlayerPair::new("Aoi", "Mika"));
        let pair = PlayerPair::new("Mika", "Aoi");
        assert_eq!(pair.first(), "Aoi");
        assert_eq!(pair.second(), "Mika");
    }

    #[test]
    fn match_players_lists_team_a_first() {
        let matchup = Match {
            team_a: PlayerPair::new("A", "B"),
            team_b: PlayerPair::new("C", "D"),
        };
        assert_eq!(matchup.players(), ["A", "B", "C", "D"]);
    }
}
