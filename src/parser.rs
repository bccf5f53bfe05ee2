use std::fs;
use std::path::Path;

use crate::schedule::ScheduleError;

/// Parses a roster from text, one player name per line.
///
/// Names are trimmed and blank lines skipped, matching how the roster
/// textarea on the web page is filled in. Duplicate names are rejected
/// because the pair history keys on names.
pub fn parse_roster(text: &str) -> Result<Vec<String>, ScheduleError> {
    let mut roster: Vec<String> = Vec::new();
    for line in text.lines() {
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if roster.iter().any(|existing| existing == name) {
            return Err(ScheduleError::InvalidRoster {
                reason: format!("duplicate player name: {}", name),
            });
        }
        roster.push(name.to_string());
    }
    if roster.is_empty() {
        return Err(ScheduleError::InvalidRoster { reason: "roster is empty".to_string() });
    }
    Ok(roster)
}

/// Loads a roster file (one player name per line).
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    let text = fs::read_to_string(path)?;
    Ok(parse_roster(&text)?)
}

/// The generated roster used when no player list is supplied.
pub fn default_roster(size: usize) -> Vec<String> {
    (1..=size).map(|i| format!("Player {}", i)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_one_name_per_line() {
        let roster = parse_roster("Aoi\nMika\nRen\n").unwrap();
        assert_eq!(roster, vec!["Aoi", "Mika", "Ren"]);
    }

    #[test]
    fn trims_whitespace_and_skips_blank_lines() {
        let roster = parse_roster("  Aoi  \n\n\tMika\n   \nRen").unwrap();
        assert_eq!(roster, vec!["Aoi", "Mika", "Ren"]);
    }

    #[test]
    fn rejects_duplicate_names() {
        let err = parse_roster("Aoi\nMika\nAoi\n").unwrap_err();
        assert_eq!(
            err,
            ScheduleError::InvalidRoster { reason: "duplicate player name: Aoi".to_string() }
        );
    }

    #[test]
    fn rejects_empty_input() {
        assert!(parse_roster("").is_err());
        assert!(parse_roster("   \n \n").is_err());
    }

    #[test]
    fn default_roster_is_numbered() {
        let roster = default_roster(3);
        assert_eq!(roster, vec!["Player 1", "Player 2", "Player 3"]);
    }
}
