use std::fs::File;
use std::io::Write;

use crate::schedule::{Match, MatchLogEntry, PlayerPair, ScheduleService};

/// Formats a team as "A & B".
pub fn format_team(pair: &PlayerPair) -> String {
    format!("{} & {}", pair.first(), pair.second())
}

/// Formats a match as "A & B vs C & D".
pub fn format_match(matchup: &Match) -> String {
    format!("{} vs {}", format_team(&matchup.team_a), format_team(&matchup.team_b))
}

/// Prints the courts and the free players in a readable format.
pub fn print_session(service: &ScheduleService) {
    println!("\n=== Courts ===");
    for court in service.courts() {
        match &court.current {
            Some(matchup) => println!("  Court {} -> {}", court.id + 1, format_match(matchup)),
            None => println!("  Court {} -> [IDLE]", court.id + 1),
        }
    }

    let available = service.available_players();
    if available.is_empty() {
        println!("Free players: none");
    } else {
        println!("Free players ({}): {}", available.len(), available.join(", "));
    }
}

/// Prints the full match log.
pub fn print_match_log(log: &[MatchLogEntry]) {
    println!("\n=== Match Log ===");
    if log.is_empty() {
        println!("  (no matches played)");
        return;
    }
    for entry in log {
        println!(
            "  {}. [{}] Court {} {}",
            entry.seq,
            entry.started_at,
            entry.court_id + 1,
            format_match(&entry.matchup)
        );
    }
}

/// Writes the match log to a text file, one match per line.
pub fn write_log_to_file(
    log: &[MatchLogEntry],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut file = File::create(filename)?;

    writeln!(file, "** Match Log **")?;
    for entry in log {
        writeln!(
            file,
            "{}. [{}] Court {} {}",
            entry.seq,
            entry.started_at,
            entry.court_id + 1,
            format_match(&entry.matchup)
        )?;
    }

    Ok(())
}

fn write_log_records<W: std::io::Write>(
    wtr: &mut csv::Writer<W>,
    log: &[MatchLogEntry],
) -> csv::Result<()> {
    wtr.write_record(["seq", "started_at", "court", "team_a", "team_b"])?;
    for entry in log {
        wtr.write_record([
            entry.seq.to_string(),
            entry.started_at.clone(),
            (entry.court_id + 1).to_string(),
            format_team(&entry.matchup.team_a),
            format_team(&entry.matchup.team_b),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

/// Writes the match log to a CSV file.
pub fn write_log_to_csv(
    log: &[MatchLogEntry],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_path(filename)?;
    write_log_records(&mut wtr, log)?;
    Ok(())
}

/// Renders the match log as an in-memory CSV document, for downloads.
pub fn log_to_csv(log: &[MatchLogEntry]) -> Result<String, Box<dyn std::error::Error>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_log_records(&mut wtr, log)?;
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}
