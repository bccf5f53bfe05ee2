mod parser;
mod schedule;
mod display;
mod web;

use display::{print_match_log, print_session, write_log_to_csv, write_log_to_file};
use parser::{default_roster, load_roster};
use schedule::ScheduleService;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Check if we should run in web mode
    let args: Vec<String> = std::env::args().collect();
    if args.len() > 1 && args[1] == "web" {
        let port = args.get(2)
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(8080);

        println!("Starting web server on port {}...", port);
        println!("Access the scheduler at http://localhost:{}", port);

        web::start_server(port).await?;
        return Ok(());
    }

    // CLI mode: load a roster, play a few rounds, write the log files.
    // Usage: court-rotation [courts] [rounds]
    let roster = if std::path::Path::new("data/players.txt").exists() {
        println!("Loading roster from data/players.txt...");
        load_roster("data/players.txt")?
    } else {
        println!("No data/players.txt found, using a generated roster.");
        default_roster(web::DEFAULT_ROSTER_SIZE)
    };

    let court_count = args.get(1)
        .and_then(|c| c.parse::<usize>().ok())
        .unwrap_or(web::DEFAULT_COURTS);
    let rounds = args.get(2)
        .and_then(|r| r.parse::<usize>().ok())
        .unwrap_or(3);

    println!("Loaded {} players, {} courts", roster.len(), court_count);

    let mut service = ScheduleService::new(roster, court_count)?;

    for round in 1..=rounds {
        println!("\n=== Round {} ===", round);
        let started = service.fill_idle_courts();
        if started.is_empty() {
            println!("⚠️  Not enough free players to start a match.");
            break;
        }
        print_session(&service);

        // Free every court before the next round.
        for court_id in 0..service.court_count() {
            service.finish_match(court_id)?;
        }
    }

    print_match_log(service.match_log());

    println!("\n=== Pair Counts ===");
    for (pair, count) in service.pair_counts() {
        println!("  {} & {} -> {}", pair.first(), pair.second(), count);
    }

    println!("\n=== Writing Match Log to Files ===");
    write_log_to_file(service.match_log(), "match_log.txt")?;
    write_log_to_csv(service.match_log(), "match_log.csv")?;
    println!("Match log saved to:");
    println!("  - match_log.txt");
    println!("  - match_log.csv");

    Ok(())
}
