use actix_session::{storage::CookieSessionStore, Session, SessionMiddleware};
use actix_web::{cookie::Key, middleware, web, App, HttpResponse, HttpServer, Result};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

use crate::display::{format_match, format_team, log_to_csv};
use crate::parser::{default_roster, parse_roster};
use crate::schedule::{ScheduleError, ScheduleService};

/// Roster size of a fresh session before anyone configures it.
pub const DEFAULT_ROSTER_SIZE: usize = 20;
pub const DEFAULT_COURTS: usize = 3;

// One scheduler per browser session, so separate groups at the hall don't
// share a pair history.
pub struct AppState {
    pub sessions: Mutex<HashMap<String, ScheduleService>>,
}

#[derive(Deserialize)]
pub struct ConfigureRequest {
    players_text: String,
    court_count: usize,
    #[serde(default)]
    shuffle: bool,
}

#[derive(Serialize)]
pub struct CourtView {
    id: usize,
    match_line: Option<String>,
}

#[derive(Serialize)]
pub struct LogEntryView {
    seq: u32,
    court: usize,
    line: String,
    started_at: String,
}

#[derive(Serialize)]
pub struct PairCountView {
    pair: String,
    count: u32,
}

#[derive(Serialize)]
pub struct StateResponse {
    roster: Vec<String>,
    court_count: usize,
    courts: Vec<CourtView>,
    available: Vec<String>,
    log: Vec<LogEntryView>,
    pair_counts: Vec<PairCountView>,
}

fn default_service() -> ScheduleService {
    ScheduleService::new(default_roster(DEFAULT_ROSTER_SIZE), DEFAULT_COURTS)
        .expect("default configuration is valid")
}

/// Returns the caller's session id, minting one on first contact.
fn session_id(session: &Session) -> Result<String> {
    if let Some(sid) = session.get::<String>("sid")? {
        return Ok(sid);
    }
    let sid = format!("{:016x}", rand::thread_rng().gen::<u64>());
    session.insert("sid", &sid)?;
    Ok(sid)
}

fn state_response(service: &ScheduleService) -> StateResponse {
    let courts = service
        .courts()
        .iter()
        .map(|court| CourtView {
            id: court.id,
            match_line: court.current.as_ref().map(format_match),
        })
        .collect();

    let log = service
        .match_log()
        .iter()
        .map(|entry| LogEntryView {
            seq: entry.seq,
            court: entry.court_id + 1,
            line: format_match(&entry.matchup),
            started_at: entry.started_at.clone(),
        })
        .collect();

    let pair_counts = service
        .pair_counts()
        .into_iter()
        .map(|(pair, count)| PairCountView { pair: format_team(&pair), count })
        .collect();

    StateResponse {
        roster: service.roster().to_vec(),
        court_count: service.court_count(),
        courts,
        available: service.available_players(),
        log,
        pair_counts,
    }
}

// Current session state endpoint
async fn get_state(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sid = session_id(&session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);
    Ok(HttpResponse::Ok().json(state_response(service)))
}

// Roster and court count configuration endpoint
async fn configure(
    req: web::Json<ConfigureRequest>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let sid = session_id(&session)?;

    let mut roster = match parse_roster(&req.players_text) {
        Ok(roster) => roster,
        Err(e) => {
            return Ok(HttpResponse::BadRequest()
                .json(serde_json::json!({"success": false, "error": e.to_string()})));
        }
    };
    if req.shuffle {
        roster.shuffle(&mut rand::thread_rng());
    }

    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);
    match service.configure(roster, req.court_count) {
        Ok(()) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "players": service.roster().len(),
            "courts": service.court_count()
        }))),
        Err(e) => Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": e.to_string()}))),
    }
}

// Start a match on one court
async fn start_match(
    path: web::Path<usize>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let court_id = path.into_inner();
    let sid = session_id(&session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);

    match service.start_match(court_id) {
        Ok(matchup) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "match": format_match(&matchup)
        }))),
        // Not enough free players is a normal outcome, shown as a warning.
        Err(e @ ScheduleError::InsufficientPlayers) => Ok(HttpResponse::Ok()
            .json(serde_json::json!({"success": false, "warning": e.to_string()}))),
        Err(e) => Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": e.to_string()}))),
    }
}

// Start matches on every idle court
async fn start_all(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sid = session_id(&session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);

    let started: Vec<serde_json::Value> = service
        .fill_idle_courts()
        .into_iter()
        .map(|(court_id, matchup)| {
            serde_json::json!({"court": court_id + 1, "match": format_match(&matchup)})
        })
        .collect();

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "started": started
    })))
}

// Finish the match on one court, freeing its players
async fn finish_match(
    path: web::Path<usize>,
    session: Session,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let court_id = path.into_inner();
    let sid = session_id(&session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);

    match service.finish_match(court_id) {
        Ok(finished) => Ok(HttpResponse::Ok().json(serde_json::json!({
            "success": true,
            "finished": finished.map(|matchup| format_match(&matchup))
        }))),
        Err(e) => Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": e.to_string()}))),
    }
}

// Reset history, log and courts for this session
async fn reset(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sid = session_id(&session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);
    service.reset();
    Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
}

// Match log download endpoint
async fn export_log(session: Session, state: web::Data<AppState>) -> Result<HttpResponse> {
    let sid = session_id(&session)?;
    let mut sessions = state.sessions.lock().unwrap();
    let service = sessions.entry(sid).or_insert_with(default_service);

    match log_to_csv(service.match_log()) {
        Ok(csv) => Ok(HttpResponse::Ok()
            .content_type("text/csv")
            .insert_header(("Content-Disposition", "attachment; filename=\"match_log.csv\""))
            .body(csv)),
        Err(e) => Ok(HttpResponse::InternalServerError()
            .json(serde_json::json!({"success": false, "error": e.to_string()}))),
    }
}

async fn index() -> Result<HttpResponse> {
    let html = include_str!("../templates/index.html");
    Ok(HttpResponse::Ok().content_type("text/html").body(html))
}

pub async fn start_server(port: u16) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { sessions: Mutex::new(HashMap::new()) });
    // Session cookies only carry the session id, so a fresh key per start
    // just resets browser sessions.
    let secret_key = Key::generate();

    log::info!("scheduler listening on 0.0.0.0:{}", port);

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .wrap(SessionMiddleware::new(CookieSessionStore::default(), secret_key.clone()))
            .route("/", web::get().to(index))
            .route("/api/state", web::get().to(get_state))
            .route("/api/configure", web::post().to(configure))
            .route("/api/start_all", web::post().to(start_all))
            .route("/api/reset", web::post().to(reset))
            .route("/api/export", web::get().to(export_log))
            .service(web::resource("/api/court/{id}/start").route(web::post().to(start_match)))
            .service(web::resource("/api/court/{id}/finish").route(web::post().to(finish_match)))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
