use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use pairs::game::{ConfigError, GameConfig, GameEvent, GameSession, SessionPhase};
use pairs::ui::board::BoardMirror;
use pairs::ui::hud::status_line;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Eq)]
enum Command {
    Select(usize),
    Restart,
    Quit,
    Unknown,
}

fn parse_command(line: &str, columns: usize) -> Command {
    let line = line.trim();
    match line {
        "q" | "quit" => return Command::Quit,
        "r" | "restart" => return Command::Restart,
        _ => {}
    }
    if let Some((row, column)) = line.split_once(',') {
        return match (row.trim().parse::<usize>(), column.trim().parse::<usize>()) {
            (Ok(row), Ok(column)) if column < columns => row
                .checked_mul(columns)
                .and_then(|start| start.checked_add(column))
                .map_or(Command::Unknown, Command::Select),
            _ => Command::Unknown,
        };
    }
    match line.parse::<usize>() {
        Ok(index) => Command::Select(index),
        Err(_) => Command::Unknown,
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config() -> Result<GameConfig, ConfigError> {
    if let Some(arg) = std::env::args().nth(1) {
        return GameConfig::load(Path::new(&arg));
    }
    match GameConfig::default_path() {
        Some(path) if path.exists() => GameConfig::load(&path),
        _ => Ok(GameConfig::default()),
    }
}

fn sync_mirror(session: &mut GameSession, mirror: &mut BoardMirror) {
    for event in session.sink_mut().drain() {
        debug!(event = event.name(), "render event");
        if let GameEvent::GameWon { stats } = &event {
            info!(matches = stats.matches, mismatches = stats.mismatches, "victory");
        }
        mirror.apply(&event);
    }
}

fn draw(session: &GameSession, mirror: &BoardMirror) {
    let remaining = match session.phase() {
        SessionPhase::Memorizing => session.next_deadline(),
        _ => None,
    };
    println!();
    println!(
        "{}",
        status_line(session.phase(), session.active_cards(), session.stats(), remaining)
    );
    print!("{}", mirror.render_text());
}

/// Sleeps through every queued timer so resolutions land before the next prompt.
fn pump_timers(session: &mut GameSession, mirror: &mut BoardMirror) {
    while let Some(wait) = session.next_deadline() {
        thread::sleep(wait);
        session.advance(wait);
        sync_mirror(session, mirror);
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_tracing();
    let config = load_config()?;
    let (rows, columns) = (config.rows, config.columns);
    let mut session = GameSession::with_log(config)?;
    let mut mirror = BoardMirror::new(rows, columns);
    session.start();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        sync_mirror(&mut session, &mut mirror);
        draw(&session, &mirror);

        if session.phase() == SessionPhase::Memorizing {
            pump_timers(&mut session, &mut mirror);
            continue;
        }

        if session.is_won() {
            print!("r to play again, q to quit > ");
        } else {
            print!("card (index or row,col) > ");
        }
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        match parse_command(&line?, columns) {
            Command::Quit => break,
            Command::Restart => session.start(),
            Command::Select(index) => match session.select(index) {
                Ok(_) => {
                    sync_mirror(&mut session, &mut mirror);
                    if session.pending().is_full() {
                        draw(&session, &mirror);
                        pump_timers(&mut session, &mut mirror);
                    }
                }
                Err(reason) => println!("{reason}"),
            },
            Command::Unknown => println!("enter a card index, row,col, r or q"),
        }
    }
    Ok(())
}
