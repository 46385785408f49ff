//! rankdown-check CLI tool
//!
//! Fetches a snapshot once and prints the board and its consistency issues.
//!
//! Exit status: 0 on success, 1 if the snapshot could not be loaded, 2 with
//! `--strict` when any error-severity issue was found.

use std::process::ExitCode;

use clap::Parser;
use rankdown_board::config::DEFAULT_REFRESH;
use rankdown_board::{Board, BoardText, SnapshotFetch, SnapshotSource};
use rankdown_core::{has_errors, Snapshot};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Check a Rankdown snapshot")]
struct Args {
    /// Snapshot URL or file path
    source: String,

    /// Print the board as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Exit with status 2 if any error-severity issue is found
    #[arg(long)]
    strict: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let args = Args::parse();

    let source = SnapshotSource::parse(&args.source);
    let snapshot = match source.fetch().await {
        Ok(snapshot) => snapshot,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(1);
        }
    };

    let board = board_for(&snapshot);
    if args.json {
        match serde_json::to_string_pretty(&board) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(1);
            }
        }
    } else {
        print!("{}", BoardText(&board));
    }

    if args.strict && has_errors(&board.issues) {
        tracing::debug!(errors = board.error_count(), "strict check failed");
        return ExitCode::from(2);
    }
    ExitCode::SUCCESS
}

/// The board as the server would show it with the default polling interval.
fn board_for(snapshot: &Snapshot) -> Board {
    Board::from_snapshot(snapshot, DEFAULT_REFRESH)
}

fn init_tracing() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_reports_default_refresh() {
        let board = board_for(&Snapshot::default());
        assert_eq!(board.refresh_secs, 20);
        let json = serde_json::to_value(&board).unwrap();
        assert_eq!(json["refreshSecs"], 20);
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from(["rankdown-check", "state.json", "--json", "--strict"]).unwrap();
        assert_eq!(args.source, "state.json");
        assert!(args.json);
        assert!(args.strict);

        assert!(Args::try_parse_from(["rankdown-check"]).is_err());
    }
}
