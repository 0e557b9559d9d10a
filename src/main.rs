use anyhow::Result;

use pistol_league_ranking::cli::Command;
use pistol_league_ranking::{
    handle_bracket, handle_command, handle_completions, handle_duel, handle_leaderboard,
    handle_player, handle_record, handle_serve, handle_tournament, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Serve { port } => handle_serve(*port),
        Command::Record { event, scores } => handle_record(event, scores),
        Command::Duel {
            player_a,
            score_a,
            score_b,
            player_b,
        } => handle_duel(player_a, *score_a, *score_b, player_b),
        Command::Tournament { players } => handle_tournament(players),
        Command::Leaderboard { event } => handle_leaderboard(event.as_deref()),
        Command::Player { id } => handle_player(id),
        Command::Bracket => handle_bracket(),
        Command::Command { text } => handle_command(text),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
