pub mod api;
pub mod bracket;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod rating;
pub mod render;
pub mod services;
pub mod storage;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;

use crate::api::parsers::{CommandParser, parse_pair, parse_score_pair};
use crate::cli::Command;
use crate::config::settings::AppConfig;
use crate::domain::{MatchResult, RosterEntry};
use crate::services::league::{CommandOutcome, LeagueService};
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

fn open_league() -> Result<LeagueService> {
    LeagueService::open(&AppConfig::new())
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let service = ServerService::new(port, config);
        service.run().await
    })
}

pub fn handle_record(event: &str, raw_scores: &[String]) -> Result<()> {
    let scores = raw_scores
        .iter()
        .map(|raw| parse_score_pair(raw))
        .collect::<Result<Vec<_>, _>>()?;
    let report = open_league()?.record_scores(event, &scores)?;
    println!("{}", render::render_score_report(&report));
    Ok(())
}

pub fn handle_duel(player_a: &str, score_a: u32, score_b: u32, player_b: &str) -> Result<()> {
    let result = MatchResult::new(player_a, score_a, player_b, score_b);
    let report = open_league()?.report_match(result)?;
    println!("{}", render::render_match_report(&report));
    Ok(())
}

pub fn handle_tournament(raw_players: &[String]) -> Result<()> {
    let roster = raw_players
        .iter()
        .map(|raw| parse_pair(raw).map(|(id, name)| RosterEntry::new(id, name)))
        .collect::<Result<Vec<_>, _>>()?;
    let matrix = open_league()?.start_tournament(roster)?;
    println!("{}", render::render_bracket(&matrix));
    Ok(())
}

pub fn handle_leaderboard(event: Option<&str>) -> Result<()> {
    let board = open_league()?.leaderboard(event)?;
    println!("{}", render::render_leaderboard(&board));
    Ok(())
}

pub fn handle_player(id: &str) -> Result<()> {
    let record = open_league()?.player(id);
    println!("{}", render::render_player(&record));
    Ok(())
}

pub fn handle_bracket() -> Result<()> {
    let league = open_league()?;
    let matrix = league.bracket_display()?;
    println!("{}", render::render_bracket(&matrix));
    if let Some(champion) = league.engine().champion() {
        println!("Champion: {}", champion.label());
    }
    Ok(())
}

pub fn handle_command(text: &str) -> Result<()> {
    let command = CommandParser::new()?.parse(text)?;
    match open_league()?.execute(command)? {
        CommandOutcome::Scores(report) => println!("{}", render::render_score_report(&report)),
        CommandOutcome::Match(report) => println!("{}", render::render_match_report(&report)),
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
