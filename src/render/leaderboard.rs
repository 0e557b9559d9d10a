use colored::Colorize;

use crate::domain::{EventKind, PlayerRecord};
use crate::services::league::{Leaderboard, LeaderboardRow, MatchReport, ScoreReport};

fn title_case(event: EventKind) -> String {
    let name = event.as_str();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn numbered(rows: &[LeaderboardRow], decimals: usize) -> String {
    if rows.is_empty() {
        return "  (no entries)".to_string();
    }
    rows.iter()
        .map(|row| format!("{}. {} - {:.*}", row.rank, row.label, decimals, row.value))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_leaderboard(board: &Leaderboard) -> String {
    match board {
        Leaderboard::Rating { rows } => {
            format!("{}\n{}", "Rating Leaderboard:".bold(), numbered(rows, 2))
        }
        Leaderboard::Event { event, best, average } => {
            let name = title_case(*event);
            format!(
                "{}\n{}\n{}\n{}",
                format!("Leaderboard by Best in {name}:").bold(),
                numbered(best, 0),
                format!("Leaderboard by Average in {name}:").bold(),
                numbered(average, 2)
            )
        }
    }
}

/// Recorded scores, highest first
pub fn render_score_report(report: &ScoreReport) -> String {
    let mut sorted = report.accepted.clone();
    sorted.sort_by(|a, b| b.1.cmp(&a.1));

    let lines: Vec<String> = sorted
        .iter()
        .enumerate()
        .map(|(idx, (player, score))| format!("{}. {} - {}", idx + 1, player, score))
        .collect();
    format!(
        "{}\n{}",
        format!("Recorded {} Scores:", title_case(report.event)).bold(),
        lines.join("\n")
    )
}

pub fn render_match_report(report: &MatchReport) -> String {
    let update = &report.update;
    let mut text = format!(
        "{}: {:.2} -> {:.2}\n{}: {:.2} -> {:.2}",
        report.result.player_a,
        update.old_rating_a(),
        update.new_rating_a,
        report.result.player_b,
        update.old_rating_b(),
        update.new_rating_b
    );
    if report.bracket_advanced {
        text.push_str(&format!("\n{}", "Tournament bracket updated".green()));
    }
    text
}

pub fn render_player(record: &PlayerRecord) -> String {
    let mut lines = vec![
        format!("{}", record.label().bold()),
        format!("Rating: {:.2}", record.rating),
        format!("Record: {}W - {}L", record.wins, record.losses),
    ];
    for event in EventKind::ALL {
        if let (Some(best), Some(average)) = (record.best_for(event), record.average_for(event)) {
            lines.push(format!(
                "{}: best {}, average {:.2}",
                title_case(event),
                best,
                average
            ));
        }
    }
    lines.join("\n")
}
