use anyhow::{Context, Result};
use regex::Regex;

use crate::domain::{MatchResult, PlayerId};
use crate::errors::{LeagueError, LeagueResult};

/// A chat-style command after parsing, before any validation against state
#[derive(Debug, Clone, PartialEq)]
pub enum TextCommand {
    /// `air pistol @ana 552 @bo 560`
    RecordScores {
        event: String,
        scores: Vec<(PlayerId, u32)>,
    },
    /// `@ana 10 - 5 @bo`
    Duel(MatchResult),
}

/// Parses free-text commands. Player mentions are `@id` or `<@id>`, with an
/// optional `|label` suffix inside the brackets that is discarded.
pub struct CommandParser {
    score_list: Regex,
    score_pair: Regex,
    duel: Regex,
}

const MENTION: &str = r"<?@([A-Za-z0-9_.\-]+)(?:\|[^>]*)?>?";

impl CommandParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            score_list: Regex::new(r"(?i)^\s*(air|sport|standard)(?:\s*pistol)?\b\s*(.*)$")
                .context("Failed to compile score list regex")?,
            score_pair: Regex::new(&format!(r"{MENTION}\s*(\d+)"))
                .context("Failed to compile score pair regex")?,
            duel: Regex::new(&format!(r"^\s*{MENTION}\s*(\d+)\s*-\s*(\d+)\s*{MENTION}\s*$"))
                .context("Failed to compile duel regex")?,
        })
    }

    pub fn parse(&self, text: &str) -> LeagueResult<TextCommand> {
        if let Some(caps) = self.duel.captures(text) {
            return Ok(TextCommand::Duel(MatchResult::new(
                &caps[1],
                parse_score(&caps[2])?,
                &caps[4],
                parse_score(&caps[3])?,
            )));
        }

        if let Some(caps) = self.score_list.captures(text) {
            let scores = self
                .score_pair
                .captures_iter(&caps[2])
                .map(|pair| -> LeagueResult<(PlayerId, u32)> {
                    Ok((pair[1].to_string(), parse_score(&pair[2])?))
                })
                .collect::<LeagueResult<Vec<_>>>()?;
            if scores.is_empty() {
                return Err(LeagueError::invalid("no scores listed"));
            }
            return Ok(TextCommand::RecordScores {
                event: caps[1].to_lowercase(),
                scores,
            });
        }

        Err(LeagueError::invalid(format!(
            "unrecognized command '{}', expected 'Event @User1 Score1 @User2 Score2 ...' or '@User1 Score1 - Score2 @User2'",
            text.trim()
        )))
    }
}

fn parse_score(raw: &str) -> LeagueResult<u32> {
    raw.parse()
        .map_err(|_| LeagueError::invalid(format!("score {raw} is out of range")))
}

/// Parses `id=value` pairs given on the command line.
pub fn parse_pair(raw: &str) -> LeagueResult<(String, String)> {
    match raw.split_once('=') {
        Some((id, value)) if !id.trim().is_empty() && !value.trim().is_empty() => {
            Ok((id.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(LeagueError::invalid(format!("expected id=value, got '{raw}'"))),
    }
}

pub fn parse_score_pair(raw: &str) -> LeagueResult<(PlayerId, u32)> {
    let (id, score) = parse_pair(raw)?;
    Ok((id, parse_score(&score)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CommandParser {
        CommandParser::new().unwrap()
    }

    #[test]
    fn test_parse_score_list() {
        let command = parser().parse("Air Pistol @ana 552 <@U02BO|bo> 560").unwrap();
        assert_eq!(
            command,
            TextCommand::RecordScores {
                event: "air".to_string(),
                scores: vec![("ana".to_string(), 552), ("U02BO".to_string(), 560)],
            }
        );
    }

    #[test]
    fn test_parse_duel() {
        let command = parser().parse("<@U1> 10 - 5 @U2").unwrap();
        assert_eq!(command, TextCommand::Duel(MatchResult::new("U1", 10, "U2", 5)));
    }

    #[test]
    fn test_score_list_without_scores_is_rejected() {
        assert!(parser().parse("standard").is_err());
    }

    #[test]
    fn test_garbage_is_rejected() {
        let err = parser().parse("hello there").unwrap_err();
        assert!(matches!(err, LeagueError::InvalidArgument(_)));
        assert!(parser().parse("@a 99999999999 - 1 @b").is_err());
    }

    #[test]
    fn test_cli_pairs() {
        assert_eq!(parse_score_pair("ana=551").unwrap(), ("ana".to_string(), 551));
        assert_eq!(
            parse_pair("U1=Ana Nowak").unwrap(),
            ("U1".to_string(), "Ana Nowak".to_string())
        );
        assert!(parse_score_pair("ana").is_err());
        assert!(parse_score_pair("ana=-3").is_err());
        assert!(parse_pair("=x").is_err());
    }
}
