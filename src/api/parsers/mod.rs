pub mod commands;

pub use commands::{CommandParser, TextCommand, parse_pair, parse_score_pair};
