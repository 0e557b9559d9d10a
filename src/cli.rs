use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser, Debug)]
#[command(author, version, about = "pistol-league ratings and tournament brackets")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Port number (optional, defaults to 3000)
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
    /// Record scores for one event: air, sport or standard
    Record {
        event: String,
        /// Scores as id=score
        #[arg(required = true)]
        scores: Vec<String>,
    },
    /// Report a two-player result and update ratings and the bracket
    Duel {
        player_a: String,
        score_a: u32,
        score_b: u32,
        player_b: String,
    },
    /// Start a new tournament, replacing the current bracket
    Tournament {
        /// Players as id=display name
        #[arg(required = true)]
        players: Vec<String>,
    },
    /// Show the rating leaderboard, or best/average for an event
    Leaderboard { event: Option<String> },
    /// Show one player's record
    Player { id: String },
    /// Print the current tournament bracket
    Bracket,
    /// Run a chat-style text command
    Command { text: String },
    /// Generate shell completions
    Completions { shell: Shell },
}
