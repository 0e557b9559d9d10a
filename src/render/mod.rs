pub mod leaderboard;
pub mod table;

pub use leaderboard::{render_leaderboard, render_match_report, render_player, render_score_report};
pub use table::render_bracket;
