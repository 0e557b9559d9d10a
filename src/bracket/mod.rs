pub mod builder;
pub mod display;
pub mod resolver;
pub mod types;

pub use builder::build_bracket;
pub use display::{DisplayCell, DisplayMatrix, to_display_matrix};
pub use resolver::{find_pending_match, record_tournament_result};
pub use types::{Bracket, Slot, SlotPos};
