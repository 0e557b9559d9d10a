use serde::{Deserialize, Serialize};

pub type RatingValue = f64;

/// Outcome of a two-player rating update, seen from player A.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingUpdate {
    pub new_rating_a: RatingValue,
    pub new_rating_b: RatingValue,
    /// Points moved from B to A. Negative when A lost ground.
    pub delta: RatingValue,
}

impl RatingUpdate {
    pub fn old_rating_a(&self) -> RatingValue {
        self.new_rating_a - self.delta
    }

    pub fn old_rating_b(&self) -> RatingValue {
        self.new_rating_b + self.delta
    }
}
