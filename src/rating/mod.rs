pub mod model;
pub mod types;

pub use model::RatingModel;
pub use types::{RatingUpdate, RatingValue};
