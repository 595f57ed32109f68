pub mod restaurant;

pub use restaurant::{Grade, Restaurant, REQUIRED_GRADE};
