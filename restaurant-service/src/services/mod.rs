pub mod database;
pub mod metrics;
pub mod queries;

pub use self::database::{GradeUpdateOutcome, RestaurantDb};
pub use self::metrics::{get_metrics, init_metrics};
