pub mod health;
pub mod restaurants;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use restaurants::{list_restaurants, restaurants_by_borough_cuisine, top_restaurants, update_grade};
