pub mod restaurants;

pub use restaurants::{
    Limit, ListRestaurantsParams, MessageResponse, RestaurantFilter, RestaurantSummary,
    TopRestaurant, UpdateGradeRequest,
};
