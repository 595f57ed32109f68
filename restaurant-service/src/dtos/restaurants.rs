use mongodb::bson::Bson;
use serde::{Deserialize, Serialize};
use service_core::error::AppError;
use validator::Validate;

/// A result row of the top-restaurants pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TopRestaurant {
    /// The `restaurant_id` the rows were grouped by.
    #[serde(rename(deserialize = "_id", serialize = "id"))]
    pub id: Bson,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "avgScore", default)]
    pub avg_score: Option<f64>,
}

/// Projection returned by the borough/cuisine listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RestaurantSummary {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub borough: Option<String>,
    #[serde(default)]
    pub cuisine: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateGradeRequest {
    #[validate(
        required(message = "name is required"),
        length(min = 1, message = "name cannot be empty")
    )]
    pub name: Option<String>,
    #[validate(
        required(message = "new_grade is required"),
        length(min = 1, message = "new_grade cannot be empty")
    )]
    pub new_grade: Option<String>,
}

impl UpdateGradeRequest {
    /// Validates and unpacks into `(name, new_grade)`.
    pub fn into_parts(self) -> Result<(String, String), AppError> {
        self.validate()?;
        match (self.name, self.new_grade) {
            (Some(name), Some(new_grade)) => Ok((name, new_grade)),
            _ => Err(AppError::BadRequest(anyhow::anyhow!(
                "Invalid data provided in request body."
            ))),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ListRestaurantsParams {
    pub borough: Option<String>,
    pub cuisine: Option<String>,
    pub limit: Option<i64>,
}

/// A row cap accepted from a caller, always within `1..=max`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limit(i64);

impl Limit {
    pub fn parse(raw: i64, max: i64) -> Result<Self, AppError> {
        if raw < 1 {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "limit must be a positive integer, got {}",
                raw
            )));
        }
        if raw > max {
            return Err(AppError::BadRequest(anyhow::anyhow!(
                "limit must not exceed {}, got {}",
                max,
                raw
            )));
        }
        Ok(Self(raw))
    }

    pub fn get(self) -> i64 {
        self.0
    }
}

/// Exact-match filter for the listing queries. A blank value disables its
/// clause; any other value is matched as given, padding included.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub borough: Option<String>,
    pub cuisine: Option<String>,
}

impl RestaurantFilter {
    pub fn new(borough: Option<&str>, cuisine: Option<&str>) -> Self {
        fn clause(value: Option<&str>) -> Option<String> {
            value
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
        }

        Self {
            borough: clause(borough),
            cuisine: clause(cuisine),
        }
    }
}
