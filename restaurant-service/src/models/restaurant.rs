use mongodb::bson::{DateTime as BsonDateTime, Document as BsonDocument};
use serde::{Deserialize, Serialize};

/// Grade value that `/update_grade` rewrites.
pub const REQUIRED_GRADE: &str = "A";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Grade {
    pub grade: String,
    /// Inspection score; the dataset has nulls here.
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<BsonDateTime>,
}

impl Grade {
    pub fn new(grade: impl Into<String>, score: Option<f64>) -> Self {
        Self {
            grade: grade.into(),
            score,
            date: None,
        }
    }
}

/// A document of the restaurants collection. The service never creates these
/// outside of tests; it only reads and patches them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub restaurant_id: String,
    pub name: String,
    #[serde(default)]
    pub borough: String,
    #[serde(default)]
    pub cuisine: String,
    #[serde(default)]
    pub grades: Vec<Grade>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<BsonDocument>,
}

impl Restaurant {
    pub fn new(
        restaurant_id: impl Into<String>,
        name: impl Into<String>,
        borough: impl Into<String>,
        cuisine: impl Into<String>,
        grades: Vec<Grade>,
    ) -> Self {
        Self {
            restaurant_id: restaurant_id.into(),
            name: name.into(),
            borough: borough.into(),
            cuisine: cuisine.into(),
            grades,
            address: None,
        }
    }

    /// Mean of the non-null scores, the same value `$avg` produces.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<f64> = self.grades.iter().filter_map(|g| g.score).collect();
        if scores.is_empty() {
            None
        } else {
            Some(scores.iter().sum::<f64>() / scores.len() as f64)
        }
    }
}
