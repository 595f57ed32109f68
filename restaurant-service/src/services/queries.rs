//! Aggregation pipelines and update documents sent to MongoDB.
//!
//! Kept free of I/O so the exact stages can be asserted in unit tests.

use crate::dtos::{Limit, RestaurantFilter};
use crate::models::REQUIRED_GRADE;
use mongodb::bson::{doc, Document};

/// Restaurants with at least `limit` grades, ranked by mean score.
pub fn top_restaurants_pipeline(limit: Limit) -> Vec<Document> {
    let limit = limit.get();
    vec![
        // A missing grades array counts as empty instead of failing `$size`.
        doc! { "$match": { "$expr": { "$gte": [
            { "$size": { "$ifNull": ["$grades", []] } },
            limit
        ] } } },
        doc! { "$unwind": "$grades" },
        doc! { "$group": {
            "_id": "$restaurant_id",
            "name": { "$first": "$name" },
            "avgScore": { "$avg": "$grades.score" },
        } },
        doc! { "$sort": { "avgScore": -1, "_id": 1 } },
        doc! { "$limit": limit },
    ]
}

pub fn match_filter(filter: &RestaurantFilter) -> Document {
    let mut query = Document::new();
    if let Some(borough) = &filter.borough {
        query.insert("borough", borough.as_str());
    }
    if let Some(cuisine) = &filter.cuisine {
        query.insert("cuisine", cuisine.as_str());
    }
    query
}

pub fn borough_cuisine_pipeline(filter: &RestaurantFilter, limit: Limit) -> Vec<Document> {
    vec![
        doc! { "$match": match_filter(filter) },
        doc! { "$project": { "_id": 0, "name": 1, "borough": 1, "cuisine": 1 } },
        doc! { "$limit": limit.get() },
    ]
}

/// Selects the restaurant by name, only while it still has an "A" entry.
pub fn grade_update_filter(name: &str) -> Document {
    doc! { "name": name, "grades.grade": REQUIRED_GRADE }
}

/// Positional `$` rewrites the first grade that satisfied the filter.
pub fn grade_update(new_grade: &str) -> Document {
    doc! { "$set": { "grades.$.grade": new_grade } }
}
