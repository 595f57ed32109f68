use crate::dtos::{Limit, RestaurantFilter, RestaurantSummary, TopRestaurant};
use crate::models::Restaurant;
use crate::services::queries;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, from_document, Document},
    options::IndexOptions,
    Client as MongoClient, Collection, Database, IndexModel,
};
use serde::de::DeserializeOwned;
use service_core::error::AppError;

/// Result of a grade update that reached the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeUpdateOutcome {
    Updated,
    RestaurantNotFound,
    NoGradeA,
}

impl GradeUpdateOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            GradeUpdateOutcome::Updated => "updated",
            GradeUpdateOutcome::RestaurantNotFound => "restaurant_not_found",
            GradeUpdateOutcome::NoGradeA => "no_grade_a",
        }
    }
}

/// Owns the MongoDB client for the lifetime of the process. Clones share the
/// driver's connection pool.
#[derive(Clone)]
pub struct RestaurantDb {
    client: MongoClient,
    db: Database,
    collection: String,
}

impl RestaurantDb {
    pub async fn connect(uri: &str, database: &str, collection: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::from(e)
        })?;
        let db = client.database(database);
        tracing::info!(
            database = %database,
            collection = %collection,
            "Successfully connected to MongoDB database"
        );
        Ok(Self {
            client,
            db,
            collection: collection.to_string(),
        })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for restaurant-service");

        let indexes = [
            (doc! { "name": 1 }, "name_lookup"),
            (doc! { "borough": 1, "cuisine": 1 }, "borough_cuisine_lookup"),
            (doc! { "restaurant_id": 1 }, "restaurant_id_lookup"),
        ];

        for (keys, name) in indexes {
            let index = IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().name(name.to_string()).build())
                .build();

            self.restaurants()
                .create_index(index, None)
                .await
                .map_err(|e| {
                    tracing::error!("Failed to create {} index on restaurants: {}", name, e);
                    AppError::from(e)
                })?;
            tracing::info!(index = %name, "Created index on restaurants");
        }

        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::from(e)
            })?;
        Ok(())
    }

    pub fn restaurants(&self) -> Collection<Restaurant> {
        self.db.collection(&self.collection)
    }

    pub fn client(&self) -> &MongoClient {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    #[tracing::instrument(skip(self, limit), fields(limit = limit.get()))]
    pub async fn top_restaurants(&self, limit: Limit) -> Result<Vec<TopRestaurant>, AppError> {
        self.aggregate(queries::top_restaurants_pipeline(limit))
            .await
    }

    #[tracing::instrument(skip(self, limit), fields(limit = limit.get()))]
    pub async fn list_by_borough_cuisine(
        &self,
        filter: &RestaurantFilter,
        limit: Limit,
    ) -> Result<Vec<RestaurantSummary>, AppError> {
        self.aggregate(queries::borough_cuisine_pipeline(filter, limit))
            .await
    }

    /// Rewrites the first "A" grade of the restaurant called `name`.
    ///
    /// On a miss, a second lookup tells an unknown restaurant apart from one
    /// without an "A" entry.
    #[tracing::instrument(skip(self))]
    pub async fn update_first_a_grade(
        &self,
        name: &str,
        new_grade: &str,
    ) -> Result<GradeUpdateOutcome, AppError> {
        let result = self
            .restaurants()
            .update_one(
                queries::grade_update_filter(name),
                queries::grade_update(new_grade),
                None,
            )
            .await
            .map_err(|e| {
                tracing::error!("Failed to update grade for restaurant {}: {}", name, e);
                AppError::from(e)
            })?;

        if result.matched_count > 0 {
            return Ok(GradeUpdateOutcome::Updated);
        }

        let exists = self
            .restaurants()
            .count_documents(doc! { "name": name }, None)
            .await
            .map_err(AppError::from)?
            > 0;

        Ok(if exists {
            GradeUpdateOutcome::NoGradeA
        } else {
            GradeUpdateOutcome::RestaurantNotFound
        })
    }

    async fn aggregate<T>(&self, pipeline: Vec<Document>) -> Result<Vec<T>, AppError>
    where
        T: DeserializeOwned,
    {
        let mut cursor = self
            .restaurants()
            .aggregate(pipeline, None)
            .await
            .map_err(|e| {
                tracing::error!("Aggregation on {} failed: {}", self.collection, e);
                AppError::from(e)
            })?;

        let mut rows = Vec::new();
        while let Some(document) = cursor.try_next().await.map_err(AppError::from)? {
            rows.push(from_document(document)?);
        }
        Ok(rows)
    }

    /// Closes the driver's pools. Outstanding clones stop working afterwards.
    pub async fn shutdown(self) {
        tracing::info!("Closing MongoDB client");
        self.client.shutdown().await;
    }
}
