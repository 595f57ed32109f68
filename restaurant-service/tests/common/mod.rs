#![allow(dead_code)]

use restaurant_service::config::{MongoConfig, QueryConfig, RestaurantConfig};
use restaurant_service::models::{Grade, Restaurant};
use restaurant_service::services::RestaurantDb;
use restaurant_service::startup::Application;
use service_core::config::Config as CoreConfig;
use service_core::observability::{LogFormat, TracingSettings};
use uuid::Uuid;

pub fn test_config(uri: String, database: String) -> RestaurantConfig {
    RestaurantConfig {
        common: CoreConfig {
            port: 0, // Random port for testing
            ..CoreConfig::default()
        },
        mongodb: MongoConfig {
            uri,
            database,
            collection: "restaurants_collection".to_string(),
        },
        query: QueryConfig {
            max_limit: 50,
            default_limit: 20,
        },
        tracing: TracingSettings {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            otlp_endpoint: None,
        },
    }
}

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: RestaurantDb,
    pub db_name: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        let uri = std::env::var("TEST_MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = format!("restaurant_test_{}", Uuid::new_v4());

        let app = Application::build(test_config(uri, db_name.clone()))
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            db_name,
            client,
        }
    }

    pub async fn seed(&self, restaurants: &[Restaurant]) {
        self.db
            .restaurants()
            .insert_many(restaurants, None)
            .await
            .expect("Failed to seed restaurants");
    }

    pub async fn find_by_name(&self, name: &str) -> Option<Restaurant> {
        self.db
            .restaurants()
            .find_one(mongodb::bson::doc! { "name": name }, None)
            .await
            .expect("Failed to query restaurant")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{}", self.address, path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .put(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Drop the per-test database.
    pub async fn cleanup(&self) {
        let _ = self.db.client().database(&self.db_name).drop(None).await;
    }
}

pub fn restaurant(
    id: &str,
    name: &str,
    borough: &str,
    cuisine: &str,
    grades: &[(&str, Option<f64>)],
) -> Restaurant {
    Restaurant::new(
        id,
        name,
        borough,
        cuisine,
        grades
            .iter()
            .map(|(grade, score)| Grade::new(*grade, *score))
            .collect(),
    )
}

/// A small slice of the NYC inspections dataset.
pub fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        restaurant(
            "30075445",
            "Morris Park Bake Shop",
            "Bronx",
            "Bakery",
            &[("A", Some(2.0)), ("A", Some(6.0)), ("A", Some(10.0)), ("B", Some(14.0))],
        ),
        restaurant(
            "30112340",
            "Wendy'S",
            "Brooklyn",
            "Hamburgers",
            &[("A", Some(8.0)), ("B", Some(23.0)), ("A", Some(12.0))],
        ),
        restaurant(
            "40356018",
            "Riviera Caterer",
            "Brooklyn",
            "American",
            &[("A", Some(5.0)), ("A", Some(7.0)), ("A", Some(12.0)), ("A", Some(12.0))],
        ),
        restaurant(
            "40356151",
            "Brunos On The Boulevard",
            "Queens",
            "American",
            &[("B", Some(20.0)), ("C", Some(31.0))],
        ),
        restaurant(
            "40361521",
            "Glorious Food",
            "Manhattan",
            "American",
            &[("A", Some(11.0)), ("B", None), ("A", Some(5.0)), ("C", Some(40.0)), ("A", Some(9.0))],
        ),
        restaurant(
            "40363945",
            "Taste The Tropics Ice Cream",
            "Brooklyn",
            "Ice Cream, Gelato, Yogurt, Ices",
            &[("A", Some(12.0))],
        ),
    ]
}
