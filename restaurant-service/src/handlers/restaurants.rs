use crate::dtos::{
    Limit, ListRestaurantsParams, MessageResponse, RestaurantFilter, RestaurantSummary,
    TopRestaurant, UpdateGradeRequest,
};
use crate::services::metrics::{record_grade_update, record_query_results};
use crate::services::GradeUpdateOutcome;
use crate::startup::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use service_core::error::AppError;

/// `GET /top_restaurants/:limit`
#[tracing::instrument(skip_all)]
pub async fn top_restaurants(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Vec<TopRestaurant>>, AppError> {
    let Path(raw_limit) = path?;
    let limit = Limit::parse(raw_limit, state.config.query.max_limit)?;

    let rows = state.db.top_restaurants(limit).await?;
    tracing::info!(limit = limit.get(), rows = rows.len(), "Top restaurants computed");
    record_query_results("top_restaurants", rows.len());

    Ok(Json(rows))
}

/// `PUT /update_grade`
#[tracing::instrument(skip_all)]
pub async fn update_grade(
    State(state): State<AppState>,
    body: Result<Json<UpdateGradeRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, AppError> {
    let Json(request) = body?;
    let (name, new_grade) = request.into_parts()?;

    let outcome = state.db.update_first_a_grade(&name, &new_grade).await?;
    record_grade_update(outcome);
    tracing::info!(
        restaurant = %name,
        new_grade = %new_grade,
        outcome = outcome.as_str(),
        "Grade update processed"
    );

    match outcome {
        GradeUpdateOutcome::Updated => Ok(Json(MessageResponse::new("Update successful."))),
        GradeUpdateOutcome::RestaurantNotFound => Err(AppError::NotFound(anyhow::anyhow!(
            "Restaurant '{}' not found",
            name
        ))),
        GradeUpdateOutcome::NoGradeA => Err(AppError::NotFound(anyhow::anyhow!(
            "Restaurant '{}' has no grade 'A' entry to update",
            name
        ))),
    }
}

/// `GET /restaurants_borough_cuisine/:borough/:cuisine/:limit`
#[tracing::instrument(skip_all)]
pub async fn restaurants_by_borough_cuisine(
    State(state): State<AppState>,
    path: Result<Path<(String, String, i64)>, PathRejection>,
) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    let Path((borough, cuisine, raw_limit)) = path?;
    let limit = Limit::parse(raw_limit, state.config.query.max_limit)?;
    let filter = RestaurantFilter::new(Some(&borough), Some(&cuisine));

    list(&state, filter, limit).await
}

/// `GET /restaurants?borough=&cuisine=&limit=`, where either filter may be
/// left out.
#[tracing::instrument(skip_all)]
pub async fn list_restaurants(
    State(state): State<AppState>,
    query: Result<Query<ListRestaurantsParams>, QueryRejection>,
) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    let Query(params) = query?;
    let limit = Limit::parse(
        params.limit.unwrap_or(state.config.query.default_limit),
        state.config.query.max_limit,
    )?;
    let filter = RestaurantFilter::new(params.borough.as_deref(), params.cuisine.as_deref());

    list(&state, filter, limit).await
}

async fn list(
    state: &AppState,
    filter: RestaurantFilter,
    limit: Limit,
) -> Result<Json<Vec<RestaurantSummary>>, AppError> {
    let rows = state.db.list_by_borough_cuisine(&filter, limit).await?;
    tracing::info!(
        borough = ?filter.borough,
        cuisine = ?filter.cuisine,
        rows = rows.len(),
        "Restaurants listed"
    );
    record_query_results("borough_cuisine", rows.len());

    Ok(Json(rows))
}
