//! Handlers for the charity directory endpoints.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};

use crate::api::dto::charity::{CharityItem, CreateCharityRequest, SearchQuery};
use crate::error::AppError;
use crate::state::AppState;

fn to_items(charities: Vec<crate::domain::entities::Charity>) -> Json<Vec<CharityItem>> {
    Json(charities.into_iter().map(CharityItem::from).collect())
}

/// Lists every charity in insertion order.
///
/// # Endpoint
///
/// `GET /charities`
pub async fn list_charities_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<CharityItem>>, AppError> {
    let charities = state.charity_service.list_all().await?;
    Ok(to_items(charities))
}

/// Lists the charities of one category.
///
/// # Endpoint
///
/// `GET /charities/category/{category}`
///
/// Unknown categories return an empty array, not an error.
pub async fn charities_by_category_handler(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<Json<Vec<CharityItem>>, AppError> {
    let charities = state.charity_service.list_by_category(&category).await?;
    Ok(to_items(charities))
}

/// Case-insensitive search across name, description and focus area.
///
/// # Endpoint
///
/// `GET /charities/search?q={term}`
///
/// # Errors
///
/// Returns 400 Bad Request if `q` is missing or blank.
pub async fn search_charities_handler(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<Vec<CharityItem>>, AppError> {
    let Query(query) = query?;
    let term = query.q.unwrap_or_default();
    let charities = state.charity_service.search(&term).await?;
    Ok(to_items(charities))
}

/// Adds a charity to the directory.
///
/// # Endpoint
///
/// `POST /charities`
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Gaza Relief",
///   "description": "Emergency aid",
///   "website": "https://example.org",
///   "category": "gaza",
///   "focusArea": "Emergency Relief",
///   "featured": false
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request with a `fields` map if the body is malformed or
/// any field is missing or invalid. Nothing is stored in that case.
pub async fn create_charity_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateCharityRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CharityItem>), AppError> {
    let Json(request) = payload?;
    let new_charity = request.into_new_charity()?;

    let charity = state.charity_service.create(new_charity).await?;

    Ok((StatusCode::CREATED, Json(CharityItem::from(charity))))
}
