//! API route configuration.

use crate::api::handlers::{
    charities_by_category_handler, create_charity_handler, list_charities_handler,
    search_charities_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Charity directory routes.
///
/// # Endpoints
///
/// - `GET  /charities`                      - List every charity
/// - `POST /charities`                      - Add a charity
/// - `GET  /charities/category/{category}`  - List one category
/// - `GET  /charities/search?q=`            - Search name, description and focus area
pub fn charity_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/charities",
            get(list_charities_handler).post(create_charity_handler),
        )
        .route("/charities/search", get(search_charities_handler))
        .route(
            "/charities/category/{category}",
            get(charities_by_category_handler),
        )
}
