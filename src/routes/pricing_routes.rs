use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use crate::controllers::PricingController;
use crate::dto::PriceQuery;
use crate::models::Price;
use crate::state::PricingState;
use crate::utils::errors::AppError;

pub fn create_pricing_router() -> Router<PricingState> {
    Router::new().route("/price", get(get_price))
}

async fn get_price(
    State(state): State<PricingState>,
    Query(query): Query<PriceQuery>,
) -> Result<Json<Price>, AppError> {
    let controller = PricingController::new(state.pricing_service.clone());
    let price = controller.get_price(query).await?;
    Ok(Json(price))
}
