use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Health {
    pub status: String,
    pub dishes: usize,
    pub orders: usize,
}

/// Liveness plus the size of each collection.
pub async fn health(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    Ok(HttpResponse::Ok().json(Health {
        status: "ok".into(),
        dishes: state.dishes.list().await.len(),
        orders: state.orders.list().await.len(),
    }))
}
