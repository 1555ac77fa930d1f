use actix_web::{web, HttpResponse};
use tracing::info;

use super::{Envelope, Payload};
use crate::entities::dish::Dish;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::utils::next_id;
use crate::validation::dishes::{self, DishRequest};

async fn dish_exists(state: &AppState, id: &str) -> Result<Dish, ApiError> {
    state
        .dishes
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Dish does not exist: {id}")))
}

pub async fn list_dishes(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state.dishes.list().await;
    Ok(HttpResponse::Ok().json(Envelope::new(items)))
}

pub async fn create_dish(
    state: web::Data<AppState>,
    payload: web::Json<Payload>,
) -> Result<HttpResponse, ApiError> {
    let body = &payload.data;
    dishes::create_pipeline().run(&DishRequest {
        body,
        route_id: None,
    })?;
    let dish = Dish::new(next_id(), dishes::parse(body)?);

    let _gate = state.dish_writes.lock().await;
    let created = state.dishes.insert(dish).await?;
    info!(dish_id = %created.id, name = %created.name, "dish created");
    Ok(HttpResponse::Created().json(Envelope::new(created)))
}

pub async fn get_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let dish = dish_exists(&state, &id).await?;
    Ok(HttpResponse::Ok().json(Envelope::new(dish)))
}

pub async fn update_dish(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Payload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let _gate = state.dish_writes.lock().await;
    let mut dish = dish_exists(&state, &id).await?;

    let body = &payload.data;
    dishes::update_pipeline().run(&DishRequest {
        body,
        route_id: Some(&dish.id),
    })?;
    dish.apply(dishes::parse(body)?);

    let updated = state.dishes.update(&id, dish).await?;
    info!(dish_id = %updated.id, "dish updated");
    Ok(HttpResponse::Ok().json(Envelope::new(updated)))
}
