use actix_web::{web, HttpResponse};
use tracing::info;

use super::{Envelope, Payload};
use crate::entities::order::Order;
use crate::errors::ApiError;
use crate::state::AppState;
use crate::utils::next_id;
use crate::validation::orders::{self, OrderRequest};

async fn order_exists(state: &AppState, id: &str) -> Result<Order, ApiError> {
    state
        .orders
        .get(id)
        .await
        .ok_or_else(|| ApiError::NotFound(format!("Order does not exist: {id}")))
}

pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let items = state.orders.list().await;
    Ok(HttpResponse::Ok().json(Envelope::new(items)))
}

pub async fn create_order(
    state: web::Data<AppState>,
    payload: web::Json<Payload>,
) -> Result<HttpResponse, ApiError> {
    let body = &payload.data;
    orders::create_pipeline().run(&OrderRequest {
        body,
        current: None,
    })?;
    let order = Order::new(next_id(), orders::parse(body)?);

    let _gate = state.order_writes.lock().await;
    let created = state.orders.insert(order).await?;
    info!(order_id = %created.id, dishes = created.dishes.len(), "order created");
    Ok(HttpResponse::Created().json(Envelope::new(created)))
}

pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let order = order_exists(&state, &id).await?;
    Ok(HttpResponse::Ok().json(Envelope::new(order)))
}

pub async fn update_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
    payload: web::Json<Payload>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let _gate = state.order_writes.lock().await;
    let mut order = order_exists(&state, &id).await?;

    let body = &payload.data;
    orders::update_pipeline().run(&OrderRequest {
        body,
        current: Some(&order),
    })?;
    order.apply(orders::parse(body)?);

    let updated = state.orders.update(&id, order).await?;
    info!(order_id = %updated.id, status = ?updated.known_status(), "order updated");
    Ok(HttpResponse::Ok().json(Envelope::new(updated)))
}

pub async fn delete_order(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let _gate = state.order_writes.lock().await;
    let order = order_exists(&state, &id).await?;
    orders::delete_pipeline().run(&order)?;

    state.orders.delete(&id).await?;
    info!(order_id = %id, "order deleted");
    Ok(HttpResponse::NoContent().finish())
}
