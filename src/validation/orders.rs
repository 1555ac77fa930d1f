use serde_json::{Map, Value};

use super::{id_conflicts, is_present, non_empty_str, positive_number, Pipeline};
use crate::entities::order::{NewOrder, Order, OrderDish, OrderStatus};
use crate::errors::ApiError;

pub struct OrderRequest<'a> {
    pub body: &'a Map<String, Value>,
    /// The stored order on update; `None` on create.
    pub current: Option<&'a Order>,
}

fn bad(msg: impl Into<String>) -> ApiError {
    ApiError::BadRequest(msg.into())
}

fn require_text(body: &Map<String, Value>, key: &str) -> Result<String, ApiError> {
    non_empty_str(body, key)
        .map(str::to_owned)
        .ok_or_else(|| bad(format!("Order must include a {key}")))
}

fn quantity_error(index: usize) -> ApiError {
    bad(format!(
        "Dish {index} must have a quantity that is an integer greater than 0"
    ))
}

fn deliver_to(req: &OrderRequest<'_>) -> Result<(), ApiError> {
    require_text(req.body, "deliverTo").map(drop)
}

fn mobile_number(req: &OrderRequest<'_>) -> Result<(), ApiError> {
    require_text(req.body, "mobileNumber").map(drop)
}

fn dish_list(body: &Map<String, Value>) -> Result<&[Value], ApiError> {
    let raw = body.get("dishes");
    if !is_present(raw) {
        return Err(bad("Order must include a dish"));
    }
    match raw {
        Some(Value::Array(items)) if !items.is_empty() => Ok(items),
        _ => Err(bad("Order must include at least one dish")),
    }
}

fn dishes(req: &OrderRequest<'_>) -> Result<(), ApiError> {
    dish_list(req.body).map(drop)
}

fn quantity_of(item: &Value) -> Option<f64> {
    positive_number(item.as_object()?.get("quantity"))
}

/// Every line is checked; when several are bad the highest index is reported.
fn dish_lines(body: &Map<String, Value>) -> Result<Vec<OrderDish>, ApiError> {
    let items = dish_list(body)?;
    let mut lines = Vec::with_capacity(items.len());
    let mut last_bad = None;
    for (index, item) in items.iter().enumerate() {
        match quantity_of(item) {
            Some(quantity) => {
                let mut reference = item.as_object().cloned().unwrap_or_default();
                reference.remove("quantity");
                lines.push(OrderDish {
                    reference,
                    quantity,
                });
            }
            None => last_bad = Some(index),
        }
    }
    match last_bad {
        Some(index) => Err(quantity_error(index)),
        None => Ok(lines),
    }
}

fn dish_quantities(req: &OrderRequest<'_>) -> Result<(), ApiError> {
    dish_lines(req.body).map(drop)
}

fn id_matches_route(req: &OrderRequest<'_>) -> Result<(), ApiError> {
    let Some(current) = req.current else {
        return Ok(());
    };
    match id_conflicts(req.body, &current.id) {
        Some(body_id) => Err(bad(format!(
            "Order id does not match route id. Order: {body_id}, Route: {}",
            current.id
        ))),
        None => Ok(()),
    }
}

fn status(req: &OrderRequest<'_>) -> Result<(), ApiError> {
    let requested = req
        .body
        .get("status")
        .and_then(Value::as_str)
        .and_then(OrderStatus::parse)
        .ok_or_else(|| {
            bad("Order must have a status of pending, preparing, out-for-delivery, delivered")
        })?;
    let current = req.current.and_then(Order::known_status);
    if requested == OrderStatus::Delivered || current == Some(OrderStatus::Delivered) {
        return Err(bad("A delivered order cannot be changed"));
    }
    Ok(())
}

fn pending(order: &Order) -> Result<(), ApiError> {
    match order.known_status() {
        Some(OrderStatus::Pending) => Ok(()),
        _ => Err(bad("An order cannot be deleted unless it is pending")),
    }
}

fn field_checks<'a>() -> Pipeline<OrderRequest<'a>> {
    Pipeline::new()
        .stage("deliverTo", deliver_to)
        .stage("mobileNumber", mobile_number)
        .stage("dishes", dishes)
        .stage("dishes.quantity", dish_quantities)
}

pub fn create_pipeline<'a>() -> Pipeline<OrderRequest<'a>> {
    field_checks()
}

pub fn update_pipeline<'a>() -> Pipeline<OrderRequest<'a>> {
    field_checks()
        .stage("id", id_matches_route)
        .stage("status", status)
}

pub fn delete_pipeline() -> Pipeline<Order> {
    Pipeline::new().stage("pending", pending)
}

/// Typed fields of a body that passed an order pipeline. `status` is copied
/// as sent, an explicit `null` included.
pub fn parse(body: &Map<String, Value>) -> Result<NewOrder, ApiError> {
    Ok(NewOrder {
        deliver_to: require_text(body, "deliverTo")?,
        mobile_number: require_text(body, "mobileNumber")?,
        status: body.get("status").cloned(),
        dishes: dish_lines(body)?,
    })
}
