//! Optional startup data, in the same shape the API returns records.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

use crate::entities::{dish::Dish, order::Order, Record};
use crate::errors::RepoErr;
use crate::repositories::Store;
use crate::validation::dishes::{self, DishRequest};
use crate::validation::orders::{self, OrderRequest};

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("reading seed file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parsing seed file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("loading seed records: {0}")]
    Store(#[from] RepoErr),
    #[error("invalid seed {kind} {id}: {reason}")]
    Invalid {
        kind: &'static str,
        id: String,
        reason: String,
    },
}

#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub dishes: Vec<Dish>,
    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    pub fn from_file(path: &Path) -> Result<Self, SeedError> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }
}

fn body_of<T: Serialize>(record: &T) -> Result<Map<String, Value>, SeedError> {
    match serde_json::to_value(record)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn invalid<T: Record>(kind: &'static str, record: &T, reason: impl ToString) -> SeedError {
    SeedError::Invalid {
        kind,
        id: record.id().to_string(),
        reason: reason.to_string(),
    }
}

/// Runs every record through the same field rules a create request gets.
pub fn validate(data: &SeedData) -> Result<(), SeedError> {
    for d in &data.dishes {
        let body = body_of(d)?;
        dishes::create_pipeline()
            .run(&DishRequest {
                body: &body,
                route_id: None,
            })
            .map_err(|e| invalid("dish", d, e))?;
    }
    for o in &data.orders {
        let body = body_of(o)?;
        orders::create_pipeline()
            .run(&OrderRequest {
                body: &body,
                current: None,
            })
            .map_err(|e| invalid("order", o, e))?;
    }
    Ok(())
}

/// Validates the whole file first, so a bad record loads nothing.
pub async fn load_seed(
    data: SeedData,
    dishes: &dyn Store<Dish>,
    orders: &dyn Store<Order>,
) -> Result<(usize, usize), SeedError> {
    validate(&data)?;
    let (n_dishes, n_orders) = (data.dishes.len(), data.orders.len());
    for d in data.dishes {
        dishes.insert(d).await?;
    }
    for o in data.orders {
        orders.insert(o).await?;
    }
    info!(dishes = n_dishes, orders = n_orders, "seed data loaded");
    Ok((n_dishes, n_orders))
}
