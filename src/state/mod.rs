use crate::entities::{dish::Dish, order::Order};
use crate::repositories::Store;
use actix_web::web::Data;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stores plus one write gate per collection. A mutating handler holds its
/// collection's gate from the existence check until the write lands, so
/// validate-then-mutate never interleaves across workers.
pub struct AppState {
    pub dishes: Arc<dyn Store<Dish>>,
    pub orders: Arc<dyn Store<Order>>,
    pub dish_writes: Mutex<()>,
    pub order_writes: Mutex<()>,
}

impl AppState {
    pub fn new<D, O>(dishes: D, orders: O) -> Data<Self>
    where
        D: Store<Dish> + 'static,
        O: Store<Order> + 'static,
    {
        Data::new(Self {
            dishes: Arc::new(dishes),
            orders: Arc::new(orders),
            dish_writes: Mutex::new(()),
            order_writes: Mutex::new(()),
        })
    }
}
