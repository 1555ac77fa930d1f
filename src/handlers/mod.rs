pub mod dishes;
pub mod fallback;
pub mod health;
pub mod orders;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Incoming `{ "data": { ... } }` body. A missing `data` reads as an empty
/// object so the field checks produce the error.
#[derive(Debug, Default, Deserialize)]
pub struct Payload {
    #[serde(default)]
    pub data: Map<String, Value>,
}

/// Outgoing `{ "data": ... }` body.
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub data: T,
}

impl<T> Envelope<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
