use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use super::Record;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    Pending,
    Preparing,
    OutForDelivery,
    Delivered,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::OutForDelivery,
        OrderStatus::Delivered,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out-for-delivery",
            Self::Delivered => "delivered",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of an order. Whatever the client sent to identify the dish is
/// carried through untouched; only `quantity` is interpreted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderDish {
    #[serde(flatten)]
    pub reference: Map<String, Value>,
    pub quantity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub deliver_to: String,
    pub mobile_number: String,
    /// Stored as received. Creation does not check it, so it may be absent,
    /// `null`, or outside [`OrderStatus`]. Absent stays absent on the wire; an
    /// explicit `null` is echoed back.
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub status: Option<Value>,
    pub dishes: Vec<OrderDish>,
}

/// Validated order fields, everything but the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub deliver_to: String,
    pub mobile_number: String,
    pub status: Option<Value>,
    pub dishes: Vec<OrderDish>,
}

// Only runs when the key is there, so `null` becomes `Some(Value::Null)`.
fn present_value<'de, D>(d: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(d).map(Some)
}

impl Order {
    pub fn new(id: String, new: NewOrder) -> Self {
        Self {
            id,
            deliver_to: new.deliver_to,
            mobile_number: new.mobile_number,
            status: new.status,
            dishes: new.dishes,
        }
    }

    pub fn apply(&mut self, new: NewOrder) {
        self.deliver_to = new.deliver_to;
        self.mobile_number = new.mobile_number;
        self.status = new.status;
        self.dishes = new.dishes;
    }

    /// The stored status, if it is one of the known values.
    pub fn known_status(&self) -> Option<OrderStatus> {
        self.status
            .as_ref()
            .and_then(Value::as_str)
            .and_then(OrderStatus::parse)
    }
}

impl Record for Order {
    fn id(&self) -> &str {
        &self.id
    }
}
