use serde::{Deserialize, Serialize};

use super::Record;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dish {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

/// Validated dish fields, everything but the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDish {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

impl Dish {
    pub fn new(id: String, new: NewDish) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            price: new.price,
            image_url: new.image_url,
        }
    }

    /// Overwrites every mutable field in place; the id is left alone.
    pub fn apply(&mut self, new: NewDish) {
        self.name = new.name;
        self.description = new.description;
        self.price = new.price;
        self.image_url = new.image_url;
    }
}

impl Record for Dish {
    fn id(&self) -> &str {
        &self.id
    }
}
