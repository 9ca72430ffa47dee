//! Catalog Data Models
//! Mission: Define the product record and its wire shape

use serde::{Deserialize, Serialize};

/// A persisted catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

/// The four client-supplied fields of a product (everything except the id)
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image_url: String,
}

impl NewProduct {
    /// Attach a store-assigned id
    pub fn with_id(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image_url: self.image_url,
        }
    }
}

/// Flat error body returned by every failing route
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub message: &'static str,
}
