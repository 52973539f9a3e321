//! Calorie lookup against the Open Food Facts product database.

mod client;
mod error;
mod product;

#[cfg(test)]
pub(crate) mod fake_server;

pub use client::{LookupClient, DEFAULT_BASE_URL};
pub use error::LookupError;
pub use product::{FoodItem, Nutriments, Product, ProductResponse, UNKNOWN_PRODUCT_NAME};
