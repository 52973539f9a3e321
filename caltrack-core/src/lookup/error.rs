use thiserror::Error;

/// Errors that can occur while looking up a product.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LookupError {
    /// The product identifier was empty
    #[error("Invalid product id: {0:?}")]
    InvalidProductId(String),
    /// The database has no record for the product
    #[error("Product not found")]
    NotFound,
    /// The product record has no per-100g calorie figure
    #[error("No calorie information available for this product")]
    MissingNutrition,
    /// Request failed or the server answered with an error status
    #[error("Network error: {0}")]
    Network(String),
    /// The server answered with something that is not a product response
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
