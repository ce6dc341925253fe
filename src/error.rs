#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum PriceError {
    #[error("Price '{0}' is not a number")]
    NotANumber(String),
    #[error("Price '{0}' is negative")]
    Negative(String),
    #[error("Price '{0}' is above the catalog limit")]
    TooLarge(String),
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum CartError {
    #[error("Product id must not be empty")]
    EmptyProductId,
    #[error("Product name must not be empty")]
    EmptyName,
    #[error("Invalid catalog price: {0}")]
    InvalidPrice(#[from] PriceError),
    #[error("No cart line exists for product '{0}'")]
    MissingLine(String),
    #[error("Product '{0}' is not in the catalog")]
    UnknownProduct(String),
    #[error("Cannot confirm an empty cart")]
    EmptyCart,
    #[error("Quantity of product '{0}' is already at its limit")]
    QuantityLimit(String),
}
