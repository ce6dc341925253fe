//! Presentation settings for a cart store

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Prefix drawn in front of every formatted amount.
    pub currency_symbol: String,
    /// bech32 human readable part for order references.
    pub order_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            order_prefix: "order".to_string(),
        }
    }
}

impl StoreConfig {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn set_currency_symbol(mut self, symbol: &str) -> Self {
        self.currency_symbol = symbol.to_string();
        self
    }
    pub fn set_order_prefix(mut self, prefix: &str) -> Self {
        self.order_prefix = prefix.to_string();
        self
    }
}
