//! Cart state: one line per product, quantities always >= 1
use super::catalog::{Product, ProductId};
use super::error::CartError;
use super::price::Price;
use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Price,
    pub quantity: u32,
}

impl CartLine {
    fn open(product: &Product) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.unit_price,
            quantity: 1,
        }
    }
    // quantity never wraps; a full line refuses further increments
    fn bump(&mut self) -> Result<u32, CartError> {
        self.quantity = self
            .quantity
            .checked_add(1)
            .ok_or_else(|| CartError::QuantityLimit(self.product_id.to_string()))?;
        Ok(self.quantity)
    }
    pub fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// Lines are kept in the order products were first added. Totals are never
/// stored, they are derived from the lines on every read.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: IndexMap<ProductId, CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a line at quantity 1 or bumps an existing one. Returns the new quantity.
    pub fn add_or_increment(&mut self, product: &Product) -> Result<u32, CartError> {
        match self.lines.get_mut(product.id.as_str()) {
            Some(line) => line.bump(),
            None => {
                self.lines
                    .insert(product.id.clone(), CartLine::open(product));
                Ok(1)
            }
        }
    }

    pub fn increment(&mut self, product_id: &str) -> Result<u32, CartError> {
        let line = self
            .lines
            .get_mut(product_id)
            .ok_or_else(|| CartError::MissingLine(product_id.to_string()))?;

        line.bump()
    }

    /// Returns the remaining quantity, or `None` once the line has been dropped.
    pub fn decrement(&mut self, product_id: &str) -> Result<Option<u32>, CartError> {
        let line = self
            .lines
            .get_mut(product_id)
            .ok_or_else(|| CartError::MissingLine(product_id.to_string()))?;

        if line.quantity > 1 {
            line.quantity -= 1;
            return Ok(Some(line.quantity));
        }

        self.lines.shift_remove(product_id);
        Ok(None)
    }

    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        self.lines.shift_remove(product_id)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn get(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.get(product_id)
    }

    pub fn quantity_of(&self, product_id: &str) -> Option<u32> {
        self.lines.get(product_id).map(|line| line.quantity)
    }

    pub fn lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.values()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total_items(&self) -> u64 {
        self.lines.values().map(|line| u64::from(line.quantity)).sum()
    }

    pub fn total_price(&self) -> Price {
        self.lines.values().map(CartLine::line_total).sum()
    }
}
