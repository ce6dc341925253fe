//! Product descriptors supplied by the product list view
use super::error::CartError;
use super::price::Price;
use indexmap::IndexMap;
use std::{borrow::Borrow, fmt};

/// Opaque product identifier, as attached to a product's add affordance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ProductId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub unit_price: Price,
}

impl Product {
    /// Validate a descriptor, parsing the raw price metadata.
    pub fn new(id: &str, name: &str, raw_price: &str) -> Result<Self, CartError> {
        let unit_price = Price::parse(raw_price)?;
        Self::with_price(id, name, unit_price)
    }

    pub fn with_price(id: &str, name: &str, unit_price: Price) -> Result<Self, CartError> {
        if id.trim().is_empty() {
            return Err(CartError::EmptyProductId);
        }
        if name.trim().is_empty() {
            return Err(CartError::EmptyName);
        }

        Ok(Self {
            id: ProductId::new(id),
            name: name.to_string(),
            unit_price,
        })
    }
}

/// The products shown on the list view, in display order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: IndexMap<ProductId, Product>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_product(mut self, id: &str, name: &str, raw_price: &str) -> Result<Self, CartError> {
        self.register(Product::new(id, name, raw_price)?);
        Ok(self)
    }
    /// Adds a product unless one with the same id is already listed. The
    /// first descriptor wins so names and prices never change once set.
    pub fn register(&mut self, product: Product) -> &Product {
        self.products.entry(product.id.clone()).or_insert(product)
    }
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.get(id)
    }
    pub fn contains(&self, id: &str) -> bool {
        self.products.contains_key(id)
    }
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }
    pub fn len(&self) -> usize {
        self.products.len()
    }
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl FromIterator<Product> for Catalog {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for product in iter {
            catalog.register(product);
        }
        catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_display_order() {
        let catalog = Catalog::new()
            .with_product("waffle", "Waffle with Berries", "6.50")
            .unwrap()
            .with_product("creme", "Vanilla Bean Crème Brûlée", "7.00")
            .unwrap();

        let ids: Vec<&str> = catalog.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["waffle", "creme"]);
        assert_eq!(catalog.len(), 2);
        assert!(!catalog.is_empty());
        assert!(Catalog::new().is_empty());
    }

    #[test]
    fn first_descriptor_wins() {
        let mut catalog = Catalog::new().with_product("A", "Widget", "9.99").unwrap();
        catalog.register(Product::new("A", "Gadget", "1.00").unwrap());

        let product = catalog.get("A").unwrap();
        assert_eq!(product.name, "Widget");
        assert_eq!(product.unit_price.to_string(), "9.99");
    }

    #[test]
    fn rejects_invalid_descriptors() {
        assert_eq!(Product::new("", "Widget", "1").unwrap_err(), CartError::EmptyProductId);
        assert_eq!(Product::new("A", " ", "1").unwrap_err(), CartError::EmptyName);
        assert!(matches!(
            Product::new("A", "Widget", "free"),
            Err(CartError::InvalidPrice(_))
        ));
    }
}
