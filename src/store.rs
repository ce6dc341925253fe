//! Cart store: applies user actions to the cart and redraws after each one
use super::cart::{Cart, CartLine};
use super::catalog::{Catalog, Product, ProductId};
use super::config::StoreConfig;
use super::error::CartError;
use super::utils::new_uuid_to_bech32;
use super::view::{CartFrame, ConfirmationSnapshot, ControlState, OrderConfirmation, Renderer};
use chrono::Utc;
use tracing::{debug, info, warn};

/// The discrete triggers the product list view can fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    AddOrIncrement(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    RequestConfirmation,
    StartNewOrder,
}

/// Owns the cart and pushes a freshly computed frame to its renderer after
/// every mutation. Rejected calls leave the cart untouched and draw nothing.
pub struct CartStore<R: Renderer> {
    cart: Cart,
    catalog: Catalog,
    config: StoreConfig,
    renderer: R,
    confirmation_open: bool,
}

// log and convert a rejected call
fn rejected(err: CartError) -> anyhow::Error {
    warn!(error = %err, "cart action rejected");
    err.into()
}

impl<R: Renderer> CartStore<R> {
    pub fn new(catalog: Catalog, renderer: R) -> Self {
        Self::with_config(catalog, StoreConfig::default(), renderer)
    }

    /// Builds an empty store and draws the initial (empty) frame.
    pub fn with_config(catalog: Catalog, config: StoreConfig, renderer: R) -> Self {
        let mut store = Self {
            cart: Cart::new(),
            catalog,
            config,
            renderer,
            confirmation_open: false,
        };
        store.render();
        store
    }

    fn render(&mut self) {
        let frame = self.frame();
        self.renderer.render(&frame);
    }

    /// Add a product described by its catalog metadata, or bump its quantity.
    pub fn add_or_increment(
        &mut self,
        product_id: &str,
        name: &str,
        unit_price: &str,
    ) -> anyhow::Result<u32> {
        let product = Product::new(product_id, name, unit_price).map_err(rejected)?;

        // keep the first descriptor seen for this id
        let product = self.catalog.register(product).clone();
        self.apply_add(&product)
    }

    /// Add a product that is already listed in the catalog.
    pub fn add_product(&mut self, product_id: &str) -> anyhow::Result<u32> {
        let product = self
            .catalog
            .get(product_id)
            .cloned()
            .ok_or_else(|| rejected(CartError::UnknownProduct(product_id.to_string())))?;

        self.apply_add(&product)
    }

    fn apply_add(&mut self, product: &Product) -> anyhow::Result<u32> {
        let quantity = self.cart.add_or_increment(product).map_err(rejected)?;
        debug!(product_id = %product.id, quantity, "added to cart");

        self.render();
        Ok(quantity)
    }

    pub fn increment(&mut self, product_id: &str) -> anyhow::Result<u32> {
        let quantity = self.cart.increment(product_id).map_err(rejected)?;
        debug!(product_id, quantity, "incremented");

        self.render();
        Ok(quantity)
    }

    /// Returns the remaining quantity, `None` when the line was dropped.
    pub fn decrement(&mut self, product_id: &str) -> anyhow::Result<Option<u32>> {
        let remaining = self.cart.decrement(product_id).map_err(rejected)?;
        match remaining {
            Some(quantity) => debug!(product_id, quantity, "decremented"),
            None => debug!(product_id, "decremented out of the cart"),
        }

        self.render();
        Ok(remaining)
    }

    pub fn remove(&mut self, product_id: &str) -> Option<CartLine> {
        let removed = self.cart.remove(product_id);
        debug!(product_id, removed = removed.is_some(), "removed");

        self.render();
        removed
    }

    /// Empties the cart and closes any open confirmation view.
    pub fn clear(&mut self) {
        self.cart.clear();
        self.confirmation_open = false;
        debug!("cart cleared");

        self.render();
    }

    pub fn snapshot_for_confirmation(&self) -> ConfirmationSnapshot {
        ConfirmationSnapshot::capture(&self.cart)
    }

    /// Opens the confirmation view. Only allowed while the cart has lines,
    /// matching the disabled confirm affordance on an empty cart.
    pub fn request_confirmation(&mut self) -> anyhow::Result<OrderConfirmation> {
        if self.cart.is_empty() {
            return Err(rejected(CartError::EmptyCart));
        }

        let snapshot = self.snapshot_for_confirmation();
        let confirmation = OrderConfirmation {
            order_ref: new_uuid_to_bech32(&self.config.order_prefix)?,
            taken_at: Utc::now(),
            formatted_total: snapshot.total_price.display_with(&self.config.currency_symbol),
            snapshot,
        };
        self.confirmation_open = true;

        info!(
            order_ref = %confirmation.order_ref,
            lines = confirmation.snapshot.lines.len(),
            total = %confirmation.snapshot.total_price,
            "order confirmation requested"
        );
        Ok(confirmation)
    }

    /// Empties the cart and closes the confirmation view.
    pub fn start_new_order(&mut self) {
        info!("starting a new order");

        self.clear();
    }

    /// Runs exactly one operation for the given trigger.
    pub fn dispatch(&mut self, action: Action) -> anyhow::Result<Option<OrderConfirmation>> {
        match action {
            Action::AddOrIncrement(id) => {
                self.add_product(id.as_str())?;
            }
            Action::Increment(id) => {
                self.increment(id.as_str())?;
            }
            Action::Decrement(id) => {
                self.decrement(id.as_str())?;
            }
            Action::Remove(id) => {
                self.remove(id.as_str());
            }
            Action::RequestConfirmation => return self.request_confirmation().map(Some),
            Action::StartNewOrder => self.start_new_order(),
        }
        Ok(None)
    }

    /// Recompute the frame the renderer last received.
    pub fn frame(&self) -> CartFrame {
        CartFrame::compose(&self.cart, &self.catalog, &self.config)
    }

    pub fn control_state(&self, product_id: &str) -> ControlState {
        ControlState::for_product(&self.cart, product_id)
    }

    pub fn is_confirmation_open(&self) -> bool {
        self.confirmation_open
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
