//! Views derived from the cart. Nothing here is stored, every frame is
//! recomputed from the cart and catalog.
use super::cart::{Cart, CartLine};
use super::catalog::{Catalog, ProductId};
use super::config::StoreConfig;
use super::price::Price;
use super::utils::cbor_digest;
use chrono::{DateTime, Utc};

/// What a product's add/adjust control should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlState {
    /// Not in the cart: the "add" affordance.
    Idle,
    /// In the cart: decrement, quantity, increment.
    Active(u32),
}

impl ControlState {
    pub fn for_product(cart: &Cart, product_id: &str) -> Self {
        match cart.quantity_of(product_id) {
            Some(quantity) => ControlState::Active(quantity),
            None => ControlState::Idle,
        }
    }
    pub fn is_active(&self) -> bool {
        matches!(self, ControlState::Active(_))
    }
}

/// One row of the cart list, each able to trigger a remove.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineView {
    pub product_id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
    pub unit_price_text: String, // "$9.99"
    pub line_total_text: String,
}

impl LineView {
    fn from_line(line: &CartLine, symbol: &str) -> Self {
        let line_total = line.line_total();
        Self {
            product_id: line.product_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price,
            line_total,
            unit_price_text: line.unit_price.display_with(symbol),
            line_total_text: line_total.display_with(symbol),
        }
    }
}

/// Everything the presentation layer needs to redraw after a mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartFrame {
    pub lines: Vec<LineView>,
    pub total_items: u64,
    pub total_price: Price,
    pub formatted_total: String,
    pub show_empty_indicator: bool,
    pub show_total: bool,
    pub confirm_enabled: bool,
    /// Control state for every known product, in catalog order.
    pub controls: Vec<(ProductId, ControlState)>,
}

impl CartFrame {
    pub fn compose(cart: &Cart, catalog: &Catalog, config: &StoreConfig) -> Self {
        let symbol = config.currency_symbol.as_str();
        let lines: Vec<LineView> = cart
            .lines()
            .map(|line| LineView::from_line(line, symbol))
            .collect();
        let total_price = cart.total_price();
        let is_empty = lines.is_empty();

        let controls = catalog
            .iter()
            .map(|product| {
                (
                    product.id.clone(),
                    ControlState::for_product(cart, product.id.as_str()),
                )
            })
            .collect();

        Self {
            lines,
            total_items: cart.total_items(),
            total_price,
            formatted_total: total_price.display_with(symbol),
            show_empty_indicator: is_empty,
            show_total: !is_empty,
            confirm_enabled: !is_empty,
            controls,
        }
    }

    pub fn control_for(&self, product_id: &str) -> Option<ControlState> {
        self.controls
            .iter()
            .find(|(id, _)| id.as_str() == product_id)
            .map(|(_, state)| *state)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct ConfirmationLine {
    #[n(0)]
    pub name: String,
    #[n(1)]
    pub quantity: u32,
    #[n(2)]
    pub unit_price: Price,
    #[n(3)]
    pub line_total: Price,
}

/// Read-only projection of the cart for the confirmation view.
#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct ConfirmationSnapshot {
    #[n(0)]
    pub lines: Vec<ConfirmationLine>,
    #[n(1)]
    pub total_price: Price,
}

impl ConfirmationSnapshot {
    pub fn capture(cart: &Cart) -> Self {
        let lines = cart
            .lines()
            .map(|line| ConfirmationLine {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                line_total: line.line_total(),
            })
            .collect();

        Self {
            lines,
            total_price: cart.total_price(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
    /// sha256 of the CBOR encoded contents, returned with the encoding.
    pub fn fingerprint(&self) -> anyhow::Result<(String, Vec<u8>)> {
        cbor_digest(self)
    }
}

/// A snapshot taken when the user asks to confirm their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub order_ref: String, // uuid7, bech32 encoded
    pub taken_at: DateTime<Utc>,
    pub snapshot: ConfirmationSnapshot,
    pub formatted_total: String,
}

/// The seam between the store and whatever draws it.
pub trait Renderer {
    fn render(&mut self, frame: &CartFrame);
}

impl<F> Renderer for F
where
    F: FnMut(&CartFrame),
{
    fn render(&mut self, frame: &CartFrame) {
        self(frame)
    }
}

/// Keeps every frame it is handed. Useful for headless drivers and tests.
#[derive(Debug, Default)]
pub struct FrameLog {
    pub frames: Vec<CartFrame>,
}

impl FrameLog {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn last(&self) -> Option<&CartFrame> {
        self.frames.last()
    }
    pub fn len(&self) -> usize {
        self.frames.len()
    }
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl Renderer for FrameLog {
    fn render(&mut self, frame: &CartFrame) {
        self.frames.push(frame.clone());
    }
}
