//! Drives a cart store through one ordering session and prints every frame.
//!
//! Run with `RUST_LOG=debug` to see the store's own log lines.

use product_cart::{
    Action, CartStore,
    catalog::{Catalog, ProductId},
    view::{CartFrame, ControlState},
};
use tracing_subscriber::EnvFilter;

fn draw(frame: &CartFrame) {
    println!("Your Cart ({})", frame.total_items);
    if frame.show_empty_indicator {
        println!("  Your added items will appear here");
    }
    for line in &frame.lines {
        println!(
            "  {}  {} x {} = {}",
            line.name, line.quantity, line.unit_price_text, line.line_total_text
        );
    }
    if frame.show_total {
        println!("  Order Total {}", frame.formatted_total);
    }
    let controls: Vec<String> = frame
        .controls
        .iter()
        .map(|(id, control)| match control {
            ControlState::Idle => format!("{id}:[Add to Cart]"),
            ControlState::Active(n) => format!("{id}:[- {n} +]"),
        })
        .collect();
    println!("  {}\n", controls.join(" "));
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let catalog = Catalog::new()
        .with_product("waffle", "Waffle with Berries", "6.50")?
        .with_product("creme-brulee", "Vanilla Bean Crème Brûlée", "7.00")?
        .with_product("macaron", "Macaron Mix of Five", "8.00")?
        .with_product("tiramisu", "Classic Tiramisu", "5.50")?;

    let mut store = CartStore::new(catalog, draw);

    let session = [
        Action::AddOrIncrement(ProductId::new("waffle")),
        Action::Increment(ProductId::new("waffle")),
        Action::AddOrIncrement(ProductId::new("macaron")),
        Action::AddOrIncrement(ProductId::new("tiramisu")),
        Action::Decrement(ProductId::new("tiramisu")),
        Action::RequestConfirmation,
        Action::StartNewOrder,
    ];

    for action in session {
        if let Some(confirmation) = store.dispatch(action)? {
            println!("Order Confirmed ({})", confirmation.order_ref);
            for line in &confirmation.snapshot.lines {
                println!("  {} x{}  {}", line.name, line.quantity, line.line_total);
            }
            println!("  Order Total {}\n", confirmation.formatted_total);
        }
    }

    Ok(())
}
