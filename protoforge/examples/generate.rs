//! Generates Java sources for a small hand-built schema and prints them.
//!
//! Run with:
//! ```sh
//! cargo run --example generate
//! ```

use protoforge::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let schema = build_schema();
    match generate(&schema) {
        Ok(units) => {
            for unit in &units {
                println!("// ---- {} ----", unit.path.display());
                println!("{}", unit.source);
            }
        }
        Err(failure) => {
            eprintln!("{failure}");
            std::process::exit(1);
        }
    }
}

fn build_schema() -> Schema {
    let mut schema = Schema::new("orders.proto");
    schema.set_package("acme.orders");

    let mut side = Enum::new("Side");
    side.add_value("BUY", 1);
    side.add_value("SELL", 2);
    schema.add_enum(side);

    let mut line = Message::new("Line");
    line.add_field(Field::new("sku", 1, FieldRule::Required, FieldKind::String));
    line.add_field(
        Field::new("quantity", 2, FieldRule::Optional, FieldKind::Uint32).with_default("1"),
    );

    let mut order = Message::new("Order");
    order.add_field(Field::new("id", 1, FieldRule::Required, FieldKind::Uint64));
    order.add_field(Field::new(
        "side",
        2,
        FieldRule::Optional,
        FieldKind::TypeRef("Side".into()),
    ));
    order.add_field(Field::new(
        "lines",
        3,
        FieldRule::Repeated,
        FieldKind::TypeRef("Line".into()),
    ));
    schema.add_message(line);
    schema.add_message(order);
    schema
}
