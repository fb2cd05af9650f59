//! # Protoforge
//!
//! Code-generation backend for a protobuf wire-format schema compiler.
//!
//! Given a resolved schema tree (messages, enums, fields, nested types,
//! imports, options), protoforge emits a complete typed Java
//! implementation of every message and enum: field storage with presence
//! tracking, accessors, binary encode/decode against the wire format,
//! size computation, structural merge, required-field validation and
//! debug formatting.
//!
//! ## Quick Start
//!
//! ```
//! use protoforge::prelude::*;
//!
//! let mut schema = Schema::new("ping.proto");
//! schema.set_package("acme.net");
//! let mut ping = Message::new("Ping");
//! ping.add_field(Field::new("payload", 1, FieldRule::Optional, FieldKind::Bytes));
//! schema.add_message(ping);
//!
//! let units = protoforge::codegen::generate(&schema).expect("generation");
//! assert_eq!(units[0].name, "Ping");
//! ```
//!
//! ## Crate Organization
//!
//! - [`schema`] - Descriptor tree types, the input contract from the
//!   external parser/validator
//! - [`codegen`] - Naming resolution, default-literal derivation, the
//!   wire codec emitters and unit orchestration

pub mod prelude;

/// Descriptor tree types.
pub mod schema {
    pub use protoforge_schema::*;
}

/// Code generation from descriptor trees.
pub mod codegen {
    pub use protoforge_codegen::*;
}
