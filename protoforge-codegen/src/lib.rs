//! # Protoforge Codegen
//!
//! Code generation from protobuf descriptor trees.
//!
//! This crate provides:
//! - Naming and type-reference resolution across schema files
//! - Default-value literal derivation with target-parameterized grammar
//! - Java message/enum generation: storage, accessors, wire codec,
//!   structural operations and debug rendering
//! - Single-unit and per-type-unit output planning
//!
//! The input is a resolved [`protoforge_schema::Schema`] tree; parsing
//! and upstream validation happen before this crate is involved, and the
//! byte-level wire runtime is a separate library the generated code calls
//! into.

pub mod error;
pub mod generator;
pub mod java;
pub mod literals;
pub mod names;
pub mod options;
pub mod wire;
pub mod writer;

pub use error::{CodegenError, CompileError, Diagnostics};
pub use generator::{Generator, OutputUnit, write_units};
pub use options::{OutputPlan, SchemaOptions};

use protoforge_schema::Schema;

/// Generates every output unit for one resolved schema.
///
/// # Arguments
/// * `schema` - Resolved descriptor tree for one compiled file
///
/// # Returns
/// The generated output units, one per schema or per top-level type
/// depending on the schema's output options.
///
/// # Errors
/// Returns `CompileError` carrying every generation error the run
/// accumulated.
pub fn generate(schema: &Schema) -> Result<Vec<OutputUnit>, CompileError> {
    Generator::new(schema).generate()
}
