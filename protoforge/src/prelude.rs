//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types.
//!
//! ```
//! use protoforge::prelude::*;
//! ```

// Descriptor types
pub use protoforge_schema::{Enum, EnumValue, Field, FieldKind, FieldRule, Message, OptionDef, Schema};

// Generation surface
pub use protoforge_codegen::{
    CodegenError, CompileError, Generator, OutputPlan, OutputUnit, SchemaOptions, generate,
    write_units,
};
