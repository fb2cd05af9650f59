//! # Protoforge Schema
//!
//! Descriptor tree for protobuf schema files.
//!
//! This crate provides:
//! - Read-only descriptor types describing one compiled schema file
//!   (messages, enums, fields, options, resolved imports)
//! - The closed field-kind and field-rule enumerations used by the
//!   code generator
//!
//! The tree is produced by an external parser/validator before code
//! generation starts. It is assumed to be free of duplicate tags and
//! duplicate names; the generator does not re-validate those invariants.

pub mod descriptor;
pub mod types;

pub use descriptor::{Enum, EnumValue, Field, Message, OptionDef, Schema};
pub use types::{FieldKind, FieldRule};
