//! Java code generation modules.

pub mod accessors;
pub mod codec;
pub mod enums;
pub mod messages;
pub mod semantics;
pub mod types;

pub use accessors::AccessorGenerator;
pub use codec::CodecGenerator;
pub use enums::EnumGenerator;
pub use messages::MessageGenerator;
pub use types::{CodecCall, FieldCategory, ResolvedField};

use crate::literals::LiteralStyle;

/// Package of the runtime library generated code calls into.
pub const RUNTIME_PACKAGE: &str = "io.protoforge.runtime";

/// Java literal grammar for the default-value deriver.
pub const LITERALS: LiteralStyle = LiteralStyle {
    long_suffix: "l",
    float_suffix: "f",
    double_suffix: "d",
    absent: "null",
    bytes_constructor: "io.protoforge.runtime.Buffer.copyFromUtf8",
};
