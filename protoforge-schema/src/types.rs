//! Field kind and field rule enumerations.
//!
//! These are closed sets: every consumer in the generator matches them
//! exhaustively, so an unhandled new kind is rejected at compile time.

use crate::descriptor::Message;

/// Field rule, the proto2 cardinality of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FieldRule {
    /// Field must be present for the message to be initialized.
    Required,
    /// Field may be absent.
    #[default]
    Optional,
    /// Field holds an ordered list of values.
    Repeated,
}

impl FieldRule {
    /// Parses a rule from its proto keyword.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "required" => Some(Self::Required),
            "optional" => Some(Self::Optional),
            "repeated" => Some(Self::Repeated),
            _ => None,
        }
    }

    /// Returns the proto keyword for this rule.
    #[must_use]
    pub const fn proto_name(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Optional => "optional",
            Self::Repeated => "repeated",
        }
    }
}

/// Declared type of a field.
///
/// The fifteen scalar kinds are the proto2 scalar set. `TypeRef` names a
/// message or enum type declared elsewhere in the schema tree (possibly
/// dot-qualified for nesting); which of the two it refers to is only known
/// once the reference is resolved against the tree. `Group` carries its
/// synthetic nested message body inline.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// Varint-coded signed 32-bit integer.
    Int32,
    /// Varint-coded signed 64-bit integer.
    Int64,
    /// Varint-coded unsigned 32-bit integer.
    Uint32,
    /// Varint-coded unsigned 64-bit integer.
    Uint64,
    /// Zigzag varint-coded signed 32-bit integer.
    Sint32,
    /// Zigzag varint-coded signed 64-bit integer.
    Sint64,
    /// Fixed-width unsigned 32-bit integer.
    Fixed32,
    /// Fixed-width unsigned 64-bit integer.
    Fixed64,
    /// Fixed-width signed 32-bit integer.
    Sfixed32,
    /// Fixed-width signed 64-bit integer.
    Sfixed64,
    /// IEEE 754 double-precision float.
    Double,
    /// IEEE 754 single-precision float.
    Float,
    /// Varint-coded boolean.
    Bool,
    /// Length-delimited UTF-8 string.
    String,
    /// Length-delimited byte sequence.
    Bytes,
    /// Reference to a message or enum type by name.
    TypeRef(std::string::String),
    /// Group field with its synthetic nested message body.
    Group(Box<Message>),
}

impl FieldKind {
    /// Parses a scalar kind from its proto type name.
    ///
    /// Message/enum references and groups are not covered here; the parser
    /// constructs those variants directly.
    #[must_use]
    pub fn from_proto_name(name: &str) -> Option<Self> {
        match name {
            "int32" => Some(Self::Int32),
            "int64" => Some(Self::Int64),
            "uint32" => Some(Self::Uint32),
            "uint64" => Some(Self::Uint64),
            "sint32" => Some(Self::Sint32),
            "sint64" => Some(Self::Sint64),
            "fixed32" => Some(Self::Fixed32),
            "fixed64" => Some(Self::Fixed64),
            "sfixed32" => Some(Self::Sfixed32),
            "sfixed64" => Some(Self::Sfixed64),
            "double" => Some(Self::Double),
            "float" => Some(Self::Float),
            "bool" => Some(Self::Bool),
            "string" => Some(Self::String),
            "bytes" => Some(Self::Bytes),
            _ => None,
        }
    }

    /// Returns the proto type name of this kind.
    #[must_use]
    pub fn proto_name(&self) -> &str {
        match self {
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Sint32 => "sint32",
            Self::Sint64 => "sint64",
            Self::Fixed32 => "fixed32",
            Self::Fixed64 => "fixed64",
            Self::Sfixed32 => "sfixed32",
            Self::Sfixed64 => "sfixed64",
            Self::Double => "double",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::TypeRef(name) => name,
            Self::Group(body) => &body.name,
        }
    }

    /// Returns true for the fifteen scalar kinds.
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !matches!(self, Self::TypeRef(_) | Self::Group(_))
    }

    /// Returns true for the numeric kinds (integers and floats).
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        !matches!(
            self,
            Self::Bool | Self::String | Self::Bytes | Self::TypeRef(_) | Self::Group(_)
        )
    }

    /// Returns true for the 32-bit integer kinds.
    #[must_use]
    pub const fn is_integer32(&self) -> bool {
        matches!(
            self,
            Self::Int32 | Self::Uint32 | Self::Sint32 | Self::Fixed32 | Self::Sfixed32
        )
    }

    /// Returns true for the 64-bit integer kinds.
    #[must_use]
    pub const fn is_integer64(&self) -> bool {
        matches!(
            self,
            Self::Int64 | Self::Uint64 | Self::Sint64 | Self::Fixed64 | Self::Sfixed64
        )
    }
}
