//! Per-field resolution into the Java type surface.
//!
//! A [`ResolvedField`] is built once per field and shared by the accessor,
//! codec and semantic emitters, so every emitter sees the same names, the
//! same Java types and the same wire-type pairing.

use protoforge_schema::{Enum, Field, FieldKind, Message, Schema};

use crate::error::{CodegenError, Diagnostics};
use crate::literals::default_literal;
use crate::names::{self, TypeResolver, TypeTarget};
use crate::wire::WireType;

use super::LITERALS;

/// How the codec emitters dispatch one field occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodecCall {
    /// Per-kind runtime call, named by this fragment.
    Scalar(&'static str),
    /// Varint number plus variant lookup.
    Enum,
    /// Length-delimited recursion into the referenced type.
    Message,
    /// Start/end-marker framed recursion into the group body.
    Group,
}

/// Resolved category of a field's declared kind.
#[derive(Debug, Clone, Copy)]
pub enum FieldCategory<'a> {
    /// One of the fifteen scalar kinds.
    Scalar,
    /// Reference that resolved to an enum declaration.
    Enum(&'a Enum),
    /// Reference that resolved to a message declaration.
    Message,
    /// Group field with its synthetic body.
    Group(&'a Message),
}

/// One field with its emission names and resolved Java types.
#[derive(Debug)]
pub struct ResolvedField<'a> {
    /// The declared field.
    pub field: &'a Field,
    /// Upper-camel name used in accessor method names.
    pub uname: String,
    /// Lower-camel name used for storage slots and parameters.
    pub lname: String,
    /// Java type of one value (primitive for scalar kinds).
    pub java_type: String,
    /// Boxed Java type, used as the collection element type.
    pub boxed_type: String,
    /// Resolved category.
    pub category: FieldCategory<'a>,
}

impl<'a> ResolvedField<'a> {
    /// Resolves one field against the schema tree.
    ///
    /// Returns `None` after recording a diagnostic when the field name
    /// sanitizes to nothing or its type reference has no node in the tree;
    /// the caller skips the field and generation continues.
    pub fn resolve(
        field: &'a Field,
        schema: &'a Schema,
        resolver: &TypeResolver<'a>,
        message_name: &str,
        diags: &mut Diagnostics,
    ) -> Option<Self> {
        let uname = names::upper_camel(&field.name);
        if uname.is_empty() {
            diags.push(CodegenError::empty_identifier(
                schema.file_name.clone(),
                field.name.clone(),
                format!("field in message '{message_name}'"),
            ));
            return None;
        }
        let lname = names::lower_camel(&field.name);

        let (java_type, boxed_type, category): (String, String, FieldCategory<'a>) =
            match &field.kind {
                FieldKind::Int32
                | FieldKind::Uint32
                | FieldKind::Sint32
                | FieldKind::Fixed32
                | FieldKind::Sfixed32 => {
                    ("int".into(), "java.lang.Integer".into(), FieldCategory::Scalar)
                }
                FieldKind::Int64
                | FieldKind::Uint64
                | FieldKind::Sint64
                | FieldKind::Fixed64
                | FieldKind::Sfixed64 => {
                    ("long".into(), "java.lang.Long".into(), FieldCategory::Scalar)
                }
                FieldKind::Double => {
                    ("double".into(), "java.lang.Double".into(), FieldCategory::Scalar)
                }
                FieldKind::Float => {
                    ("float".into(), "java.lang.Float".into(), FieldCategory::Scalar)
                }
                FieldKind::Bool => {
                    ("boolean".into(), "java.lang.Boolean".into(), FieldCategory::Scalar)
                }
                FieldKind::String => (
                    "java.lang.String".into(),
                    "java.lang.String".into(),
                    FieldCategory::Scalar,
                ),
                FieldKind::Bytes => (
                    "io.protoforge.runtime.Buffer".into(),
                    "io.protoforge.runtime.Buffer".into(),
                    FieldCategory::Scalar,
                ),
                FieldKind::TypeRef(name) => {
                    let Some(reference) = resolver.resolve(name) else {
                        diags.push(CodegenError::unresolved(
                            schema.file_name.clone(),
                            name.clone(),
                            field.name.clone(),
                            message_name.to_string(),
                        ));
                        return None;
                    };
                    let qualified = match names::emitted_type_name(&reference, schema) {
                        Ok(qualified) => qualified,
                        Err(error) => {
                            diags.push(error);
                            return None;
                        }
                    };
                    let category = match reference.target {
                        TypeTarget::Enum(enum_def) => FieldCategory::Enum(enum_def),
                        TypeTarget::Message(_) => FieldCategory::Message,
                    };
                    (qualified.clone(), qualified, category)
                }
                FieldKind::Group(body) => {
                    let class = names::upper_camel(&body.name);
                    if class.is_empty() {
                        diags.push(CodegenError::empty_identifier(
                            schema.file_name.clone(),
                            body.name.clone(),
                            format!("group in message '{message_name}'"),
                        ));
                        return None;
                    }
                    (class.clone(), class, FieldCategory::Group(body))
                }
            };

        Some(Self {
            field,
            uname,
            lname,
            java_type,
            boxed_type,
            category,
        })
    }

    /// True when presence is tracked by a separate boolean flag
    /// (scalar and enum kinds) rather than by slot nullability.
    #[must_use]
    pub const fn presence_by_flag(&self) -> bool {
        matches!(self.category, FieldCategory::Scalar | FieldCategory::Enum(_))
    }

    /// True for message and group fields, the kinds recursed into by
    /// merge, validation and debug rendering.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(self.category, FieldCategory::Message | FieldCategory::Group(_))
    }

    /// Wire type paired with this field's kind. Encode and decode both go
    /// through here so the two sides cannot disagree.
    #[must_use]
    pub fn wire_type(&self) -> WireType {
        match &self.field.kind {
            FieldKind::Int32
            | FieldKind::Int64
            | FieldKind::Uint32
            | FieldKind::Uint64
            | FieldKind::Sint32
            | FieldKind::Sint64
            | FieldKind::Bool => WireType::Varint,
            FieldKind::Fixed32 | FieldKind::Sfixed32 | FieldKind::Float => WireType::Fixed32,
            FieldKind::Fixed64 | FieldKind::Sfixed64 | FieldKind::Double => WireType::Fixed64,
            FieldKind::String | FieldKind::Bytes => WireType::LengthDelimited,
            FieldKind::TypeRef(_) => match self.category {
                FieldCategory::Enum(_) => WireType::Varint,
                _ => WireType::LengthDelimited,
            },
            FieldKind::Group(_) => WireType::StartGroup,
        }
    }

    /// Codec dispatch for this field: scalar kinds carry the runtime
    /// call-name fragment (`writeSInt32`, `computeSInt32Size`,
    /// `readSInt32`), the other kinds dispatch by shape.
    #[must_use]
    pub fn codec_call(&self) -> CodecCall {
        match &self.field.kind {
            FieldKind::Int32 => CodecCall::Scalar("Int32"),
            FieldKind::Int64 => CodecCall::Scalar("Int64"),
            FieldKind::Uint32 => CodecCall::Scalar("UInt32"),
            FieldKind::Uint64 => CodecCall::Scalar("UInt64"),
            FieldKind::Sint32 => CodecCall::Scalar("SInt32"),
            FieldKind::Sint64 => CodecCall::Scalar("SInt64"),
            FieldKind::Fixed32 => CodecCall::Scalar("Fixed32"),
            FieldKind::Fixed64 => CodecCall::Scalar("Fixed64"),
            FieldKind::Sfixed32 => CodecCall::Scalar("SFixed32"),
            FieldKind::Sfixed64 => CodecCall::Scalar("SFixed64"),
            FieldKind::Double => CodecCall::Scalar("Double"),
            FieldKind::Float => CodecCall::Scalar("Float"),
            FieldKind::Bool => CodecCall::Scalar("Bool"),
            FieldKind::String => CodecCall::Scalar("String"),
            FieldKind::Bytes => CodecCall::Scalar("Bytes"),
            FieldKind::TypeRef(_) => match self.category {
                FieldCategory::Enum(_) => CodecCall::Enum,
                _ => CodecCall::Message,
            },
            FieldKind::Group(_) => CodecCall::Group,
        }
    }

    /// Storage default literal for the non-repeated slot.
    pub fn storage_default(&self, schema_file: &str) -> Result<String, CodegenError> {
        let enum_target = match self.category {
            FieldCategory::Enum(enum_def) => Some((self.java_type.as_str(), enum_def)),
            _ => None,
        };
        default_literal(schema_file, self.field, enum_target, &LITERALS)
    }
}
