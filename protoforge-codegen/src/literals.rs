//! Default-value literal derivation.
//!
//! Maps a field's declared kind plus its optional raw `default` text to a
//! literal in the target language. The pieces of literal grammar that vary
//! per target (numeric suffixes, the absent sentinel, the byte-string
//! constructor) are carried in a [`LiteralStyle`] supplied by the backend,
//! so the deriver itself stays target-neutral.

use protoforge_schema::{Enum, Field, FieldKind};

use crate::error::CodegenError;

/// Target-language literal grammar table.
#[derive(Debug, Clone, Copy)]
pub struct LiteralStyle {
    /// Suffix for 64-bit integer literals.
    pub long_suffix: &'static str,
    /// Suffix for single-precision float literals.
    pub float_suffix: &'static str,
    /// Suffix for double-precision float literals.
    pub double_suffix: &'static str,
    /// Sentinel for an absent value (never an empty-but-present value).
    pub absent: &'static str,
    /// Constructor wrapping an escaped string into a byte-string value.
    pub bytes_constructor: &'static str,
}

/// Derives the storage default literal for a non-repeated field.
///
/// Without a `default` option: numeric kinds get a zero literal, bool gets
/// `false`, and string/bytes/message/enum kinds get the absent sentinel.
/// With one, the raw text is parsed per the kind's canonical text format.
/// `enum_target` supplies the emitted enum type name and declaration when
/// the field's reference resolved to an enum.
///
/// # Errors
/// Returns [`CodegenError::InvalidDefault`] when the text does not parse
/// for the declared kind, names no declared enum value, or sits on a kind
/// that admits no default at all.
pub fn default_literal(
    schema_file: &str,
    field: &Field,
    enum_target: Option<(&str, &Enum)>,
    style: &LiteralStyle,
) -> Result<String, CodegenError> {
    let Some(raw) = field.default.as_deref() else {
        return Ok(absent_literal(field, style));
    };

    let invalid = || {
        CodegenError::invalid_default(
            schema_file,
            field.name.clone(),
            field.kind.proto_name().to_string(),
            raw.to_string(),
        )
    };

    match &field.kind {
        FieldKind::Int32 | FieldKind::Sint32 | FieldKind::Sfixed32 => {
            let value: i32 = raw.parse().map_err(|_| invalid())?;
            Ok(value.to_string())
        }
        FieldKind::Uint32 | FieldKind::Fixed32 => {
            // Unsigned text, stored in the target's signed 32-bit slot.
            let value: u32 = raw.parse().map_err(|_| invalid())?;
            Ok((value as i32).to_string())
        }
        FieldKind::Int64 | FieldKind::Sint64 | FieldKind::Sfixed64 => {
            let value: i64 = raw.parse().map_err(|_| invalid())?;
            Ok(format!("{value}{}", style.long_suffix))
        }
        FieldKind::Uint64 | FieldKind::Fixed64 => {
            let value: u64 = raw.parse().map_err(|_| invalid())?;
            Ok(format!("{}{}", value as i64, style.long_suffix))
        }
        FieldKind::Double => {
            let value: f64 = raw.parse().map_err(|_| invalid())?;
            Ok(format!("{value:?}{}", style.double_suffix))
        }
        FieldKind::Float => {
            let value: f32 = raw.parse().map_err(|_| invalid())?;
            Ok(format!("{value:?}{}", style.float_suffix))
        }
        FieldKind::Bool => {
            let value: bool = raw.parse().map_err(|_| invalid())?;
            Ok(value.to_string())
        }
        FieldKind::String => Ok(quote_string(raw)),
        FieldKind::Bytes => Ok(format!("{}({})", style.bytes_constructor, quote_string(raw))),
        FieldKind::TypeRef(_) => match enum_target {
            Some((enum_type, enum_def)) => enum_def
                .value(raw)
                .map(|value| format!("{enum_type}.{}", value.name))
                .ok_or_else(invalid),
            // A default on a message-typed field has no meaning; surfaced
            // rather than silently echoed.
            None => Err(invalid()),
        },
        FieldKind::Group(_) => Err(invalid()),
    }
}

/// Default literal for a field with no `default` option: zero for numeric
/// kinds, `false` for bool, the absent sentinel otherwise.
#[must_use]
pub fn absent_literal(field: &Field, style: &LiteralStyle) -> String {
    if field.kind.is_numeric() {
        "0".to_string()
    } else if field.kind == FieldKind::Bool {
        "false".to_string()
    } else {
        style.absent.to_string()
    }
}

/// Escapes a raw default string into a quoted target literal.
///
/// Control characters, backslash and both quote characters use two-char
/// escapes; anything outside the reference printable window
/// (`0x20..=0x59`) becomes a 4-hex-digit unicode escape, one per UTF-16
/// unit; characters inside the window pass through unchanged.
#[must_use]
pub fn quote_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    let mut units = [0u16; 2];
    for c in value.chars() {
        match c {
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '"' => out.push_str("\\\""),
            '\u{20}'..='\u{59}' => out.push(c),
            other => {
                for unit in other.encode_utf16(&mut units) {
                    out.push_str(&format!("\\u{unit:04x}"));
                }
            }
        }
    }
    out.push('"');
    out
}
