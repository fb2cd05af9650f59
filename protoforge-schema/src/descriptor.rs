//! Descriptor tree produced by the parser/validator.
//!
//! One [`Schema`] per compiled file, holding its resolved imports and its
//! top-level messages and enums in declaration order. Declaration order is
//! load-bearing: it governs generated field order, tag-dispatch order and
//! merge evaluation order, so everything here is `Vec`-backed with by-name
//! lookup helpers layered on top.

use crate::types::{FieldKind, FieldRule};

/// One compiled schema file with its resolved import forest.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    /// Source file name, e.g. `routing.proto`.
    pub file_name: String,
    /// Declared package, if any.
    pub package: Option<String>,
    /// File-level options in declaration order.
    pub options: Vec<OptionDef>,
    /// Imported schemas, fully resolved. Cycles are a parser-level concern
    /// and assumed absent.
    pub imports: Vec<Schema>,
    /// Top-level messages in declaration order.
    pub messages: Vec<Message>,
    /// Top-level enums in declaration order.
    pub enums: Vec<Enum>,
}

impl Schema {
    /// Creates an empty schema for the given file name.
    #[must_use]
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            ..Self::default()
        }
    }

    /// Sets the declared package.
    pub fn set_package(&mut self, package: impl Into<String>) {
        self.package = Some(package.into());
    }

    /// Adds a file-level option.
    pub fn add_option(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.options.push(OptionDef {
            name: name.into(),
            value: value.into(),
        });
    }

    /// Adds a resolved import.
    pub fn add_import(&mut self, import: Schema) {
        self.imports.push(import);
    }

    /// Adds a top-level message.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Adds a top-level enum.
    pub fn add_enum(&mut self, enum_def: Enum) {
        self.enums.push(enum_def);
    }

    /// Looks up a file-level option by name. First declaration wins.
    #[must_use]
    pub fn option(&self, name: &str) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.name == name)
            .map(|o| o.value.as_str())
    }

    /// Looks up a top-level message by name.
    #[must_use]
    pub fn message(&self, name: &str) -> Option<&Message> {
        self.messages.iter().find(|m| m.name == name)
    }

    /// Looks up a top-level enum by name.
    #[must_use]
    pub fn enum_def(&self, name: &str) -> Option<&Enum> {
        self.enums.iter().find(|e| e.name == name)
    }
}

/// Opaque name/value option pair.
///
/// The generator reads the recognized option names and ignores the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDef {
    /// Option name.
    pub name: String,
    /// Raw option value.
    pub value: String,
}

/// A named structured type.
///
/// Field names and nested type names are unique within a message; the
/// upstream validator enforces this before generation starts.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Message {
    /// Message name as declared.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<Field>,
    /// Nested messages in declaration order.
    pub messages: Vec<Message>,
    /// Nested enums in declaration order.
    pub enums: Vec<Enum>,
}

impl Message {
    /// Creates an empty message.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a field.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// Adds a nested message.
    pub fn add_message(&mut self, message: Message) {
        self.messages.push(message);
    }

    /// Adds a nested enum.
    pub fn add_enum(&mut self, enum_def: Enum) {
        self.enums.push(enum_def);
    }

    /// Looks up a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// One declared field of a message.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as declared.
    pub name: String,
    /// Wire tag number, positive and unique within the owning message.
    pub tag: u32,
    /// Cardinality rule.
    pub rule: FieldRule,
    /// Declared type.
    pub kind: FieldKind,
    /// Raw `default` option text, meaningful only for non-repeated
    /// scalar and enum fields.
    pub default: Option<String>,
}

impl Field {
    /// Creates a field with no default.
    #[must_use]
    pub fn new(name: impl Into<String>, tag: u32, rule: FieldRule, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            tag,
            rule,
            kind,
            default: None,
        }
    }

    /// Sets the raw default-value text.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Returns true for repeated fields.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.rule == FieldRule::Repeated
    }

    /// Returns true for required fields.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.rule == FieldRule::Required
    }

    /// Returns true for group fields.
    #[must_use]
    pub const fn is_group(&self) -> bool {
        matches!(self.kind, FieldKind::Group(_))
    }

    /// Returns the group body for group fields.
    #[must_use]
    pub fn group(&self) -> Option<&Message> {
        match &self.kind {
            FieldKind::Group(body) => Some(body),
            _ => None,
        }
    }
}

/// A declared enum type.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Enum {
    /// Enum name as declared.
    pub name: String,
    /// Values in declaration order. Duplicate numbers are permitted;
    /// numeric lookup resolves to the first declaration.
    pub values: Vec<EnumValue>,
}

impl Enum {
    /// Creates an empty enum.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
        }
    }

    /// Adds a value.
    pub fn add_value(&mut self, name: impl Into<String>, number: i32) {
        self.values.push(EnumValue {
            name: name.into(),
            number,
        });
    }

    /// Looks up a value by name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.name == name)
    }

    /// Looks up a value by number. First declaration wins when numbers
    /// are shared.
    #[must_use]
    pub fn value_of(&self, number: i32) -> Option<&EnumValue> {
        self.values.iter().find(|v| v.number == number)
    }
}

/// One named enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumValue {
    /// Value name as declared.
    pub name: String,
    /// Declared integer value.
    pub number: i32,
}
