//! Identifier canonicalization and type-reference resolution.
//!
//! Pure functions over the read-only schema tree; the only mutable state
//! involved is the caller's error sink.

use protoforge_schema::{Enum, Message, Schema};

use crate::error::CodegenError;
use crate::options::SchemaOptions;

/// Canonicalizes a raw schema identifier into an upper-camel name.
///
/// The name is split into maximal alphanumeric runs; separators are
/// dropped and the first character of each run is capitalized. A name
/// with no usable characters yields an empty string — callers must treat
/// that as a generation error, never a panic.
#[must_use]
pub fn upper_camel(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut capitalize_next = true;
    for c in raw.chars() {
        if c.is_alphanumeric() {
            if capitalize_next {
                out.extend(c.to_uppercase());
                capitalize_next = false;
            } else {
                out.push(c);
            }
        } else {
            capitalize_next = true;
        }
    }
    out
}

/// Lower-camel variant of [`upper_camel`]: same result with the first
/// character lower-cased.
#[must_use]
pub fn lower_camel(raw: &str) -> String {
    let upper = upper_camel(raw);
    let mut chars = upper.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_lowercase().collect();
            out.push_str(chars.as_str());
            out
        }
        None => upper,
    }
}

/// Strips everything from the first dot of a file name.
#[must_use]
pub fn file_base_name(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}

/// What a type reference resolved to.
#[derive(Debug, Clone, Copy)]
pub enum TypeTarget<'a> {
    /// A message declaration.
    Message(&'a Message),
    /// An enum declaration.
    Enum(&'a Enum),
}

impl TypeTarget<'_> {
    /// Returns true when the target is an enum.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self, Self::Enum(_))
    }
}

/// A type reference resolved against the schema tree.
#[derive(Debug, Clone)]
pub struct ResolvedTypeRef<'a> {
    /// Schema that declares the target type.
    pub schema: &'a Schema,
    /// Declared nested-name chain from the file root to the target.
    pub segments: Vec<&'a str>,
    /// The target declaration.
    pub target: TypeTarget<'a>,
}

/// Resolves dotted type references against one schema and its imports.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    root: &'a Schema,
}

impl<'a> TypeResolver<'a> {
    /// Creates a resolver rooted at the schema being generated.
    #[must_use]
    pub fn new(root: &'a Schema) -> Self {
        Self { root }
    }

    /// Resolves a declared type name.
    ///
    /// The current schema is searched first, then its imports depth-first
    /// in declaration order. `None` means the tree has no such node; the
    /// caller records that as a resolution error and continues.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<ResolvedTypeRef<'a>> {
        Self::resolve_in(self.root, name)
    }

    fn resolve_in(schema: &'a Schema, name: &str) -> Option<ResolvedTypeRef<'a>> {
        if let Some(found) = Self::find_in(schema, name) {
            return Some(found);
        }
        schema
            .imports
            .iter()
            .find_map(|import| Self::resolve_in(import, name))
    }

    fn find_in(schema: &'a Schema, name: &str) -> Option<ResolvedTypeRef<'a>> {
        let segments: Vec<&str> = name.split('.').collect();
        let (last, path) = segments.split_last()?;

        let mut messages = &schema.messages;
        let mut enums = &schema.enums;
        let mut chain: Vec<&'a str> = Vec::with_capacity(segments.len());
        for segment in path {
            let owner = messages.iter().find(|m| m.name == *segment)?;
            chain.push(owner.name.as_str());
            messages = &owner.messages;
            enums = &owner.enums;
        }

        if let Some(message) = messages.iter().find(|m| m.name == *last) {
            chain.push(message.name.as_str());
            return Some(ResolvedTypeRef {
                schema,
                segments: chain,
                target: TypeTarget::Message(message),
            });
        }
        if let Some(enum_def) = enums.iter().find(|e| e.name == *last) {
            chain.push(enum_def.name.as_str());
            return Some(ResolvedTypeRef {
                schema,
                segments: chain,
                target: TypeTarget::Enum(enum_def),
            });
        }
        None
    }
}

/// Emission name for a resolved reference, qualified just enough to be
/// unambiguous from `from`.
///
/// Same schema: the dot-joined canonicalized nested chain. Same target
/// package: prefixed with the owning schema's outer type name only.
/// Anywhere else: fully qualified with package and outer type name.
pub fn emitted_type_name(
    reference: &ResolvedTypeRef<'_>,
    from: &Schema,
) -> Result<String, CodegenError> {
    let mut local = String::new();
    for segment in &reference.segments {
        let canonical = upper_camel(segment);
        if canonical.is_empty() {
            return Err(CodegenError::empty_identifier(
                reference.schema.file_name.clone(),
                (*segment).to_string(),
                "type name",
            ));
        }
        if !local.is_empty() {
            local.push('.');
        }
        local.push_str(&canonical);
    }

    if std::ptr::eq(reference.schema, from) {
        return Ok(local);
    }

    let target_options = SchemaOptions::resolve(reference.schema)?;
    let from_options = SchemaOptions::resolve(from)?;
    if target_options.package == from_options.package {
        return Ok(format!("{}.{local}", target_options.outer_class));
    }
    match &target_options.package {
        Some(package) => Ok(format!(
            "{package}.{}.{local}",
            target_options.outer_class
        )),
        None => Ok(format!("{}.{local}", target_options.outer_class)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoforge_schema::{Field, FieldKind, FieldRule};

    #[test]
    fn test_upper_camel() {
        assert_eq!(upper_camel("foo_bar-2baz"), "FooBar2baz");
        assert_eq!(upper_camel("hello"), "Hello");
        assert_eq!(upper_camel("__leading"), "Leading");
        assert_eq!(upper_camel("a__b"), "AB");
        assert_eq!(upper_camel("---"), "");
        assert_eq!(upper_camel(""), "");
    }

    #[test]
    fn test_lower_camel() {
        assert_eq!(lower_camel("foo_bar-2baz"), "fooBar2baz");
        assert_eq!(lower_camel("Address"), "address");
        assert_eq!(lower_camel(""), "");
    }

    #[test]
    fn test_file_base_name() {
        assert_eq!(file_base_name("routing.proto"), "routing");
        assert_eq!(file_base_name("a.b.proto"), "a");
        assert_eq!(file_base_name("bare"), "bare");
    }

    fn schema_with_nested() -> Schema {
        let mut schema = Schema::new("tree.proto");
        let mut outer = Message::new("Outer");
        let mut inner = Message::new("Inner");
        inner.add_field(Field::new("x", 1, FieldRule::Optional, FieldKind::Int32));
        outer.add_message(inner);
        let mut status = Enum::new("Status");
        status.add_value("OK", 0);
        outer.add_enum(status);
        schema.add_message(outer);
        schema
    }

    #[test]
    fn test_resolve_nested_chain() {
        let schema = schema_with_nested();
        let resolver = TypeResolver::new(&schema);

        let inner = resolver.resolve("Outer.Inner").expect("Outer.Inner");
        assert_eq!(inner.segments, vec!["Outer", "Inner"]);
        assert!(!inner.target.is_enum());

        let status = resolver.resolve("Outer.Status").expect("Outer.Status");
        assert!(status.target.is_enum());

        assert!(resolver.resolve("Outer.Missing").is_none());
        assert!(resolver.resolve("Missing").is_none());
    }

    #[test]
    fn test_resolve_searches_imports() {
        let mut root = Schema::new("root.proto");
        let mut imported = Schema::new("shared.proto");
        imported.set_package("acme.shared");
        imported.add_message(Message::new("Common"));
        root.add_import(imported);

        let resolver = TypeResolver::new(&root);
        let common = resolver.resolve("Common").expect("Common");
        assert_eq!(common.schema.file_name, "shared.proto");
    }

    #[test]
    fn test_emitted_type_name_qualification() {
        let mut root = Schema::new("root.proto");
        root.set_package("acme.app");

        let mut same_package = Schema::new("same.proto");
        same_package.set_package("acme.app");
        same_package.add_message(Message::new("Near"));

        let mut other_package = Schema::new("far.proto");
        other_package.set_package("acme.far");
        other_package.add_message(Message::new("Far"));

        root.add_import(same_package);
        root.add_import(other_package);
        root.add_message(Message::new("Local"));

        let resolver = TypeResolver::new(&root);

        let local = resolver.resolve("Local").unwrap();
        assert_eq!(emitted_type_name(&local, &root).unwrap(), "Local");

        let near = resolver.resolve("Near").unwrap();
        assert_eq!(emitted_type_name(&near, &root).unwrap(), "Same.Near");

        let far = resolver.resolve("Far").unwrap();
        assert_eq!(
            emitted_type_name(&far, &root).unwrap(),
            "acme.far.Far.Far"
        );
    }
}
