//! Per-message emission: one generated bean class per message, nested
//! types first, then accessors and the codec/semantic method bodies.

use protoforge_schema::{Message, Schema};
use tracing::debug;

use crate::error::{CodegenError, Diagnostics};
use crate::literals::absent_literal;
use crate::names::{TypeResolver, upper_camel};
use crate::writer::CodeWriter;

use super::LITERALS;
use super::accessors::AccessorGenerator;
use super::codec::CodecGenerator;
use super::enums::EnumGenerator;
use super::semantics::SemanticsGenerator;
use super::types::ResolvedField;

/// Emits message bean classes for one schema.
pub struct MessageGenerator<'a> {
    schema: &'a Schema,
    resolver: TypeResolver<'a>,
    multi_file: bool,
}

impl<'a> MessageGenerator<'a> {
    /// Creates a message generator for one schema.
    #[must_use]
    pub fn new(schema: &'a Schema, multi_file: bool) -> Self {
        Self {
            schema,
            resolver: TypeResolver::new(schema),
            multi_file,
        }
    }

    /// Emits one message class, recursing into nested messages, nested
    /// enums and group bodies before the message's own members.
    ///
    /// Member order matches field declaration order throughout; a failing
    /// field is recorded and skipped so the rest of the message still
    /// generates.
    pub fn generate(
        &self,
        message: &'a Message,
        top_level: bool,
        w: &mut CodeWriter,
        diags: &mut Diagnostics,
    ) {
        let class_name = upper_camel(&message.name);
        if class_name.is_empty() {
            diags.push(CodegenError::empty_identifier(
                self.schema.file_name.clone(),
                message.name.clone(),
                "message name",
            ));
            return;
        }
        debug!(message = %message.name, class = %class_name, "generating message");

        let modifier = if self.multi_file && top_level {
            ""
        } else {
            "static "
        };

        w.blank();
        w.p(&format!(
            "public {modifier}final class {class_name} extends \
             io.protoforge.runtime.Message<{class_name}> {{"
        ));
        w.blank();
        w.indent();

        let enums = EnumGenerator::new(self.schema, self.multi_file);
        for enum_def in &message.enums {
            enums.generate(enum_def, false, w, diags);
        }
        for nested in &message.messages {
            self.generate(nested, false, w, diags);
        }
        // Group bodies are synthetic nested messages owned by their field.
        for field in &message.fields {
            if let Some(group) = field.group() {
                self.generate(group, false, w, diags);
            }
        }

        let resolved: Vec<ResolvedField<'a>> = message
            .fields
            .iter()
            .filter_map(|field| {
                ResolvedField::resolve(field, self.schema, &self.resolver, &message.name, diags)
            })
            .collect();

        let accessors = AccessorGenerator::new(&class_name);
        for rf in &resolved {
            let default = if rf.field.is_repeated() {
                String::new()
            } else {
                match rf.storage_default(&self.schema.file_name) {
                    Ok(literal) => literal,
                    Err(error) => {
                        // Recorded, then generation carries on with the
                        // no-default literal; the run still fails.
                        diags.push(error);
                        absent_literal(rf.field, &LITERALS)
                    }
                }
            };
            accessors.generate(rf, &default, w);
        }

        let semantics = SemanticsGenerator::new(&class_name, &resolved);
        let codec = CodecGenerator::new(&class_name, &resolved);

        semantics.initialization(w);
        semantics.clear(w);
        semantics.clone_method(w);
        semantics.merge_from_bean(w);
        codec.serialized_size(w);
        codec.merge_from_stream(w);
        codec.write_to(w);
        self.parse_from(&class_name, w);
        semantics.to_string(w);

        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits the static `parseFrom` family. Every overload funnels through
    /// `checkInitialized`, so a wire-decoded message with missing required
    /// fields fails with the full dotted-path list. The extension registry
    /// is accepted and ignored; extension fields stay unimplemented.
    fn parse_from(&self, class_name: &str, w: &mut CodeWriter) {
        let sources = [
            ("io.protoforge.runtime.Buffer data", "data", ""),
            ("byte[] data", "data", ""),
            ("java.io.InputStream data", "data", ", java.io.IOException"),
        ];
        for (parameter, argument, extra_throws) in sources {
            w.p(&format!(
                "public static {class_name} parseFrom({parameter}) throws \
                 io.protoforge.runtime.InvalidWireFormatException{extra_throws} {{"
            ));
            w.indent();
            w.p(&format!(
                "return new {class_name}().mergeFrom({argument}).checkInitialized();"
            ));
            w.unindent();
            w.p("}");
            w.blank();

            w.p(&format!(
                "public static {class_name} parseFrom({parameter}, \
                 io.protoforge.runtime.ExtensionRegistry extensionRegistry) throws \
                 io.protoforge.runtime.InvalidWireFormatException{extra_throws} {{"
            ));
            w.indent();
            w.p(&format!(
                "return new {class_name}().mergeFrom({argument}, extensionRegistry).checkInitialized();"
            ));
            w.unindent();
            w.p("}");
            w.blank();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoforge_schema::{Enum, Field, FieldKind, FieldRule};

    fn frame_schema() -> Schema {
        let mut schema = Schema::new("frames.proto");

        let mut status = Enum::new("Status");
        status.add_value("OK", 0);
        status.add_value("BAD", 1);

        let mut sub = Message::new("Sub");
        sub.add_field(Field::new("id", 1, FieldRule::Required, FieldKind::Int32));

        let mut leg = Message::new("Leg");
        leg.add_field(Field::new("miles", 1, FieldRule::Optional, FieldKind::Int32));

        let mut frame = Message::new("Frame");
        frame.add_enum(status);
        frame.add_message(sub);
        frame.add_field(Field::new("name", 1, FieldRule::Required, FieldKind::String));
        frame.add_field(Field::new(
            "sub",
            2,
            FieldRule::Optional,
            FieldKind::TypeRef("Frame.Sub".into()),
        ));
        frame.add_field(Field::new(
            "leg",
            3,
            FieldRule::Optional,
            FieldKind::Group(Box::new(leg)),
        ));
        schema.add_message(frame);
        schema
    }

    fn emit(schema: &Schema) -> (String, Diagnostics) {
        let mut diags = Diagnostics::new();
        let mut w = CodeWriter::new();
        let generator = MessageGenerator::new(schema, false);
        generator.generate(&schema.messages[0], true, &mut w, &mut diags);
        (w.into_string(), diags)
    }

    #[test]
    fn test_message_bean_shape() {
        let schema = frame_schema();
        let (out, diags) = emit(&schema);
        assert!(diags.is_empty(), "{diags:?}");

        assert!(out.contains(
            "public static final class Frame extends io.protoforge.runtime.Message<Frame> {"
        ));
        // Nested enum, nested message and the group body all live inside.
        assert!(out.contains("public static enum Status {"));
        assert!(out.contains(
            "public static final class Sub extends io.protoforge.runtime.Message<Sub> {"
        ));
        assert!(out.contains(
            "public static final class Leg extends io.protoforge.runtime.Message<Leg> {"
        ));
        // Cross-scope reference resolves to the nested chain.
        assert!(out.contains("private Frame.Sub f_sub = null;"));
    }

    #[test]
    fn test_member_order_follows_declaration_order() {
        let schema = frame_schema();
        let (out, _) = emit(&schema);
        let name = out.find("// required string name = 1;").unwrap();
        let sub = out.find("// optional Frame.Sub sub = 2;").unwrap();
        let leg = out.find("// optional Leg leg = 3;").unwrap();
        assert!(name < sub && sub < leg);
    }

    #[test]
    fn test_parse_from_family() {
        let schema = frame_schema();
        let (out, _) = emit(&schema);
        assert!(out.contains(
            "public static Frame parseFrom(io.protoforge.runtime.Buffer data)"
        ));
        assert!(out.contains("public static Frame parseFrom(byte[] data)"));
        assert!(out.contains("public static Frame parseFrom(java.io.InputStream data)"));
        assert_eq!(out.matches("public static Frame parseFrom(").count(), 6);
        assert!(out.contains("return new Frame().mergeFrom(data).checkInitialized();"));
    }

    #[test]
    fn test_unresolved_field_is_skipped_but_class_still_emits() {
        let mut schema = Schema::new("broken.proto");
        let mut msg = Message::new("Broken");
        msg.add_field(Field::new(
            "ghost",
            1,
            FieldRule::Optional,
            FieldKind::TypeRef("Phantom".into()),
        ));
        msg.add_field(Field::new("kept", 2, FieldRule::Optional, FieldKind::Bool));
        schema.add_message(msg);

        let (out, diags) = emit(&schema);
        assert_eq!(diags.len(), 1);
        assert!(out.contains("public boolean hasKept() {"));
        assert!(!out.contains("hasGhost"));
    }

    #[test]
    fn test_invalid_default_recorded_with_fallback_storage() {
        let mut schema = Schema::new("broken.proto");
        let mut msg = Message::new("Broken");
        msg.add_field(
            Field::new("count", 1, FieldRule::Optional, FieldKind::Int32).with_default("many"),
        );
        schema.add_message(msg);

        let (out, diags) = emit(&schema);
        assert_eq!(diags.len(), 1);
        assert!(out.contains("private int f_count = 0;"));
    }
}
