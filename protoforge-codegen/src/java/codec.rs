//! Wire codec emission: serialize, size computation and the tag-dispatch
//! decode loop.
//!
//! Serialize and size iterate the same fields in the same declaration
//! order and dispatch through the same [`CodecCall`] table; decode derives
//! its case labels from the same tag/wire-type pairing via
//! [`make_tag`]. Keeping all three on one table is what keeps encode and
//! decode in lock-step per field kind.

use crate::wire::{WireType, make_tag};
use crate::writer::CodeWriter;

use super::types::{CodecCall, ResolvedField};

/// Emits `writeTo`, `serializedSize` and the stream `mergeFrom` for one
/// message.
pub struct CodecGenerator<'a, 's> {
    class_name: &'a str,
    fields: &'a [ResolvedField<'s>],
}

impl<'a, 's> CodecGenerator<'a, 's> {
    /// Creates a codec generator over a message's resolved fields.
    #[must_use]
    pub fn new(class_name: &'a str, fields: &'a [ResolvedField<'s>]) -> Self {
        Self { class_name, fields }
    }

    /// Emits `writeTo`: absent fields are skipped entirely, repeated
    /// fields emit one independently framed entry per element.
    pub fn write_to(&self, w: &mut CodeWriter) {
        w.p(
            "public void writeTo(io.protoforge.runtime.CodedOutputStream output) \
             throws java.io.IOException {",
        );
        w.indent();
        for rf in self.fields {
            self.guarded_per_value(rf, w, |rf, value| {
                let tag = rf.field.tag;
                match rf.codec_call() {
                    CodecCall::Scalar(call) => format!("output.write{call}({tag}, {value});"),
                    CodecCall::Enum => {
                        format!("output.writeEnum({tag}, {value}.getNumber());")
                    }
                    CodecCall::Message => format!("writeMessage(output, {tag}, {value});"),
                    CodecCall::Group => format!("writeGroup(output, {tag}, {value});"),
                }
            });
        }
        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits `serializedSize`, mirroring `writeTo` but accumulating byte
    /// lengths, with the per-instance memo short-circuit.
    pub fn serialized_size(&self, w: &mut CodeWriter) {
        w.p("public int serializedSize() {");
        w.indent();
        w.p("if (memoizedSerializedSize != -1) {");
        w.indent();
        w.p("return memoizedSerializedSize;");
        w.unindent();
        w.p("}");
        w.blank();
        w.p("int size = 0;");
        for rf in self.fields {
            self.guarded_per_value(rf, w, |rf, value| {
                let tag = rf.field.tag;
                match rf.codec_call() {
                    CodecCall::Scalar(call) => format!(
                        "size += io.protoforge.runtime.CodedOutputStream.compute{call}Size({tag}, {value});"
                    ),
                    CodecCall::Enum => format!(
                        "size += io.protoforge.runtime.CodedOutputStream.computeEnumSize({tag}, {value}.getNumber());"
                    ),
                    CodecCall::Message => {
                        format!("size += computeMessageSize({tag}, {value});")
                    }
                    CodecCall::Group => format!("size += computeGroupSize({tag}, {value});"),
                }
            });
        }
        w.p("memoizedSerializedSize = size;");
        w.p("return size;");
        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits the presence guard (and repeated-element loop) around one
    /// field, handing the value expression to `call`.
    fn guarded_per_value(
        &self,
        rf: &ResolvedField<'s>,
        w: &mut CodeWriter,
        call: impl Fn(&ResolvedField<'s>, &str) -> String,
    ) {
        let uname = &rf.uname;
        w.p(&format!("if (has{uname}()) {{"));
        w.indent();
        if rf.field.is_repeated() {
            w.p(&format!(
                "for ({} i : get{uname}List()) {{",
                rf.java_type
            ));
            w.indent();
            w.p(&call(rf, "i"));
            w.unindent();
            w.p("}");
        } else {
            w.p(&call(rf, &format!("get{uname}()")));
        }
        w.unindent();
        w.p("}");
    }

    /// Emits the stream `mergeFrom`: one framing tag per iteration, tag 0
    /// ends the input, an end-group marker ends a nested group read, and
    /// unknown tags fall through the `default` arm as no-ops.
    pub fn merge_from_stream(&self, w: &mut CodeWriter) {
        let class = self.class_name;
        w.p(&format!(
            "public {class} mergeFrom(io.protoforge.runtime.CodedInputStream input, \
             io.protoforge.runtime.ExtensionRegistry extensionRegistry) throws java.io.IOException {{"
        ));
        w.indent();
        w.p("while (true) {");
        w.indent();
        w.p("int tag = input.readTag();");
        w.p(&format!("if ((tag & 0x07) == {}) {{", WireType::EndGroup.value()));
        w.indent();
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.p("switch (tag) {");
        w.p("case 0:");
        w.indent();
        w.p("return this;");
        w.unindent();
        w.p("default: {");
        w.indent();
        w.p("break;");
        w.unindent();
        w.p("}");
        for rf in self.fields {
            self.decode_case(rf, w);
        }
        w.p("}");
        w.unindent();
        w.p("}");
        w.unindent();
        w.p("}");
        w.blank();
    }

    fn decode_case(&self, rf: &ResolvedField<'_>, w: &mut CodeWriter) {
        let tag = rf.field.tag;
        let uname = &rf.uname;
        let java_type = &rf.java_type;
        let repeated = rf.field.is_repeated();
        // Appends route through the accessor so repeated decode shares the
        // memo invalidation of every other mutation.
        let setter = if repeated {
            format!("add{uname}")
        } else {
            format!("set{uname}")
        };

        w.p(&format!("case {}:", make_tag(tag, rf.wire_type())));
        w.indent();
        match rf.codec_call() {
            CodecCall::Scalar(call) => {
                w.p(&format!("{setter}(input.read{call}());"));
            }
            CodecCall::Enum => {
                w.p("{");
                w.indent();
                w.p("int t = input.readEnum();");
                w.p(&format!("{java_type} value = {java_type}.valueOf(t);"));
                w.p("if (value != null) {");
                w.indent();
                w.p(&format!("{setter}(value);"));
                w.unindent();
                w.p("}");
                // An integer with no declared variant leaves the field
                // unset for this occurrence.
                w.unindent();
                w.p("}");
            }
            CodecCall::Message => {
                if repeated {
                    w.p(&format!(
                        "{setter}(readMessage(input, extensionRegistry, new {java_type}()));"
                    ));
                } else {
                    // A second occurrence of a singular message field
                    // merges into the existing value instead of
                    // replacing it.
                    w.p(&format!("if (has{uname}()) {{"));
                    w.indent();
                    w.p(&format!(
                        "readMessage(input, extensionRegistry, get{uname}());"
                    ));
                    w.unindent();
                    w.p("} else {");
                    w.indent();
                    w.p(&format!(
                        "{setter}(readMessage(input, extensionRegistry, new {java_type}()));"
                    ));
                    w.unindent();
                    w.p("}");
                }
            }
            CodecCall::Group => {
                if repeated {
                    w.p(&format!(
                        "{setter}(readGroup(input, extensionRegistry, {tag}, new {java_type}()));"
                    ));
                } else {
                    w.p(&format!("if (has{uname}()) {{"));
                    w.indent();
                    w.p(&format!(
                        "readGroup(input, extensionRegistry, {tag}, get{uname}());"
                    ));
                    w.unindent();
                    w.p("} else {");
                    w.indent();
                    w.p(&format!(
                        "{setter}(readGroup(input, extensionRegistry, {tag}, new {java_type}()));"
                    ));
                    w.unindent();
                    w.p("}");
                }
            }
        }
        w.p("break;");
        w.unindent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Diagnostics;
    use crate::names::TypeResolver;
    use protoforge_schema::{Enum, Field, FieldKind, FieldRule, Message, Schema};

    fn test_schema() -> Schema {
        let mut schema = Schema::new("t.proto");
        schema.add_message(Message::new("Sub"));
        let mut status = Enum::new("Status");
        status.add_value("OK", 0);
        schema.add_enum(status);
        schema
    }

    fn resolve_fields<'a>(
        fields: &'a [Field],
        schema: &'a Schema,
        resolver: &TypeResolver<'a>,
    ) -> Vec<ResolvedField<'a>> {
        let mut diags = Diagnostics::new();
        let resolved: Vec<_> = fields
            .iter()
            .filter_map(|f| ResolvedField::resolve(f, schema, resolver, "Frame", &mut diags))
            .collect();
        assert!(diags.is_empty());
        resolved
    }

    fn sample_fields() -> Vec<Field> {
        vec![
            Field::new("name", 1, FieldRule::Required, FieldKind::String),
            Field::new("sub", 2, FieldRule::Optional, FieldKind::TypeRef("Sub".into())),
            Field::new("status", 3, FieldRule::Optional, FieldKind::TypeRef("Status".into())),
            Field::new(
                "leg",
                4,
                FieldRule::Optional,
                FieldKind::Group(Box::new(Message::new("Leg"))),
            ),
            Field::new("weights", 5, FieldRule::Repeated, FieldKind::Sint64),
        ]
    }

    #[test]
    fn test_write_to_dispatch() {
        let schema = test_schema();
        let resolver = TypeResolver::new(&schema);
        let fields = sample_fields();
        let resolved = resolve_fields(&fields, &schema, &resolver);
        let mut w = CodeWriter::new();
        CodecGenerator::new("Frame", &resolved).write_to(&mut w);
        let out = w.into_string();

        assert!(out.contains("output.writeString(1, getName());"));
        assert!(out.contains("writeMessage(output, 2, getSub());"));
        assert!(out.contains("output.writeEnum(3, getStatus().getNumber());"));
        assert!(out.contains("writeGroup(output, 4, getLeg());"));
        // Repeated scalars are framed one entry per element, no packing.
        assert!(out.contains("for (long i : getWeightsList()) {"));
        assert!(out.contains("output.writeSInt64(5, i);"));
        // Absent fields are skipped entirely.
        assert!(out.contains("if (hasName()) {"));
    }

    #[test]
    fn test_serialized_size_mirrors_write_to() {
        let schema = test_schema();
        let resolver = TypeResolver::new(&schema);
        let fields = sample_fields();
        let resolved = resolve_fields(&fields, &schema, &resolver);
        let mut w = CodeWriter::new();
        CodecGenerator::new("Frame", &resolved).serialized_size(&mut w);
        let out = w.into_string();

        assert!(out.contains("if (memoizedSerializedSize != -1) {"));
        assert!(out.contains(
            "size += io.protoforge.runtime.CodedOutputStream.computeStringSize(1, getName());"
        ));
        assert!(out.contains("size += computeMessageSize(2, getSub());"));
        assert!(out.contains(
            "size += io.protoforge.runtime.CodedOutputStream.computeEnumSize(3, getStatus().getNumber());"
        ));
        assert!(out.contains("size += computeGroupSize(4, getLeg());"));
        assert!(out.contains("memoizedSerializedSize = size;"));
    }

    #[test]
    fn test_decode_case_labels_pair_tag_and_wire_type() {
        let schema = test_schema();
        let resolver = TypeResolver::new(&schema);
        let fields = sample_fields();
        let resolved = resolve_fields(&fields, &schema, &resolver);
        let mut w = CodeWriter::new();
        CodecGenerator::new("Frame", &resolved).merge_from_stream(&mut w);
        let out = w.into_string();

        // string 1 -> length-delimited, message 2 -> length-delimited,
        // enum 3 -> varint, group 4 -> start-group, sint64 5 -> varint.
        assert!(out.contains("case 10:"));
        assert!(out.contains("case 18:"));
        assert!(out.contains("case 24:"));
        assert!(out.contains("case 35:"));
        assert!(out.contains("case 40:"));

        assert!(out.contains("if ((tag & 0x07) == 4) {"));
        assert!(out.contains("case 0:"));
        assert!(out.contains("setName(input.readString());"));
        assert!(out.contains("addWeights(input.readSInt64());"));
    }

    #[test]
    fn test_decode_merges_second_singular_message_occurrence() {
        let schema = test_schema();
        let resolver = TypeResolver::new(&schema);
        let fields = sample_fields();
        let resolved = resolve_fields(&fields, &schema, &resolver);
        let mut w = CodeWriter::new();
        CodecGenerator::new("Frame", &resolved).merge_from_stream(&mut w);
        let out = w.into_string();

        assert!(out.contains("if (hasSub()) {"));
        assert!(out.contains("readMessage(input, extensionRegistry, getSub());"));
        assert!(out.contains("setSub(readMessage(input, extensionRegistry, new Sub()));"));
        assert!(out.contains("readGroup(input, extensionRegistry, 4, getLeg());"));
    }

    #[test]
    fn test_decode_drops_unknown_enum_numbers() {
        let schema = test_schema();
        let resolver = TypeResolver::new(&schema);
        let fields = sample_fields();
        let resolved = resolve_fields(&fields, &schema, &resolver);
        let mut w = CodeWriter::new();
        CodecGenerator::new("Frame", &resolved).merge_from_stream(&mut w);
        let out = w.into_string();

        assert!(out.contains("int t = input.readEnum();"));
        assert!(out.contains("Status value = Status.valueOf(t);"));
        assert!(out.contains("if (value != null) {"));
    }
}
