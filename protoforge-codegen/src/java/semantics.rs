//! Structural operation emission: clear, merge, clone, required-field
//! validation and debug rendering.

use crate::writer::CodeWriter;

use super::types::ResolvedField;

/// Emits the semantic operations of one message.
pub struct SemanticsGenerator<'a, 's> {
    class_name: &'a str,
    fields: &'a [ResolvedField<'s>],
}

impl<'a, 's> SemanticsGenerator<'a, 's> {
    /// Creates a semantics generator over a message's resolved fields.
    #[must_use]
    pub fn new(class_name: &'a str, fields: &'a [ResolvedField<'s>]) -> Self {
        Self { class_name, fields }
    }

    /// Emits `clear`: size memo first, then every field.
    pub fn clear(&self, w: &mut CodeWriter) {
        w.p("public final void clear() {");
        w.indent();
        w.p("memoizedSerializedSize = -1;");
        for rf in self.fields {
            w.p(&format!("clear{}();", rf.uname));
        }
        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits `clone` as construct-empty-then-merge.
    pub fn clone_method(&self, w: &mut CodeWriter) {
        let class = self.class_name;
        w.p(&format!("public {class} clone() {{"));
        w.indent();
        w.p(&format!("return new {class}().mergeFrom(this);"));
        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits the structural `mergeFrom(other)`: scalar/enum overwrite,
    /// repeated append, message/group recursive merge with deep copies.
    pub fn merge_from_bean(&self, w: &mut CodeWriter) {
        let class = self.class_name;
        w.p(&format!("public {class} mergeFrom({class} other) {{"));
        w.indent();
        for rf in self.fields {
            let uname = &rf.uname;
            w.p(&format!("if (other.has{uname}()) {{"));
            w.indent();
            if rf.is_structural() {
                if rf.field.is_repeated() {
                    w.p(&format!(
                        "for ({} element : other.get{uname}List()) {{",
                        rf.java_type
                    ));
                    w.indent();
                    w.p(&format!("add{uname}(element.clone());"));
                    w.unindent();
                    w.p("}");
                } else {
                    w.p(&format!("if (has{uname}()) {{"));
                    w.indent();
                    w.p(&format!("get{uname}().mergeFrom(other.get{uname}());"));
                    w.unindent();
                    w.p("} else {");
                    w.indent();
                    w.p(&format!("set{uname}(other.get{uname}().clone());"));
                    w.unindent();
                    w.p("}");
                }
            } else if rf.field.is_repeated() {
                w.p(&format!("addAll{uname}(other.get{uname}List());"));
            } else {
                w.p(&format!("set{uname}(other.get{uname}());"));
            }
            w.unindent();
            w.p("}");
        }
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits `isInitialized`, `assertInitialized`, the parse-time
    /// `checkInitialized` and the recursive `missingFields` walk.
    ///
    /// `missingFields` lists this message's absent required fields first,
    /// then descends into present message/group fields, prefixing nested
    /// names with `field.` or `field[index].`. Enum fields are exempt
    /// from recursion.
    pub fn initialization(&self, w: &mut CodeWriter) {
        let class = self.class_name;

        w.p("public final boolean isInitialized() {");
        w.indent();
        w.p("return missingFields().isEmpty();");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!(
            "public final {class} assertInitialized() throws \
             io.protoforge.runtime.UninitializedMessageException {{"
        ));
        w.indent();
        w.p("java.util.ArrayList<java.lang.String> missingFields = missingFields();");
        w.p("if (!missingFields.isEmpty()) {");
        w.indent();
        w.p("throw new io.protoforge.runtime.UninitializedMessageException(missingFields);");
        w.unindent();
        w.p("}");
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!(
            "private final {class} checkInitialized() throws \
             io.protoforge.runtime.InvalidWireFormatException {{"
        ));
        w.indent();
        w.p("java.util.ArrayList<java.lang.String> missingFields = missingFields();");
        w.p("if (!missingFields.isEmpty()) {");
        w.indent();
        w.p(
            "throw new io.protoforge.runtime.UninitializedMessageException(missingFields)\
             .asInvalidWireFormatException();",
        );
        w.unindent();
        w.p("}");
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p("public final java.util.ArrayList<java.lang.String> missingFields() {");
        w.indent();
        w.p(
            "java.util.ArrayList<java.lang.String> missingFields = \
             new java.util.ArrayList<java.lang.String>();",
        );
        for rf in self.fields {
            if rf.field.is_required() {
                w.p(&format!("if (!has{}()) {{", rf.uname));
                w.indent();
                w.p(&format!("missingFields.add(\"{}\");", rf.field.name));
                w.unindent();
                w.p("}");
            }
        }
        for rf in self.fields {
            if !rf.is_structural() {
                continue;
            }
            let uname = &rf.uname;
            let name = &rf.field.name;
            w.p(&format!("if (has{uname}()) {{"));
            w.indent();
            if rf.field.is_repeated() {
                w.p(&format!(
                    "java.util.List<{}> l = get{uname}List();",
                    rf.boxed_type
                ));
                w.p("for (int i = 0; i < l.size(); i++) {");
                w.indent();
                w.p("try {");
                w.indent();
                w.p("l.get(i).assertInitialized();");
                w.unindent();
                w.p("} catch (io.protoforge.runtime.UninitializedMessageException e) {");
                w.indent();
                w.p(&format!(
                    "missingFields.addAll(prefix(e.getMissingFields(), \"{name}[\" + i + \"].\"));"
                ));
                w.unindent();
                w.p("}");
                w.unindent();
                w.p("}");
            } else {
                w.p("try {");
                w.indent();
                w.p(&format!("get{uname}().assertInitialized();"));
                w.unindent();
                w.p("} catch (io.protoforge.runtime.UninitializedMessageException e) {");
                w.indent();
                w.p(&format!(
                    "missingFields.addAll(prefix(e.getMissingFields(), \"{name}.\"));"
                ));
                w.unindent();
                w.p("}");
            }
            w.unindent();
            w.p("}");
        }
        w.p("return missingFields;");
        w.unindent();
        w.p("}");
        w.blank();
    }

    /// Emits the prefix-indented debug rendering: `name: value` lines for
    /// scalar/enum fields, `name { ... }` blocks for message/group fields,
    /// absent fields omitted entirely.
    pub fn to_string(&self, w: &mut CodeWriter) {
        w.p("public java.lang.String toString() {");
        w.indent();
        w.p("return toString(new java.lang.StringBuilder(), \"\").toString();");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(
            "public java.lang.StringBuilder toString(java.lang.StringBuilder sb, \
             java.lang.String prefix) {",
        );
        w.indent();
        for rf in self.fields {
            let uname = &rf.uname;
            let name = &rf.field.name;
            w.p(&format!("if (has{uname}()) {{"));
            w.indent();
            if rf.field.is_repeated() {
                w.p(&format!(
                    "java.util.List<{}> l = get{uname}List();",
                    rf.boxed_type
                ));
                w.p("for (int i = 0; i < l.size(); i++) {");
                w.indent();
                if rf.is_structural() {
                    w.p(&format!(
                        "sb.append(prefix + \"{name}[\" + i + \"] {{\\n\");"
                    ));
                    w.p("l.get(i).toString(sb, prefix + \"  \");");
                    w.p("sb.append(\"}\\n\");");
                } else {
                    w.p(&format!(
                        "sb.append(prefix + \"{name}[\" + i + \"]: \");"
                    ));
                    w.p("sb.append(l.get(i));");
                    w.p("sb.append(\"\\n\");");
                }
                w.unindent();
                w.p("}");
            } else if rf.is_structural() {
                w.p(&format!("sb.append(prefix + \"{name} {{\\n\");"));
                w.p(&format!("get{uname}().toString(sb, prefix + \"  \");"));
                w.p("sb.append(\"}\\n\");");
            } else {
                w.p(&format!("sb.append(prefix + \"{name}: \");"));
                w.p(&format!("sb.append(get{uname}());"));
                w.p("sb.append(\"\\n\");");
            }
            w.unindent();
            w.p("}");
        }
        w.p("return sb;");
        w.unindent();
        w.p("}");
        w.blank();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Diagnostics;
    use crate::names::TypeResolver;
    use protoforge_schema::{Field, FieldKind, FieldRule, Message, Schema};

    fn test_schema() -> Schema {
        let mut schema = Schema::new("t.proto");
        schema.add_message(Message::new("Item"));
        schema.add_message(Message::new("Sub"));
        schema
    }

    fn sample_fields() -> Vec<Field> {
        vec![
            Field::new("name", 1, FieldRule::Required, FieldKind::String),
            Field::new("sub", 2, FieldRule::Optional, FieldKind::TypeRef("Sub".into())),
            Field::new(
                "items",
                3,
                FieldRule::Repeated,
                FieldKind::TypeRef("Item".into()),
            ),
            Field::new("weights", 4, FieldRule::Repeated, FieldKind::Uint32),
        ]
    }

    fn emit(build: impl Fn(&SemanticsGenerator<'_, '_>, &mut CodeWriter)) -> String {
        let schema = test_schema();
        let resolver = TypeResolver::new(&schema);
        let fields = sample_fields();
        let mut diags = Diagnostics::new();
        let resolved: Vec<_> = fields
            .iter()
            .filter_map(|f| ResolvedField::resolve(f, &schema, &resolver, "Frame", &mut diags))
            .collect();
        assert!(diags.is_empty());
        let g = SemanticsGenerator::new("Frame", &resolved);
        let mut w = CodeWriter::new();
        build(&g, &mut w);
        w.into_string()
    }

    #[test]
    fn test_clear_resets_memo_then_fields() {
        let out = emit(|g, w| g.clear(w));
        let memo = out.find("memoizedSerializedSize = -1;").unwrap();
        let first = out.find("clearName();").unwrap();
        assert!(memo < first);
        assert!(out.contains("clearWeights();"));
    }

    #[test]
    fn test_merge_semantics_per_category() {
        let out = emit(|g, w| g.merge_from_bean(w));
        // Singular scalar overwrites.
        assert!(out.contains("setName(other.getName());"));
        // Repeated scalar appends the whole list.
        assert!(out.contains("addAllWeights(other.getWeightsList());"));
        // Singular message merges into an existing value, clones otherwise.
        assert!(out.contains("getSub().mergeFrom(other.getSub());"));
        assert!(out.contains("setSub(other.getSub().clone());"));
        // Repeated message appends deep copies.
        assert!(out.contains("addItems(element.clone());"));
        assert!(out.contains("return this;"));
    }

    #[test]
    fn test_missing_fields_paths() {
        let out = emit(|g, w| g.initialization(w));
        assert!(out.contains("missingFields.add(\"name\");"));
        assert!(out.contains("prefix(e.getMissingFields(), \"sub.\")"));
        assert!(out.contains("prefix(e.getMissingFields(), \"items[\" + i + \"].\")"));
        // Required check precedes structural recursion.
        let own = out.find("missingFields.add(\"name\");").unwrap();
        let nested = out.find("prefix(e.getMissingFields(), \"sub.\")").unwrap();
        assert!(own < nested);
    }

    #[test]
    fn test_to_string_shapes() {
        let out = emit(|g, w| g.to_string(w));
        assert!(out.contains("sb.append(prefix + \"name: \");"));
        assert!(out.contains("sb.append(prefix + \"sub {\\n\");"));
        assert!(out.contains("getSub().toString(sb, prefix + \"  \");"));
        assert!(out.contains("sb.append(prefix + \"items[\" + i + \"] {\\n\");"));
        assert!(out.contains("sb.append(prefix + \"weights[\" + i + \"]: \");"));
    }
}
