//! Field storage and accessor emission.
//!
//! Presence rules: repeated fields are present when their lazily created
//! list is non-null and non-empty; singular message/group fields when the
//! slot is non-null; singular scalar/enum fields carry a separate boolean
//! flag, because a value equal to the default must still report as set.
//!
//! Every mutator resets the serialized-size memo; reads never do. The
//! message getter lazily constructs an empty instance on first read, which
//! makes the slot non-null from then on — the one asymmetry of the wire
//! format's object model, reproduced here on purpose.

use crate::writer::CodeWriter;

use super::types::ResolvedField;

/// Emits storage slots and accessors for the fields of one message.
pub struct AccessorGenerator<'a> {
    class_name: &'a str,
}

impl<'a> AccessorGenerator<'a> {
    /// Creates an accessor generator for the named class.
    #[must_use]
    pub fn new(class_name: &'a str) -> Self {
        Self { class_name }
    }

    /// Emits the storage and accessors of one field.
    ///
    /// `default` is the derived storage literal; it is ignored for
    /// repeated fields, whose storage is a nullable list.
    pub fn generate(&self, rf: &ResolvedField<'_>, default: &str, w: &mut CodeWriter) {
        let field = rf.field;
        w.p(&format!(
            "// {} {} {} = {};",
            field.rule.proto_name(),
            field.kind.proto_name(),
            field.name,
            field.tag
        ));
        if field.is_repeated() {
            self.generate_repeated(rf, w);
        } else {
            self.generate_singular(rf, default, w);
        }
    }

    fn generate_repeated(&self, rf: &ResolvedField<'_>, w: &mut CodeWriter) {
        let class = self.class_name;
        let elem = &rf.boxed_type;
        let uname = &rf.uname;
        let lname = &rf.lname;

        w.p(&format!("private java.util.List<{elem}> f_{lname};"));
        w.blank();

        w.p(&format!("public boolean has{uname}() {{"));
        w.indent();
        w.p(&format!(
            "return this.f_{lname} != null && !this.f_{lname}.isEmpty();"
        ));
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public java.util.List<{elem}> get{uname}List() {{"));
        w.indent();
        w.p(&format!("if (this.f_{lname} == null) {{"));
        w.indent();
        w.p(&format!("this.f_{lname} = new java.util.ArrayList<{elem}>();"));
        w.unindent();
        w.p("}");
        w.p(&format!("return this.f_{lname};"));
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!(
            "public {class} set{uname}List(java.util.List<{elem}> {lname}) {{"
        ));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        w.p(&format!("this.f_{lname} = {lname};"));
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public int get{uname}Count() {{"));
        w.indent();
        w.p(&format!("if (this.f_{lname} == null) {{"));
        w.indent();
        w.p("return 0;");
        w.unindent();
        w.p("}");
        w.p(&format!("return this.f_{lname}.size();"));
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public {elem} get{uname}(int index) {{"));
        w.indent();
        w.p(&format!("if (this.f_{lname} == null) {{"));
        w.indent();
        w.p("return null;");
        w.unindent();
        w.p("}");
        w.p(&format!("return this.f_{lname}.get(index);"));
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!(
            "public {class} set{uname}(int index, {elem} value) {{"
        ));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        w.p(&format!("get{uname}List().set(index, value);"));
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public {class} add{uname}({elem} value) {{"));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        w.p(&format!("get{uname}List().add(value);"));
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!(
            "public {class} addAll{uname}(java.lang.Iterable<? extends {elem}> collection) {{"
        ));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        w.p(&format!("super.addAll(collection, get{uname}List());"));
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public void clear{uname}() {{"));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        w.p(&format!("this.f_{lname} = null;"));
        w.unindent();
        w.p("}");
        w.blank();
    }

    fn generate_singular(&self, rf: &ResolvedField<'_>, default: &str, w: &mut CodeWriter) {
        let class = self.class_name;
        let java_type = &rf.java_type;
        let uname = &rf.uname;
        let lname = &rf.lname;
        let flagged = rf.presence_by_flag();

        w.p(&format!("private {java_type} f_{lname} = {default};"));
        if flagged {
            w.p(&format!("private boolean b_{lname};"));
        }
        w.blank();

        w.p(&format!("public boolean has{uname}() {{"));
        w.indent();
        if flagged {
            w.p(&format!("return this.b_{lname};"));
        } else {
            w.p(&format!("return this.f_{lname} != null;"));
        }
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public {java_type} get{uname}() {{"));
        w.indent();
        if rf.is_structural() {
            w.p(&format!("if (this.f_{lname} == null) {{"));
            w.indent();
            w.p(&format!("this.f_{lname} = new {java_type}();"));
            w.unindent();
            w.p("}");
        }
        w.p(&format!("return this.f_{lname};"));
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public {class} set{uname}({java_type} {lname}) {{"));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        if flagged {
            w.p(&format!("this.b_{lname} = true;"));
        }
        w.p(&format!("this.f_{lname} = {lname};"));
        w.p("return this;");
        w.unindent();
        w.p("}");
        w.blank();

        w.p(&format!("public void clear{uname}() {{"));
        w.indent();
        w.p("this.memoizedSerializedSize = -1;");
        if flagged {
            w.p(&format!("this.b_{lname} = false;"));
        }
        w.p(&format!("this.f_{lname} = {default};"));
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

    fn emit(field: Field, default: &str) -> String {
        let mut schema = Schema::new("t.proto");
        schema.add_message(Message::new("Sub"));
        let resolver = TypeResolver::new(&schema);
        let mut diags = Diagnostics::new();
        let rf = ResolvedField::resolve(&field, &schema, &resolver, "Frame", &mut diags)
            .expect("resolved");
        let mut w = CodeWriter::new();
        AccessorGenerator::new("Frame").generate(&rf, default, &mut w);
        w.into_string()
    }

    #[test]
    fn test_scalar_accessors_use_presence_flag() {
        let out = emit(
            Field::new("retry_count", 2, FieldRule::Optional, FieldKind::Int32),
            "0",
        );
        assert!(out.contains("// optional int32 retry_count = 2;"));
        assert!(out.contains("private int f_retryCount = 0;"));
        assert!(out.contains("private boolean b_retryCount;"));
        assert!(out.contains("return this.b_retryCount;"));
        assert!(out.contains("public Frame setRetryCount(int retryCount) {"));
        assert!(out.contains("this.b_retryCount = true;"));
        assert!(out.contains("this.memoizedSerializedSize = -1;"));
    }

    #[test]
    fn test_message_getter_lazily_constructs() {
        let out = emit(
            Field::new(
                "sub",
                1,
                FieldRule::Optional,
                FieldKind::TypeRef("Sub".into()),
            ),
            "null",
        );
        assert!(out.contains("private Sub f_sub = null;"));
        assert!(!out.contains("private boolean b_sub;"));
        assert!(out.contains("return this.f_sub != null;"));
        assert!(out.contains("this.f_sub = new Sub();"));
    }

    #[test]
    fn test_repeated_accessors() {
        let out = emit(
            Field::new("weights", 3, FieldRule::Repeated, FieldKind::Uint32),
            "0",
        );
        assert!(out.contains("private java.util.List<java.lang.Integer> f_weights;"));
        assert!(out.contains("return this.f_weights != null && !this.f_weights.isEmpty();"));
        assert!(out.contains("public java.lang.Integer getWeights(int index) {"));
        assert!(out.contains("public Frame addWeights(java.lang.Integer value) {"));
        assert!(out.contains(
            "public Frame addAllWeights(java.lang.Iterable<? extends java.lang.Integer> collection) {"
        ));
        // clear drops the backing list entirely so presence reports false.
        assert!(out.contains("this.f_weights = null;"));
    }
}
