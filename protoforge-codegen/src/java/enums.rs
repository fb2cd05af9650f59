//! Enum type emission.

use std::collections::HashSet;

use protoforge_schema::{Enum, Schema};

use crate::error::{CodegenError, Diagnostics};
use crate::names::upper_camel;
use crate::writer::CodeWriter;

/// Emits enum declarations with their numeric lookup table.
pub struct EnumGenerator<'a> {
    schema: &'a Schema,
    multi_file: bool,
}

impl<'a> EnumGenerator<'a> {
    /// Creates an enum generator for one schema.
    #[must_use]
    pub fn new(schema: &'a Schema, multi_file: bool) -> Self {
        Self { schema, multi_file }
    }

    /// Emits one enum declaration.
    ///
    /// Duplicate numeric values are legal for naming; `valueOf(int)` only
    /// reaches the first-declared variant of each number, and an unknown
    /// number yields `null`.
    pub fn generate(
        &self,
        enum_def: &Enum,
        top_level: bool,
        w: &mut CodeWriter,
        diags: &mut Diagnostics,
    ) {
        let class_name = upper_camel(&enum_def.name);
        if class_name.is_empty() {
            diags.push(CodegenError::empty_identifier(
                self.schema.file_name.clone(),
                enum_def.name.clone(),
                "enum name",
            ));
            return;
        }

        let modifier = if self.multi_file && top_level {
            ""
        } else {
            "static "
        };

        w.blank();
        w.p(&format!("public {modifier}enum {class_name} {{"));
        w.indent();
        w.blank();
        let count = enum_def.values.len();
        for (index, value) in enum_def.values.iter().enumerate() {
            let terminator = if index + 1 == count { ";" } else { "," };
            w.p(&format!(
                "{}(\"{}\", {}){terminator}",
                value.name, value.name, value.number
            ));
        }
        w.blank();
        w.p("private final java.lang.String name;");
        w.p("private final int value;");
        w.blank();
        w.p(&format!(
            "private {class_name}(java.lang.String name, int value) {{"
        ));
        w.indent();
        w.p("this.name = name;");
        w.p("this.value = value;");
        w.unindent();
        w.p("}");
        w.blank();
        w.p("public final int getNumber() {");
        w.indent();
        w.p("return value;");
        w.unindent();
        w.p("}");
        w.blank();
        w.p("public final java.lang.String toString() {");
        w.indent();
        w.p("return name;");
        w.unindent();
        w.p("}");
        w.blank();
        w.p(&format!("public static {class_name} valueOf(int value) {{"));
        w.indent();
        w.p("switch (value) {");
        // Shared numbers are legal; only the first declaration is
        // reachable by numeric lookup.
        let mut seen = HashSet::new();
        for value in &enum_def.values {
            if seen.insert(value.number) {
                w.p(&format!("case {}:", value.number));
                w.indent();
                w.p(&format!("return {};", value.name));
                w.unindent();
            }
        }
        w.p("default:");
        w.indent();
        w.p("return null;");
        w.unindent();
        w.p("}");
        w.unindent();
        w.p("}");
        w.unindent();
        w.p("}");
        w.blank();
    }
}
