//! Schema-to-unit orchestration.
//!
//! Walks one schema tree and drives the per-type emitters, choosing
//! single-unit or per-type-unit output. Each unit gets its own writer;
//! the only state shared across units is the read-only tree and the
//! ordered error sink. A run with any recorded error fails as a whole —
//! no partially generated unit is valid output.

use std::fs;
use std::path::{Path, PathBuf};

use protoforge_schema::Schema;
use tracing::{debug, info, warn};

use crate::error::{CodegenError, CompileError, Diagnostics};
use crate::java::{EnumGenerator, MessageGenerator};
use crate::names::upper_camel;
use crate::options::{OutputPlan, SchemaOptions};
use crate::writer::CodeWriter;

/// One generated output unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputUnit {
    /// Unit type name.
    pub name: String,
    /// Relative path: package directories plus `<name>.java`.
    pub path: PathBuf,
    /// Generated source text.
    pub source: String,
}

/// Drives code generation for one schema.
pub struct Generator<'a> {
    schema: &'a Schema,
}

impl<'a> Generator<'a> {
    /// Creates a generator over a resolved schema tree.
    #[must_use]
    pub fn new(schema: &'a Schema) -> Self {
        Self { schema }
    }

    /// Generates every output unit of the schema.
    ///
    /// # Errors
    /// Returns the accumulated [`CompileError`] when any node failed;
    /// generation continues past individual failures so one run surfaces
    /// as many errors as possible.
    pub fn generate(&self) -> Result<Vec<OutputUnit>, CompileError> {
        let options = match SchemaOptions::resolve(self.schema) {
            Ok(options) => options,
            Err(error) => return Err(error.into()),
        };

        let mut diags = Diagnostics::new();
        let units = match options.output_plan() {
            OutputPlan::SingleUnit => vec![self.single_unit(&options, &mut diags)],
            OutputPlan::PerTypeUnit => self.per_type_units(&options, &mut diags),
        };

        match diags.into_result() {
            Ok(()) => {
                info!(
                    schema = %self.schema.file_name,
                    units = units.len(),
                    "generated schema"
                );
                Ok(units)
            }
            Err(failure) => {
                warn!(
                    schema = %self.schema.file_name,
                    errors = failure.errors().len(),
                    "schema generation failed"
                );
                Err(failure)
            }
        }
    }

    fn file_header(&self, options: &SchemaOptions, w: &mut CodeWriter) {
        w.p("//");
        w.p("// Generated by protoforge, do not edit by hand.");
        w.p("//");
        if let Some(package) = &options.package {
            w.p(&format!("package {package};"));
            w.blank();
        }
    }

    fn single_unit(&self, options: &SchemaOptions, diags: &mut Diagnostics) -> OutputUnit {
        let mut w = CodeWriter::new();
        self.file_header(options, &mut w);
        w.p(&format!("public class {} {{", options.outer_class));
        w.indent();

        let enums = EnumGenerator::new(self.schema, false);
        for enum_def in &self.schema.enums {
            enums.generate(enum_def, true, &mut w, diags);
        }
        let messages = MessageGenerator::new(self.schema, false);
        for message in &self.schema.messages {
            messages.generate(message, true, &mut w, diags);
        }

        w.unindent();
        w.p("}");

        OutputUnit {
            name: options.outer_class.clone(),
            path: options.unit_path(&options.outer_class),
            source: w.into_string(),
        }
    }

    fn per_type_units(
        &self,
        options: &SchemaOptions,
        diags: &mut Diagnostics,
    ) -> Vec<OutputUnit> {
        let mut units = Vec::new();

        let enums = EnumGenerator::new(self.schema, true);
        for enum_def in &self.schema.enums {
            let class_name = upper_camel(&enum_def.name);
            if class_name.is_empty() {
                diags.push(CodegenError::empty_identifier(
                    self.schema.file_name.clone(),
                    enum_def.name.clone(),
                    "enum name",
                ));
                continue;
            }
            let mut w = CodeWriter::new();
            self.file_header(options, &mut w);
            enums.generate(enum_def, true, &mut w, diags);
            units.push(OutputUnit {
                name: class_name.clone(),
                path: options.unit_path(&class_name),
                source: w.into_string(),
            });
        }

        let messages = MessageGenerator::new(self.schema, true);
        for message in &self.schema.messages {
            let class_name = upper_camel(&message.name);
            if class_name.is_empty() {
                diags.push(CodegenError::empty_identifier(
                    self.schema.file_name.clone(),
                    message.name.clone(),
                    "message name",
                ));
                continue;
            }
            let mut w = CodeWriter::new();
            self.file_header(options, &mut w);
            messages.generate(message, true, &mut w, diags);
            units.push(OutputUnit {
                name: class_name.clone(),
                path: options.unit_path(&class_name),
                source: w.into_string(),
            });
        }

        units
    }
}

/// Writes generated units under `out_dir`, creating package directories.
///
/// Failures are accumulated per unit into the same structured error list
/// as generation errors; any failure fails the whole run.
///
/// # Errors
/// Returns a [`CompileError`] listing every unit that could not be
/// written.
pub fn write_units(units: &[OutputUnit], out_dir: &Path) -> Result<(), CompileError> {
    let mut diags = Diagnostics::new();
    for unit in units {
        let path = out_dir.join(&unit.path);
        let result = match path.parent() {
            Some(parent) => {
                fs::create_dir_all(parent).and_then(|()| fs::write(&path, &unit.source))
            }
            None => fs::write(&path, &unit.source),
        };
        match result {
            Ok(()) => debug!(path = %path.display(), "wrote output unit"),
            Err(source) => diags.push(CodegenError::Io { path, source }),
        }
    }
    diags.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;
    use protoforge_schema::{Enum, Field, FieldKind, FieldRule, Message};

    fn small_schema(multi_file: bool) -> Schema {
        let mut schema = Schema::new("telemetry.proto");
        schema.set_package("acme.telemetry");
        if multi_file {
            schema.add_option(crate::options::MULTI_FILE_OUTPUT, "true");
        }

        let mut level = Enum::new("Level");
        level.add_value("INFO", 0);
        level.add_value("ERROR", 1);
        schema.add_enum(level);

        let mut event = Message::new("Event");
        event.add_field(Field::new("source", 1, FieldRule::Required, FieldKind::String));
        event.add_field(Field::new(
            "level",
            2,
            FieldRule::Optional,
            FieldKind::TypeRef("Level".into()),
        ));
        schema.add_message(event);
        schema
    }

    #[test]
    fn test_single_unit_wraps_outer_class() {
        let schema = small_schema(false);
        let units = Generator::new(&schema).generate().unwrap();
        assert_eq!(units.len(), 1);
        let unit = &units[0];
        assert_eq!(unit.name, "Telemetry");
        assert_eq!(unit.path, PathBuf::from("acme/telemetry/Telemetry.java"));
        assert!(unit.source.starts_with("//\n// Generated by protoforge"));
        assert!(unit.source.contains("package acme.telemetry;"));
        assert!(unit.source.contains("public class Telemetry {"));
        assert!(unit.source.contains("public static enum Level {"));
        assert!(unit.source.contains("public static final class Event"));
    }

    #[test]
    fn test_per_type_units() {
        let schema = small_schema(true);
        let units = Generator::new(&schema).generate().unwrap();
        let names: Vec<_> = units.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, vec!["Level", "Event"]);
        // Top-level types stand free of the outer class and lose `static`.
        assert!(units[0].source.contains("public enum Level {"));
        assert!(units[1].source.contains("public final class Event"));
        assert!(!units[1].source.contains("public class Telemetry {"));
        assert_eq!(units[1].path, PathBuf::from("acme/telemetry/Event.java"));
    }

    #[test]
    fn test_errors_accumulate_across_nodes() {
        let mut schema = small_schema(false);
        let mut broken = Message::new("Broken");
        broken.add_field(Field::new(
            "ghost",
            1,
            FieldRule::Optional,
            FieldKind::TypeRef("Phantom".into()),
        ));
        broken.add_field(
            Field::new("count", 2, FieldRule::Optional, FieldKind::Int32).with_default("many"),
        );
        schema.add_message(broken);

        let failure = Generator::new(&schema).generate().unwrap_err();
        assert_eq!(failure.errors().len(), 2);
        let rendered = failure.to_string();
        assert!(rendered.contains("unresolved type 'Phantom'"));
        assert!(rendered.contains("invalid default 'many'"));
    }

    #[test]
    fn test_write_units_creates_package_dirs() {
        let schema = small_schema(true);
        let units = Generator::new(&schema).generate().unwrap();
        let dir = tempfile::tempdir().unwrap();
        write_units(&units, dir.path()).unwrap();
        let event = dir.path().join("acme/telemetry/Event.java");
        let written = fs::read_to_string(event).unwrap();
        assert_eq!(written, units[1].source);
    }

    #[test]
    fn test_write_units_folds_io_failures() {
        let schema = small_schema(false);
        let units = Generator::new(&schema).generate().unwrap();
        let dir = tempfile::tempdir().unwrap();
        // A file where a package directory must go forces the failure.
        fs::write(dir.path().join("acme"), b"not a directory").unwrap();
        let failure = write_units(&units, dir.path()).unwrap_err();
        assert_eq!(failure.errors().len(), 1);
        assert!(matches!(failure.errors()[0], CodegenError::Io { .. }));
    }
}
