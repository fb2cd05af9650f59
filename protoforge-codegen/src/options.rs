//! Typed view of the recognized schema options.
//!
//! Option values live on the schema as opaque name/value pairs; this
//! module is the one place that interprets the recognized names, so use
//! sites never do string-keyed lookups of their own. Unrecognized options
//! are ignored.

use std::path::PathBuf;

use protoforge_schema::Schema;

use crate::error::CodegenError;
use crate::names::{file_base_name, upper_camel};

/// Option naming the target package for generated code.
pub const OUTPUT_PACKAGE: &str = "output_package";
/// Option naming the outer wrapper type.
pub const OUTER_TYPE_NAME: &str = "outer_type_name";
/// Option selecting one output unit per top-level type.
pub const MULTI_FILE_OUTPUT: &str = "multi_file_output";

/// How a schema's types map onto output units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputPlan {
    /// One unit per schema, all types nested in the outer type.
    SingleUnit,
    /// One unit per top-level message/enum; nested types stay nested.
    PerTypeUnit,
}

/// Resolved generation options for one schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaOptions {
    /// Target package, if any.
    pub package: Option<String>,
    /// Outer wrapper type name.
    pub outer_class: String,
    /// Whether top-level types get their own units.
    pub multi_file: bool,
}

impl SchemaOptions {
    /// Resolves the recognized options of a schema, applying defaults.
    ///
    /// The package defaults to the declared package with `-` and `/`
    /// mapped to `.`; the outer type name defaults to the camel-cased
    /// file base name.
    ///
    /// # Errors
    /// Returns [`CodegenError::EmptyIdentifier`] when no usable outer
    /// type name can be derived.
    pub fn resolve(schema: &Schema) -> Result<Self, CodegenError> {
        let package = match schema.option(OUTPUT_PACKAGE) {
            Some(value) => Some(value.to_string()),
            None => schema.package.as_ref().map(|p| p.replace(['-', '/'], ".")),
        };

        let outer_class = match schema.option(OUTER_TYPE_NAME) {
            Some(value) => value.to_string(),
            None => upper_camel(file_base_name(&schema.file_name)),
        };
        if outer_class.is_empty() {
            return Err(CodegenError::empty_identifier(
                schema.file_name.clone(),
                schema.file_name.clone(),
                "outer type name",
            ));
        }

        let multi_file = schema.option(MULTI_FILE_OUTPUT) == Some("true");

        Ok(Self {
            package,
            outer_class,
            multi_file,
        })
    }

    /// Returns the output plan selected by the options.
    #[must_use]
    pub const fn output_plan(&self) -> OutputPlan {
        if self.multi_file {
            OutputPlan::PerTypeUnit
        } else {
            OutputPlan::SingleUnit
        }
    }

    /// Relative output path for a unit: package directories plus
    /// `<ClassName>.java`.
    #[must_use]
    pub fn unit_path(&self, class_name: &str) -> PathBuf {
        let mut path = PathBuf::new();
        if let Some(package) = &self.package {
            for part in package.split('.') {
                path.push(part);
            }
        }
        path.push(format!("{class_name}.java"));
        path
    }
}
