//! Error types for code generation.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// One recoverable generation error, tied to the node that caused it.
///
/// Generation keeps going past a failing node so one run can surface as
/// many errors as possible; the accumulated list decides the run's outcome.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// A field references a type that is absent from the schema tree.
    #[error("{file}: unresolved type '{type_name}' referenced by field '{field}' in message '{message}'")]
    UnresolvedType {
        /// Schema file name.
        file: String,
        /// Referenced type name.
        type_name: String,
        /// Referencing field name.
        field: String,
        /// Owning message name.
        message: String,
    },

    /// An identifier is empty after sanitization.
    #[error("{file}: identifier '{raw}' has no usable characters ({context})")]
    EmptyIdentifier {
        /// Schema file name.
        file: String,
        /// Raw identifier as declared.
        raw: String,
        /// Where the identifier was needed.
        context: String,
    },

    /// A default-value option does not parse for the field's declared kind.
    #[error("{file}: invalid default '{value}' for {kind} field '{field}'")]
    InvalidDefault {
        /// Schema file name.
        file: String,
        /// Field name.
        field: String,
        /// Declared kind name.
        kind: String,
        /// Raw default text.
        value: String,
    },

    /// Writing an output unit failed.
    #[error("failed to write '{path}': {source}")]
    Io {
        /// Target path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    /// Creates an unresolved-type error.
    pub fn unresolved(
        file: impl Into<String>,
        type_name: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::UnresolvedType {
            file: file.into(),
            type_name: type_name.into(),
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates an empty-identifier error.
    pub fn empty_identifier(
        file: impl Into<String>,
        raw: impl Into<String>,
        context: impl Into<String>,
    ) -> Self {
        Self::EmptyIdentifier {
            file: file.into(),
            raw: raw.into(),
            context: context.into(),
        }
    }

    /// Creates an invalid-default error.
    pub fn invalid_default(
        file: impl Into<String>,
        field: impl Into<String>,
        kind: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidDefault {
            file: file.into(),
            field: field.into(),
            kind: kind.into(),
            value: value.into(),
        }
    }
}

/// The whole-run failure: every error recorded during one generation run,
/// in the order it was recorded.
///
/// A run fails atomically once this list is non-empty; no partially
/// generated unit is valid output.
#[derive(Debug)]
pub struct CompileError {
    errors: Vec<CodegenError>,
}

impl CompileError {
    /// Returns the recorded errors in order.
    #[must_use]
    pub fn errors(&self) -> &[CodegenError] {
        &self.errors
    }

    /// Renders each error as a human-readable line, in order.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }
}

impl From<CodegenError> for CompileError {
    fn from(error: CodegenError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "code generation failed with {} error(s):",
            self.errors.len()
        )?;
        for error in &self.errors {
            writeln!(f, "  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CompileError {}

/// Ordered error sink threaded through generation.
#[derive(Debug, Default)]
pub struct Diagnostics {
    errors: Vec<CodegenError>,
}

impl Diagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one error.
    pub fn push(&mut self, error: CodegenError) {
        self.errors.push(error);
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of recorded errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Converts the sink into the run result: `Ok` when empty, otherwise
    /// the accumulated [`CompileError`].
    pub fn into_result(self) -> Result<(), CompileError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(CompileError {
                errors: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_diagnostics_is_ok() {
        assert!(Diagnostics::new().into_result().is_ok());
    }

    #[test]
    fn test_errors_keep_order() {
        let mut diags = Diagnostics::new();
        diags.push(CodegenError::unresolved("a.proto", "Missing", "f", "M"));
        diags.push(CodegenError::empty_identifier("a.proto", "---", "field name"));
        let failure = diags.into_result().unwrap_err();
        assert_eq!(failure.errors().len(), 2);
        assert!(matches!(
            failure.errors()[0],
            CodegenError::UnresolvedType { .. }
        ));
        assert!(matches!(
            failure.errors()[1],
            CodegenError::EmptyIdentifier { .. }
        ));
    }

    #[test]
    fn test_display_lists_every_error() {
        let mut diags = Diagnostics::new();
        diags.push(CodegenError::invalid_default("a.proto", "n", "int32", "abc"));
        diags.push(CodegenError::unresolved("a.proto", "Gone", "g", "M"));
        let rendered = diags.into_result().unwrap_err().to_string();
        assert!(rendered.contains("2 error(s)"));
        assert!(rendered.contains("invalid default 'abc'"));
        assert!(rendered.contains("unresolved type 'Gone'"));
    }
}
