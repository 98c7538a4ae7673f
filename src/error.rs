//! Fatal parse errors and non-fatal diagnostics for a single schema document.

use thiserror::Error;

/// Which way the block markers went wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StructuralKind {
    /// `{` while already inside a variant block.
    #[error("too many open blocks")]
    TooManyOpen,
    /// `}` with nothing open.
    #[error("too many closed blocks")]
    TooManyClosed,
    /// `{` with no name before it.
    #[error("block opened without a name")]
    MissingName,
    /// Input ended inside a block.
    #[error("unclosed block at end of input")]
    Unclosed,
}

/// Errors that abort the current document. No artifact is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: {kind}")]
    Structural { line: usize, kind: StructuralKind },

    #[error("line {line}: expected `<type> <name>`, found {found} token(s) in `{text}`")]
    FieldArity { line: usize, found: usize, text: String },

    /// Block names become class and file names, so they may not look like paths.
    #[error("line {line}: `{name}` is not a usable type name")]
    InvalidName { line: usize, name: String },

    #[error("no schema block found")]
    NoSchema,

    #[error("schema `{schema}` declares no variants")]
    NoVariants { schema: String },

    #[error("line {line}: duplicate variant `{name}`")]
    DuplicateVariant { line: usize, name: String },
}

impl ParseError {
    pub(crate) fn structural(line: usize, kind: StructuralKind) -> Self {
        Self::Structural { line, kind }
    }
}

/// Problems that are reported but do not stop parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("line {line}: unknown top-level directive `{text}` (skipped)")]
    UnknownDirective { line: usize, text: String },

    #[error("line {line}: unknown flag `{flag}` (skipped)")]
    UnknownFlag { line: usize, flag: String },

    #[error("line {line}: content after the schema block is ignored")]
    TrailingContent { line: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_line() {
        let err = ParseError::structural(7, StructuralKind::TooManyOpen);
        assert_eq!(err.to_string(), "line 7: too many open blocks");

        let err = ParseError::FieldArity { line: 3, found: 3, text: "int x y".into() };
        assert_eq!(
            err.to_string(),
            "line 3: expected `<type> <name>`, found 3 token(s) in `int x y`"
        );

        let err = ParseError::structural(9, StructuralKind::Unclosed);
        assert_eq!(err.to_string(), "line 9: unclosed block at end of input");

        let diag = Diagnostic::UnknownFlag { line: 1, flag: "Foo".into() };
        assert_eq!(diag.to_string(), "line 1: unknown flag `Foo` (skipped)");
    }
}
