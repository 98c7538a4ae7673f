//! The parser's finite-state machine.
//!
//! Nesting depth is encoded in the variant: `AtTop` = 0, `InSchema` = 1,
//! `InVariant` = 2. The in-progress variant only exists inside `InVariant`,
//! and there is no state deeper than that.

use super::line::{Line, LineKind, DEFAULT_MARKER, VERBATIM_MARKER};
use crate::error::{Diagnostic, ParseError, StructuralKind};
use crate::model::{Field, Flags, Schema, SchemaBuilder, Variant};

const SET_DIRECTIVE: &str = "Set";
const FLAG_ALLOW_NULLS: &str = "AllowNulls";
const FLAG_KNOWN_TYPES: &str = "KnownTypes";

#[derive(Debug)]
pub(crate) enum State {
    AtTop { flags: Flags },
    InSchema { schema: SchemaBuilder },
    InVariant { schema: SchemaBuilder, variant: Variant },
    Complete(Schema),
}

impl State {
    pub fn start() -> Self {
        State::AtTop { flags: Flags::default() }
    }

    /// Feed one significant line. Non-fatal problems go to `diagnostics`.
    pub fn step(self, line: &Line<'_>, diagnostics: &mut Vec<Diagnostic>) -> Result<State, ParseError> {
        use LineKind::*;
        match (self, line.kind()) {
            (State::Complete(schema), _) => {
                diagnostics.push(Diagnostic::TrailingContent { line: line.number });
                Ok(State::Complete(schema))
            }

            // ---- block open ----
            (State::AtTop { flags }, Open) => {
                let name = block_name(line)?;
                Ok(State::InSchema { schema: SchemaBuilder::new(name, flags) })
            }
            (State::InSchema { schema }, Open) => {
                let name = block_name(line)?;
                Ok(State::InVariant { schema, variant: Variant::new(name, line.number) })
            }
            (State::InVariant { .. }, Open) => {
                Err(ParseError::structural(line.number, StructuralKind::TooManyOpen))
            }

            // ---- block close ----
            (State::InVariant { mut schema, variant }, Close) => {
                schema.push_variant(variant);
                Ok(State::InSchema { schema })
            }
            (State::InSchema { schema }, Close) => Ok(State::Complete(schema.finish())),
            (State::AtTop { .. }, Close) => {
                Err(ParseError::structural(line.number, StructuralKind::TooManyClosed))
            }

            // ---- content ----
            (State::AtTop { mut flags }, Content) => {
                if let Some(diagnostic) = apply_directive(&mut flags, line) {
                    diagnostics.push(diagnostic);
                }
                Ok(State::AtTop { flags })
            }
            (State::InSchema { mut schema }, Content) => {
                schema_content(&mut schema, line)?;
                Ok(State::InSchema { schema })
            }
            (State::InVariant { schema, mut variant }, Content) => {
                let (ty, name) = field_pair(line)?;
                variant.push_field(Field::new(ty, name));
                Ok(State::InVariant { schema, variant })
            }
        }
    }

    /// End of input. Only a completed schema survives.
    pub fn finish(self, last_line: usize) -> Result<Schema, ParseError> {
        match self {
            State::Complete(schema) => Ok(schema),
            State::AtTop { .. } => Err(ParseError::NoSchema),
            State::InSchema { .. } | State::InVariant { .. } => {
                Err(ParseError::structural(last_line, StructuralKind::Unclosed))
            }
        }
    }
}

fn block_name<'a>(line: &Line<'a>) -> Result<&'a str, ParseError> {
    let name = line.block_name()
        .ok_or_else(|| ParseError::structural(line.number, StructuralKind::MissingName))?;
    if name.contains(['/', '\\']) || name.contains("..") {
        return Err(ParseError::InvalidName { line: line.number, name: name.to_string() });
    }
    Ok(name)
}

/// `Set <Flag>` is the only thing allowed at the top level.
fn apply_directive(flags: &mut Flags, line: &Line<'_>) -> Option<Diagnostic> {
    match line.tokens.as_slice() {
        [SET_DIRECTIVE, flag] => {
            match *flag {
                FLAG_ALLOW_NULLS => flags.allow_nulls = true,
                FLAG_KNOWN_TYPES => flags.known_types = true,
                other => {
                    return Some(Diagnostic::UnknownFlag { line: line.number, flag: other.to_string() });
                }
            }
            None
        }
        _ => Some(Diagnostic::UnknownDirective { line: line.number, text: line.text.to_string() }),
    }
}

fn schema_content(schema: &mut SchemaBuilder, line: &Line<'_>) -> Result<(), ParseError> {
    if let Some(raw) = line.text.strip_prefix(VERBATIM_MARKER) {
        schema.push_fixed_line(raw);
        return Ok(());
    }
    let (ty, name) = field_pair(line)?;
    match ty.strip_prefix(DEFAULT_MARKER) {
        Some("") => Err(ParseError::FieldArity { line: line.number, found: 1, text: line.text.to_string() }),
        Some(ty) => {
            schema.push_default_field(Field::new(ty, name));
            Ok(())
        }
        None => {
            schema.push_base_field(Field::new(ty, name));
            Ok(())
        }
    }
}

fn field_pair<'a>(line: &Line<'a>) -> Result<(&'a str, &'a str), ParseError> {
    match line.tokens.as_slice() {
        [ty, name] => Ok((*ty, *name)),
        tokens => Err(ParseError::FieldArity {
            line: line.number,
            found: tokens.len(),
            text: line.text.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed(state: State, number: usize, raw: &str) -> Result<State, ParseError> {
        let line = Line::parse(number, raw).unwrap();
        state.step(&line, &mut Vec::new())
    }

    #[test]
    fn open_and_close_walk_the_depths() {
        let s = feed(State::start(), 1, "Shape {").unwrap();
        assert!(matches!(s, State::InSchema { .. }));
        let s = feed(s, 2, "Circle {").unwrap();
        assert!(matches!(&s, State::InVariant { variant, .. } if variant.name() == "Circle"));
        let s = feed(s, 3, "}").unwrap();
        assert!(matches!(s, State::InSchema { .. }));
        let s = feed(s, 4, "}").unwrap();
        let State::Complete(schema) = s else { panic!("expected completion") };
        assert_eq!(schema.name(), "Shape");
        assert_eq!(schema.variants().len(), 1);
    }

    #[test]
    fn third_open_is_structural() {
        let s = feed(State::start(), 1, "Shape {").unwrap();
        let s = feed(s, 2, "Circle {").unwrap();
        let err = feed(s, 3, "Inner {").unwrap_err();
        assert_eq!(err, ParseError::structural(3, StructuralKind::TooManyOpen));
    }

    #[test]
    fn close_at_top_is_structural() {
        let err = feed(State::start(), 9, "}").unwrap_err();
        assert_eq!(err, ParseError::structural(9, StructuralKind::TooManyClosed));
    }

    #[test]
    fn directive_flags() {
        let mut diags = Vec::new();
        let mut s = State::start();
        for (n, raw) in ["Set AllowNulls", "Set KnownTypes", "Set Foo", "Frobnicate"].iter().enumerate() {
            s = s.step(&Line::parse(n + 1, raw).unwrap(), &mut diags).unwrap();
        }
        let State::AtTop { flags } = s else { panic!("still at top") };
        assert!(flags.allow_nulls && flags.known_types);
        assert_eq!(diags, [
            Diagnostic::UnknownFlag { line: 3, flag: "Foo".into() },
            Diagnostic::UnknownDirective { line: 4, text: "Frobnicate".into() },
        ]);
    }

    #[test]
    fn bare_default_marker_is_an_arity_error() {
        let s = feed(State::start(), 1, "Shape {").unwrap();
        let err = feed(s, 2, "% count").unwrap_err();
        assert!(matches!(err, ParseError::FieldArity { line: 2, found: 1, .. }));
    }

    #[test]
    fn finish_reports_unclosed_and_missing() {
        assert_eq!(State::start().finish(0).unwrap_err(), ParseError::NoSchema);
        let s = feed(State::start(), 1, "Shape {").unwrap();
        assert_eq!(
            s.finish(4).unwrap_err(),
            ParseError::structural(4, StructuralKind::Unclosed)
        );
    }
}
