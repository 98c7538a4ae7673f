//! Line-oriented schema parser.
//!
//! Scans the lines of one document top to bottom and either completes a
//! [`Schema`] or aborts with a [`ParseError`]. Recoverable problems are
//! collected as [`Diagnostic`]s on the report in both cases; nothing here
//! logs or touches the filesystem.
pub mod line;
mod state;

use crate::error::{Diagnostic, ParseError};
use crate::model::Schema;
use crate::validate::{validate, ValidationRules};

use line::Line;
use state::State;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Completed(Schema),
    Aborted(ParseError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseReport {
    pub outcome: ParseOutcome,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    pub fn schema(&self) -> Option<&Schema> {
        match &self.outcome {
            ParseOutcome::Completed(schema) => Some(schema),
            ParseOutcome::Aborted(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        match &self.outcome {
            ParseOutcome::Completed(_) => None,
            ParseOutcome::Aborted(error) => Some(error),
        }
    }

    /// Run the optional validation rules; a violation turns the report
    /// into an abort.
    pub fn with_rules(self, rules: &ValidationRules) -> Self {
        let Self { outcome, diagnostics } = self;
        let outcome = match outcome {
            ParseOutcome::Completed(schema) => match validate(&schema, rules) {
                Ok(()) => ParseOutcome::Completed(schema),
                Err(error) => ParseOutcome::Aborted(error),
            },
            aborted => aborted,
        };
        Self { outcome, diagnostics }
    }
}

pub fn parse_lines<'a, I>(lines: I) -> ParseReport
where
    I: IntoIterator<Item = &'a str>,
{
    let mut diagnostics = Vec::new();
    let mut state = State::start();
    let mut last_line = 0;

    for (index, raw) in lines.into_iter().enumerate() {
        last_line = index + 1;
        let Some(line) = Line::parse(last_line, raw) else { continue };
        state = match state.step(&line, &mut diagnostics) {
            Ok(next) => next,
            Err(error) => {
                return ParseReport { outcome: ParseOutcome::Aborted(error), diagnostics };
            }
        };
    }

    let outcome = match state.finish(last_line) {
        Ok(schema) => ParseOutcome::Completed(schema),
        Err(error) => ParseOutcome::Aborted(error),
    };
    ParseReport { outcome, diagnostics }
}

const BYTE_ORDER_MARK: char = '\u{feff}';

/// Parse a whole document. A leading byte-order mark is dropped.
pub fn parse_str(source: &str) -> ParseReport {
    let source = source.strip_prefix(BYTE_ORDER_MARK).unwrap_or(source);
    parse_lines(source.lines())
}
