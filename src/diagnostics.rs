//! Diagnostic side-channel for the parser.
//!
//! Nothing here influences the parse result. Callers pick a sink:
//! [`TracingSink`] forwards to `tracing`, [`NullSink`] drops everything.

use tracing::{debug, warn};

use crate::ast::ColumnDefinition;

/// Something the parser noticed while walking a statement.
#[derive(Debug, Clone, Copy)]
pub enum Diagnostic<'a> {
    /// A table-level constraint clause left to the index/foreign key scans.
    ConstraintSkipped { clause: &'a str },
    /// A clause that does not look like `name type ...`; dropped.
    ColumnRejected { clause: &'a str },
    ColumnParsed { column: &'a ColumnDefinition },
    /// Text after the table body that is not a table option.
    TrailingIgnored { text: &'a str },
}

pub trait DiagnosticSink {
    fn report(&self, diagnostic: &Diagnostic<'_>);
}

/// Emits diagnostics as `tracing` events under the `migen::parser` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        match diagnostic {
            Diagnostic::ConstraintSkipped { clause } => {
                debug!(target: "migen::parser", clause, "skipping constraint/index clause");
            }
            Diagnostic::ColumnRejected { clause } => {
                warn!(target: "migen::parser", clause, "failed to parse column");
            }
            Diagnostic::ColumnParsed { column } => {
                debug!(
                    target: "migen::parser",
                    name = %column.name,
                    sql_type = %column.sql_type,
                    method = %column.descriptor.method,
                    "parsed column"
                );
            }
            Diagnostic::TrailingIgnored { text } => {
                warn!(target: "migen::parser", text, "ignoring text after table body");
            }
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: &Diagnostic<'_>) {}
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        (**self).report(diagnostic)
    }
}
