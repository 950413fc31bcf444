mod constraints;
mod statement;

use std::cell::RefCell;

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Records diagnostic kinds for assertions.
#[derive(Default)]
pub(super) struct RecordingSink {
    pub events: RefCell<Vec<String>>,
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic<'_>) {
        let event = match diagnostic {
            Diagnostic::ConstraintSkipped { clause } => format!("skip:{clause}"),
            Diagnostic::ColumnRejected { clause } => format!("reject:{clause}"),
            Diagnostic::ColumnParsed { column } => format!("column:{}", column.name),
            Diagnostic::TrailingIgnored { text } => format!("trailing:{text}"),
        };
        self.events.borrow_mut().push(event);
    }
}
