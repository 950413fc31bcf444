//! The sanitize → parse → emit pipeline.

use tracing::debug;

use crate::ast::CreateTable;
use crate::diagnostics::{DiagnosticSink, TracingSink};
use crate::emitter::{MigrationScript, emit};
use crate::error::GenerateError;
use crate::parser::SchemaParser;
use crate::sanitizer::{SanitizedSql, sanitize};

pub use crate::parser::ParseMode;

/// Everything one generation run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Generated {
    pub sanitized: SanitizedSql,
    pub table: CreateTable,
    pub script: MigrationScript,
}

/// Stateless generator; safe to share across threads when its sink is.
#[derive(Debug, Clone, Default)]
pub struct MigrationGenerator<S = TracingSink> {
    parser: SchemaParser<S>,
}

impl MigrationGenerator<TracingSink> {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            parser: SchemaParser::new(mode),
        }
    }
}

impl<S: DiagnosticSink> MigrationGenerator<S> {
    pub fn with_sink(mode: ParseMode, sink: S) -> Self {
        Self {
            parser: SchemaParser::with_sink(mode, sink),
        }
    }

    pub fn mode(&self) -> ParseMode {
        self.parser.mode()
    }

    /// Generate the migration source for `raw_sql`.
    ///
    /// `name` only labels diagnostics; the script itself depends on the SQL alone.
    pub fn generate(&self, name: &str, raw_sql: &str) -> Result<MigrationScript, GenerateError> {
        self.generate_detailed(name, raw_sql).map(|g| g.script)
    }

    /// Like [`generate`](Self::generate) but also returns the sanitized
    /// input and the parsed table.
    pub fn generate_detailed(&self, name: &str, raw_sql: &str) -> Result<Generated, GenerateError> {
        let sanitized = sanitize(raw_sql)?;
        let table = self.parser.parse(sanitized.as_str())?;
        let script = emit(&table);

        debug!(
            migration = name,
            table = %table.name,
            columns = table.columns.len(),
            indexes = table.indexes.len(),
            foreign_keys = table.foreign_keys.len(),
            "generated migration"
        );

        Ok(Generated {
            sanitized,
            table,
            script,
        })
    }
}

/// Generate with lenient parsing and `tracing` diagnostics.
pub fn generate(name: &str, raw_sql: &str) -> Result<MigrationScript, GenerateError> {
    MigrationGenerator::<TracingSink>::default().generate(name, raw_sql)
}
