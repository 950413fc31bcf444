//! `CREATE TABLE` parser.
//!
//! A best-effort reader for the MySQL DDL subset people paste into the
//! generator. Clauses outside that subset (check constraints, generated
//! columns, partitioning, further statements) are skipped, not rejected.
//!
//! ```
//! use migen::parser;
//!
//! let sql = "CREATE TABLE posts (id int, title varchar(100) NOT NULL, KEY idx_title (title))";
//! let table = parser::parse(sql).unwrap();
//! assert_eq!(table.name, "posts");
//! assert_eq!(table.columns.len(), 2);
//! assert_eq!(table.indexes[0].columns, vec!["title"]);
//! ```

pub mod columns;
pub mod constraints;
pub mod statement;
pub mod tokens;

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};

use crate::ast::{ColumnDefinition, CreateTable, ForeignKeyDefinition, IndexDefinition};
use crate::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use crate::error::ParseError;

use self::statement::locate;

/// What to do with a column clause that does not look like `name type ...`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParseMode {
    /// Drop the clause and report it to the diagnostic sink.
    #[default]
    Lenient,
    /// Fail the whole parse with [`ParseError::InvalidColumn`].
    Strict,
}

/// Parser configured with a mode and a diagnostic sink.
#[derive(Debug, Clone, Default)]
pub struct SchemaParser<S = TracingSink> {
    mode: ParseMode,
    sink: S,
}

impl SchemaParser<TracingSink> {
    pub fn new(mode: ParseMode) -> Self {
        Self {
            mode,
            sink: TracingSink,
        }
    }
}

impl<S: DiagnosticSink> SchemaParser<S> {
    pub fn with_sink(mode: ParseMode, sink: S) -> Self {
        Self { mode, sink }
    }

    pub fn mode(&self) -> ParseMode {
        self.mode
    }

    /// Parse the first `CREATE TABLE` statement in `sql`.
    pub fn parse(&self, sql: &str) -> Result<CreateTable, ParseError> {
        let stmt = locate(sql)?;
        let body = stmt.body.ok_or(ParseError::NoBody)?;
        self.report_trailing(stmt.trailing);

        let columns = self.parse_body(body)?;

        Ok(CreateTable {
            name: stmt.name.to_string(),
            columns,
            indexes: constraints::scan_indexes(stmt.text),
            foreign_keys: constraints::scan_foreign_keys(stmt.text),
        })
    }

    pub fn parse_columns(&self, sql: &str) -> Result<Vec<ColumnDefinition>, ParseError> {
        let stmt = locate(sql)?;
        let body = stmt.body.ok_or(ParseError::NoBody)?;
        self.report_trailing(stmt.trailing);
        self.parse_body(body)
    }

    fn parse_body(&self, body: &str) -> Result<Vec<ColumnDefinition>, ParseError> {
        let mut parsed = Vec::new();

        for clause in tokens::split_top_level(body) {
            if columns::is_constraint_clause(clause) {
                self.sink.report(&Diagnostic::ConstraintSkipped { clause });
                continue;
            }

            match columns::parse_column_clause(clause) {
                Some(column) => {
                    self.sink.report(&Diagnostic::ColumnParsed { column: &column });
                    parsed.push(column);
                }
                None => {
                    self.sink.report(&Diagnostic::ColumnRejected { clause });
                    if self.mode == ParseMode::Strict {
                        return Err(ParseError::InvalidColumn(clause.to_string()));
                    }
                }
            }
        }

        if parsed.is_empty() {
            return Err(ParseError::NoColumns);
        }
        Ok(parsed)
    }

    fn report_trailing(&self, trailing: &str) {
        if !trailing.is_empty() {
            self.sink.report(&Diagnostic::TrailingIgnored { text: trailing });
        }
    }
}

/// Parse with [`ParseMode::Lenient`] and `tracing` diagnostics.
pub fn parse(sql: &str) -> Result<CreateTable, ParseError> {
    SchemaParser::<TracingSink>::default().parse(sql)
}

/// Name following `CREATE TABLE [IF NOT EXISTS]`.
pub fn parse_table_name(sql: &str) -> Result<String, ParseError> {
    locate(sql).map(|stmt| stmt.name.to_string())
}

/// Column clauses of the table body, constraints excluded.
pub fn parse_columns(sql: &str) -> Result<Vec<ColumnDefinition>, ParseError> {
    SchemaParser::<TracingSink>::default().parse_columns(sql)
}

/// Table-level indexes. Scans the `CREATE TABLE` statement when there is
/// one, otherwise the whole input.
pub fn parse_indexes(sql: &str) -> Vec<IndexDefinition> {
    let text = locate(sql).map_or(sql, |stmt| stmt.text);
    constraints::scan_indexes(text)
}

/// `FOREIGN KEY ... REFERENCES ...` clauses, scanned like [`parse_indexes`].
pub fn parse_foreign_keys(sql: &str) -> Vec<ForeignKeyDefinition> {
    let text = locate(sql).map_or(sql, |stmt| stmt.text);
    constraints::scan_foreign_keys(text)
}
