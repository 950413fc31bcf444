//! Schema model produced by the parser and consumed by the emitter.

pub mod columns;
pub mod constraints;
pub mod types;

pub use columns::ColumnDefinition;
pub use constraints::{ForeignKeyDefinition, IndexDefinition, IndexKind, ReferentialAction};
pub use types::{BuilderMethod, TypeDescriptor, TypeParam};

use serde::Serialize;

/// A parsed `CREATE TABLE` statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnDefinition>,
    pub indexes: Vec<IndexDefinition>,
    pub foreign_keys: Vec<ForeignKeyDefinition>,
}

impl CreateTable {
    /// Whether some column already declares the primary key inline
    /// (`id ... primary key`, an auto-increment primary column, or a
    /// `PRIMARY KEY` over a single auto-increment column, which
    /// `->autoIncrement()` already makes primary).
    pub fn has_inline_primary(&self) -> bool {
        self.columns
            .iter()
            .any(|c| c.primary && (c.name == "id" || c.auto_increment))
            || self.primary_key_is_auto_increment()
    }

    fn primary_key_is_auto_increment(&self) -> bool {
        self.indexes
            .iter()
            .find(|i| i.kind == IndexKind::Primary)
            .is_some_and(|index| match index.columns.as_slice() {
                [only] => self.column(only).is_some_and(|c| c.auto_increment),
                _ => false,
            })
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDefinition> {
        self.columns.iter().find(|c| c.name == name)
    }
}
