//! # migen
//!
//! Turns a single MySQL `CREATE TABLE` statement into a Laravel schema
//! migration.
//!
//! ```
//! let script = migen::generate(
//!     "create_users_table",
//!     "CREATE TABLE users (id int not null auto_increment primary key, email varchar(255) not null unique)",
//! )
//! .unwrap();
//!
//! assert!(script.as_str().contains("$table->id();"));
//! assert!(script.as_str().contains("$table->string('email', 255)->unique();"));
//! ```
//!
//! The pipeline is sanitize → parse → map → emit. Every stage is a pure
//! function of its input; persisting the result is left to [`store`] and
//! [`history`].

pub mod ast;
pub mod config;
pub mod diagnostics;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod history;
pub mod mapper;
pub mod parser;
pub mod sanitizer;
pub mod store;
pub mod validate;

pub use ast::{
    BuilderMethod, ColumnDefinition, CreateTable, ForeignKeyDefinition, IndexDefinition, IndexKind,
    ReferentialAction, TypeDescriptor, TypeParam,
};
pub use emitter::{MigrationScript, emit};
pub use error::{GenerateError, ParseError, StoreError};
pub use generator::{MigrationGenerator, ParseMode, generate};
pub use sanitizer::{SanitizedSql, sanitize};

/// Common imports for callers driving the whole pipeline.
pub mod prelude {
    pub use crate::ast::*;
    pub use crate::diagnostics::{DiagnosticSink, NullSink, TracingSink};
    pub use crate::emitter::{MigrationScript, emit};
    pub use crate::error::{GenerateError, ParseError};
    pub use crate::generator::{MigrationGenerator, ParseMode, generate};
}
