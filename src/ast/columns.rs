use serde::Serialize;

use super::types::{BuilderMethod, TypeDescriptor};

/// One column clause of a `CREATE TABLE` body.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    /// Lower-cased SQL type name (`varchar`, `int`, ...)
    pub sql_type: String,
    /// Raw parenthesized parameters including the parens, e.g. `(10,2)`.
    /// Empty when the type had none.
    pub type_params: String,
    pub nullable: bool,
    pub default: Option<String>,
    pub auto_increment: bool,
    pub primary: bool,
    pub unique: bool,
    pub unsigned: bool,
    pub comment: Option<String>,
    /// Target builder call computed from `sql_type`, `type_params` and `unsigned`.
    pub descriptor: TypeDescriptor,
}

impl ColumnDefinition {
    /// A nullable column with no attributes; `descriptor` is left at the
    /// `string` fallback until the mapper runs.
    pub fn new(name: impl Into<String>, sql_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql_type: sql_type.into(),
            type_params: String::new(),
            nullable: true,
            default: None,
            auto_increment: false,
            primary: false,
            unique: false,
            unsigned: false,
            comment: None,
            descriptor: TypeDescriptor::default(),
        }
    }

    /// `id INT AUTO_INCREMENT PRIMARY KEY`, emitted as `$table->id()`.
    pub fn is_id_shorthand(&self) -> bool {
        self.auto_increment
            && self.primary
            && self.name == "id"
            && self.descriptor.method == BuilderMethod::Integer
    }
}
