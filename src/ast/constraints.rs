use serde::Serialize;

/// Kind of table-level index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    Primary,
    Unique,
    Index,
}

/// `PRIMARY KEY (...)`, `UNIQUE [KEY] name (...)` or `KEY|INDEX name (...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexDefinition {
    pub kind: IndexKind,
    /// Always `None` for primary keys.
    pub name: Option<String>,
    pub columns: Vec<String>,
}

impl IndexDefinition {
    pub fn primary(columns: Vec<String>) -> Self {
        Self {
            kind: IndexKind::Primary,
            name: None,
            columns,
        }
    }

    pub fn unique(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            kind: IndexKind::Unique,
            name: Some(name.into()),
            columns,
        }
    }

    pub fn index(name: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            kind: IndexKind::Index,
            name: Some(name.into()),
            columns,
        }
    }
}

/// `ON DELETE` / `ON UPDATE` behavior of a foreign key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferentialAction {
    Cascade,
    SetNull,
    Restrict,
    NoAction,
}

impl ReferentialAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReferentialAction::Cascade => "cascade",
            ReferentialAction::SetNull => "set_null",
            ReferentialAction::Restrict => "restrict",
            ReferentialAction::NoAction => "no_action",
        }
    }
}

impl std::fmt::Display for ReferentialAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `FOREIGN KEY (column) REFERENCES table (column) [ON DELETE ..] [ON UPDATE ..]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForeignKeyDefinition {
    pub column: String,
    pub references_table: String,
    pub references_column: String,
    pub on_delete: Option<ReferentialAction>,
    pub on_update: Option<ReferentialAction>,
}
