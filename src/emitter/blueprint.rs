//! Single `$table->...;` lines of the `Schema::create` callback.

use crate::ast::{ColumnDefinition, ForeignKeyDefinition, IndexDefinition, IndexKind, TypeParam};

const INDENT: &str = "            ";

/// PHP single-quoted string literal.
pub fn php_string(value: &str) -> String {
    format!("'{}'", value.replace('\\', "\\\\").replace('\'', "\\'"))
}

fn php_list<S: AsRef<str>>(values: &[S]) -> String {
    let items: Vec<String> = values.iter().map(|v| php_string(v.as_ref())).collect();
    format!("[{}]", items.join(", "))
}

/// Integer or decimal literal, optionally signed, with optional exponent.
pub fn is_numeric(value: &str) -> bool {
    let digits = value.trim_start_matches(['+', '-']);
    !digits.is_empty()
        && digits.bytes().any(|b| b.is_ascii_digit())
        && digits
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
        && value.parse::<f64>().is_ok()
}

fn php_default(value: &str) -> String {
    if is_numeric(value) {
        value.to_string()
    } else {
        php_string(value)
    }
}

pub fn column_line(column: &ColumnDefinition) -> String {
    if column.is_id_shorthand() {
        return format!("{INDENT}$table->id();\n");
    }

    let mut line = format!(
        "{INDENT}$table->{}({}",
        column.descriptor.method,
        php_string(&column.name)
    );
    for param in &column.descriptor.params {
        match param {
            TypeParam::Int(n) => line.push_str(&format!(", {n}")),
            TypeParam::List(values) => line.push_str(&format!(", {}", php_list(values))),
        }
    }
    line.push(')');

    if column.auto_increment {
        line.push_str("->autoIncrement()");
    }
    if column.primary && !column.auto_increment {
        line.push_str("->primary()");
    }
    if column.nullable {
        line.push_str("->nullable()");
    }
    if let Some(default) = &column.default {
        line.push_str(&format!("->default({})", php_default(default)));
    }
    if column.unique && !column.primary {
        line.push_str("->unique()");
    }
    if let Some(comment) = column.comment.as_deref().filter(|c| !c.is_empty()) {
        line.push_str(&format!("->comment({})", php_string(comment)));
    }

    line.push_str(";\n");
    line
}

pub fn index_line(index: &IndexDefinition) -> String {
    let columns = php_list(&index.columns);
    let method = match index.kind {
        IndexKind::Primary => return format!("{INDENT}$table->primary({columns});\n"),
        IndexKind::Unique => "unique",
        IndexKind::Index => "index",
    };
    match &index.name {
        Some(name) => format!("{INDENT}$table->{method}({columns}, {});\n", php_string(name)),
        None => format!("{INDENT}$table->{method}({columns});\n"),
    }
}

pub fn foreign_key_line(fk: &ForeignKeyDefinition) -> String {
    let mut line = format!(
        "{INDENT}$table->foreign({})->references({})->on({})",
        php_string(&fk.column),
        php_string(&fk.references_column),
        php_string(&fk.references_table)
    );
    if let Some(action) = fk.on_delete {
        line.push_str(&format!("->onDelete({})", php_string(action.as_str())));
    }
    if let Some(action) = fk.on_update {
        line.push_str(&format!("->onUpdate({})", php_string(action.as_str())));
    }
    line.push_str(";\n");
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::columns::parse_column_clause;

    fn line(clause: &str) -> String {
        column_line(&parse_column_clause(clause).unwrap())
    }

    #[test]
    fn test_id_shorthand() {
        assert_eq!(
            line("id int not null auto_increment primary key"),
            "            $table->id();\n"
        );
    }

    #[test]
    fn test_unsigned_id_is_not_shorthand() {
        assert_eq!(
            line("id bigint unsigned not null auto_increment primary key"),
            "            $table->unsignedBigInteger('id')->autoIncrement();\n"
        );
    }

    #[test]
    fn test_modifier_order() {
        assert_eq!(
            line("code varchar(20) NULL DEFAULT 'n/a' UNIQUE COMMENT 'short code'"),
            "            $table->string('code', 20)->nullable()->default('n/a')->unique()->comment('short code');\n"
        );
        assert_eq!(
            line("uuid char(36) NOT NULL PRIMARY KEY UNIQUE"),
            "            $table->char('uuid', 36)->primary();\n"
        );
    }

    #[test]
    fn test_numeric_defaults_unquoted() {
        assert_eq!(
            line("qty int NOT NULL DEFAULT 0"),
            "            $table->integer('qty')->default(0);\n"
        );
        assert_eq!(
            line("ratio decimal(5,2) NOT NULL DEFAULT '1.50'"),
            "            $table->decimal('ratio', 5, 2)->default(1.50);\n"
        );
        assert_eq!(
            line("created_at timestamp NOT NULL DEFAULT CURRENT_TIMESTAMP"),
            "            $table->timestamp('created_at')->default('CURRENT_TIMESTAMP');\n"
        );
    }

    #[test]
    fn test_enum_params() {
        assert_eq!(
            line("status enum('a','b','c') default 'a'"),
            "            $table->enum('status', ['a', 'b', 'c'])->nullable()->default('a');\n"
        );
    }

    #[test]
    fn test_php_string_escaping() {
        assert_eq!(php_string("it's"), r"'it\'s'");
        assert_eq!(php_string(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_is_numeric() {
        for v in ["0", "-1", "1.50", "+3", "1e3", ".5"] {
            assert!(is_numeric(v), "{v}");
        }
        for v in ["", "abc", "1a", "inf", "NaN", "-", "0x10", "CURRENT_TIMESTAMP"] {
            assert!(!is_numeric(v), "{v}");
        }
    }

    #[test]
    fn test_index_and_foreign_key_lines() {
        assert_eq!(
            index_line(&IndexDefinition::unique("uk", vec!["a".into(), "b".into()])),
            "            $table->unique(['a', 'b'], 'uk');\n"
        );
        assert_eq!(
            index_line(&IndexDefinition::primary(vec!["a".into()])),
            "            $table->primary(['a']);\n"
        );
        let fk = ForeignKeyDefinition {
            column: "user_id".into(),
            references_table: "users".into(),
            references_column: "id".into(),
            on_delete: Some(crate::ast::ReferentialAction::Cascade),
            on_update: Some(crate::ast::ReferentialAction::SetNull),
        };
        assert_eq!(
            foreign_key_line(&fk),
            "            $table->foreign('user_id')->references('id')->on('users')->onDelete('cascade')->onUpdate('set_null');\n"
        );
    }
}
