//! Laravel migration emitter.
//!
//! Output is a pure function of the parsed table: no timestamps, no
//! randomness. Only the saved file name carries a timestamp.

pub mod blueprint;

use crate::ast::{CreateTable, IndexKind};

use self::blueprint::{column_line, foreign_key_line, index_line, php_string};

/// Source text of a generated migration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationScript(String);

impl MigrationScript {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for MigrationScript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<MigrationScript> for String {
    fn from(script: MigrationScript) -> Self {
        script.0
    }
}

/// Trait for converting a parsed schema into migration source.
pub trait ToMigration {
    fn to_migration(&self) -> MigrationScript;
}

impl ToMigration for CreateTable {
    fn to_migration(&self) -> MigrationScript {
        emit(self)
    }
}

pub fn emit(table: &CreateTable) -> MigrationScript {
    let name = php_string(&table.name);
    let mut out = String::new();

    out.push_str("<?php\n\n");
    out.push_str("use Illuminate\\Database\\Migrations\\Migration;\n");
    out.push_str("use Illuminate\\Database\\Schema\\Blueprint;\n");
    out.push_str("use Illuminate\\Support\\Facades\\Schema;\n\n");
    out.push_str("return new class extends Migration\n");
    out.push_str("{\n");
    out.push_str("    /**\n");
    out.push_str("     * Run the migrations.\n");
    out.push_str("     */\n");
    out.push_str("    public function up(): void\n");
    out.push_str("    {\n");
    out.push_str(&format!(
        "        Schema::create({name}, function (Blueprint $table) {{\n"
    ));

    for column in &table.columns {
        out.push_str(&column_line(column));
    }

    let skip_primary = table.has_inline_primary();
    for index in &table.indexes {
        if index.kind == IndexKind::Primary && skip_primary {
            continue;
        }
        out.push_str(&index_line(index));
    }

    for fk in &table.foreign_keys {
        out.push_str(&foreign_key_line(fk));
    }

    out.push_str("        });\n");
    out.push_str("    }\n\n");
    out.push_str("    /**\n");
    out.push_str("     * Reverse the migrations.\n");
    out.push_str("     */\n");
    out.push_str("    public function down(): void\n");
    out.push_str("    {\n");
    out.push_str(&format!("        Schema::dropIfExists({name});\n"));
    out.push_str("    }\n");
    out.push_str("};\n");

    MigrationScript(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_full_template() {
        let table = parse(
            "CREATE TABLE `posts` (
                `id` int NOT NULL AUTO_INCREMENT,
                `user_id` bigint unsigned NOT NULL,
                `title` varchar(200) NOT NULL,
                `published` tinyint(1) NOT NULL DEFAULT 0,
                PRIMARY KEY (`id`),
                KEY `idx_user` (`user_id`),
                FOREIGN KEY (`user_id`) REFERENCES `users` (`id`) ON DELETE CASCADE
            ) ENGINE=InnoDB",
        )
        .unwrap();

        let expected = r#"<?php

use Illuminate\Database\Migrations\Migration;
use Illuminate\Database\Schema\Blueprint;
use Illuminate\Support\Facades\Schema;

return new class extends Migration
{
    /**
     * Run the migrations.
     */
    public function up(): void
    {
        Schema::create('posts', function (Blueprint $table) {
            $table->integer('id')->autoIncrement();
            $table->unsignedBigInteger('user_id');
            $table->string('title', 200);
            $table->boolean('published')->default(0);
            $table->index(['user_id'], 'idx_user');
            $table->foreign('user_id')->references('id')->on('users')->onDelete('cascade');
        });
    }

    /**
     * Reverse the migrations.
     */
    public function down(): void
    {
        Schema::dropIfExists('posts');
    }
};
"#;
        assert_eq!(emit(&table).as_str(), expected);
    }

    #[test]
    fn test_primary_index_skipped_when_inline() {
        let table = parse("CREATE TABLE t (id int auto_increment primary key, name text, PRIMARY KEY (id))").unwrap();
        let script = table.to_migration();
        assert!(script.as_str().contains("$table->id();"));
        assert!(!script.as_str().contains("$table->primary("));
    }

    #[test]
    fn test_primary_key_over_auto_increment_column_skipped() {
        let table = parse(
            "CREATE TABLE `users` (
                `id` bigint unsigned NOT NULL AUTO_INCREMENT,
                `name` varchar(255) NOT NULL,
                PRIMARY KEY (`id`)
            ) ENGINE=InnoDB AUTO_INCREMENT=3 DEFAULT CHARSET=utf8mb4",
        )
        .unwrap();
        assert!(table.has_inline_primary());

        let script = emit(&table);
        assert!(script
            .as_str()
            .contains("            $table->unsignedBigInteger('id')->autoIncrement();\n"));
        assert!(!script.as_str().contains("$table->primary("));
    }

    #[test]
    fn test_composite_primary_emitted() {
        let table = parse("CREATE TABLE role_user (role_id int NOT NULL, user_id int NOT NULL, PRIMARY KEY (role_id, user_id))").unwrap();
        assert!(emit(&table)
            .as_str()
            .contains("            $table->primary(['role_id', 'user_id']);\n"));
    }
}
