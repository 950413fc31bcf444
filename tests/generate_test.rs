use migen::diagnostics::NullSink;
use migen::parser::{parse_columns, parse_foreign_keys};
use migen::prelude::*;
use migen::store::save_to_file_at;
use pretty_assertions::assert_eq;

#[test]
fn test_users_round_trip() {
    let script = generate(
        "create_users_table",
        "CREATE TABLE users (id int not null auto_increment primary key, email varchar(255) not null unique)",
    )
    .unwrap();

    let body: Vec<&str> = script
        .as_str()
        .lines()
        .filter(|l| l.trim_start().starts_with("$table->"))
        .collect();
    assert_eq!(
        body,
        [
            "            $table->id();",
            "            $table->string('email', 255)->unique();",
        ]
    );
    assert!(script.as_str().contains("Schema::dropIfExists('users');"));
}

#[test]
fn test_separate_primary_key_on_auto_increment_declared_once() {
    let script = generate(
        "create_t_table",
        "CREATE TABLE t (id int NOT NULL AUTO_INCREMENT, name text, PRIMARY KEY (id))",
    )
    .unwrap();

    assert!(script
        .as_str()
        .contains("            $table->integer('id')->autoIncrement();\n"));
    assert!(!script.as_str().contains("$table->primary("));
}

#[test]
fn test_enum_with_default() {
    let sql = "CREATE TABLE t (status enum('a','b','c') default 'a')";
    let columns = parse_columns(sql).unwrap();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns[0].descriptor.method, BuilderMethod::Enum);
    assert_eq!(
        columns[0].descriptor.params,
        vec![TypeParam::List(vec!["a".into(), "b".into(), "c".into()])]
    );
    assert_eq!(columns[0].default.as_deref(), Some("a"));

    let script = generate("create_t_table", sql).unwrap();
    assert!(script
        .as_str()
        .contains("$table->enum('status', ['a', 'b', 'c'])->nullable()->default('a');"));
}

#[test]
fn test_foreign_key_anywhere() {
    let sql = "CREATE TABLE posts (
        id bigint unsigned not null auto_increment primary key,
        user_id bigint unsigned not null,
        FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
    )";
    let fks = parse_foreign_keys(sql);
    assert_eq!(
        fks,
        vec![ForeignKeyDefinition {
            column: "user_id".into(),
            references_table: "users".into(),
            references_column: "id".into(),
            on_delete: Some(ReferentialAction::Cascade),
            on_update: None,
        }]
    );

    let script = generate("create_posts_table", sql).unwrap();
    assert!(script.as_str().contains(
        "$table->foreign('user_id')->references('id')->on('users')->onDelete('cascade');"
    ));
}

#[test]
fn test_column_count_preserved() {
    let sql = "CREATE TABLE `orders` (
        `id` bigint unsigned NOT NULL AUTO_INCREMENT,
        `code` char(8) NOT NULL,
        `note` varchar(50) DEFAULT 'x,y',
        `total` decimal(10,2) NOT NULL DEFAULT '0.00',
        `paid` tinyint(1) NOT NULL DEFAULT '0',
        `placed_at` timestamp NULL DEFAULT NULL,
        PRIMARY KEY (`id`),
        UNIQUE KEY `orders_code_unique` (`code`),
        KEY `orders_placed_at_index` (`placed_at`)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4";

    let names: Vec<String> = parse_columns(sql)
        .unwrap()
        .into_iter()
        .map(|c| c.name)
        .collect();
    assert_eq!(names, ["id", "code", "note", "total", "paid", "placed_at"]);
}

#[test]
fn test_tinyint_one_is_boolean_regardless_of_unsigned() {
    let columns = parse_columns(
        "CREATE TABLE t (a tinyint(1) unsigned, b tinyint(1), c tinyint(4), d tinyint(4) unsigned)",
    )
    .unwrap();
    let methods: Vec<_> = columns.iter().map(|c| c.descriptor.method).collect();
    assert_eq!(
        methods,
        [
            BuilderMethod::Boolean,
            BuilderMethod::Boolean,
            BuilderMethod::TinyInteger,
            BuilderMethod::UnsignedTinyInteger,
        ]
    );
}

#[test]
fn test_generate_is_idempotent() {
    let sql = "CREATE TABLE t (id int auto_increment primary key, created_at timestamp)";
    let first = generate("m", sql).unwrap();
    let second = generate("m", sql).unwrap();
    assert_eq!(first.as_str(), second.as_str());
}

#[test]
fn test_denylist_is_case_insensitive() {
    for sql in [
        "CREATE TABLE t (a int); drop database x",
        "CREATE TABLE t (a int); Truncate t",
        "CREATE TABLE t (a int); delete from t",
        "CREATE TABLE t (a int); grant all on *.* to x",
        "CREATE TABLE t (a int); exec XP_CMDSHELL 'dir'",
    ] {
        let err = generate("m", sql).unwrap_err();
        assert!(err.is_unsafe_input(), "{sql}");
    }
}

#[test]
fn test_garbage_fails_with_parse_error() {
    for sql in ["", "hello", "SELECT 1", "CREATE VIEW v AS SELECT 1"] {
        assert!(
            matches!(generate("m", sql), Err(GenerateError::Parse(_))),
            "{sql:?}"
        );
    }
}

#[test]
fn test_strict_mode_rejects_what_lenient_drops() {
    let sql = "CREATE TABLE t (id int, oops, name varchar(10))";

    let lenient = MigrationGenerator::with_sink(ParseMode::Lenient, NullSink)
        .generate_detailed("m", sql)
        .unwrap();
    assert_eq!(lenient.table.columns.len(), 2);

    let strict = MigrationGenerator::with_sink(ParseMode::Strict, NullSink).generate("m", sql);
    assert!(matches!(
        strict,
        Err(GenerateError::Parse(ParseError::InvalidColumn(_)))
    ));
}

#[test]
fn test_generated_script_saved_under_timestamp() {
    let root = tempfile::tempdir().unwrap();
    let script = generate("create_t_table", "CREATE TABLE t (id int)").unwrap();
    let at = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();

    let rel = save_to_file_at(script.as_str(), "create_t_table", root.path(), at).unwrap();
    assert_eq!(rel, "migrations/2024_01_02_030405_create_t_table.php");
    assert_eq!(
        std::fs::read_to_string(root.path().join(rel)).unwrap(),
        script.into_string()
    );
}
