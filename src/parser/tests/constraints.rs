use crate::ast::*;
use crate::parser::{parse, parse_foreign_keys, parse_indexes};

#[test]
fn test_primary_and_named_indexes() {
    let indexes = parse_indexes(
        "CREATE TABLE t (
            id int NOT NULL,
            a int, b int, c varchar(10),
            PRIMARY KEY (`id`),
            KEY `idx_ab` (`a`, `b`),
            UNIQUE KEY uk_c (c),
            INDEX idx_c (c(5) DESC)
        )",
    );

    assert_eq!(
        indexes,
        vec![
            IndexDefinition::primary(vec!["id".into()]),
            IndexDefinition::index("idx_ab", vec!["a".into(), "b".into()]),
            IndexDefinition::index("idx_c", vec!["c".into()]),
            IndexDefinition::unique("uk_c", vec!["c".into()]),
        ]
    );
}

#[test]
fn test_unique_key_is_not_duplicated_as_plain_index() {
    let indexes = parse_indexes("CREATE TABLE t (a int, UNIQUE KEY uk_a (a))");
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].kind, IndexKind::Unique);
}

#[test]
fn test_unique_variants() {
    let indexes = parse_indexes(
        "CREATE TABLE t (a int, b int, UNIQUE (a), CONSTRAINT uq_b UNIQUE INDEX (b))",
    );
    assert_eq!(
        indexes,
        vec![
            IndexDefinition {
                kind: IndexKind::Unique,
                name: None,
                columns: vec!["a".into()],
            },
            IndexDefinition::unique("uq_b", vec!["b".into()]),
        ]
    );
}

#[test]
fn test_column_level_keywords_are_not_indexes() {
    let indexes = parse_indexes(
        "CREATE TABLE t (id int PRIMARY KEY, email varchar(255) UNIQUE, code int UNIQUE COMMENT 'key x (y)')",
    );
    assert!(indexes.is_empty());
}

#[test]
fn test_only_first_primary_key_kept() {
    let indexes = parse_indexes("PRIMARY KEY (a), PRIMARY KEY (b)");
    assert_eq!(indexes, vec![IndexDefinition::primary(vec!["a".into()])]);
}

#[test]
fn test_foreign_key_cascade() {
    let fks = parse_foreign_keys(
        "CREATE TABLE posts (id int, user_id int, FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE)",
    );
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
}

#[test]
fn test_foreign_key_actions_any_order() {
    let fks = parse_foreign_keys(
        "CONSTRAINT `fk_a` FOREIGN KEY (`a_id`) REFERENCES `a`(`id`) ON UPDATE SET NULL ON DELETE RESTRICT,
         CONSTRAINT fk_b FOREIGN KEY(b_id) REFERENCES b(id) ON DELETE NO ACTION",
    );
    assert_eq!(fks.len(), 2);
    assert_eq!(fks[0].column, "a_id");
    assert_eq!(fks[0].references_table, "a");
    assert_eq!(fks[0].on_delete, Some(ReferentialAction::Restrict));
    assert_eq!(fks[0].on_update, Some(ReferentialAction::SetNull));
    assert_eq!(fks[1].on_delete, Some(ReferentialAction::NoAction));
    assert_eq!(fks[1].on_update, None);
}

#[test]
fn test_foreign_key_anywhere_in_statement() {
    let table = parse(
        "CREATE TABLE comments (
            id int auto_increment primary key,
            user_id int not null,
            body text,
            CONSTRAINT fk_user FOREIGN KEY (user_id) REFERENCES users (id) ON DELETE CASCADE
        )",
    )
    .unwrap();
    assert_eq!(table.columns.len(), 3);
    assert_eq!(table.foreign_keys.len(), 1);
    assert_eq!(table.foreign_keys[0].on_delete.map(|a| a.as_str()), Some("cascade"));
}
