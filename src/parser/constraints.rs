//! Table-level indexes and foreign keys, scanned over the whole statement.

use nom::{
    branch::alt,
    character::complete::{char, multispace0, multispace1},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{preceded, terminated, tuple},
    IResult,
};

use super::tokens::{
    is_word_char, keyword, keyword_pair, parse_object_name, scan_all, split_top_level,
    take_until_balanced_paren,
};
use crate::ast::{ForeignKeyDefinition, IndexDefinition, IndexKind, ReferentialAction};

/// `(a, `b`, c(10) DESC)` -> `["a", "b", "c"]`. Fails on an empty list.
pub fn parse_column_list(input: &str) -> IResult<&str, Vec<String>> {
    let (input, _) = char('(')(input)?;
    let (rest, inner) = take_until_balanced_paren(input)?;

    let columns: Vec<String> = split_top_level(inner)
        .into_iter()
        .map(|part| {
            part.replace('`', "")
                .chars()
                .take_while(|c| is_word_char(*c) || *c == '.')
                .collect::<String>()
        })
        .filter(|c| !c.is_empty())
        .collect();

    if columns.is_empty() {
        return Err(nom::Err::Error(nom::error::Error::new(
            input,
            nom::error::ErrorKind::SeparatedList,
        )));
    }
    Ok((rest, columns))
}

/// `PRIMARY KEY (cols)`
fn parse_primary_key(input: &str) -> IResult<&str, IndexDefinition> {
    let (input, _) = keyword_pair("PRIMARY", "KEY")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, columns) = parse_column_list(input)?;
    Ok((input, IndexDefinition::primary(columns)))
}

/// `[CONSTRAINT name] UNIQUE [KEY|INDEX] [name] (cols)`
fn parse_unique_index(input: &str) -> IResult<&str, IndexDefinition> {
    let (input, constraint) = opt(preceded(
        terminated(keyword("CONSTRAINT"), multispace1),
        terminated(parse_object_name, multispace1),
    ))(input)?;
    let (input, _) = keyword("UNIQUE")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(terminated(alt((keyword("KEY"), keyword("INDEX"))), multispace0))(input)?;
    let (input, name) = opt(terminated(parse_object_name, multispace0))(input)?;
    let (input, columns) = parse_column_list(input)?;

    Ok((
        input,
        IndexDefinition {
            kind: IndexKind::Unique,
            name: name.or(constraint).map(str::to_string),
            columns,
        },
    ))
}

/// `KEY name (cols)` or `INDEX name (cols)`
fn parse_plain_index(input: &str) -> IResult<&str, IndexDefinition> {
    let (input, _) = alt((keyword("KEY"), keyword("INDEX")))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, name) = parse_object_name(input)?;
    let (input, _) = multispace0(input)?;
    let (input, columns) = parse_column_list(input)?;
    Ok((input, IndexDefinition::index(name, columns)))
}

/// Indexes in emission order: the first primary key, then plain indexes,
/// then unique indexes, each group in statement order.
pub fn scan_indexes(sql: &str) -> Vec<IndexDefinition> {
    let found = scan_all(sql, |input| {
        alt((parse_primary_key, parse_unique_index, parse_plain_index))(input)
    });

    let primary = found.iter().find(|i| i.kind == IndexKind::Primary).cloned();
    let by_kind = |kind: IndexKind| found.iter().filter(move |i| i.kind == kind).cloned();

    primary
        .into_iter()
        .chain(by_kind(IndexKind::Index))
        .chain(by_kind(IndexKind::Unique))
        .collect()
}

fn parse_referential_action(input: &str) -> IResult<&str, ReferentialAction> {
    alt((
        value(ReferentialAction::Cascade, keyword("CASCADE")),
        value(ReferentialAction::SetNull, keyword_pair("SET", "NULL")),
        value(ReferentialAction::Restrict, keyword("RESTRICT")),
        value(ReferentialAction::NoAction, keyword_pair("NO", "ACTION")),
    ))(input)
}

#[derive(Clone, Copy)]
enum Trigger {
    Delete,
    Update,
}

/// ` ON DELETE CASCADE` / ` ON UPDATE SET NULL`
fn parse_on_clause(input: &str) -> IResult<&str, (Trigger, ReferentialAction)> {
    let (input, _) = tuple((multispace1, keyword("ON"), multispace1))(input)?;
    let (input, trigger) = alt((
        value(Trigger::Delete, keyword("DELETE")),
        value(Trigger::Update, keyword("UPDATE")),
    ))(input)?;
    let (input, _) = multispace1(input)?;
    let (input, action) = parse_referential_action(input)?;
    Ok((input, (trigger, action)))
}

/// `FOREIGN KEY (col) REFERENCES table (col) [ON DELETE x] [ON UPDATE y]`
fn parse_foreign_key(input: &str) -> IResult<&str, ForeignKeyDefinition> {
    let (input, _) = keyword_pair("FOREIGN", "KEY")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, columns) = parse_column_list(input)?;
    let (input, _) = tuple((multispace0, keyword("REFERENCES"), multispace1))(input)?;
    let (input, table) = map(parse_object_name, str::to_string)(input)?;
    let (input, _) = multispace0(input)?;
    let (input, references) = parse_column_list(input)?;
    let (input, clauses) = many0(parse_on_clause)(input)?;

    let mut fk = ForeignKeyDefinition {
        column: columns[0].clone(),
        references_table: table,
        references_column: references[0].clone(),
        on_delete: None,
        on_update: None,
    };
    for (trigger, action) in clauses {
        match trigger {
            Trigger::Delete => fk.on_delete = fk.on_delete.or(Some(action)),
            Trigger::Update => fk.on_update = fk.on_update.or(Some(action)),
        }
    }
    Ok((input, fk))
}

pub fn scan_foreign_keys(sql: &str) -> Vec<ForeignKeyDefinition> {
    scan_all(sql, parse_foreign_key)
}
