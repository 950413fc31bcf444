//! Column clauses: `name type[(params)] attributes...`

use nom::{
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, multispace0, multispace1},
    combinator::{map, opt, value},
    sequence::{preceded, tuple},
    IResult,
};

use super::tokens::{
    keyword, keyword_pair, keyword_words, normalize_clause, parse_bare_token, parse_identifier,
    parse_paren_group, parse_quoted, scan_first,
};
use crate::ast::ColumnDefinition;
use crate::mapper::map_type;

/// Does the clause open with a table-level constraint keyword?
pub fn is_constraint_clause(clause: &str) -> bool {
    let parsed: IResult<&str, &str> = alt((
        keyword_pair("PRIMARY", "KEY"),
        keyword_pair("FOREIGN", "KEY"),
        keyword("KEY"),
        keyword("INDEX"),
        keyword("UNIQUE"),
        keyword("CONSTRAINT"),
        keyword("FULLTEXT"),
        keyword("SPATIAL"),
        keyword("CHECK"),
    ))(clause.trim_start());
    parsed.is_ok()
}

/// `name type[(params)]`, returning the attribute tail as the remainder.
fn parse_column_head(input: &str) -> IResult<&str, (&str, &str, Option<&str>)> {
    tuple((
        parse_identifier,
        preceded(multispace1, alpha1),
        opt(preceded(multispace0, parse_paren_group)),
    ))(input)
}

/// Parse one column clause. `None` when the clause does not have the
/// `name type ...` shape.
pub fn parse_column_clause(clause: &str) -> Option<ColumnDefinition> {
    let line = normalize_clause(clause);
    let (attributes, (name, sql_type, params)) = parse_column_head(&line).ok()?;

    let sql_type = sql_type.to_ascii_lowercase();
    let params = params.unwrap_or_default();
    let flags = AttributeFlags::from_attributes(attributes);

    let mut column = ColumnDefinition::new(name, sql_type);
    column.type_params = params.to_string();
    column.nullable = !flags.not_null;
    column.auto_increment = flags.auto_increment;
    column.primary = flags.primary;
    column.unique = flags.unique;
    column.unsigned = flags.unsigned;
    column.default = extract_default(attributes);
    column.comment = extract_comment(attributes);
    column.descriptor = map_type(&column.sql_type, params, column.unsigned);

    Some(column)
}

/// Keyword flags of an attribute tail, string literals ignored.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct AttributeFlags {
    pub not_null: bool,
    pub auto_increment: bool,
    pub primary: bool,
    pub unique: bool,
    pub unsigned: bool,
}

impl AttributeFlags {
    pub fn from_attributes(attributes: &str) -> Self {
        let words = keyword_words(attributes);
        let has = |w: &str| words.iter().any(|x| x == w);

        Self {
            not_null: words.windows(2).any(|pair| pair[0] == "NOT" && pair[1] == "NULL"),
            auto_increment: has("AUTO_INCREMENT") || has("AUTOINCREMENT"),
            primary: has("PRIMARY"),
            unique: has("UNIQUE"),
            unsigned: has("UNSIGNED"),
        }
    }
}

/// `DEFAULT 'x'`, `DEFAULT 0`, `DEFAULT CURRENT_TIMESTAMP`. A bare `NULL`
/// means no default.
fn parse_default(input: &str) -> IResult<&str, Option<String>> {
    let (input, _) = keyword("DEFAULT")(input)?;
    let (input, _) = multispace1(input)?;
    alt((
        map(parse_quoted, Some),
        value(None, keyword("NULL")),
        map(parse_bare_token, |token: &str| Some(token.to_string())),
    ))(input)
}

pub fn extract_default(attributes: &str) -> Option<String> {
    scan_first(attributes, parse_default).and_then(|(_, _, default)| default)
}

/// `COMMENT 'text'` or `COMMENT = "text"`.
fn parse_comment(input: &str) -> IResult<&str, String> {
    let (input, _) = keyword("COMMENT")(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = opt(tag("="))(input)?;
    let (input, _) = multispace0(input)?;
    parse_quoted(input)
}

pub fn extract_comment(attributes: &str) -> Option<String> {
    scan_first(attributes, parse_comment).map(|(_, _, comment)| comment)
}
