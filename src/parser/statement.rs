//! Locating the `CREATE TABLE` statement and its body.

use nom::{
    character::complete::{char, multispace0, multispace1},
    combinator::opt,
    sequence::tuple,
    IResult,
};

use super::tokens::{keyword, keyword_words, parse_table_identifier, scan_first, take_until_balanced_paren};
use crate::error::ParseError;

/// Words that may start the table options after the closing paren.
const TABLE_OPTIONS: &[&str] = &[
    "ENGINE",
    "DEFAULT",
    "CHARSET",
    "CHARACTER",
    "COLLATE",
    "AUTO_INCREMENT",
    "COMMENT",
    "ROW_FORMAT",
];

/// Slices of the input making up one `CREATE TABLE` statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    pub name: &'a str,
    /// Text between the outer parens; `None` when the paren never closes.
    pub body: Option<&'a str>,
    /// From `CREATE` up to (not including) the terminating `;`.
    pub text: &'a str,
    /// Ignored text after the body: unknown table options or further
    /// statements. Empty when there is nothing to report.
    pub trailing: &'a str,
}

/// `CREATE TABLE [IF NOT EXISTS] name (`; returns the name and leaves the
/// input just after the opening paren.
pub fn parse_create_header(input: &str) -> IResult<&str, &str> {
    let (input, _) = keyword("CREATE")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = keyword("TABLE")(input)?;
    let (input, _) = multispace1(input)?;
    let (input, _) = opt(tuple((
        keyword("IF"),
        multispace1,
        keyword("NOT"),
        multispace1,
        keyword("EXISTS"),
        multispace1,
    )))(input)?;
    let (input, name) = parse_table_identifier(input)?;
    let (input, _) = multispace0(input)?;
    let (input, _) = char('(')(input)?;
    Ok((input, name))
}

pub fn locate(sql: &str) -> Result<Statement<'_>, ParseError> {
    let (start, after_open, name) =
        scan_first(sql, parse_create_header).ok_or(ParseError::NoCreateTable)?;

    let Ok((after_body, body)) = take_until_balanced_paren(after_open) else {
        return Ok(Statement {
            name,
            body: None,
            text: &sql[start..],
            trailing: "",
        });
    };

    let (options, rest) = match after_body.find(';') {
        Some(semi) => (&after_body[..semi], after_body[semi + 1..].trim()),
        None => (after_body, ""),
    };
    let end = sql.len() - after_body.len() + options.len();

    let options = options.trim();
    let trailing = if !options.is_empty() && !starts_with_table_option(options) {
        options
    } else {
        rest
    };

    Ok(Statement {
        name,
        body: Some(body),
        text: &sql[start..end],
        trailing,
    })
}

fn starts_with_table_option(text: &str) -> bool {
    keyword_words(text)
        .first()
        .is_some_and(|w| TABLE_OPTIONS.contains(&w.as_str()))
}
