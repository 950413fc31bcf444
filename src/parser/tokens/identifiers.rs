use nom::{
    branch::alt,
    bytes::complete::{tag_no_case, take_while, take_while1},
    character::complete::{char, multispace1, satisfy},
    combinator::{not, recognize},
    sequence::{delimited, pair, terminated, tuple},
    IResult,
};

pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Case-insensitive keyword that must not run into a following word character.
pub fn keyword<'a>(word: &'static str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    terminated(tag_no_case(word), not(satisfy(is_word_char)))
}

/// Two keywords separated by whitespace, e.g. `PRIMARY KEY`.
pub fn keyword_pair<'a>(
    first: &'static str,
    second: &'static str,
) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    recognize(tuple((keyword(first), multispace1, keyword(second))))
}

/// Parse an SQL identifier: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn parse_identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        satisfy(|c: char| c.is_ascii_alphabetic() || c == '_'),
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '_'),
    ))(input)
}

/// Identifier, optionally wrapped in backticks.
pub fn parse_table_identifier(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('`'), parse_identifier, char('`')),
        parse_identifier,
    ))(input)
}

/// Looser name used for indexes and referenced tables: anything up to
/// whitespace, a paren or a comma, or any backtick-quoted text.
pub fn parse_object_name(input: &str) -> IResult<&str, &str> {
    alt((
        delimited(char('`'), take_while1(|c: char| c != '`'), char('`')),
        take_while1(|c: char| !c.is_whitespace() && !matches!(c, '`' | '(' | ')' | ',' | ';')),
    ))(input)
}
