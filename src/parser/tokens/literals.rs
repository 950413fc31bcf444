use nom::{
    error::{Error, ErrorKind},
    IResult,
};

/// Parse a `'single'` or `"double"` quoted literal, returning its unescaped
/// content. Backslash escapes and doubled quotes (`'it''s'`) are honored.
pub fn parse_quoted(input: &str) -> IResult<&str, String> {
    let mut chars = input.char_indices();
    let quote = match chars.next() {
        Some((_, q @ ('\'' | '"'))) => q,
        _ => return Err(nom::Err::Error(Error::new(input, ErrorKind::Char))),
    };

    let mut content = String::new();
    let mut escaped = false;
    while let Some((idx, c)) = chars.next() {
        if escaped {
            content.push(c);
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == quote {
            if input[idx + 1..].starts_with(quote) {
                content.push(quote);
                chars.next();
            } else {
                return Ok((&input[idx + 1..], content));
            }
        } else {
            content.push(c);
        }
    }

    // EOF before closing quote
    Err(nom::Err::Error(Error::new(input, ErrorKind::Char)))
}

/// Bare token as it appears after `DEFAULT`: stops at whitespace, commas,
/// quotes and semicolons.
pub fn parse_bare_token(input: &str) -> IResult<&str, &str> {
    nom::bytes::complete::take_while1(|c: char| {
        !c.is_whitespace() && !matches!(c, ',' | '\'' | '"' | ';')
    })(input)
}
