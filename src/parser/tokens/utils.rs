use nom::{
    error::{Error, ErrorKind},
    IResult,
};

use super::identifiers::is_word_char;

/// Tracks whether a char-by-char scan is inside a quoted span.
#[derive(Debug, Default)]
struct QuoteState {
    quote: Option<char>,
    escaped: bool,
}

impl QuoteState {
    /// Feed one character. Returns true while `c` belongs to a quoted span
    /// (opening and closing quotes included).
    fn step(&mut self, c: char, quotes: &[char]) -> bool {
        match self.quote {
            Some(q) => {
                if self.escaped {
                    self.escaped = false;
                } else if c == '\\' {
                    self.escaped = true;
                } else if c == q {
                    self.quote = None;
                }
                true
            }
            None if quotes.contains(&c) => {
                self.quote = Some(c);
                true
            }
            None => false,
        }
    }
}

const ALL_QUOTES: &[char] = &['\'', '"', '`'];
const STRING_QUOTES: &[char] = &['\'', '"'];

/// Content inside parentheses, handling nesting and quoted spans.
/// Input starts just after the opening `(`; the closing `)` is consumed.
pub fn take_until_balanced_paren(input: &str) -> IResult<&str, &str> {
    let mut depth = 1usize;
    let mut quotes = QuoteState::default();

    for (idx, c) in input.char_indices() {
        if quotes.step(c, ALL_QUOTES) {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Ok((&input[idx + 1..], &input[..idx]));
                }
            }
            _ => {}
        }
    }

    // EOF before closing paren
    Err(nom::Err::Error(Error::new(input, ErrorKind::TakeUntil)))
}

/// `( ... )` including both parens.
pub fn parse_paren_group(input: &str) -> IResult<&str, &str> {
    let (after_open, _) = nom::character::complete::char('(')(input)?;
    let (rest, _) = take_until_balanced_paren(after_open)?;
    Ok((rest, &input[..input.len() - rest.len()]))
}

/// Split on commas at paren depth 0 outside quotes. Pieces are trimmed;
/// empty pieces are dropped.
pub fn split_top_level(content: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0i32;
    let mut quotes = QuoteState::default();
    let mut start = 0;

    for (idx, c) in content.char_indices() {
        if quotes.step(c, ALL_QUOTES) {
            continue;
        }
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            ',' if depth == 0 => {
                let piece = content[start..idx].trim();
                if !piece.is_empty() {
                    pieces.push(piece);
                }
                start = idx + 1;
            }
            _ => {}
        }
    }

    let last = content[start..].trim();
    if !last.is_empty() {
        pieces.push(last);
    }
    pieces
}

/// Byte offsets of every word start that lies outside string literals.
pub fn word_starts(input: &str) -> Vec<usize> {
    let mut starts = Vec::new();
    let mut quotes = QuoteState::default();
    let mut prev: Option<char> = None;

    for (idx, c) in input.char_indices() {
        let quoted = quotes.step(c, STRING_QUOTES);
        if !quoted && is_word_char(c) && !prev.is_some_and(is_word_char) {
            starts.push(idx);
        }
        prev = Some(if quoted { ' ' } else { c });
    }
    starts
}

/// Try `parser` at every word start, collecting non-overlapping matches.
pub fn scan_all<'a, O, F>(input: &'a str, mut parser: F) -> Vec<O>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    let mut found = Vec::new();
    let mut resume = 0;
    for at in word_starts(input) {
        if at < resume {
            continue;
        }
        if let Ok((rest, out)) = parser(&input[at..]) {
            found.push(out);
            resume = input.len() - rest.len();
        }
    }
    found
}

/// First word start at which `parser` succeeds: `(offset, rest, output)`.
pub fn scan_first<'a, O, F>(input: &'a str, mut parser: F) -> Option<(usize, &'a str, O)>
where
    F: FnMut(&'a str) -> IResult<&'a str, O>,
{
    word_starts(input).into_iter().find_map(|at| {
        parser(&input[at..])
            .ok()
            .map(|(rest, out)| (at, rest, out))
    })
}

/// Drop backticks and collapse whitespace runs to one space, leaving
/// string literals untouched.
pub fn normalize_clause(clause: &str) -> String {
    let mut out = String::with_capacity(clause.len());
    let mut quotes = QuoteState::default();
    let mut pending_space = false;

    for c in clause.trim().chars() {
        if quotes.step(c, STRING_QUOTES) {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        } else if c == '`' {
            continue;
        } else if c.is_whitespace() {
            pending_space = !out.is_empty();
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }
    out
}

/// Replace string literals (quotes included) with spaces so keyword
/// searches never look inside them.
pub fn mask_literals(input: &str) -> String {
    let mut quotes = QuoteState::default();
    input
        .chars()
        .map(|c| if quotes.step(c, STRING_QUOTES) { ' ' } else { c })
        .collect()
}

/// Upper-cased words outside string literals, in order.
pub fn keyword_words(input: &str) -> Vec<String> {
    mask_literals(input)
        .split(|c: char| !is_word_char(c))
        .filter(|w| !w.is_empty())
        .map(|w| w.to_ascii_uppercase())
        .collect()
}
