//! Denylist sanitizer for untrusted schema input.
//!
//! This rejects a fixed set of statements and functions that have no
//! business in a `CREATE TABLE` body. It is not a SQL-injection-proof
//! parser: anything outside the list passes through.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::GenerateError;

struct Rule {
    name: &'static str,
    pattern: Regex,
}

fn rule(name: &'static str, pattern: &str) -> Rule {
    Rule {
        name,
        pattern: Regex::new(pattern).expect("denylist pattern"),
    }
}

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule("data destruction", r"(?i)\b(DROP\s+DATABASE|TRUNCATE|DELETE\s+FROM)\b"),
        rule("privilege change", r"(?i)\b(GRANT|REVOKE|ALTER\s+USER|CREATE\s+USER)\b"),
        rule("file access", r"(?i)\b(LOAD_FILE|INTO\s+OUTFILE|INTO\s+DUMPFILE)\b"),
        rule("command execution", r"(?i)\b(EXEC|EXECUTE|xp_cmdshell)\b"),
    ]
});

static UPDATE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bUPDATE\b").expect("update pattern"));

// `.` stops at newlines, so UPDATE and SET must share a line.
static SET_TAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s+.*\s+SET\b").expect("set pattern"));

// What may legitimately follow `ON UPDATE` inside a table definition.
static ON_UPDATE_ACTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^\s+(CASCADE|RESTRICT|SET\s+NULL|SET\s+DEFAULT|NO\s+ACTION|CURRENT_TIMESTAMP|LOCALTIMESTAMP|LOCALTIME|NOW)\b",
    )
    .expect("on update action pattern")
});

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)--.*$").expect("line comment pattern"));

static BLOCK_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)/\*.*?\*/").expect("block comment pattern"));

/// Schema text that passed the denylist and had its comments removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanitizedSql(String);

impl SanitizedSql {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for SanitizedSql {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SanitizedSql {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Reject dangerous input, then strip `--` and `/* */` comments and trim.
pub fn sanitize(raw: &str) -> Result<SanitizedSql, GenerateError> {
    if let Some(rule) = blocked_rule(raw) {
        return Err(GenerateError::UnsafeInput { rule });
    }

    let without_lines = LINE_COMMENT.replace_all(raw, "");
    let without_blocks = BLOCK_COMMENT.replace_all(&without_lines, "");

    Ok(SanitizedSql(without_blocks.trim().to_string()))
}

/// Name of the first denylist rule `raw` trips, if any.
pub fn blocked_rule(raw: &str) -> Option<&'static str> {
    if let Some(rule) = RULES.iter().find(|r| r.pattern.is_match(raw)) {
        return Some(rule.name);
    }
    if has_update_statement(raw) {
        return Some("data modification");
    }
    None
}

/// `UPDATE ... SET` on one line, ignoring the `ON UPDATE <action>` clause
/// of column and foreign key definitions.
fn has_update_statement(raw: &str) -> bool {
    UPDATE_KEYWORD.find_iter(raw).any(|m| {
        let tail = &raw[m.end()..];
        let on_update_clause =
            preceded_by_on(&raw[..m.start()]) && ON_UPDATE_ACTION.is_match(tail);
        !on_update_clause && SET_TAIL.is_match(tail)
    })
}

fn preceded_by_on(before: &str) -> bool {
    let trimmed = before.trim_end();
    let start = trimmed
        .char_indices()
        .rev()
        .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
        .map_or(0, |(i, c)| i + c.len_utf8());
    trimmed[start..].eq_ignore_ascii_case("on")
}
