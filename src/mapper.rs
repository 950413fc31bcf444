//! Maps MySQL column types to Laravel `Blueprint` methods.

use crate::ast::{BuilderMethod, TypeDescriptor, TypeParam};
use crate::parser::tokens::split_top_level;

/// Map a lower- or upper-case SQL type name plus its raw `(..)` parameters
/// to a builder call. Unknown types fall back to `string`.
pub fn map_type(sql_type: &str, params: &str, unsigned: bool) -> TypeDescriptor {
    use BuilderMethod as M;

    let sql_type = sql_type.to_ascii_lowercase();
    let inner = param_inner(params);
    let signed = |plain: M, unsigned_variant: M| if unsigned { unsigned_variant } else { plain };

    match sql_type.as_str() {
        "int" | "integer" => TypeDescriptor::new(signed(M::Integer, M::UnsignedInteger)),
        "bigint" => TypeDescriptor::new(signed(M::BigInteger, M::UnsignedBigInteger)),
        "smallint" => TypeDescriptor::new(signed(M::SmallInteger, M::UnsignedSmallInteger)),
        "tinyint" if inner.map(str::trim) == Some("1") => TypeDescriptor::new(M::Boolean),
        "tinyint" => TypeDescriptor::new(signed(M::TinyInteger, M::UnsignedTinyInteger)),
        "varchar" => TypeDescriptor::with_params(M::String, length(inner)),
        "char" => TypeDescriptor::with_params(M::Char, length(inner)),
        "text" => TypeDescriptor::new(M::Text),
        "longtext" => TypeDescriptor::new(M::LongText),
        "mediumtext" => TypeDescriptor::new(M::MediumText),
        "decimal" | "numeric" => TypeDescriptor::with_params(
            signed(M::Decimal, M::UnsignedDecimal),
            precision_scale(inner),
        ),
        "float" => TypeDescriptor::new(signed(M::Float, M::UnsignedFloat)),
        "double" => TypeDescriptor::new(signed(M::Double, M::UnsignedDouble)),
        "datetime" => TypeDescriptor::new(M::DateTime),
        "timestamp" => TypeDescriptor::new(M::Timestamp),
        "date" => TypeDescriptor::new(M::Date),
        "time" => TypeDescriptor::new(M::Time),
        "json" => TypeDescriptor::new(M::Json),
        "enum" => TypeDescriptor::with_params(M::Enum, enum_values(inner)),
        _ => TypeDescriptor::new(M::String),
    }
}

/// `"(10, 2)"` -> `Some("10, 2")`
fn param_inner(params: &str) -> Option<&str> {
    params
        .trim()
        .strip_prefix('(')
        .and_then(|p| p.strip_suffix(')'))
}

fn number(s: &str) -> Option<u32> {
    let s = s.trim();
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

fn length(inner: Option<&str>) -> Vec<TypeParam> {
    inner
        .and_then(number)
        .map(|n| vec![TypeParam::Int(n)])
        .unwrap_or_default()
}

fn precision_scale(inner: Option<&str>) -> Vec<TypeParam> {
    let Some(inner) = inner else {
        return Vec::new();
    };
    let parts: Vec<&str> = inner.split(',').collect();
    match parts.as_slice() {
        [precision] => number(precision)
            .map(|p| vec![TypeParam::Int(p), TypeParam::Int(0)])
            .unwrap_or_default(),
        [precision, scale] => match (number(precision), number(scale)) {
            (Some(p), Some(s)) => vec![TypeParam::Int(p), TypeParam::Int(s)],
            _ => Vec::new(),
        },
        _ => Vec::new(),
    }
}

fn enum_values(inner: Option<&str>) -> Vec<TypeParam> {
    let Some(inner) = inner else {
        return Vec::new();
    };
    let values = split_top_level(inner)
        .into_iter()
        .map(|v| v.trim_matches(|c| c == ' ' || c == '\'' || c == '"').to_string())
        .collect();
    vec![TypeParam::List(values)]
}
