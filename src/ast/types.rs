use serde::Serialize;

/// Laravel `Blueprint` method a column maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BuilderMethod {
    Integer,
    UnsignedInteger,
    BigInteger,
    UnsignedBigInteger,
    SmallInteger,
    UnsignedSmallInteger,
    TinyInteger,
    UnsignedTinyInteger,
    Boolean,
    String,
    Char,
    Text,
    LongText,
    MediumText,
    Decimal,
    UnsignedDecimal,
    Float,
    UnsignedFloat,
    Double,
    UnsignedDouble,
    DateTime,
    Timestamp,
    Date,
    Time,
    Json,
    Enum,
}

impl BuilderMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuilderMethod::Integer => "integer",
            BuilderMethod::UnsignedInteger => "unsignedInteger",
            BuilderMethod::BigInteger => "bigInteger",
            BuilderMethod::UnsignedBigInteger => "unsignedBigInteger",
            BuilderMethod::SmallInteger => "smallInteger",
            BuilderMethod::UnsignedSmallInteger => "unsignedSmallInteger",
            BuilderMethod::TinyInteger => "tinyInteger",
            BuilderMethod::UnsignedTinyInteger => "unsignedTinyInteger",
            BuilderMethod::Boolean => "boolean",
            BuilderMethod::String => "string",
            BuilderMethod::Char => "char",
            BuilderMethod::Text => "text",
            BuilderMethod::LongText => "longText",
            BuilderMethod::MediumText => "mediumText",
            BuilderMethod::Decimal => "decimal",
            BuilderMethod::UnsignedDecimal => "unsignedDecimal",
            BuilderMethod::Float => "float",
            BuilderMethod::UnsignedFloat => "unsignedFloat",
            BuilderMethod::Double => "double",
            BuilderMethod::UnsignedDouble => "unsignedDouble",
            BuilderMethod::DateTime => "dateTime",
            BuilderMethod::Timestamp => "timestamp",
            BuilderMethod::Date => "date",
            BuilderMethod::Time => "time",
            BuilderMethod::Json => "json",
            BuilderMethod::Enum => "enum",
        }
    }
}

impl std::fmt::Display for BuilderMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extra argument passed to a builder method after the column name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum TypeParam {
    /// Length, precision or scale.
    Int(u32),
    /// Allowed values of an `enum` column.
    List(Vec<String>),
}

/// Builder call implied by a column's SQL type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    pub method: BuilderMethod,
    pub params: Vec<TypeParam>,
}

impl TypeDescriptor {
    pub fn new(method: BuilderMethod) -> Self {
        Self {
            method,
            params: Vec::new(),
        }
    }

    pub fn with_params(method: BuilderMethod, params: Vec<TypeParam>) -> Self {
        Self { method, params }
    }
}

impl Default for TypeDescriptor {
    fn default() -> Self {
        Self::new(BuilderMethod::String)
    }
}
