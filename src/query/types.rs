use std::fmt;

use serde::{Deserialize, Serialize};

/// Comparison operators understood by the API's bracket syntax (`field[op]=value`).
///
/// Unknown operators are carried verbatim in `Other` and rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FilterOp {
    #[default]
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    In,
    Other(String),
}

impl FilterOp {
    pub fn as_str(&self) -> &str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::Neq => "neq",
            FilterOp::Gt => "gt",
            FilterOp::Gte => "gte",
            FilterOp::Lt => "lt",
            FilterOp::Lte => "lte",
            FilterOp::Like => "like",
            FilterOp::In => "in",
            FilterOp::Other(op) => op,
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single filter value.
///
/// `Null` stands for both an explicit null and an absent value.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl FilterValue {
    pub fn is_null(&self) -> bool {
        matches!(self, FilterValue::Null)
    }

    pub fn is_empty_text(&self) -> bool {
        matches!(self, FilterValue::Text(s) if s.is_empty())
    }
}

impl fmt::Display for FilterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterValue::Null => f.write_str("null"),
            FilterValue::Bool(true) => f.write_str("true"),
            FilterValue::Bool(false) => f.write_str("false"),
            FilterValue::Int(n) => write!(f, "{}", n),
            FilterValue::Float(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            FilterValue::Float(n) => write!(f, "{}", n),
            FilterValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<&String> for FilterValue {
    fn from(v: &String) -> Self {
        FilterValue::Text(v.clone())
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Float(v)
    }
}

impl From<f32> for FilterValue {
    fn from(v: f32) -> Self {
        FilterValue::Float(f64::from(v))
    }
}

macro_rules! int_filter_value {
    ($($t:ty),*) => {
        $(impl From<$t> for FilterValue {
            fn from(v: $t) -> Self {
                FilterValue::Int(i64::from(v))
            }
        })*
    };
}

int_filter_value!(i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<FilterValue>> From<Option<T>> for FilterValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FilterValue::Null)
    }
}

/// Right-hand side of an explicit condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    One(FilterValue),
    Many(Vec<FilterValue>),
}

/// An explicit `field[operator]=value` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub operator: FilterOp,
    pub value: Operand,
}

impl Condition {
    /// Condition with the default `eq` operator.
    pub fn new(value: impl Into<FilterValue>) -> Self {
        Self {
            operator: FilterOp::default(),
            value: Operand::One(value.into()),
        }
    }

    pub fn with_operator(operator: FilterOp, value: Operand) -> Self {
        Self { operator, value }
    }
}

/// What a field in a [`FilterMap`] is filtered by.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Implicit equality, rendered as `field=value`.
    Scalar(FilterValue),
    /// Logical OR over the field, rendered according to [`ArrayFormat`].
    List(Vec<FilterValue>),
    /// Explicit operator, rendered with bracket syntax.
    Condition(Condition),
}

impl Filter {
    pub fn null() -> Self {
        Filter::Scalar(FilterValue::Null)
    }

    pub fn list<T: Into<FilterValue>>(values: impl IntoIterator<Item = T>) -> Self {
        Filter::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Condition> for Filter {
    fn from(c: Condition) -> Self {
        Filter::Condition(c)
    }
}

macro_rules! scalar_filter {
    ($($t:ty),*) => {
        $(impl From<$t> for Filter {
            fn from(v: $t) -> Self {
                Filter::Scalar(v.into())
            }
        })*
    };
}

scalar_filter!(FilterValue, bool, &str, String, &String, f32, f64, i8, i16, i32, i64, u8, u16, u32);

impl<T: Into<FilterValue>> From<Option<T>> for Filter {
    fn from(v: Option<T>) -> Self {
        Filter::Scalar(v.into())
    }
}

impl<T: Into<FilterValue>> From<Vec<T>> for Filter {
    fn from(v: Vec<T>) -> Self {
        Filter::list(v)
    }
}

/// Field name to filter mapping that keeps insertion order.
///
/// Field names may contain dots for nested paths (`address.state.code`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterMap {
    entries: Vec<(String, Filter)>,
}

impl FilterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    pub fn insert(&mut self, field: impl Into<String>, filter: impl Into<Filter>) -> Option<Filter> {
        let field = field.into();
        let filter = filter.into();
        match self.entries.iter_mut().find(|(k, _)| *k == field) {
            Some((_, existing)) => Some(std::mem::replace(existing, filter)),
            None => {
                self.entries.push((field, filter));
                None
            }
        }
    }

    pub fn with(mut self, field: impl Into<String>, filter: impl Into<Filter>) -> Self {
        self.insert(field, filter);
        self
    }

    pub fn get(&self, field: &str) -> Option<&Filter> {
        self.entries.iter().find(|(k, _)| k == field).map(|(_, v)| v)
    }

    pub fn remove(&mut self, field: &str) -> Option<Filter> {
        let idx = self.entries.iter().position(|(k, _)| k == field)?;
        Some(self.entries.remove(idx).1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Filter)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, F: Into<Filter>> FromIterator<(K, F)> for FilterMap {
    fn from_iter<I: IntoIterator<Item = (K, F)>>(iter: I) -> Self {
        let mut map = FilterMap::new();
        for (k, f) in iter {
            map.insert(k, f);
        }
        map
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn prefix(&self) -> &'static str {
        match self {
            SortDirection::Asc => "",
            SortDirection::Desc => "-",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Raw token, `-` prefix for descending.
    Token(String),
    Field(SortField),
}

impl SortKey {
    pub fn to_token(&self) -> String {
        match self {
            SortKey::Token(t) => t.clone(),
            SortKey::Field(f) => format!("{}{}", f.direction.prefix(), f.field),
        }
    }
}

/// Ordered sort specification; order decides the output order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    pub keys: Vec<SortKey>,
}

impl SortSpec {
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl From<&str> for SortSpec {
    fn from(token: &str) -> Self {
        if token.is_empty() {
            return SortSpec::default();
        }
        SortSpec { keys: vec![SortKey::Token(token.to_string())] }
    }
}

impl From<String> for SortSpec {
    fn from(token: String) -> Self {
        SortSpec::from(token.as_str())
    }
}

impl From<SortField> for SortSpec {
    fn from(field: SortField) -> Self {
        SortSpec { keys: vec![SortKey::Field(field)] }
    }
}

impl From<Vec<&str>> for SortSpec {
    fn from(tokens: Vec<&str>) -> Self {
        SortSpec { keys: tokens.into_iter().map(|t| SortKey::Token(t.to_string())).collect() }
    }
}

impl From<Vec<String>> for SortSpec {
    fn from(tokens: Vec<String>) -> Self {
        SortSpec { keys: tokens.into_iter().map(SortKey::Token).collect() }
    }
}

impl From<Vec<SortField>> for SortSpec {
    fn from(fields: Vec<SortField>) -> Self {
        SortSpec { keys: fields.into_iter().map(SortKey::Field).collect() }
    }
}

impl From<Vec<SortKey>> for SortSpec {
    fn from(keys: Vec<SortKey>) -> Self {
        SortSpec { keys }
    }
}

impl From<&SortSpec> for SortSpec {
    fn from(spec: &SortSpec) -> Self {
        spec.clone()
    }
}

impl<T: Into<SortSpec>> From<Option<T>> for SortSpec {
    fn from(spec: Option<T>) -> Self {
        spec.map(Into::into).unwrap_or_default()
    }
}

/// Everything one list request carries in its query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub q: Option<String>,
    pub sort: SortSpec,
    pub filters: FilterMap,
}

/// How bare-list (OR) filters are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayFormat {
    /// `field=a&field=b`
    #[default]
    Repeat,
    /// `field=a,b`
    Comma,
    /// `field[]=a,b`
    Bracket,
}

impl ArrayFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArrayFormat::Repeat => "repeat",
            ArrayFormat::Comma => "comma",
            ArrayFormat::Bracket => "bracket",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryOptions {
    pub array_format: ArrayFormat,
    pub skip_null: bool,
    pub skip_empty_string: bool,
    pub encode_values: bool,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            array_format: ArrayFormat::Repeat,
            skip_null: true,
            skip_empty_string: true,
            encode_values: true,
        }
    }
}
