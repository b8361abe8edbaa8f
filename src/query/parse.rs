//! Textual forms of query inputs, as typed on a command line.

use std::convert::Infallible;
use std::str::FromStr;

use super::error::QueryError;
use super::types::{ArrayFormat, Condition, Filter, FilterMap, FilterOp, FilterValue, Operand, SortDirection};

impl FromStr for ArrayFormat {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "repeat" => Ok(ArrayFormat::Repeat),
            "comma" => Ok(ArrayFormat::Comma),
            "bracket" => Ok(ArrayFormat::Bracket),
            _ => Err(QueryError::InvalidArrayFormat(s.to_string())),
        }
    }
}

impl FromStr for SortDirection {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("asc") {
            Ok(SortDirection::Asc)
        } else if s.eq_ignore_ascii_case("desc") {
            Ok(SortDirection::Desc)
        } else {
            Err(QueryError::InvalidSort(format!("unknown direction '{}'", s)))
        }
    }
}

impl FromStr for FilterOp {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "eq" => FilterOp::Eq,
            "neq" => FilterOp::Neq,
            "gt" => FilterOp::Gt,
            "gte" => FilterOp::Gte,
            "lt" => FilterOp::Lt,
            "lte" => FilterOp::Lte,
            "like" => FilterOp::Like,
            "in" => FilterOp::In,
            other => FilterOp::Other(other.to_string()),
        })
    }
}

impl FilterValue {
    /// Typed literal. Numbers are only recognized when they print back
    /// unchanged, so `"007"` stays text.
    pub fn parse_literal(s: &str) -> FilterValue {
        match s {
            "true" => return FilterValue::Bool(true),
            "false" => return FilterValue::Bool(false),
            "null" => return FilterValue::Null,
            _ => {}
        }
        if let Ok(n) = s.parse::<i64>() {
            if n.to_string() == s {
                return FilterValue::Int(n);
            }
        }
        if let Ok(n) = s.parse::<f64>() {
            if n.is_finite() && n.to_string() == s {
                return FilterValue::Float(n);
            }
        }
        FilterValue::Text(s.to_string())
    }
}

/// One parsed `--filter` expression.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterExpr {
    pub field: String,
    /// `None` for `field=value`, `Some("")` for `field[]=a,b`.
    pub operator: Option<String>,
    pub raw_value: String,
}

impl FromStr for FilterExpr {
    type Err = QueryError;

    fn from_str(expr: &str) -> Result<Self, Self::Err> {
        let (key, raw_value) = expr
            .split_once('=')
            .ok_or_else(|| QueryError::InvalidFilter(format!("'{}' has no '='", expr)))?;
        let key = key.trim();

        let (field, operator) = match key.find('[') {
            None => (key, None),
            Some(open) => {
                let rest = &key[open + 1..];
                let op = rest
                    .strip_suffix(']')
                    .ok_or_else(|| QueryError::InvalidFilter(format!("unterminated '[' in '{}'", key)))?;
                if op.contains('[') || op.contains(']') {
                    return Err(QueryError::InvalidFilter(format!("nested brackets in '{}'", key)));
                }
                (&key[..open], Some(op.to_string()))
            }
        };

        if field.is_empty() {
            return Err(QueryError::InvalidFilter(format!("'{}' has an empty field name", expr)));
        }

        Ok(FilterExpr {
            field: field.to_string(),
            operator,
            raw_value: raw_value.to_string(),
        })
    }
}

impl FilterExpr {
    fn split_values(&self) -> Vec<FilterValue> {
        self.raw_value.split(',').map(FilterValue::parse_literal).collect()
    }

    pub fn into_filter(self) -> Filter {
        match self.operator.as_deref() {
            None => Filter::Scalar(FilterValue::parse_literal(&self.raw_value)),
            Some("") => Filter::List(self.split_values()),
            Some(op) => {
                let operator: FilterOp = match op.parse() {
                    Ok(op) => op,
                    Err(never) => match never {},
                };
                let value = if operator == FilterOp::In {
                    Operand::Many(self.split_values())
                } else {
                    Operand::One(FilterValue::parse_literal(&self.raw_value))
                };
                Filter::Condition(Condition::with_operator(operator, value))
            }
        }
    }

    /// Key under which the expression still renders identically when its
    /// field is already taken by another kind of filter.
    fn literal_key(&self) -> String {
        match &self.operator {
            None => self.field.clone(),
            Some(op) => format!("{}[{}]", self.field, op),
        }
    }
}

impl FilterMap {
    /// Fold one expression into the map.
    ///
    /// Repeated `field=value` expressions become an OR list. Repeating an
    /// operator on the same field repeats the bracketed key. When the field
    /// already holds a different kind of filter, the expression is stored
    /// under its literal bracketed key instead (`field[eq]` for a bare value),
    /// and later values for that key accumulate there.
    pub fn push_expr(&mut self, expr: FilterExpr) {
        let literal_key = expr.literal_key();
        let field = expr.field.clone();
        let raw = expr.raw_value.clone();
        let incoming = expr.into_filter();

        let merged = match (self.get(&field), incoming) {
            (None, incoming) => Some(incoming),
            (Some(prev), Filter::Scalar(next)) => append_scalar(prev, next),
            (Some(Filter::Condition(prev)), Filter::Condition(next))
                if prev.operator == next.operator && prev.operator != FilterOp::In =>
            {
                let mut values = match &prev.value {
                    Operand::One(v) => vec![v.clone()],
                    Operand::Many(vs) => vs.clone(),
                };
                if let Operand::One(v) = next.value {
                    values.push(v);
                }
                Some(Filter::Condition(Condition::with_operator(prev.operator.clone(), Operand::Many(values))))
            }
            _ => None,
        };

        match merged {
            Some(filter) => {
                self.insert(field, filter);
            }
            None => {
                // A bare value clashing with a condition keeps its meaning as `[eq]`.
                let literal_key = if literal_key == field { format!("{}[eq]", field) } else { literal_key };
                let value = FilterValue::Text(raw);
                let filter = match self.get(&literal_key) {
                    Some(prev) => append_scalar(prev, value.clone()).unwrap_or(Filter::Scalar(value)),
                    None => Filter::Scalar(value),
                };
                self.insert(literal_key, filter);
            }
        }
    }

    pub fn parse_exprs<S: AsRef<str>>(exprs: &[S]) -> Result<FilterMap, QueryError> {
        let mut map = FilterMap::new();
        for expr in exprs {
            map.push_expr(expr.as_ref().parse()?);
        }
        Ok(map)
    }
}

/// A scalar joins an existing scalar or list as one more OR value.
fn append_scalar(prev: &Filter, next: FilterValue) -> Option<Filter> {
    match prev {
        Filter::Scalar(prev) => Some(Filter::List(vec![prev.clone(), next])),
        Filter::List(prev) => {
            let mut values = prev.clone();
            values.push(next);
            Some(Filter::List(values))
        }
        Filter::Condition(_) => None,
    }
}
