//! Shorthand constructors for filter conditions and sort fields.

use super::types::{Condition, FilterOp, FilterValue, Operand, SortDirection, SortField};

fn condition(operator: FilterOp, value: impl Into<FilterValue>) -> Condition {
    Condition::with_operator(operator, Operand::One(value.into()))
}

pub fn eq(value: impl Into<FilterValue>) -> Condition {
    condition(FilterOp::Eq, value)
}

pub fn neq(value: impl Into<FilterValue>) -> Condition {
    condition(FilterOp::Neq, value)
}

pub fn gt(value: impl Into<FilterValue>) -> Condition {
    condition(FilterOp::Gt, value)
}

pub fn gte(value: impl Into<FilterValue>) -> Condition {
    condition(FilterOp::Gte, value)
}

pub fn lt(value: impl Into<FilterValue>) -> Condition {
    condition(FilterOp::Lt, value)
}

pub fn lte(value: impl Into<FilterValue>) -> Condition {
    condition(FilterOp::Lte, value)
}

/// Substring match.
pub fn like(value: impl Into<String>) -> Condition {
    condition(FilterOp::Like, FilterValue::Text(value.into()))
}

pub fn in_array<T: Into<FilterValue>>(values: impl IntoIterator<Item = T>) -> Condition {
    Condition::with_operator(FilterOp::In, Operand::Many(values.into_iter().map(Into::into).collect()))
}

pub fn sort_asc(field: impl Into<String>) -> SortField {
    SortField { field: field.into(), direction: SortDirection::Asc }
}

pub fn sort_desc(field: impl Into<String>) -> SortField {
    SortField { field: field.into(), direction: SortDirection::Desc }
}

/// Build a [`FilterMap`](super::FilterMap) literal in insertion order.
///
/// ```
/// use soc_admin::filters;
/// use soc_admin::query::{build_query, like, QueryParams};
///
/// let params = QueryParams {
///     filters: filters! { "active" => true, "name" => like("silva") },
///     ..Default::default()
/// };
/// assert_eq!(build_query(&params), "?active=true&name%5Blike%5D=silva");
/// ```
#[macro_export]
macro_rules! filters {
    () => {
        $crate::query::FilterMap::new()
    };
    ($($field:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::query::FilterMap::new();
        $(map.insert($field, $value);)+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_helpers_build_plain_records() {
        assert_eq!(sort_asc("name"), SortField { field: "name".into(), direction: SortDirection::Asc });
        assert_eq!(sort_desc("createdAt"), SortField { field: "createdAt".into(), direction: SortDirection::Desc });
    }

    #[test]
    fn operator_helpers_tag_the_value() {
        assert_eq!(gte(18), Condition { operator: FilterOp::Gte, value: Operand::One(FilterValue::Int(18)) });
        assert_eq!(neq("deleted").operator, FilterOp::Neq);
        assert_eq!(
            in_array(vec!["ADMIN", "USER"]).value,
            Operand::Many(vec![FilterValue::Text("ADMIN".into()), FilterValue::Text("USER".into())])
        );
    }
}
