use super::types::{ArrayFormat, Condition, Filter, FilterMap, FilterOp, FilterValue, Operand, QueryOptions};

/// Turns a [`FilterMap`] into ordered key/value pairs under one set of options.
pub struct QueryFilter<'a> {
    options: &'a QueryOptions,
}

impl<'a> QueryFilter<'a> {
    pub fn new(options: &'a QueryOptions) -> Self {
        Self { options }
    }

    pub fn generate(options: &QueryOptions, filters: &FilterMap) -> Vec<(String, String)> {
        let query_filter = QueryFilter::new(options);
        let mut pairs = Vec::new();
        for (field, filter) in filters.iter() {
            query_filter.push_filter(field, filter, &mut pairs);
        }
        pairs
    }

    pub fn push_filter(&self, field: &str, filter: &Filter, pairs: &mut Vec<(String, String)>) {
        if self.should_skip(filter) {
            return;
        }
        match filter {
            Filter::Condition(condition) => self.push_condition(field, condition, pairs),
            Filter::List(values) => self.push_list(field, values, pairs),
            Filter::Scalar(value) => pairs.push((field.to_string(), Self::format_value(value))),
        }
    }

    /// Null and empty-string entries are dropped whole, depending on options.
    /// `0` and `false` are always kept.
    pub fn should_skip(&self, filter: &Filter) -> bool {
        match filter {
            Filter::Scalar(v) if v.is_null() => self.options.skip_null,
            Filter::Scalar(v) if v.is_empty_text() => self.options.skip_empty_string,
            _ => false,
        }
    }

    pub fn format_value(value: &FilterValue) -> String {
        value.to_string()
    }

    fn push_condition(&self, field: &str, condition: &Condition, pairs: &mut Vec<(String, String)>) {
        let key = format!("{}[{}]", field, condition.operator);
        match &condition.value {
            Operand::One(value) => pairs.push((key, Self::format_value(value))),
            Operand::Many(values) if condition.operator == FilterOp::In => {
                pairs.push((key, Self::join(values)));
            }
            Operand::Many(values) => {
                for value in values {
                    pairs.push((key.clone(), Self::format_value(value)));
                }
            }
        }
    }

    fn push_list(&self, field: &str, values: &[FilterValue], pairs: &mut Vec<(String, String)>) {
        match self.options.array_format {
            ArrayFormat::Repeat => {
                for value in values {
                    pairs.push((field.to_string(), Self::format_value(value)));
                }
            }
            ArrayFormat::Comma => pairs.push((field.to_string(), Self::join(values))),
            ArrayFormat::Bracket => pairs.push((format!("{}[]", field), Self::join(values))),
        }
    }

    fn join(values: &[FilterValue]) -> String {
        values.iter().map(Self::format_value).collect::<Vec<_>>().join(",")
    }
}
