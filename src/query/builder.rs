use std::fmt;

use url::form_urlencoded;

use super::query_filter::QueryFilter;
use super::query_sort::QuerySort;
use super::types::{FilterMap, QueryOptions, QueryParams, SortSpec};

/// Builds the query string of one list request.
///
/// The builder is an owned value: every `add_*` call consumes it and hands
/// back the extended builder, so parameters appear in call order.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    pairs: Vec<(String, String)>,
    options: QueryOptions,
}

impl QueryBuilder {
    pub fn new(options: QueryOptions) -> Self {
        Self { pairs: Vec::new(), options }
    }

    pub fn options(&self) -> &QueryOptions {
        &self.options
    }

    /// `page=0` is a real page and is kept.
    pub fn add_pagination(mut self, page: Option<u32>, size: Option<u32>) -> Self {
        if let Some(page) = page {
            self.pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(size) = size {
            self.pairs.push(("size".to_string(), size.to_string()));
        }
        self
    }

    pub fn add_search<S: AsRef<str>>(mut self, q: Option<S>) -> Self {
        if let Some(q) = q {
            let trimmed = q.as_ref().trim();
            if !trimmed.is_empty() {
                self.pairs.push(("q".to_string(), trimmed.to_string()));
            }
        }
        self
    }

    pub fn add_sort(mut self, sort: impl Into<SortSpec>) -> Self {
        if let Some(value) = QuerySort::generate(&sort.into()) {
            self.pairs.push(("sort".to_string(), value));
        }
        self
    }

    pub fn add_filters(mut self, filters: &FilterMap) -> Self {
        let pairs = QueryFilter::generate(&self.options, filters);
        self.pairs.extend(pairs);
        self
    }

    /// Key/value pairs in emission order, before encoding.
    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Pagination, search, sort and filters, always in that order.
    pub fn build(params: &QueryParams, options: QueryOptions) -> String {
        let query = QueryBuilder::new(options)
            .add_pagination(params.page, params.size)
            .add_search(params.q.as_deref())
            .add_sort(&params.sort)
            .add_filters(&params.filters)
            .to_string();
        tracing::debug!("Built query string: {:?}", query);
        query
    }

    fn encoded(&self) -> String {
        if self.options.encode_values {
            let mut serializer = form_urlencoded::Serializer::new(String::new());
            for (k, v) in &self.pairs {
                serializer.append_pair(k, v);
            }
            return serializer.finish();
        }
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", form_urlencoded::byte_serialize(k.as_bytes()).collect::<String>(), v))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// `""` when nothing was added, otherwise `?` followed by the
/// form-urlencoded pairs.
impl fmt::Display for QueryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.pairs.is_empty() {
            return Ok(());
        }
        write!(f, "?{}", self.encoded())
    }
}

/// [`QueryBuilder::build`] with default options.
pub fn build_query(params: &QueryParams) -> String {
    QueryBuilder::build(params, QueryOptions::default())
}
