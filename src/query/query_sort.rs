use super::error::QueryError;
use super::types::{SortDirection, SortField, SortKey, SortSpec};

pub struct QuerySort;

impl QuerySort {
    /// Normalized tokens in spec order: `desc` fields get a `-` prefix.
    pub fn tokens(spec: &SortSpec) -> Vec<String> {
        spec.keys.iter().map(SortKey::to_token).collect()
    }

    /// The single `sort` parameter value, or `None` when there is nothing to sort by.
    pub fn generate(spec: &SortSpec) -> Option<String> {
        let tokens = Self::tokens(spec);
        if tokens.is_empty() {
            return None;
        }
        Some(tokens.join(","))
    }

    /// Parse `"name,-createdAt"` or `"name asc, createdAt desc"`.
    pub fn parse(s: &str) -> Result<SortSpec, QueryError> {
        let mut keys = Vec::new();
        for part in s.split(',') {
            let trimmed = part.trim();
            if trimmed.is_empty() {
                continue;
            }
            let mut it = trimmed.split_whitespace();
            let Some(col) = it.next() else { continue };
            let key = match it.next() {
                None => SortKey::Token(col.to_string()),
                Some(dir) => {
                    let direction: SortDirection = dir.parse()?;
                    if col.starts_with('-') {
                        return Err(QueryError::InvalidSort(format!(
                            "'{}' mixes a '-' prefix with an explicit direction",
                            trimmed
                        )));
                    }
                    SortKey::Field(SortField { field: col.to_string(), direction })
                }
            };
            if let Some(extra) = it.next() {
                return Err(QueryError::InvalidSort(format!("unexpected '{}' in '{}'", extra, trimmed)));
            }
            keys.push(key);
        }
        Ok(SortSpec { keys })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::helpers::{sort_asc, sort_desc};

    #[test]
    fn mixed_tokens_and_fields_keep_order() {
        let spec = SortSpec {
            keys: vec![SortKey::Token("-updatedAt".into()), SortKey::Field(sort_asc("name"))],
        };
        assert_eq!(QuerySort::generate(&spec).as_deref(), Some("-updatedAt,name"));
    }

    #[test]
    fn empty_spec_generates_nothing() {
        assert_eq!(QuerySort::generate(&SortSpec::default()), None);
        assert_eq!(QuerySort::generate(&SortSpec::from("")), None);
    }

    #[test]
    fn parse_accepts_prefix_and_word_directions() {
        let spec = QuerySort::parse("name, createdAt desc ,-email").unwrap();
        assert_eq!(
            spec.keys,
            vec![
                SortKey::Token("name".into()),
                SortKey::Field(sort_desc("createdAt")),
                SortKey::Token("-email".into()),
            ]
        );
        assert_eq!(QuerySort::tokens(&spec), vec!["name", "-createdAt", "-email"]);
    }

    #[test]
    fn parse_rejects_unknown_direction() {
        assert!(matches!(QuerySort::parse("name sideways"), Err(QueryError::InvalidSort(_))));
        assert!(matches!(QuerySort::parse("-name desc"), Err(QueryError::InvalidSort(_))));
        assert!(matches!(QuerySort::parse("name asc extra"), Err(QueryError::InvalidSort(_))));
    }
}
