//! Query string builder for filtering and sorting collections.

use std::fmt;

/// Fluent builder for the jsonbox query string grammar.
///
/// Pagination and ordering directives (`limit=`, `offset=`, `sort=`) are
/// `&`-joined in call order. Filter predicates form a single comma-joined
/// group carrying the `q=` marker once, on the first predicate. The built
/// string always starts with `?`, even when empty; the remote service
/// tolerates a bare `?`, and callers relying on it exist.
///
/// # Example
///
/// ```
/// use jsonbox_core::QueryBuilder;
///
/// let query = QueryBuilder::new()
///     .limit(3)
///     .offset(1)
///     .sort_asc("age")
///     .greater_than_or_equal("age", 40)
///     .build();
/// assert_eq!(query, "?limit=3&offset=1&sort=age&q=age:>=40");
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder {
    directives: Vec<String>,
    filters: Vec<String>,
}

impl QueryBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit the number of returned records.
    ///
    /// Calling this more than once appends a repeated `limit=` key; the
    /// builder does not deduplicate.
    pub fn limit(mut self, n: u32) -> Self {
        self.directives.push(format!("limit={n}"));
        self
    }

    /// Skip the first `n` records.
    pub fn offset(mut self, n: u32) -> Self {
        self.directives.push(format!("offset={n}"));
        self
    }

    /// Sort ascending by `field`.
    pub fn sort_asc(mut self, field: &str) -> Self {
        self.directives.push(format!("sort={field}"));
        self
    }

    /// Sort descending by `field`. The leading `-` signals descending
    /// order to the remote service.
    pub fn sort_desc(mut self, field: &str) -> Self {
        self.directives.push(format!("sort=-{field}"));
        self
    }

    /// Filter on `field := value`.
    pub fn equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.filter(field, ":=", value)
    }

    /// Filter on `field :> value`.
    pub fn greater_than(self, field: &str, value: impl fmt::Display) -> Self {
        self.filter(field, ":>", value)
    }

    /// Filter on `field :>= value`.
    pub fn greater_than_or_equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.filter(field, ":>=", value)
    }

    /// Filter on `field :< value`.
    pub fn less_than(self, field: &str, value: impl fmt::Display) -> Self {
        self.filter(field, ":<", value)
    }

    /// Filter on `field :<= value`.
    pub fn less_than_or_equal(self, field: &str, value: impl fmt::Display) -> Self {
        self.filter(field, ":<=", value)
    }

    /// Serialize the accumulated directives and filters.
    ///
    /// Does not consume the builder; building twice without further calls
    /// yields identical strings.
    pub fn build(&self) -> String {
        let mut query = String::from("?");
        query.push_str(&self.directives.join("&"));
        if !self.directives.is_empty() && !self.filters.is_empty() {
            query.push('&');
        }
        query.push_str(&self.filters.join(","));
        query
    }

    fn filter(mut self, field: &str, op: &str, value: impl fmt::Display) -> Self {
        // q= marks the start of the filter group and appears exactly once.
        let marker = if self.filters.is_empty() { "q=" } else { "" };
        self.filters.push(format!("{marker}{field}{op}{value}"));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directives_and_filter_group() {
        let query = QueryBuilder::new()
            .limit(3)
            .offset(1)
            .sort_asc("age")
            .greater_than_or_equal("age", "40")
            .build();
        assert_eq!(query, "?limit=3&offset=1&sort=age&q=age:>=40");
    }

    #[test]
    fn empty_builder_is_bare_question_mark() {
        assert_eq!(QueryBuilder::new().build(), "?");
    }

    #[test]
    fn build_is_idempotent() {
        let builder = QueryBuilder::new().limit(5).equal("name", "taro");
        assert_eq!(builder.build(), builder.build());
    }

    #[test]
    fn directives_only() {
        assert_eq!(QueryBuilder::new().limit(10).build(), "?limit=10");
    }

    #[test]
    fn filters_only() {
        let query = QueryBuilder::new()
            .equal("language", "JP")
            .less_than("age", 30)
            .build();
        assert_eq!(query, "?q=language:=JP,age:<30");
    }

    #[test]
    fn filter_marker_appears_once() {
        let query = QueryBuilder::new()
            .greater_than("age", 20)
            .less_than_or_equal("age", 65)
            .equal("name", "taro")
            .build();
        assert_eq!(query, "?q=age:>20,age:<=65,name:=taro");
    }

    #[test]
    fn sort_desc_prefixes_minus() {
        assert_eq!(QueryBuilder::new().sort_desc("age").build(), "?sort=-age");
    }

    #[test]
    fn repeated_directive_keys_are_preserved() {
        let query = QueryBuilder::new().limit(1).limit(2).build();
        assert_eq!(query, "?limit=1&limit=2");
    }
}
