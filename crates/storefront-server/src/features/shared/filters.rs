//! WHERE-clause assembly for list queries
//!
//! ```rust,ignore
//! let mut builder = QueryBuilder::new("SELECT COUNT(*) FROM services");
//! let mut filters = Filters::new(&mut builder);
//! if let Some(status) = &query.status {
//!     filters.and().push("status = ").push_bind(status.clone());
//! }
//! ```

use sqlx::{Postgres, QueryBuilder};

/// Prefixes the first condition with ` WHERE ` and the rest with ` AND `.
pub struct Filters<'b, 'args> {
    builder: &'b mut QueryBuilder<'args, Postgres>,
    empty: bool,
}

impl<'b, 'args> Filters<'b, 'args> {
    pub fn new(builder: &'b mut QueryBuilder<'args, Postgres>) -> Self {
        Self {
            builder,
            empty: true,
        }
    }

    /// Start a new condition and hand back the builder to write it.
    pub fn and(&mut self) -> &mut QueryBuilder<'args, Postgres> {
        self.builder
            .push(if self.empty { " WHERE " } else { " AND " });
        self.empty = false;
        &mut *self.builder
    }

    /// `(col1 ILIKE $n OR col2 ILIKE $n+1 ...)` with a substring pattern.
    pub fn contains_any(&mut self, columns: &[&'static str], needle: &str) {
        let pattern = contains_pattern(needle);
        let builder = self.and();
        builder.push("(");
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                builder.push(" OR ");
            }
            builder.push(*column).push(" ILIKE ").push_bind(pattern.clone());
        }
        builder.push(")");
    }
}

/// Trimmed, non-empty search text from an optional query parameter.
pub fn search_text(q: Option<&str>) -> Option<&str> {
    q.map(str::trim).filter(|q| !q.is_empty())
}

/// `%needle%` with LIKE wildcards in `needle` escaped.
pub fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_where_then_and() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM products");
        let mut filters = Filters::new(&mut builder);
        filters.contains_any(&["title_it", "slug"], "fendt");
        filters.and().push("status = ").push_bind("PUBLISHED");
        assert_eq!(
            builder.sql(),
            "SELECT * FROM products WHERE (title_it ILIKE $1 OR slug ILIKE $2) AND status = $3"
        );
    }

    #[test]
    fn test_no_filters_leaves_query_untouched() {
        let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM services");
        let _ = Filters::new(&mut builder);
        assert_eq!(builder.sql(), "SELECT * FROM services");
    }

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("fendt"), "%fendt%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
    }

    #[test]
    fn test_search_text() {
        assert_eq!(search_text(Some("  john deere ")), Some("john deere"));
        assert_eq!(search_text(Some("   ")), None);
        assert_eq!(search_text(None), None);
    }
}
