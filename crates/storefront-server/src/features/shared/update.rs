//! Dynamic `UPDATE ... SET` statements for PATCH handlers, plus by-id fetch and delete
//!
//! Each assigned column is bound through [`sqlx::QueryBuilder`] and recorded
//! in a `changes` object that ends up in the audit meta:
//!
//! ```rust,ignore
//! let mut update = UpdateStatement::new("brands");
//! if let Some(name) = command.name {
//!     update.set("name", name);
//! }
//! let row: Option<Brand> = update.fetch_optional(pool, id).await?;
//! let changes = update.into_changes();
//! ```

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use sqlx::{Encode, FromRow, Postgres, QueryBuilder, Type};

pub struct UpdateStatement<'args> {
    builder: QueryBuilder<'args, Postgres>,
    changes: Map<String, JsonValue>,
    assignments: usize,
    touch_updated_at: bool,
}

impl<'args> UpdateStatement<'args> {
    /// `table` must be a trusted identifier, never client input.
    pub fn new(table: &'static str) -> Self {
        let mut builder = QueryBuilder::new("UPDATE ");
        builder.push(table).push(" SET ");
        Self {
            builder,
            changes: Map::new(),
            assignments: 0,
            touch_updated_at: false,
        }
    }

    /// Also bump `updated_at` when the statement runs.
    pub fn touch_updated_at(mut self) -> Self {
        self.touch_updated_at = true;
        self
    }

    /// Assign `column = value`; the change is recorded as the JSON form of `value`.
    pub fn set<T>(&mut self, column: &'static str, value: T) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Serialize + Send,
    {
        let change = serde_json::to_value(&value).unwrap_or(JsonValue::Null);
        self.set_recorded(column, value, change)
    }

    /// Assign `column = value` but record `change` in the audit changes.
    pub fn set_recorded<T>(&mut self, column: &'static str, value: T, change: JsonValue) -> &mut Self
    where
        T: 'args + Encode<'args, Postgres> + Type<Postgres> + Send,
    {
        if self.assignments > 0 {
            self.builder.push(", ");
        }
        self.builder.push(column).push(" = ").push_bind(value);
        self.assignments += 1;
        self.changes.insert(column.to_string(), change);
        self
    }

    /// Record a change that is applied outside this statement (e.g. child rows).
    pub fn record_change(&mut self, key: &str, change: JsonValue) -> &mut Self {
        self.changes.insert(key.to_string(), change);
        self
    }

    /// No column assignment yet: running the statement would be a syntax error.
    pub fn has_assignments(&self) -> bool {
        self.assignments > 0
    }

    /// Nothing was changed at all, not even outside the statement.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// The statement text built so far (for logging and tests).
    pub fn sql(&self) -> &str {
        self.builder.sql()
    }

    /// Run the update against row `id` and return the updated row, or `None`
    /// when no such row exists.
    pub async fn fetch_optional<'c, E, T>(&mut self, executor: E, id: i64) -> Result<Option<T>, sqlx::Error>
    where
        E: sqlx::Executor<'c, Database = Postgres>,
        T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        if self.touch_updated_at {
            self.builder.push(", updated_at = NOW()");
        }
        self.builder.push(" WHERE id = ").push_bind(id).push(" RETURNING *");
        self.builder.build_query_as::<T>().fetch_optional(executor).await
    }

    pub fn into_changes(self) -> Map<String, JsonValue> {
        self.changes
    }
}

/// Fetch a row by id when a PATCH carried nothing to write.
pub async fn fetch_by_id<'c, E, T>(executor: E, table: &'static str, id: i64) -> Result<Option<T>, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Postgres>,
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    let mut builder = QueryBuilder::<Postgres>::new("SELECT * FROM ");
    builder.push(table).push(" WHERE id = ").push_bind(id);
    builder.build_query_as::<T>().fetch_optional(executor).await
}

/// Delete row `id`; returns the number of rows removed (0 or 1).
pub async fn delete_by_id<'c, E>(executor: E, table: &'static str, id: i64) -> Result<u64, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Postgres>,
{
    let mut builder = QueryBuilder::<Postgres>::new("DELETE FROM ");
    builder.push(table).push(" WHERE id = ").push_bind(id);
    let result = builder.build().execute(executor).await?;
    Ok(result.rows_affected())
}
