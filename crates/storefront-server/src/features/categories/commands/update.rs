use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sqlx::PgPool;

use crate::features::categories::types::{Category, CategoryError};
use crate::features::shared::patch::deserialize_some;
use crate::features::shared::update::UpdateStatement;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCategoryCommand {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub slug: Option<Option<String>>,
}

impl UpdateCategoryCommand {
    fn statement(self) -> UpdateStatement<'static> {
        let mut update = UpdateStatement::new("categories");
        if let Some(name_it) = self.name_it {
            update.set("name_it", name_it);
        }
        if let Some(name_en) = self.name_en {
            update.set("name_en", name_en);
        }
        if let Some(slug) = self.slug {
            update.set("slug", slug);
        }
        update
    }
}

#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: &PgPool,
    id: i64,
    command: UpdateCategoryCommand,
) -> Result<(Category, Map<String, JsonValue>), CategoryError> {
    let mut update = command.statement();
    if !update.has_assignments() {
        return Err(CategoryError::NoFields);
    }

    let category = update
        .fetch_optional::<_, Category>(pool, id)
        .await?
        .ok_or(CategoryError::NotFound)?;

    Ok((category, update.into_changes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statement_columns() {
        let cmd: UpdateCategoryCommand =
            serde_json::from_str(r#"{"slug":"ricambi","name_en":"Spare parts"}"#).unwrap();
        assert_eq!(
            cmd.statement().sql(),
            "UPDATE categories SET name_en = $1, slug = $2"
        );
    }
}
