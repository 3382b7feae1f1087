use serde::Deserialize;
use sqlx::PgPool;

use crate::features::categories::types::{Category, CategoryError};
use crate::features::shared::validation::require_fields;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategoryCommand {
    #[serde(default)]
    pub name_it: Option<String>,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl CreateCategoryCommand {
    pub fn validate(&self) -> Result<(), CategoryError> {
        require_fields(&[
            ("name_it", self.name_it.as_deref()),
            ("name_en", self.name_en.as_deref()),
            ("slug", self.slug.as_deref()),
        ])?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool), fields(slug = ?command.slug))]
pub async fn handle(pool: &PgPool, command: CreateCategoryCommand) -> Result<Category, CategoryError> {
    command.validate()?;

    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (name_it, name_en, slug)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(command.name_it)
    .bind(command.name_en)
    .bind(command.slug)
    .fetch_one(pool)
    .await?;

    tracing::info!(category_id = category.id, "Category created");
    Ok(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_names_and_slug_required() {
        let cmd = CreateCategoryCommand {
            name_it: Some("Trattori".into()),
            name_en: None,
            slug: Some(String::new()),
        };
        assert_eq!(cmd.validate().unwrap_err().to_string(), "name_en, slug required");
    }
}
