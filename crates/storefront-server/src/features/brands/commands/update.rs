use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sqlx::PgPool;

use crate::features::brands::types::{Brand, BrandError};
use crate::features::shared::patch::deserialize_some;
use crate::features::shared::update::UpdateStatement;

/// Present fields are written, `null` included.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBrandCommand {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub logo_media_id: Option<Option<i64>>,
}

impl UpdateBrandCommand {
    fn statement(self) -> UpdateStatement<'static> {
        let mut update = UpdateStatement::new("brands");
        if let Some(name) = self.name {
            update.set("name", name);
        }
        if let Some(slug) = self.slug {
            update.set("slug", slug);
        }
        if let Some(logo_media_id) = self.logo_media_id {
            update.set("logo_media_id", logo_media_id);
        }
        update
    }
}

/// Returns the updated brand and the applied `changes`.
#[tracing::instrument(skip(pool))]
pub async fn handle(
    pool: &PgPool,
    id: i64,
    command: UpdateBrandCommand,
) -> Result<(Brand, Map<String, JsonValue>), BrandError> {
    let mut update = command.statement();
    if !update.has_assignments() {
        return Err(BrandError::NoFields);
    }

    let brand = update
        .fetch_optional::<_, Brand>(pool, id)
        .await?
        .ok_or(BrandError::NotFound)?;

    Ok((brand, update.into_changes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_only_present_fields_are_assigned() {
        let cmd: UpdateBrandCommand =
            serde_json::from_str(r#"{"name":"Same Deutz-Fahr","logo_media_id":null}"#).unwrap();
        let update = cmd.statement();
        assert_eq!(update.sql(), "UPDATE brands SET name = $1, logo_media_id = $2");
        assert_eq!(
            JsonValue::Object(update.into_changes()),
            json!({ "name": "Same Deutz-Fahr", "logo_media_id": null })
        );
    }

    #[tokio::test]
    async fn test_empty_body_is_rejected_before_touching_the_pool() {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy("postgres://localhost/unused")
            .unwrap();
        let err = handle(&pool, 1, UpdateBrandCommand::default()).await.unwrap_err();
        assert!(matches!(err, BrandError::NoFields));
    }
}
