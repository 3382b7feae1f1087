use serde::Deserialize;
use sqlx::PgPool;

use crate::features::services::types::{Service, ServiceError};
use crate::features::shared::validation::{require_fields, status_or_default};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateServiceCommand {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title_it: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub content_it: Option<String>,
    #[serde(default)]
    pub content_en: Option<String>,
    #[serde(default)]
    pub cover_media_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl CreateServiceCommand {
    pub fn validate(&self) -> Result<(), ServiceError> {
        require_fields(&[
            ("slug", self.slug.as_deref()),
            ("title_it", self.title_it.as_deref()),
            ("content_it", self.content_it.as_deref()),
        ])?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(slug = ?command.slug))]
pub async fn handle(pool: &PgPool, command: CreateServiceCommand) -> Result<Service, ServiceError> {
    command.validate()?;

    let service = sqlx::query_as::<_, Service>(
        r#"
        INSERT INTO services (slug, title_it, title_en, content_it, content_en, cover_media_id, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(command.slug)
    .bind(command.title_it)
    .bind(command.title_en)
    .bind(command.content_it)
    .bind(command.content_en)
    .bind(command.cover_media_id)
    .bind(status_or_default(command.status))
    .fetch_one(pool)
    .await?;

    tracing::info!(service_id = service.id, "Service created");
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_fields() {
        let cmd: CreateServiceCommand =
            serde_json::from_str(r#"{"slug":"officina","title_it":"Officina"}"#).unwrap();
        assert_eq!(cmd.validate().unwrap_err().to_string(), "content_it required");
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_create_service(pool: PgPool) {
        let cmd: CreateServiceCommand = serde_json::from_str(
            r#"{"slug":"officina","title_it":"Officina","content_it":"Riparazioni"}"#,
        )
        .unwrap();
        let service = handle(&pool, cmd).await.unwrap();
        assert_eq!(service.status, "DRAFT");
        assert_eq!(service.title_en, None);
    }
}
