use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sqlx::PgPool;

use crate::features::services::types::{Service, ServiceError};
use crate::features::shared::patch::deserialize_some;
use crate::features::shared::update::UpdateStatement;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateServiceCommand {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub cover_media_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
}

impl UpdateServiceCommand {
    fn statement(self) -> UpdateStatement<'static> {
        let mut update = UpdateStatement::new("services").touch_updated_at();
        for (column, value) in [
            ("slug", self.slug),
            ("title_it", self.title_it),
            ("title_en", self.title_en),
            ("content_it", self.content_it),
            ("content_en", self.content_en),
            ("status", self.status),
        ] {
            if let Some(value) = value {
                update.set(column, value);
            }
        }
        if let Some(cover_media_id) = self.cover_media_id {
            update.set("cover_media_id", cover_media_id);
        }
        update
    }
}

#[tracing::instrument(skip(pool, command))]
pub async fn handle(
    pool: &PgPool,
    id: i64,
    command: UpdateServiceCommand,
) -> Result<(Service, Map<String, JsonValue>), ServiceError> {
    let mut update = command.statement();
    if !update.has_assignments() {
        return Err(ServiceError::NoFields);
    }

    let service = update
        .fetch_optional::<_, Service>(pool, id)
        .await?
        .ok_or(ServiceError::NotFound)?;

    Ok((service, update.into_changes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_and_media_columns() {
        let cmd: UpdateServiceCommand =
            serde_json::from_str(r#"{"status":"PUBLISHED","title_en":null,"cover_media_id":4}"#)
                .unwrap();
        let update = cmd.statement();
        assert_eq!(
            update.sql(),
            "UPDATE services SET title_en = $1, status = $2, cover_media_id = $3"
        );
        assert_eq!(
            JsonValue::Object(update.into_changes()),
            json!({ "title_en": null, "status": "PUBLISHED", "cover_media_id": 4 })
        );
    }
}
