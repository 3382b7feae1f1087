use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value as JsonValue};
use sqlx::PgPool;

use crate::features::blog::types::{BlogError, BlogPost};
use crate::features::shared::patch::deserialize_some;
use crate::features::shared::update::UpdateStatement;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdatePostCommand {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub slug: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub title_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub excerpt_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub excerpt_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content_it: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub content_en: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub cover_media_id: Option<Option<i64>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub status: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub published_at: Option<Option<DateTime<Utc>>>,
}

impl UpdatePostCommand {
    fn statement(self) -> UpdateStatement<'static> {
        let mut update = UpdateStatement::new("blog_posts").touch_updated_at();
        for (column, value) in [
            ("slug", self.slug),
            ("title_it", self.title_it),
            ("title_en", self.title_en),
            ("excerpt_it", self.excerpt_it),
            ("excerpt_en", self.excerpt_en),
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
        if let Some(published_at) = self.published_at {
            update.set("published_at", published_at);
        }
        update
    }
}

#[tracing::instrument(skip(pool, command))]
pub async fn handle(
    pool: &PgPool,
    id: i64,
    command: UpdatePostCommand,
) -> Result<(BlogPost, Map<String, JsonValue>), BlogError> {
    let mut update = command.statement();
    if !update.has_assignments() {
        return Err(BlogError::NoFields);
    }

    let post = update
        .fetch_optional::<_, BlogPost>(pool, id)
        .await?
        .ok_or(BlogError::NotFound)?;

    Ok((post, update.into_changes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unpublish() {
        let cmd: UpdatePostCommand =
            serde_json::from_str(r#"{"status":"DRAFT","published_at":null}"#).unwrap();
        let update = cmd.statement();
        assert_eq!(
            update.sql(),
            "UPDATE blog_posts SET status = $1, published_at = $2"
        );
        assert_eq!(update.into_changes()["published_at"], JsonValue::Null);
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let cmd: UpdatePostCommand = serde_json::from_str(r#"{"views":10}"#).unwrap();
        assert!(!cmd.statement().has_assignments());
    }
}
