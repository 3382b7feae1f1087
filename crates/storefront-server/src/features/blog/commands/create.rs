use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::PgPool;

use crate::features::blog::types::{BlogError, BlogPost};
use crate::features::shared::validation::{require_fields, status_or_default};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreatePostCommand {
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub title_it: Option<String>,
    #[serde(default)]
    pub title_en: Option<String>,
    #[serde(default)]
    pub excerpt_it: Option<String>,
    #[serde(default)]
    pub excerpt_en: Option<String>,
    #[serde(default)]
    pub content_it: Option<String>,
    #[serde(default)]
    pub content_en: Option<String>,
    #[serde(default)]
    pub cover_media_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl CreatePostCommand {
    pub fn validate(&self) -> Result<(), BlogError> {
        require_fields(&[
            ("slug", self.slug.as_deref()),
            ("title_it", self.title_it.as_deref()),
            ("content_it", self.content_it.as_deref()),
        ])?;
        Ok(())
    }
}

#[tracing::instrument(skip(pool, command), fields(slug = ?command.slug))]
pub async fn handle(pool: &PgPool, command: CreatePostCommand) -> Result<BlogPost, BlogError> {
    command.validate()?;

    let post = sqlx::query_as::<_, BlogPost>(
        r#"
        INSERT INTO blog_posts
            (slug, title_it, title_en, excerpt_it, excerpt_en, content_it, content_en,
             cover_media_id, status, published_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING *
        "#,
    )
    .bind(command.slug)
    .bind(command.title_it)
    .bind(command.title_en)
    .bind(command.excerpt_it)
    .bind(command.excerpt_en)
    .bind(command.content_it)
    .bind(command.content_en)
    .bind(command.cover_media_id)
    .bind(status_or_default(command.status))
    .bind(command.published_at)
    .fetch_one(pool)
    .await?;

    tracing::info!(post_id = post.id, "Blog post created");
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_published_at_parses_rfc3339() {
        let cmd: CreatePostCommand = serde_json::from_str(
            r#"{"slug":"fiera","title_it":"Fiera","content_it":"...","published_at":"2025-03-01T09:00:00Z"}"#,
        )
        .unwrap();
        assert!(cmd.validate().is_ok());
        assert_eq!(
            cmd.published_at.map(|d| d.to_rfc3339()),
            Some("2025-03-01T09:00:00+00:00".to_string())
        );
    }

    #[test]
    fn test_missing_required() {
        assert_eq!(
            CreatePostCommand::default().validate().unwrap_err().to_string(),
            "slug, title_it, content_it required"
        );
    }
}
