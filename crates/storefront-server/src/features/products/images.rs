//! Product image rows and reference normalization shared by reads and writes

use std::collections::HashMap;

use serde_json::{json, Value as JsonValue};
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder};

use super::types::{ImageInput, ImageMedia, ProductImage};

#[derive(Debug, FromRow)]
struct ImageRow {
    id: i64,
    product_id: i64,
    sort_order: i32,
    url: Option<String>,
}

/// Images of the given products, grouped by product and ordered by position.
pub async fn images_by_product<'c, E>(
    executor: E,
    product_ids: &[i64],
) -> Result<HashMap<i64, Vec<ProductImage>>, sqlx::Error>
where
    E: sqlx::Executor<'c, Database = Postgres>,
{
    let mut grouped: HashMap<i64, Vec<ProductImage>> = HashMap::new();
    if product_ids.is_empty() {
        return Ok(grouped);
    }

    let rows = sqlx::query_as::<_, ImageRow>(
        r#"
        SELECT pi.id, pi.product_id, pi.sort_order, m.url
        FROM product_images pi
        LEFT JOIN media m ON m.id = pi.media_id
        WHERE pi.product_id = ANY($1)
        ORDER BY pi.sort_order ASC, pi.id ASC
        "#,
    )
    .bind(product_ids)
    .fetch_all(executor)
    .await?;

    for row in rows {
        grouped.entry(row.product_id).or_default().push(ProductImage {
            id: row.id,
            order: row.sort_order,
            media: ImageMedia { url: row.url },
        });
    }
    Ok(grouped)
}

/// Create a media row and a product_images row per input image.
pub async fn insert_images(
    conn: &mut PgConnection,
    product_id: i64,
    images: &[ImageInput],
) -> Result<(), sqlx::Error> {
    for image in images {
        let media_id: i64 = sqlx::query_scalar("INSERT INTO media (url) VALUES ($1) RETURNING id")
            .bind(&image.url)
            .fetch_one(&mut *conn)
            .await?;

        sqlx::query(
            "INSERT INTO product_images (product_id, media_id, sort_order) VALUES ($1, $2, $3)",
        )
        .bind(product_id)
        .bind(media_id)
        .bind(image.order)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Drop the current image list and insert `images` in its place.
pub async fn replace_images(
    conn: &mut PgConnection,
    product_id: i64,
    images: &[ImageInput],
) -> Result<(), sqlx::Error> {
    sqlx::query("DELETE FROM product_images WHERE product_id = $1")
        .bind(product_id)
        .execute(&mut *conn)
        .await?;
    insert_images(conn, product_id, images).await
}

/// `[{url, order}]` as recorded in audit changes.
pub fn images_change(images: &[ImageInput]) -> JsonValue {
    JsonValue::Array(
        images
            .iter()
            .map(|image| json!({ "url": image.url, "order": image.order }))
            .collect(),
    )
}

/// Keep `id` only if it names an existing row of `table`; anything else
/// (missing, non-positive, dangling) becomes `None`.
pub async fn existing_id(
    conn: &mut PgConnection,
    table: &'static str,
    id: Option<i64>,
) -> Result<Option<i64>, sqlx::Error> {
    let Some(id) = id.filter(|id| *id > 0) else {
        return Ok(None);
    };

    let mut builder = QueryBuilder::<Postgres>::new("SELECT id FROM ");
    builder.push(table).push(" WHERE id = ").push_bind(id).push(" LIMIT 1");
    builder
        .build_query_scalar::<i64>()
        .fetch_optional(&mut *conn)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_images_change_shape() {
        let images = vec![
            ImageInput {
                url: "/uploads/front.jpg".into(),
                order: 0,
            },
            ImageInput {
                url: "/uploads/cab.jpg".into(),
                order: 1,
            },
        ];
        assert_eq!(
            images_change(&images),
            json!([
                { "url": "/uploads/front.jpg", "order": 0 },
                { "url": "/uploads/cab.jpg", "order": 1 },
            ])
        );
    }
}
