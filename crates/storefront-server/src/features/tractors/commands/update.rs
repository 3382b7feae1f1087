use serde::Deserialize;
use serde_json::{json, Map, Value as JsonValue};
use sqlx::PgPool;

use crate::features::shared::patch::deserialize_some;
use crate::features::shared::update::{fetch_by_id, UpdateStatement};
use crate::features::tractors::coerce;
use crate::features::tractors::types::{Tractor, TractorError, TractorStock};

/// Present fields are written; empty text and `null` clear the column,
/// `price` / `quantity` go through the same coercions as on create.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTractorCommand {
    #[serde(default, deserialize_with = "deserialize_some")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub photo: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub price: Option<Option<JsonValue>>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub quantity: Option<Option<JsonValue>>,
}

impl UpdateTractorCommand {
    fn statement(self, table: &'static str) -> UpdateStatement<'static> {
        let mut update = UpdateStatement::new(table);
        for (column, value) in [
            ("name", self.name),
            ("photo_url", self.photo),
            ("description", self.description),
        ] {
            if let Some(value) = value {
                update.set(column, coerce::text(value));
            }
        }
        if let Some(price) = self.price {
            let cents = coerce::price_cents(price.as_ref());
            update.set_recorded("price_cents", cents, json!(cents));
        }
        if let Some(quantity) = self.quantity {
            update.set("quantity", coerce::quantity(quantity.as_ref()));
        }
        update
    }
}

/// Returns the stored row and the applied `changes` (empty when the body
/// carried no known field).
#[tracing::instrument(skip(pool, command), fields(table = stock.table()))]
pub async fn handle(
    pool: &PgPool,
    stock: TractorStock,
    id: i64,
    command: UpdateTractorCommand,
) -> Result<(Tractor, Map<String, JsonValue>), TractorError> {
    let mut update = command.statement(stock.table());

    let tractor = if update.has_assignments() {
        update.fetch_optional::<_, Tractor>(pool, id).await?
    } else {
        fetch_by_id::<_, Tractor>(pool, stock.table(), id).await?
    };
    let tractor = tractor.ok_or(TractorError::NotFound)?;

    Ok((tractor, update.into_changes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(body: JsonValue) -> UpdateTractorCommand {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_statement_and_changes() {
        let update = command(json!({
            "photo": "",
            "price": "1.234,5",
            "quantity": null,
            "unknown": 1
        }))
        .statement("trattori_usati");

        assert_eq!(
            update.sql(),
            "UPDATE trattori_usati SET photo_url = $1, price_cents = $2, quantity = $3"
        );
        let changes = update.into_changes();
        assert_eq!(changes["photo_url"], JsonValue::Null);
        assert_eq!(changes["price_cents"], json!(0));
        assert_eq!(changes["quantity"], json!(0));
    }

    #[test]
    fn test_price_number_stays_cents() {
        let changes = command(json!({ "price": 990 }))
            .statement("trattori_nuovi")
            .into_changes();
        assert_eq!(changes["price_cents"], json!(990));
    }

    #[test]
    fn test_unknown_fields_only() {
        let update = command(json!({ "color": "red" })).statement("trattori_nuovi");
        assert!(!update.has_assignments());
        assert!(!update.has_changes());
    }

    #[sqlx::test(migrations = "../../migrations")]
    #[ignore] // Requires database
    async fn test_missing_row_is_not_found(pool: PgPool) {
        let result = handle(&pool, TractorStock::New, 777, command(json!({ "name": "x" }))).await;
        assert!(matches!(result, Err(TractorError::NotFound)));

        let result = handle(&pool, TractorStock::New, 777, command(json!({}))).await;
        assert!(matches!(result, Err(TractorError::NotFound)));
    }
}
