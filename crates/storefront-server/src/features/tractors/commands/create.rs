use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::features::tractors::coerce;
use crate::features::tractors::types::{Tractor, TractorError, TractorStock};

/// Form as posted by the admin UI; `price` and `quantity` arrive as numbers
/// or strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTractorCommand {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<JsonValue>,
    #[serde(default)]
    pub quantity: Option<JsonValue>,
}

/// Values as they are stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTractor {
    pub name: String,
    pub photo_url: Option<String>,
    pub description: Option<String>,
    pub price_cents: i64,
    pub quantity: i32,
}

impl CreateTractorCommand {
    pub fn validate(self) -> Result<NewTractor, TractorError> {
        let name = coerce::text(self.name).ok_or(TractorError::NameRequired)?;
        Ok(NewTractor {
            name,
            photo_url: coerce::text(self.photo),
            description: coerce::text(self.description),
            price_cents: coerce::price_cents(self.price.as_ref()),
            quantity: coerce::quantity(self.quantity.as_ref()),
        })
    }
}

#[tracing::instrument(skip(pool, command), fields(table = stock.table()))]
pub async fn handle(
    pool: &PgPool,
    stock: TractorStock,
    command: CreateTractorCommand,
) -> Result<Tractor, TractorError> {
    let new = command.validate()?;

    let mut insert = QueryBuilder::<Postgres>::new("INSERT INTO ");
    insert
        .push(stock.table())
        .push(" (name, photo_url, description, price_cents, quantity) VALUES (")
        .push_bind(new.name)
        .push(", ")
        .push_bind(new.photo_url)
        .push(", ")
        .push_bind(new.description)
        .push(", ")
        .push_bind(new.price_cents)
        .push(", ")
        .push_bind(new.quantity)
        .push(") RETURNING *");

    let tractor = insert.build_query_as::<Tractor>().fetch_one(pool).await?;
    tracing::info!(item_id = tractor.id, "Tractor created");
    Ok(tractor)
}
