use anyhow::Context;
use async_trait::async_trait;

use crate::db::PgStore;
use crate::restaurants::dto::Restaurant;

#[async_trait]
pub trait RestaurantRepo: Send + Sync {
    /// Case-insensitive substring search; `None` filters match everything.
    async fn search(
        &self,
        name: Option<&str>,
        location: Option<&str>,
    ) -> anyhow::Result<Vec<Restaurant>>;
}

fn like_pattern(term: &str) -> String {
    format!("%{}%", term)
}

#[async_trait]
impl RestaurantRepo for PgStore {
    async fn search(
        &self,
        name: Option<&str>,
        location: Option<&str>,
    ) -> anyhow::Result<Vec<Restaurant>> {
        let rows = sqlx::query_as::<_, Restaurant>(
            r#"
            SELECT restaurant_id, name, location, description
            FROM restaurants
            WHERE ($1::text IS NULL OR name ILIKE $1)
              AND ($2::text IS NULL OR location ILIKE $2)
            ORDER BY restaurant_id
            "#,
        )
        .bind(name.map(like_pattern))
        .bind(location.map(like_pattern))
        .fetch_all(&self.db)
        .await
        .context("search restaurants")?;
        Ok(rows)
    }
}
