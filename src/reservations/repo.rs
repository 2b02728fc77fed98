use anyhow::Context;
use async_trait::async_trait;

use crate::db::PgStore;
use crate::reservations::dto::{ReservationRequest, ReservationView};

/// Reservation store. Every mutation is scoped to the owning user.
#[async_trait]
pub trait ReservationRepo: Send + Sync {
    /// Reservations owned by `user_id`, newest date first.
    async fn list_for_user(&self, user_id: i64) -> anyhow::Result<Vec<ReservationView>>;

    /// Inserts without capacity or restaurant checks; returns the new id.
    async fn create(&self, user_id: i64, req: &ReservationRequest) -> anyhow::Result<i64>;

    /// Returns the number of rows matching both id and owner.
    async fn update(
        &self,
        user_id: i64,
        reservation_id: i64,
        req: &ReservationRequest,
    ) -> anyhow::Result<u64>;

    /// Returns the number of rows matching both id and owner.
    async fn delete(&self, user_id: i64, reservation_id: i64) -> anyhow::Result<u64>;
}

#[async_trait]
impl ReservationRepo for PgStore {
    async fn list_for_user(&self, user_id: i64) -> anyhow::Result<Vec<ReservationView>> {
        let rows = sqlx::query_as::<_, ReservationView>(
            r#"
            SELECT r.reservation_id, r.restaurant_id, r.date, r.time, r.people_count,
                   t.name AS restaurant_name
            FROM reservations r
            JOIN restaurants t ON t.restaurant_id = r.restaurant_id
            WHERE r.user_id = $1
            ORDER BY r.date DESC, r.time DESC, r.reservation_id DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await
        .context("list reservations by user")?;
        Ok(rows)
    }

    async fn create(&self, user_id: i64, req: &ReservationRequest) -> anyhow::Result<i64> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO reservations (user_id, restaurant_id, date, time, people_count)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING reservation_id
            "#,
        )
        .bind(user_id)
        .bind(req.restaurant_id)
        .bind(req.date)
        .bind(req.time)
        .bind(req.people_count)
        .fetch_one(&self.db)
        .await
        .context("insert reservation")?;
        Ok(id)
    }

    async fn update(
        &self,
        user_id: i64,
        reservation_id: i64,
        req: &ReservationRequest,
    ) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            UPDATE reservations
               SET restaurant_id = $1, date = $2, time = $3, people_count = $4
             WHERE reservation_id = $5 AND user_id = $6
            "#,
        )
        .bind(req.restaurant_id)
        .bind(req.date)
        .bind(req.time)
        .bind(req.people_count)
        .bind(reservation_id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .context("update reservation")?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, user_id: i64, reservation_id: i64) -> anyhow::Result<u64> {
        let res = sqlx::query(
            r#"
            DELETE FROM reservations
             WHERE reservation_id = $1 AND user_id = $2
            "#,
        )
        .bind(reservation_id)
        .bind(user_id)
        .execute(&self.db)
        .await
        .context("delete reservation")?;
        Ok(res.rows_affected())
    }
}
