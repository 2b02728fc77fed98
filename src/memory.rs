//! In-memory store used by tests in place of Postgres.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;

use crate::auth::{
    repo::UserRepo,
    repo_types::{NewUser, User},
};
use crate::reservations::{
    dto::{ReservationRequest, ReservationView},
    repo::ReservationRepo,
};
use crate::restaurants::{dto::Restaurant, repo::RestaurantRepo};

struct StoredReservation {
    reservation_id: i64,
    user_id: i64,
    req: ReservationRequest,
}

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
    restaurants: Vec<Restaurant>,
    reservations: Mutex<Vec<StoredReservation>>,
}

impl MemoryStore {
    /// Same restaurants as the seed migration.
    pub fn seeded() -> Self {
        let restaurant = |id, name: &str, location: &str, description: Option<&str>| Restaurant {
            restaurant_id: id,
            name: name.into(),
            location: location.into(),
            description: description.map(Into::into),
        };
        Self {
            restaurants: vec![
                restaurant(1, "Taverna Thalassa", "Athens", Some("Seafood by the harbour")),
                restaurant(2, "Ouzeri Kyma", "Thessaloniki", Some("Small plates and ouzo")),
                restaurant(3, "Pasta Rossa", "Athens", Some("Fresh handmade pasta")),
                restaurant(4, "Green Fork", "Patras", None),
            ],
            ..Default::default()
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }

    pub fn owner_of(&self, reservation_id: i64) -> Option<i64> {
        self.reservations
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.reservation_id == reservation_id)
            .map(|r| r.user_id)
    }
}

fn contains_ci(haystack: &str, needle: Option<&str>) -> bool {
    needle.map_or(true, |n| haystack.to_lowercase().contains(&n.to_lowercase()))
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn insert(&self, new: NewUser) -> anyhow::Result<Option<User>> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == new.email) {
            return Ok(None);
        }
        let user = User {
            user_id: users.len() as i64 + 1,
            name: new.name,
            email: new.email,
            password_hash: new.password_hash,
            role: new.role,
            created_at: OffsetDateTime::now_utc(),
        };
        users.push(user.clone());
        Ok(Some(user))
    }
}

#[async_trait]
impl RestaurantRepo for MemoryStore {
    async fn search(
        &self,
        name: Option<&str>,
        location: Option<&str>,
    ) -> anyhow::Result<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .iter()
            .filter(|r| contains_ci(&r.name, name) && contains_ci(&r.location, location))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ReservationRepo for MemoryStore {
    async fn list_for_user(&self, user_id: i64) -> anyhow::Result<Vec<ReservationView>> {
        let reservations = self.reservations.lock().unwrap();
        let mut rows: Vec<ReservationView> = reservations
            .iter()
            .filter(|r| r.user_id == user_id)
            .filter_map(|r| {
                let restaurant = self
                    .restaurants
                    .iter()
                    .find(|t| t.restaurant_id == r.req.restaurant_id)?;
                Some(ReservationView {
                    reservation_id: r.reservation_id,
                    restaurant_id: r.req.restaurant_id,
                    date: r.req.date,
                    time: r.req.time,
                    people_count: r.req.people_count,
                    restaurant_name: restaurant.name.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| {
            (b.date, b.time, b.reservation_id).cmp(&(a.date, a.time, a.reservation_id))
        });
        Ok(rows)
    }

    async fn create(&self, user_id: i64, req: &ReservationRequest) -> anyhow::Result<i64> {
        let mut reservations = self.reservations.lock().unwrap();
        let reservation_id = reservations
            .iter()
            .map(|r| r.reservation_id)
            .max()
            .unwrap_or(0)
            + 1;
        reservations.push(StoredReservation {
            reservation_id,
            user_id,
            req: req.clone(),
        });
        Ok(reservation_id)
    }

    async fn update(
        &self,
        user_id: i64,
        reservation_id: i64,
        req: &ReservationRequest,
    ) -> anyhow::Result<u64> {
        let mut reservations = self.reservations.lock().unwrap();
        let mut affected = 0;
        for r in reservations
            .iter_mut()
            .filter(|r| r.reservation_id == reservation_id && r.user_id == user_id)
        {
            r.req = req.clone();
            affected += 1;
        }
        Ok(affected)
    }

    async fn delete(&self, user_id: i64, reservation_id: i64) -> anyhow::Result<u64> {
        let mut reservations = self.reservations.lock().unwrap();
        let before = reservations.len();
        reservations.retain(|r| !(r.reservation_id == reservation_id && r.user_id == user_id));
        Ok((before - reservations.len()) as u64)
    }
}
