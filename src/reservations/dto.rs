use std::{fmt::Display, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use time::{Date, Time};

time::serde::format_description!(reservation_date, Date, "[year]-[month]-[day]");
time::serde::format_description!(reservation_time, Time, "[hour]:[minute]");

/// Accepts a JSON number or a numeric string such as `"1"`.
fn number_or_string<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw<T> {
        Number(T),
        Text(String),
    }

    match Raw::<T>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(de::Error::custom),
    }
}

/// Body of `POST /reservations` and `PUT /reservations/:id`.
///
/// Only type coercion is applied: ids and party size may arrive as numbers or
/// numeric strings, dates are `YYYY-MM-DD`, times `HH:MM`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(deserialize_with = "number_or_string")]
    pub restaurant_id: i64,
    #[serde(with = "reservation_date")]
    pub date: Date,
    #[serde(with = "reservation_time")]
    pub time: Time,
    #[serde(deserialize_with = "number_or_string")]
    pub people_count: i32,
}

/// A reservation joined with its restaurant's display name.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ReservationView {
    pub reservation_id: i64,
    pub restaurant_id: i64,
    #[serde(with = "reservation_date")]
    pub date: Date,
    #[serde(with = "reservation_time")]
    pub time: Time,
    pub people_count: i32,
    pub restaurant_name: String,
}
