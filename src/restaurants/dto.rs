use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Restaurant {
    pub restaurant_id: i64,
    pub name: String,
    pub location: String,
    pub description: Option<String>,
}

/// `?name=&location=` filters. Blank values are treated as absent.
#[derive(Debug, Default, Deserialize)]
pub struct RestaurantQuery {
    pub name: Option<String>,
    pub location: Option<String>,
}

impl RestaurantQuery {
    pub fn name(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    pub fn location(&self) -> Option<&str> {
        non_blank(self.location.as_deref())
    }
}

fn non_blank(v: Option<&str>) -> Option<&str> {
    v.map(str::trim).filter(|s| !s.is_empty())
}
