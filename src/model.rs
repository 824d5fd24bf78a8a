//! Restaurant entity, its partial-update projection, and list paging.

use serde::{Deserialize, Serialize};

/// Persistent entity. The storage column for `address` is `addr`; the JSON
/// field stays `address`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    #[sqlx(rename = "addr")]
    pub address: String,
}

/// Create payload. Storage assigns the id; a client-supplied id is ignored.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewRestaurant {
    pub name: String,
    pub address: String,
}

/// Partial update: a present field overwrites the column (empty string
/// included); an absent field leaves it untouched. JSON `null` counts as
/// absent.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl RestaurantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.address.is_none()
    }
}

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 1000;

/// List query parameters. `page` is 1-based.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

impl Paging {
    /// Non-positive or absent pages normalize to 1.
    pub fn page(&self) -> i64 {
        match self.page {
            Some(p) if p > 0 => p,
            _ => 1,
        }
    }

    /// Non-positive or absent limits fall back to DEFAULT_LIMIT; capped at MAX_LIMIT.
    pub fn limit(&self) -> i64 {
        match self.limit {
            Some(l) if l > 0 => l.min(MAX_LIMIT),
            _ => DEFAULT_LIMIT,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.limit()
    }
}
