//! In-memory store: the substitutable double behind `RestaurantStore`.

use crate::error::AppError;
use crate::model::{NewRestaurant, Restaurant, RestaurantUpdate};
use crate::store::RestaurantStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    next_id: i64,
    rows: BTreeMap<i64, Restaurant>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RestaurantStore for MemoryStore {
    async fn create(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        let mut inner = self.inner.lock().unwrap();
        inner.next_id += 1;
        let row = Restaurant {
            id: inner.next_id,
            name: new.name,
            address: new.address,
        };
        inner.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        Ok(self.inner.lock().unwrap().rows.get(&id).cloned())
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Restaurant>, AppError> {
        let inner = self.inner.lock().unwrap();
        let rows = inner
            .rows
            .values()
            .rev()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .cloned()
            .collect();
        Ok(rows)
    }

    async fn update(&self, id: i64, patch: &RestaurantUpdate) -> Result<u64, AppError> {
        if patch.is_empty() {
            return Ok(0);
        }
        let mut inner = self.inner.lock().unwrap();
        let Some(row) = inner.rows.get_mut(&id) else {
            return Ok(0);
        };
        if let Some(name) = &patch.name {
            row.name = name.clone();
        }
        if let Some(address) = &patch.address {
            row.address = address.clone();
        }
        Ok(1)
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let removed = self.inner.lock().unwrap().rows.remove(&id);
        Ok(removed.map_or(0, |_| 1))
    }
}
