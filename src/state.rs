//! Shared application state for all routes: the injected storage capability.

use crate::store::RestaurantStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RestaurantStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }
}
