//! Restaurant CRUD REST service: axum handlers over an injected store.

pub mod config;
pub mod error;
pub mod handlers;
pub mod model;
pub mod response;
pub mod routes;
pub mod state;
pub mod store;

pub use config::Config;
pub use error::{AppError, ConfigError};
pub use model::{NewRestaurant, Paging, Restaurant, RestaurantUpdate};
pub use routes::{common_routes, restaurant_routes};
pub use state::AppState;
pub use store::{
    ensure_database_exists, ensure_schema, MemoryStore, PgRestaurantStore, RestaurantStore,
};
