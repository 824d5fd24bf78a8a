//! sqlx-backed store plus schema and database bootstrap.

use crate::error::AppError;
use crate::model::{NewRestaurant, Restaurant, RestaurantUpdate};
use crate::store::RestaurantStore;
use async_trait::async_trait;
use sqlx::ConnectOptions;
use sqlx::PgPool;
use std::str::FromStr;

pub struct PgRestaurantStore {
    pool: PgPool,
}

impl PgRestaurantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantStore for PgRestaurantStore {
    async fn create(&self, new: NewRestaurant) -> Result<Restaurant, AppError> {
        let sql = "INSERT INTO restaurants (name, addr) VALUES ($1, $2) RETURNING id, name, addr";
        tracing::debug!(sql = %sql, "query");
        let row = sqlx::query_as::<_, Restaurant>(sql)
            .bind(&new.name)
            .bind(&new.address)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }

    async fn get(&self, id: i64) -> Result<Option<Restaurant>, AppError> {
        let sql = "SELECT id, name, addr FROM restaurants WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let row = sqlx::query_as::<_, Restaurant>(sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<Restaurant>, AppError> {
        let sql = "SELECT id, name, addr FROM restaurants ORDER BY id DESC LIMIT $1 OFFSET $2";
        tracing::debug!(sql = %sql, limit, offset, "query");
        let rows = sqlx::query_as::<_, Restaurant>(sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn update(&self, id: i64, patch: &RestaurantUpdate) -> Result<u64, AppError> {
        if patch.is_empty() {
            return Ok(0);
        }
        // SET only the columns present in the patch; params bound in SET order.
        let mut sets = Vec::new();
        let mut values: Vec<&str> = Vec::new();
        if let Some(name) = &patch.name {
            values.push(name);
            sets.push(format!("name = ${}", values.len()));
        }
        if let Some(address) = &patch.address {
            values.push(address);
            sets.push(format!("addr = ${}", values.len()));
        }
        let sql = format!(
            "UPDATE restaurants SET {} WHERE id = ${}",
            sets.join(", "),
            values.len() + 1
        );
        tracing::debug!(sql = %sql, id, "query");
        let mut query = sqlx::query(&sql);
        for v in values {
            query = query.bind(v);
        }
        let res = query.bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i64) -> Result<u64, AppError> {
        let sql = "DELETE FROM restaurants WHERE id = $1";
        tracing::debug!(sql = %sql, id, "query");
        let res = sqlx::query(sql).bind(id).execute(&self.pool).await?;
        Ok(res.rows_affected())
    }
}

/// Create the restaurants table if missing. Call before serving.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS restaurants (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            addr TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Ensure the database in `database_url` exists; create it if not. Connects to the
/// default `postgres` database to run CREATE DATABASE. Call before creating the main pool.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), AppError> {
    let (admin_url, db_name) = parse_db_name_from_url(database_url)?;
    if db_name.is_empty() || db_name == "postgres" {
        return Ok(());
    }
    let opts = sqlx::postgres::PgConnectOptions::from_str(&admin_url)
        .map_err(|e| AppError::BadRequest(format!("invalid DATABASE_URL: {}", e)))?;
    let mut conn: sqlx::PgConnection = opts.connect().await.map_err(AppError::Db)?;
    let exists: (bool,) =
        sqlx::query_as("SELECT EXISTS(SELECT 1 FROM pg_database WHERE datname = $1)")
            .bind(&db_name)
            .fetch_one(&mut conn)
            .await
            .map_err(AppError::Db)?;
    if !exists.0 {
        let quoted = quote_ident(&db_name);
        sqlx::query(&format!("CREATE DATABASE {}", quoted))
            .execute(&mut conn)
            .await
            .map_err(AppError::Db)?;
    }
    Ok(())
}

fn parse_db_name_from_url(url: &str) -> Result<(String, String), AppError> {
    let path_start = url
        .rfind('/')
        .ok_or_else(|| AppError::BadRequest("DATABASE_URL: no path".into()))?
        + 1;
    let path_and_query = url.get(path_start..).unwrap_or("");
    let db_name = path_and_query.split('?').next().unwrap_or("").trim();
    let base = url.get(..path_start).unwrap_or(url);
    let admin_url = format!("{}postgres", base);
    Ok((admin_url, db_name.to_string()))
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}
