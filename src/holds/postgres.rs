//! PostgreSQL-backed [`HoldStore`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use super::HoldStore;
use crate::domain::hold::{HoldFilter, HoldPatch, HoldStatus};
use crate::domain::WalletHold;
use crate::error::StorageError;

#[derive(Clone)]
pub struct PostgresHoldStore {
    pool: PgPool,
}

impl PostgresHoldStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn status_str(status: HoldStatus) -> &'static str {
    match status {
        HoldStatus::Active => "active",
        HoldStatus::Inactive => "inactive",
        HoldStatus::Suspended => "suspended",
    }
}

fn parse_status(s: &str) -> HoldStatus {
    match s {
        "active" => HoldStatus::Active,
        "suspended" => HoldStatus::Suspended,
        _ => HoldStatus::Inactive,
    }
}

fn row_to_hold(row: &PgRow) -> Result<WalletHold, StorageError> {
    let meta_raw: Value = row.try_get("meta_data")?;
    let meta_data: HashMap<String, Value> = match meta_raw {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    };
    let status_raw: String = row.try_get("status")?;
    Ok(WalletHold {
        uid: row.try_get("uid")?,
        business_name: row.try_get("business_name")?,
        user_id: row.try_get("user_id")?,
        wallet_id: row.try_get("wallet_id")?,
        amount: row.try_get("amount")?,
        currency: row.try_get("currency")?,
        expires_at: row.try_get("expires_at")?,
        status: parse_status(&status_raw),
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        is_deleted: row.try_get("is_deleted")?,
        meta_data,
    })
}

#[async_trait]
impl HoldStore for PostgresHoldStore {
    async fn create(&self, hold: WalletHold) -> Result<WalletHold, StorageError> {
        let meta_json = Value::Object(hold.meta_data.clone().into_iter().collect());
        sqlx::query(
            r#"
            INSERT INTO wallet_holds
                (uid, business_name, user_id, wallet_id, amount, currency, expires_at,
                 status, description, created_at, updated_at, is_deleted, meta_data)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
            "#,
        )
        .bind(hold.uid)
        .bind(&hold.business_name)
        .bind(hold.user_id)
        .bind(hold.wallet_id)
        .bind(hold.amount)
        .bind(&hold.currency)
        .bind(hold.expires_at)
        .bind(status_str(hold.status))
        .bind(&hold.description)
        .bind(hold.created_at)
        .bind(hold.updated_at)
        .bind(hold.is_deleted)
        .bind(meta_json)
        .execute(&self.pool)
        .await?;
        Ok(hold)
    }

    async fn get(&self, uid: Uuid) -> Result<Option<WalletHold>, StorageError> {
        let row = sqlx::query("SELECT * FROM wallet_holds WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_hold).transpose()
    }

    async fn update(&self, uid: Uuid, patch: HoldPatch) -> Result<WalletHold, StorageError> {
        let mut current = self
            .get(uid)
            .await?
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))?;

        if let Some(expires_at) = patch.expires_at {
            current.expires_at = expires_at;
        }
        if let Some(status) = patch.status {
            current.status = status;
        }
        if let Some(description) = patch.description {
            current.description = description;
        }
        if let Some(meta_data) = patch.meta_data {
            current.meta_data = meta_data;
        }
        current.updated_at = Utc::now();

        let meta_json = Value::Object(current.meta_data.clone().into_iter().collect());
        sqlx::query(
            r#"
            UPDATE wallet_holds
            SET expires_at = $2, status = $3, description = $4, meta_data = $5, updated_at = $6
            WHERE uid = $1
            "#,
        )
        .bind(current.uid)
        .bind(current.expires_at)
        .bind(status_str(current.status))
        .bind(&current.description)
        .bind(meta_json)
        .bind(current.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(current)
    }

    async fn list_holds(
        &self,
        filter: HoldFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<WalletHold>, i64), StorageError> {
        // If both from/to are unset, additionally constrain expires_at >
        // now; if either is set, constrain created_at instead and drop the
        // expiry constraint.
        let windowed = filter.from.is_some() || filter.to.is_some();
        let now = Utc::now();

        let rows = sqlx::query(
            r#"
            SELECT * FROM wallet_holds
            WHERE user_id = $1 AND business_name = $2 AND is_deleted = $3
              AND ($4::uuid IS NULL OR wallet_id = $4)
              AND ($5::text IS NULL OR currency = $5)
              AND ($6::text IS NULL OR status = $6)
              AND (
                    ($7 AND ($8::timestamptz IS NULL OR created_at >= $8)
                         AND ($9::timestamptz IS NULL OR created_at <= $9))
                    OR (NOT $7 AND expires_at > $10)
                  )
            ORDER BY created_at DESC
            OFFSET $11 LIMIT $12
            "#,
        )
        .bind(filter.user_id)
        .bind(&filter.business_name)
        .bind(filter.is_deleted)
        .bind(filter.wallet_id)
        .bind(&filter.currency)
        .bind(filter.status.map(status_str))
        .bind(windowed)
        .bind(filter.from)
        .bind(filter.to)
        .bind(now)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        let items = rows.iter().map(row_to_hold).collect::<Result<Vec<_>, _>>()?;

        let total_row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total FROM wallet_holds
            WHERE user_id = $1 AND business_name = $2 AND is_deleted = $3
              AND ($4::uuid IS NULL OR wallet_id = $4)
              AND ($5::text IS NULL OR currency = $5)
              AND ($6::text IS NULL OR status = $6)
              AND (
                    ($7 AND ($8::timestamptz IS NULL OR created_at >= $8)
                         AND ($9::timestamptz IS NULL OR created_at <= $9))
                    OR (NOT $7 AND expires_at > $10)
                  )
            "#,
        )
        .bind(filter.user_id)
        .bind(&filter.business_name)
        .bind(filter.is_deleted)
        .bind(filter.wallet_id)
        .bind(&filter.currency)
        .bind(filter.status.map(status_str))
        .bind(windowed)
        .bind(filter.from)
        .bind(filter.to)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = total_row.try_get("total")?;

        Ok((items, total))
    }

    async fn active_sum(&self, wallet_id: Uuid, currency: &str, now: DateTime<Utc>) -> Result<Decimal, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT COALESCE(SUM(amount), 0) AS total FROM wallet_holds
            WHERE wallet_id = $1 AND currency = $2 AND status = 'active'
              AND expires_at > $3 AND is_deleted = false
            "#,
        )
        .bind(wallet_id)
        .bind(currency)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.try_get::<Decimal, _>("total")?)
    }
}
