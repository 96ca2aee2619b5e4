//! PostgreSQL-backed [`WalletStore`].

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use super::WalletStore;
use crate::domain::wallet::WalletType;
use crate::domain::Wallet;
use crate::error::StorageError;

#[derive(Clone)]
pub struct PostgresWalletStore {
    pool: PgPool,
}

impl PostgresWalletStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn wallet_type_str(t: WalletType) -> &'static str {
    match t {
        WalletType::User => "user",
        WalletType::Business => "business",
        WalletType::App => "app",
        WalletType::AppOperational => "app_operational",
        WalletType::AppIncome => "app_income",
    }
}

fn parse_wallet_type(s: &str) -> WalletType {
    match s {
        "business" => WalletType::Business,
        "app" => WalletType::App,
        "app_operational" => WalletType::AppOperational,
        "app_income" => WalletType::AppIncome,
        _ => WalletType::User,
    }
}

fn row_to_wallet(row: &PgRow) -> Result<Wallet, StorageError> {
    let meta_raw: Value = row.try_get("meta_data")?;
    let meta_data: HashMap<String, Value> = match meta_raw {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    };
    let wallet_type_raw: String = row.try_get("wallet_type")?;
    Ok(Wallet {
        uid: row.try_get("uid")?,
        business_name: row.try_get("business_name")?,
        user_id: row.try_get("user_id")?,
        wallet_type: parse_wallet_type(&wallet_type_raw),
        main_currency: row.try_get("main_currency")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        is_deleted: row.try_get("is_deleted")?,
        meta_data,
    })
}

#[async_trait]
impl WalletStore for PostgresWalletStore {
    async fn create(&self, wallet: Wallet) -> Result<Wallet, StorageError> {
        let meta_json = Value::Object(wallet.meta_data.clone().into_iter().collect());
        sqlx::query(
            r#"
            INSERT INTO wallets
                (uid, business_name, user_id, wallet_type, main_currency,
                 created_at, updated_at, is_deleted, meta_data)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
            "#,
        )
        .bind(wallet.uid)
        .bind(&wallet.business_name)
        .bind(wallet.user_id)
        .bind(wallet_type_str(wallet.wallet_type))
        .bind(&wallet.main_currency)
        .bind(wallet.created_at)
        .bind(wallet.updated_at)
        .bind(wallet.is_deleted)
        .bind(meta_json)
        .execute(&self.pool)
        .await?;
        Ok(wallet)
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Wallet>, StorageError> {
        let row = sqlx::query("SELECT * FROM wallets WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_wallet).transpose()
    }

    async fn list(
        &self,
        business_name: &str,
        user_id: Option<Uuid>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Wallet>, i64), StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM wallets
            WHERE business_name = $1 AND is_deleted = false
              AND ($2::uuid IS NULL OR user_id = $2)
            ORDER BY created_at DESC
            OFFSET $3 LIMIT $4
            "#,
        )
        .bind(business_name)
        .bind(user_id)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        let items = rows.iter().map(row_to_wallet).collect::<Result<Vec<_>, _>>()?;

        let total_row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total FROM wallets
            WHERE business_name = $1 AND is_deleted = false
              AND ($2::uuid IS NULL OR user_id = $2)
            "#,
        )
        .bind(business_name)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = total_row.try_get("total")?;

        Ok((items, total))
    }

    async fn soft_delete(&self, uid: Uuid) -> Result<Wallet, StorageError> {
        let now = Utc::now();
        sqlx::query("UPDATE wallets SET is_deleted = true, updated_at = $2 WHERE uid = $1")
            .bind(uid)
            .bind(now)
            .execute(&self.pool)
            .await?;
        self.get(uid)
            .await?
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))
    }
}
