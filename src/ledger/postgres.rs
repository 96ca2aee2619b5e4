//! PostgreSQL-backed [`LedgerStore`], using the runtime-checked
//! `sqlx::query` style rather than the compile-time-checked `query!` macro,
//! since this crate ships without a live database to check against at
//! build time.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Postgres, Row, Transaction as SqlxTx};
use std::collections::{BTreeSet, HashMap};
use uuid::Uuid;

use super::{LedgerStore, LedgerUnit};
use crate::domain::{transaction::Transaction, TransactionNote};
use crate::error::StorageError;

#[derive(Clone)]
pub struct PostgresLedgerStore {
    pool: PgPool,
}

impl PostgresLedgerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_transaction(row: &PgRow) -> Result<Transaction, StorageError> {
    let meta_raw: Value = row.try_get("meta_data")?;
    let meta_data: HashMap<String, Value> = match meta_raw {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    };
    Ok(Transaction {
        uid: row.try_get("uid")?,
        business_name: row.try_get("business_name")?,
        user_id: row.try_get("user_id")?,
        proposal_id: row.try_get("proposal_id")?,
        wallet_id: row.try_get("wallet_id")?,
        amount: row.try_get("amount")?,
        currency: row.try_get("currency")?,
        balance: row.try_get("balance")?,
        description: row.try_get("description")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        is_deleted: row.try_get("is_deleted")?,
        meta_data,
    })
}

async fn latest_balance_in<'e, E>(executor: E, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    let row = sqlx::query(
        r#"
        SELECT balance FROM transactions
        WHERE wallet_id = $1 AND currency = $2
        ORDER BY created_at DESC, uid DESC
        LIMIT 1
        "#,
    )
    .bind(wallet_id)
    .bind(currency)
    .fetch_optional(executor)
    .await?;

    Ok(match row {
        Some(r) => r.try_get::<Decimal, _>("balance")?,
        None => Decimal::ZERO,
    })
}

#[async_trait]
impl LedgerStore for PostgresLedgerStore {
    async fn latest_balance(&self, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError> {
        latest_balance_in(&self.pool, wallet_id, currency).await
    }

    async fn distinct_currencies(&self, wallet_id: Uuid) -> Result<BTreeSet<String>, StorageError> {
        let rows = sqlx::query(
            "SELECT DISTINCT currency FROM transactions WHERE wallet_id = $1 AND is_deleted = false",
        )
        .bind(wallet_id)
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|r| r.try_get::<String, _>("currency").map_err(StorageError::from))
            .collect()
    }

    async fn list(
        &self,
        wallet_id: Uuid,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Transaction>, i64), StorageError> {
        let to = to.unwrap_or_else(Utc::now);

        let rows = sqlx::query(
            r#"
            SELECT * FROM transactions
            WHERE wallet_id = $1
              AND created_at <= $2
              AND ($3::timestamptz IS NULL OR created_at >= $3)
            ORDER BY created_at DESC
            OFFSET $4 LIMIT $5
            "#,
        )
        .bind(wallet_id)
        .bind(to)
        .bind(from)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        let items = rows.iter().map(row_to_transaction).collect::<Result<Vec<_>, _>>()?;

        let total_row = sqlx::query(
            r#"
            SELECT COUNT(*) AS total FROM transactions
            WHERE wallet_id = $1
              AND created_at <= $2
              AND ($3::timestamptz IS NULL OR created_at >= $3)
            "#,
        )
        .bind(wallet_id)
        .bind(to)
        .bind(from)
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = total_row.try_get("total")?;

        Ok((items, total))
    }

    async fn by_proposal(&self, proposal_id: Uuid) -> Result<Vec<Transaction>, StorageError> {
        let rows = sqlx::query("SELECT * FROM transactions WHERE proposal_id = $1 ORDER BY created_at ASC")
            .bind(proposal_id)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(row_to_transaction).collect()
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Transaction>, StorageError> {
        let row = sqlx::query("SELECT * FROM transactions WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_transaction).transpose()
    }

    async fn begin<'a>(&'a self) -> Result<Box<dyn LedgerUnit + 'a>, StorageError> {
        let tx = self.pool.begin().await?;
        Ok(Box::new(PostgresLedgerUnit { tx: Some(tx) }))
    }
}

pub struct PostgresLedgerUnit<'a> {
    tx: Option<SqlxTx<'a, Postgres>>,
}

impl<'a> PostgresLedgerUnit<'a> {
    fn tx_mut(&mut self) -> &mut SqlxTx<'a, Postgres> {
        self.tx.as_mut().expect("ledger unit used after commit/rollback")
    }
}

#[async_trait]
impl<'a> LedgerUnit for PostgresLedgerUnit<'a> {
    async fn lock_wallet(&mut self, wallet_id: Uuid) -> Result<(), StorageError> {
        sqlx::query("SELECT uid FROM wallets WHERE uid = $1 FOR UPDATE")
            .bind(wallet_id)
            .fetch_optional(&mut **self.tx_mut())
            .await?;
        Ok(())
    }

    async fn latest_balance(&mut self, wallet_id: Uuid, currency: &str) -> Result<Decimal, StorageError> {
        latest_balance_in(&mut **self.tx_mut(), wallet_id, currency).await
    }

    async fn append(&mut self, transaction: Transaction) -> Result<(), StorageError> {
        let meta_json = Value::Object(transaction.meta_data.clone().into_iter().collect());
        let result = sqlx::query(
            r#"
            INSERT INTO transactions
                (uid, business_name, user_id, proposal_id, wallet_id, amount, currency,
                 balance, description, created_at, updated_at, is_deleted, meta_data)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13)
            ON CONFLICT (uid) DO NOTHING
            "#,
        )
        .bind(transaction.uid)
        .bind(&transaction.business_name)
        .bind(transaction.user_id)
        .bind(transaction.proposal_id)
        .bind(transaction.wallet_id)
        .bind(transaction.amount)
        .bind(&transaction.currency)
        .bind(transaction.balance)
        .bind(&transaction.description)
        .bind(transaction.created_at)
        .bind(transaction.updated_at)
        .bind(transaction.is_deleted)
        .bind(meta_json)
        .execute(&mut **self.tx_mut())
        .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::Immutable(transaction.uid.to_string()));
        }
        Ok(())
    }

    async fn append_note(&mut self, note: TransactionNote) -> Result<(), StorageError> {
        let meta_json = Value::Object(note.meta_data.clone().into_iter().collect());
        sqlx::query(
            r#"
            INSERT INTO transaction_notes
                (uid, business_name, user_id, transaction_id, note, created_at, updated_at, is_deleted, meta_data)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9)
            "#,
        )
        .bind(note.uid)
        .bind(&note.business_name)
        .bind(note.user_id)
        .bind(note.transaction_id)
        .bind(&note.note)
        .bind(note.created_at)
        .bind(note.updated_at)
        .bind(note.is_deleted)
        .bind(meta_json)
        .execute(&mut **self.tx_mut())
        .await?;
        Ok(())
    }

    async fn commit(mut self: Box<Self>) -> Result<(), StorageError> {
        let tx = self.tx.take().expect("ledger unit used after commit/rollback");
        tx.commit().await?;
        Ok(())
    }

    async fn rollback(mut self: Box<Self>) -> Result<(), StorageError> {
        let tx = self.tx.take().expect("ledger unit used after commit/rollback");
        tx.rollback().await?;
        Ok(())
    }
}
