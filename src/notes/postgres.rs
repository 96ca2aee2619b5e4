//! PostgreSQL-backed [`NoteStore`].

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use super::NoteStore;
use crate::domain::TransactionNote;
use crate::error::StorageError;

#[derive(Clone)]
pub struct PostgresNoteStore {
    pool: PgPool,
}

impl PostgresNoteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn row_to_note(row: &PgRow) -> Result<TransactionNote, StorageError> {
    let meta_raw: Value = row.try_get("meta_data")?;
    let meta_data: HashMap<String, Value> = match meta_raw {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    };
    Ok(TransactionNote {
        uid: row.try_get("uid")?,
        business_name: row.try_get("business_name")?,
        user_id: row.try_get("user_id")?,
        transaction_id: row.try_get("transaction_id")?,
        note: row.try_get("note")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        is_deleted: row.try_get("is_deleted")?,
        meta_data,
    })
}

#[async_trait]
impl NoteStore for PostgresNoteStore {
    async fn append(&self, note: TransactionNote) -> Result<TransactionNote, StorageError> {
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
        .execute(&self.pool)
        .await?;
        Ok(note)
    }

    async fn latest(&self, transaction_id: Uuid) -> Result<Option<TransactionNote>, StorageError> {
        let row = sqlx::query(
            "SELECT * FROM transaction_notes WHERE transaction_id = $1 ORDER BY created_at DESC LIMIT 1",
        )
        .bind(transaction_id)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(row_to_note).transpose()
    }
}
