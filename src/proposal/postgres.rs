//! PostgreSQL-backed [`ProposalStore`]. `participants` is stored as a JSONB
//! array column — an ordered sequence, without a dependent child table
//! whose own ordering would have to be guarded.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::collections::HashMap;
use uuid::Uuid;

use super::ProposalStore;
use crate::domain::proposal::{Issuer, Participant};
use crate::domain::{now, Proposal, TaskStatus};
use crate::error::StorageError;

#[derive(Clone)]
pub struct PostgresProposalStore {
    pool: PgPool,
}

impl PostgresProposalStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn issuer_str(i: Issuer) -> &'static str {
    match i {
        Issuer::User => "user",
        Issuer::Business => "business",
        Issuer::App => "app",
    }
}

fn parse_issuer(s: &str) -> Issuer {
    match s {
        "business" => Issuer::Business,
        "app" => Issuer::App,
        _ => Issuer::User,
    }
}

fn status_str(s: TaskStatus) -> &'static str {
    match s {
        TaskStatus::Draft => "draft",
        TaskStatus::Init => "init",
        TaskStatus::Processing => "processing",
        TaskStatus::Completed => "completed",
        TaskStatus::Error => "error",
    }
}

fn parse_status(s: &str) -> TaskStatus {
    match s {
        "init" => TaskStatus::Init,
        "processing" => TaskStatus::Processing,
        "completed" => TaskStatus::Completed,
        "error" => TaskStatus::Error,
        _ => TaskStatus::Draft,
    }
}

fn participants_to_json(participants: &[Participant]) -> Value {
    serde_json::to_value(participants).unwrap_or(Value::Array(vec![]))
}

fn participants_from_json(v: Value) -> Vec<Participant> {
    serde_json::from_value(v).unwrap_or_default()
}

fn row_to_proposal(row: &PgRow) -> Result<Proposal, StorageError> {
    let meta_raw: Value = row.try_get("meta_data")?;
    let meta_data: HashMap<String, Value> = match meta_raw {
        Value::Object(map) => map.into_iter().collect(),
        _ => HashMap::new(),
    };
    let issuer_raw: String = row.try_get("issuer")?;
    let status_raw: String = row.try_get("task_status")?;
    let participants_raw: Value = row.try_get("participants")?;
    Ok(Proposal {
        uid: row.try_get("uid")?,
        business_name: row.try_get("business_name")?,
        user_id: row.try_get("user_id")?,
        issuer: parse_issuer(&issuer_raw),
        issuer_id: row.try_get("issuer_id")?,
        amount: row.try_get("amount")?,
        currency: row.try_get("currency")?,
        description: row.try_get("description")?,
        note: row.try_get("note")?,
        task_status: parse_status(&status_raw),
        error_message: row.try_get("error_message")?,
        participants: participants_from_json(participants_raw),
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
        is_deleted: row.try_get("is_deleted")?,
        meta_data,
    })
}

#[async_trait]
impl ProposalStore for PostgresProposalStore {
    async fn create(&self, proposal: Proposal) -> Result<Proposal, StorageError> {
        let meta_json = Value::Object(proposal.meta_data.clone().into_iter().collect());
        sqlx::query(
            r#"
            INSERT INTO proposals
                (uid, business_name, user_id, issuer, issuer_id, amount, currency,
                 description, note, task_status, error_message, participants,
                 created_at, updated_at, is_deleted, meta_data)
            VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)
            "#,
        )
        .bind(proposal.uid)
        .bind(&proposal.business_name)
        .bind(proposal.user_id)
        .bind(issuer_str(proposal.issuer))
        .bind(proposal.issuer_id)
        .bind(proposal.amount)
        .bind(&proposal.currency)
        .bind(&proposal.description)
        .bind(&proposal.note)
        .bind(status_str(proposal.task_status))
        .bind(&proposal.error_message)
        .bind(participants_to_json(&proposal.participants))
        .bind(proposal.created_at)
        .bind(proposal.updated_at)
        .bind(proposal.is_deleted)
        .bind(meta_json)
        .execute(&self.pool)
        .await?;
        Ok(proposal)
    }

    async fn get(&self, uid: Uuid) -> Result<Option<Proposal>, StorageError> {
        let row = sqlx::query("SELECT * FROM proposals WHERE uid = $1")
            .bind(uid)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_proposal).transpose()
    }

    async fn list(
        &self,
        business_name: &str,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Proposal>, i64), StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT * FROM proposals
            WHERE business_name = $1 AND is_deleted = false
            ORDER BY created_at DESC
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(business_name)
        .bind(offset)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        let items = rows.iter().map(row_to_proposal).collect::<Result<Vec<_>, _>>()?;

        let total_row = sqlx::query(
            "SELECT COUNT(*) AS total FROM proposals WHERE business_name = $1 AND is_deleted = false",
        )
        .bind(business_name)
        .fetch_one(&self.pool)
        .await?;
        let total: i64 = total_row.try_get("total")?;

        Ok((items, total))
    }

    async fn update_draft(&self, proposal: Proposal) -> Result<Proposal, StorageError> {
        let meta_json = Value::Object(proposal.meta_data.clone().into_iter().collect());
        sqlx::query(
            r#"
            UPDATE proposals SET
                amount = $2, currency = $3, description = $4, note = $5,
                task_status = $6, participants = $7, updated_at = $8, meta_data = $9
            WHERE uid = $1 AND task_status = 'draft'
            "#,
        )
        .bind(proposal.uid)
        .bind(proposal.amount)
        .bind(&proposal.currency)
        .bind(&proposal.description)
        .bind(&proposal.note)
        .bind(status_str(proposal.task_status))
        .bind(participants_to_json(&proposal.participants))
        .bind(now())
        .bind(meta_json)
        .execute(&self.pool)
        .await?;
        self.get(proposal.uid)
            .await?
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))
    }

    async fn try_begin_processing(&self, uid: Uuid) -> Result<bool, StorageError> {
        let result = sqlx::query(
            "UPDATE proposals SET task_status = 'processing', updated_at = $2 \
             WHERE uid = $1 AND task_status = 'init'",
        )
        .bind(uid)
        .bind(now())
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn finish(
        &self,
        uid: Uuid,
        status: TaskStatus,
        error_message: Option<String>,
    ) -> Result<Proposal, StorageError> {
        sqlx::query(
            "UPDATE proposals SET task_status = $2, error_message = $3, updated_at = $4 WHERE uid = $1",
        )
        .bind(uid)
        .bind(status_str(status))
        .bind(&error_message)
        .bind(now())
        .execute(&self.pool)
        .await?;
        self.get(uid)
            .await?
            .ok_or_else(|| StorageError::Backend(sqlx::Error::RowNotFound))
    }
}
