use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::PgPool;
use tokio::task::JoinHandle;

use crate::models::RollAuditRecord;

/// Destination for completed rolls.
#[async_trait]
pub trait AuditSink: Send + Sync {
    async fn record(&self, entry: &RollAuditRecord) -> Result<()>;

    /// Short label for the health endpoint.
    fn kind(&self) -> &'static str;
}

/// Writes rolls to the `roll_audit` table.
pub struct PgAuditSink {
    db: PgPool,
}

impl PgAuditSink {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn record(&self, entry: &RollAuditRecord) -> Result<()> {
        let rolls: Vec<i32> = entry
            .rolls
            .iter()
            .map(|&r| i32::try_from(r))
            .collect::<std::result::Result<_, _>>()
            .context("roll value does not fit the audit column")?;

        sqlx::query(
            r#"
            INSERT INTO roll_audit (user_id, team_id, dice_count, sides, modifier, rolls, total, reason, rolled_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(&entry.user_id)
        .bind(&entry.team_id)
        .bind(i64::from(entry.count))
        .bind(i64::from(entry.sides))
        .bind(entry.modifier)
        .bind(rolls)
        .bind(entry.total)
        .bind(&entry.reason)
        .bind(entry.rolled_at)
        .execute(&self.db)
        .await
        .context("failed to insert roll_audit row")?;

        Ok(())
    }

    fn kind(&self) -> &'static str {
        "postgres"
    }
}

/// Used when no database is configured or in development mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
    async fn record(&self, entry: &RollAuditRecord) -> Result<()> {
        tracing::debug!(
            user_id = %entry.user_id,
            count = entry.count,
            sides = entry.sides,
            total = entry.total,
            "Audit disabled, roll not persisted"
        );
        Ok(())
    }

    fn kind(&self) -> &'static str {
        "disabled"
    }
}

/// Persist a roll in the background. Failures are logged and go nowhere else.
pub fn spawn_record(sink: Arc<dyn AuditSink>, entry: RollAuditRecord) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = sink.record(&entry).await {
            tracing::warn!(
                error = ?e,
                user_id = %entry.user_id,
                sink = sink.kind(),
                "Failed to write roll audit record"
            );
        }
    })
}
