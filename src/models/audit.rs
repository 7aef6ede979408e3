use chrono::{DateTime, Utc};
use serde::Serialize;

use super::dice::{RollOutcome, RollRequest};

/// One completed roll, as written to the `roll_audit` table.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct RollAuditRecord {
    pub user_id: String,
    pub team_id: Option<String>,
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
    pub rolls: Vec<u32>,
    pub total: i64,
    pub reason: Option<String>,
    pub rolled_at: DateTime<Utc>,
}

impl RollAuditRecord {
    pub fn new(
        user_id: impl Into<String>,
        team_id: Option<String>,
        request: &RollRequest,
        outcome: &RollOutcome,
        rolled_at: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            team_id,
            count: request.count,
            sides: request.sides,
            modifier: request.modifier,
            rolls: outcome.rolls.clone(),
            total: outcome.grand_total,
            reason: request.reason.clone(),
            rolled_at,
        }
    }
}
