use serde::{Deserialize, Serialize};
use std::fmt;

/// Fewest sides a die may have.
pub const MIN_DIE_SIDES: u32 = 2;

/// Fewest dice a single roll may use.
pub const MIN_DICE_COUNT: u32 = 1;

/// Die used when the command text is empty.
pub const DEFAULT_DIE_SIDES: u32 = 20;

/// A parsed, not yet validated, roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollRequest {
    pub count: u32,
    pub sides: u32,
    pub modifier: i32,
    pub reason: Option<String>,
}

impl Default for RollRequest {
    fn default() -> Self {
        Self {
            count: 1,
            sides: DEFAULT_DIE_SIDES,
            modifier: 0,
            reason: None,
        }
    }
}

impl RollRequest {
    pub fn new(count: u32, sides: u32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
            reason: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        self.reason = if reason.trim().is_empty() {
            None
        } else {
            Some(reason)
        };
        self
    }

    /// `d{sides}`, the label of a single die.
    pub fn die_label(&self) -> String {
        format!("d{}", self.sides)
    }
}

/// Canonical notation: `{count}d{sides}` plus a signed modifier when non-zero.
impl fmt::Display for RollRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        Ok(())
    }
}

/// Result of rolling a validated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RollOutcome {
    pub rolls: Vec<u32>,
    pub base_total: i64,
    pub grand_total: i64,
}

impl RollOutcome {
    pub fn from_rolls(rolls: Vec<u32>, modifier: i32) -> Self {
        let base_total: i64 = rolls.iter().map(|&r| i64::from(r)).sum();
        Self {
            rolls,
            base_total,
            grand_total: base_total + i64::from(modifier),
        }
    }
}

/// Upper limits applied by the validator and the formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceLimits {
    pub max_dice: u32,
    pub max_sides: u32,
    /// Above this many dice the individual values are not listed.
    pub max_displayed_rolls: u32,
}

impl Default for DiceLimits {
    fn default() -> Self {
        Self {
            max_dice: 1000,
            max_sides: 100,
            max_displayed_rolls: 100,
        }
    }
}

/// What a slash command asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Roll(RollRequest),
}
