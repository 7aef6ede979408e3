//! Dice command pipeline: parse → validate → roll → format.
//!
//! Nothing in here performs I/O or touches shared mutable state, so one
//! [`DiceService`] is shared by every request handler.

use std::sync::Arc;

use crate::{
    error::{RangeErrorKind, RollError},
    models::{
        Command, DiceLimits, RollOutcome, RollRequest, SlackMessage, MIN_DICE_COUNT,
        MIN_DIE_SIDES,
    },
};

use super::{
    dice_parser::parse_command,
    dice_roller::{RandomSource, Roller},
    message_formatter::MessageFormatter,
};

/// A request that passed every limit check. Only [`validate`] builds one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRoll(RollRequest);

impl ValidatedRoll {
    pub fn request(&self) -> &RollRequest {
        &self.0
    }

    pub fn into_request(self) -> RollRequest {
        self.0
    }
}

/// Check a request against the limits. The first failing rule wins.
pub fn validate(request: RollRequest, limits: &DiceLimits) -> Result<ValidatedRoll, RollError> {
    let failure = if request.sides < MIN_DIE_SIDES {
        Some(RangeErrorKind::TooFewSides)
    } else if request.count < MIN_DICE_COUNT {
        Some(RangeErrorKind::TooFewDice)
    } else if request.count > limits.max_dice {
        Some(RangeErrorKind::TooManyDice)
    } else if request.sides > limits.max_sides {
        Some(RangeErrorKind::TooManySides)
    } else {
        None
    };

    match failure {
        Some(kind) => Err(kind.into()),
        None => Ok(ValidatedRoll(request)),
    }
}

/// Terminal state of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Evaluation {
    Help,
    Rejected(RollError),
    Rolled {
        request: RollRequest,
        outcome: RollOutcome,
    },
}

pub struct DiceService {
    limits: DiceLimits,
    roller: Roller,
    formatter: MessageFormatter,
}

impl DiceService {
    pub fn new(limits: DiceLimits, random: Arc<dyn RandomSource>, command_name: &str) -> Self {
        Self {
            limits,
            roller: Roller::new(random),
            formatter: MessageFormatter::new(limits.max_displayed_rolls, command_name),
        }
    }

    /// Run the command text through parsing, validation and rolling.
    pub fn evaluate(&self, text: &str) -> Evaluation {
        let request = match parse_command(text) {
            Ok(Command::Help) => return Evaluation::Help,
            Ok(Command::Roll(request)) => request,
            Err(err) => return Evaluation::Rejected(err),
        };

        match validate(request, &self.limits) {
            Ok(valid) => {
                let outcome = self.roller.roll(&valid);
                Evaluation::Rolled {
                    request: valid.into_request(),
                    outcome,
                }
            }
            Err(err) => Evaluation::Rejected(err),
        }
    }

    /// Build the Slack reply for an evaluation.
    pub fn respond(&self, evaluation: &Evaluation, user_id: &str) -> SlackMessage {
        match evaluation {
            Evaluation::Help => self.formatter.help(user_id),
            Evaluation::Rejected(err) => self.formatter.error(user_id, err),
            Evaluation::Rolled { request, outcome } => {
                self.formatter.success(user_id, request, outcome)
            }
        }
    }

    /// Evaluate and format in one step.
    pub fn handle(&self, text: &str, user_id: &str) -> SlackMessage {
        let evaluation = self.evaluate(text);
        self.respond(&evaluation, user_id)
    }
}
