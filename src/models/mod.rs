pub mod audit;
pub mod dice;
pub mod slack;

pub use audit::RollAuditRecord;
pub use dice::{
    Command, DiceLimits, RollOutcome, RollRequest, DEFAULT_DIE_SIDES, MIN_DICE_COUNT,
    MIN_DIE_SIDES,
};
pub use slack::{
    Attachment, AttachmentField, MessageColor, ResponseType, SlackMessage, SlashCommandPayload,
};
