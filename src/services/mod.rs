pub mod audit_service;
pub mod dice_parser;
pub mod dice_roller;
pub mod dice_service;
pub mod message_formatter;
pub mod slack_oauth_service;
pub mod slack_signature_service;

pub use audit_service::{spawn_record, AuditSink, NoopAuditSink, PgAuditSink};
pub use dice_parser::{parse_command, scan_notation, split_first_token};
pub use dice_roller::{RandomSource, Roller, ScriptedRandom, SeededRandom, ThreadRandom};
pub use dice_service::{validate, DiceService, Evaluation, ValidatedRoll};
pub use message_formatter::MessageFormatter;
pub use slack_oauth_service::{build_auth_url, SlackOAuthConfig, SlackOAuthService};
pub use slack_signature_service::{SignatureError, SlackSignatureVerifier};
