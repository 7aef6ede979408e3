use crate::{
    error::RollError,
    models::{
        Attachment, AttachmentField, MessageColor, ResponseType, RollOutcome, RollRequest,
        SlackMessage,
    },
};

pub const COIN_FOOTER: &str = "This die is commonly known as a coin";
pub const TOO_MANY_ROLLS_PLACEHOLDER: &str = "Too many dice to display";

/// Turns pipeline results into Slack attachments.
#[derive(Debug, Clone)]
pub struct MessageFormatter {
    max_displayed_rolls: u32,
    command_name: String,
}

impl MessageFormatter {
    pub fn new(max_displayed_rolls: u32, command_name: impl Into<String>) -> Self {
        Self {
            max_displayed_rolls,
            command_name: command_name.into(),
        }
    }

    pub fn success(&self, user_id: &str, request: &RollRequest, outcome: &RollOutcome) -> SlackMessage {
        let mut fields = vec![AttachmentField::short("Die", request.die_label())];

        let rolls_title = if request.count == 1 { "Roll" } else { "Rolls" };
        fields.push(AttachmentField::short(rolls_title, self.rolls_value(request, outcome)));

        if request.modifier != 0 {
            fields.push(AttachmentField::short("Base Total", outcome.base_total.to_string()));
            fields.push(AttachmentField::short("Modifier", request.modifier.to_string()));
            fields.push(AttachmentField::short("Grand Total", outcome.grand_total.to_string()));
        }

        if let Some(reason) = request.reason.as_deref().filter(|r| !r.is_empty()) {
            fields.push(AttachmentField::long("Reason", reason));
        }

        let footer = (request.sides == 2).then(|| COIN_FOOTER.to_string());

        let attachment = Attachment {
            title: Some(format!("Rolling {request}")),
            color: MessageColor::Success,
            text: format!("<@{user_id}> rolled *{}*", outcome.grand_total),
            fallback: format!("<@{user_id}> rolled {request}: {}", outcome.grand_total),
            fields,
            footer,
            mrkdwn_in: vec!["text"],
        };

        SlackMessage::new(ResponseType::InChannel, attachment)
    }

    pub fn error(&self, user_id: &str, err: &RollError) -> SlackMessage {
        let (title, value) = match err {
            RollError::Syntax(_) => (
                "Unrecognized roll",
                format!(
                    "{err}. Try `{} 2d6+1` or `{} help`.",
                    self.command_name, self.command_name
                ),
            ),
            RollError::Range(kind) => ("Invalid roll", kind.to_string()),
        };

        let attachment = Attachment {
            title: None,
            color: MessageColor::Error,
            text: format!("<@{user_id}> that roll didn't work"),
            fallback: format!("{title}: {value}"),
            fields: vec![AttachmentField::long(title, value)],
            footer: None,
            mrkdwn_in: vec!["text", "fields"],
        };

        SlackMessage::new(ResponseType::Ephemeral, attachment)
    }

    pub fn help(&self, user_id: &str) -> SlackMessage {
        let cmd = &self.command_name;
        let basic = format!(
            "`{cmd}` rolls a d20.\n`{cmd} d6` rolls one six-sided die.\n`{cmd} 3d6` rolls three six-sided dice."
        );
        let advanced = format!(
            "`{cmd} 2d8+5` adds 5 to the total, `{cmd} 1d20-1` subtracts 1.\n\
             Anything after the dice is kept as the reason: `{cmd} 1d20+3 perception check`."
        );

        let attachment = Attachment {
            title: Some("How to roll".to_string()),
            color: MessageColor::Info,
            text: format!("<@{user_id}> here is how to use {cmd}"),
            fallback: format!("Usage: {cmd} [count]d<sides>[+/-modifier] [reason]"),
            fields: vec![
                AttachmentField::long("Basic usage", basic),
                AttachmentField::long("Modifiers and reasons", advanced),
            ],
            footer: None,
            mrkdwn_in: vec!["text", "fields"],
        };

        SlackMessage::new(ResponseType::Ephemeral, attachment)
    }

    fn rolls_value(&self, request: &RollRequest, outcome: &RollOutcome) -> String {
        if request.count > self.max_displayed_rolls {
            return TOO_MANY_ROLLS_PLACEHOLDER.to_string();
        }
        outcome
            .rolls
            .iter()
            .map(u32::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
