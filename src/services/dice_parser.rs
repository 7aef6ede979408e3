//! Dice notation parser.
//!
//! Grammar for the first whitespace-delimited token of the command text:
//!
//! ```text
//! notation := count? "d" sides modifier?
//! count    := digit*
//! sides    := digit+
//! modifier := ("+" | "-") digit+
//! ```
//!
//! Everything after that token is the free-text reason. Scanning produces
//! raw captures; defaults are applied afterwards in [`NotationCaptures::normalize`].

use crate::{
    error::RollError,
    models::{Command, RollRequest},
};

const HELP_KEYWORD: &str = "help";

/// Raw pieces of a notation token before defaults are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotationCaptures<'a> {
    pub count: &'a str,
    pub sides: &'a str,
    pub modifier: Option<SignedDigits<'a>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignedDigits<'a> {
    pub negative: bool,
    pub digits: &'a str,
}

impl<'a> NotationCaptures<'a> {
    /// Apply default substitution: a missing or unparsable count becomes 1,
    /// a missing or unparsable modifier becomes 0. `sides` always holds at
    /// least one digit, so only overflow can fail; it saturates so the
    /// validator reports it as too many sides.
    pub fn normalize(self, reason: &str) -> RollRequest {
        let count = self.count.parse::<u32>().unwrap_or(1);
        let sides = self.sides.parse::<u32>().unwrap_or(u32::MAX);
        let modifier = self
            .modifier
            .and_then(|m| {
                let magnitude = m.digits.parse::<i32>().ok()?;
                Some(if m.negative { -magnitude } else { magnitude })
            })
            .unwrap_or(0);

        RollRequest::new(count, sides, modifier).with_reason(reason)
    }
}

/// Classify raw command text as help or a roll request.
pub fn parse_command(input: &str) -> Result<Command, RollError> {
    let normalized = input.trim().to_lowercase();

    if normalized.is_empty() {
        return Ok(Command::Roll(RollRequest::default()));
    }
    if normalized == HELP_KEYWORD {
        return Ok(Command::Help);
    }

    let (token, reason) = split_first_token(&normalized);
    let captures =
        scan_notation(token).ok_or_else(|| RollError::Syntax(normalized.clone()))?;

    Ok(Command::Roll(captures.normalize(reason)))
}

/// Split off the first whitespace-delimited token; the remainder is trimmed.
pub fn split_first_token(text: &str) -> (&str, &str) {
    match text.find(char::is_whitespace) {
        Some(idx) => (&text[..idx], text[idx..].trim()),
        None => (text, ""),
    }
}

/// Match a whole token against the notation grammar.
pub fn scan_notation(token: &str) -> Option<NotationCaptures<'_>> {
    let (count, rest) = take_digits(token);
    let rest = rest.strip_prefix('d')?;

    let (sides, rest) = take_digits(rest);
    if sides.is_empty() {
        return None;
    }

    let modifier = match rest.chars().next() {
        None => None,
        Some(sign @ ('+' | '-')) => {
            let (digits, tail) = take_digits(&rest[sign.len_utf8()..]);
            if digits.is_empty() || !tail.is_empty() {
                return None;
            }
            Some(SignedDigits {
                negative: sign == '-',
                digits,
            })
        }
        Some(_) => return None,
    };

    Some(NotationCaptures {
        count,
        sides,
        modifier,
    })
}

fn take_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}
