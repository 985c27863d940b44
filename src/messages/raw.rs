//! Structured form of a raw RFC-2822 message.
//!
//! The raw-message endpoint hands back `message/rfc822` bytes instead of
//! JSON. Those bytes are run through the external MIME parser and flattened
//! into an owned [`RawMessage`] so callers never deal with the parser's
//! borrowed types.

use mail_parser::{Addr, Address, MessageParser};

use crate::error::{NylasError, Result};

/// One name/address pair from a message header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Mailbox {
    fn from_addr(addr: &Addr<'_>) -> Self {
        Self {
            name: addr.name.as_ref().map(|name| name.to_string()),
            email: addr.address.as_ref().map(|address| address.to_string()),
        }
    }
}

/// A parsed raw message, plus the untouched bytes it came from.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub message_id: Option<String>,
    pub subject: Option<String>,
    pub from: Vec<Mailbox>,
    pub to: Vec<Mailbox>,
    pub cc: Vec<Mailbox>,
    /// The `Date` header, rendered as RFC 3339.
    pub date: Option<String>,
    pub text_body: Option<String>,
    pub html_body: Option<String>,
    /// The original RFC-2822 bytes as received.
    pub raw: Vec<u8>,
}

impl RawMessage {
    /// Parse RFC-2822 bytes into their structured form.
    pub(crate) fn parse(raw: Vec<u8>) -> Result<Self> {
        let (message_id, subject, from, to, cc, date, text_body, html_body) = {
            let message = MessageParser::default()
                .parse(&raw)
                .ok_or(NylasError::MimeParse)?;
            (
                message.message_id().map(str::to_string),
                message.subject().map(str::to_string),
                mailboxes(message.from()),
                mailboxes(message.to()),
                mailboxes(message.cc()),
                message.date().map(|date| date.to_rfc3339()),
                message.body_text(0).map(|body| body.into_owned()),
                message.body_html(0).map(|body| body.into_owned()),
            )
        };

        Ok(Self {
            message_id,
            subject,
            from,
            to,
            cc,
            date,
            text_body,
            html_body,
            raw,
        })
    }
}

/// Flatten an address header into plain mailboxes, groups included.
fn mailboxes(address: Option<&Address<'_>>) -> Vec<Mailbox> {
    match address {
        Some(Address::List(list)) => list.iter().map(Mailbox::from_addr).collect(),
        Some(Address::Group(groups)) => groups
            .iter()
            .flat_map(|group| group.addresses.iter())
            .map(Mailbox::from_addr)
            .collect(),
        None => Vec::new(),
    }
}
