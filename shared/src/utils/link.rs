//! Parsing of transport message links
//!
//! Admin collaborators reference archived content by pasting message links of
//! the form `https://t.me/c/<channel_id>/<message_id>` (private channels) or
//! `https://t.me/<handle>/<message_id>` (public channels).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::types::common::{ChannelId, MessageId};

static PRIVATE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://t\.me/c/(\d+)/(\d+)$").expect("valid regex"));

static PUBLIC_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https://t\.me/([a-zA-Z0-9_]+)/(\d+)$").expect("valid regex"));

/// A message reference extracted from a pasted link.
///
/// Private links carry a numeric channel id; public links carry a handle that
/// must be resolved through the messaging transport before use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessageLink {
    /// Numeric channel id, present for private-channel links
    pub channel_id: Option<ChannelId>,
    /// Channel handle, present for public-channel links
    pub username: Option<String>,
    /// Message position within the channel
    pub message_id: MessageId,
}

/// Parse a message link, returning `None` for anything malformed.
pub fn parse_message_link(link: &str) -> Option<ParsedMessageLink> {
    if let Some(captures) = PRIVATE_LINK.captures(link) {
        return Some(ParsedMessageLink {
            channel_id: Some(captures[1].parse().ok()?),
            username: None,
            message_id: captures[2].parse().ok()?,
        });
    }

    if let Some(captures) = PUBLIC_LINK.captures(link) {
        return Some(ParsedMessageLink {
            channel_id: None,
            username: Some(captures[1].to_string()),
            message_id: captures[2].parse().ok()?,
        });
    }

    None
}
