use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_auth::Channel;
use clubhouse_core::{ClubId, DomainError, DomainResult, MessageId, UserId};

/// How many messages a history read returns at most, newest first.
pub const RECENT_LIMIT: usize = 100;

const MAX_CONTENT_CHARS: usize = 1000;

/// One chat message in one channel. Sender identity is denormalized so the
/// history stays readable after an account disappears.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub club_id: ClubId,
    pub channel: Channel,
    pub sender_id: UserId,
    pub sender_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Validates and trims the content, then stamps the message. Limits are
    /// in characters, not bytes.
    pub fn compose(
        club_id: ClubId,
        channel: Channel,
        sender_id: UserId,
        sender_name: String,
        content: &str,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("message content cannot be empty"));
        }
        if trimmed.chars().count() > MAX_CONTENT_CHARS {
            return Err(DomainError::validation(format!(
                "message content cannot exceed {MAX_CONTENT_CHARS} characters"
            )));
        }
        Ok(Self {
            id: MessageId::new(),
            club_id,
            channel,
            sender_id,
            sender_name,
            content: trimmed.to_string(),
            created_at: now,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compose(content: &str) -> DomainResult<Message> {
        Message::compose(
            ClubId::new(),
            Channel::Geral,
            UserId::new(),
            "Ana".to_string(),
            content,
            Utc::now(),
        )
    }

    #[test]
    fn content_is_trimmed() {
        let message = compose("  hello  ").unwrap();
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn whitespace_only_is_rejected() {
        assert!(matches!(compose("   \n\t"), Err(DomainError::Validation(_))));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        // 1000 multibyte characters are fine even though they exceed 1000 bytes.
        let ok = "é".repeat(MAX_CONTENT_CHARS);
        assert!(compose(&ok).is_ok());

        let too_long = "é".repeat(MAX_CONTENT_CHARS + 1);
        assert!(matches!(compose(&too_long), Err(DomainError::Validation(_))));
    }
}
