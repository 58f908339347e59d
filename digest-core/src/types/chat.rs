//! Chat identity and kind.

use serde::{Deserialize, Serialize};

/// Title used when a chat has neither a title nor a handle.
pub const PRIVATE_CHAT_TITLE: &str = "private chat";

/// Kind of conversation as reported by the messaging platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatKind {
    Private,
    Group,
    Supergroup,
    Channel,
}

impl ChatKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChatKind::Private => "private",
            ChatKind::Group => "group",
            ChatKind::Supergroup => "supergroup",
            ChatKind::Channel => "channel",
        }
    }

    /// True for group and supergroup chats, the only kinds whose messages are captured.
    pub fn is_group_like(&self) -> bool {
        matches!(self, ChatKind::Group | ChatKind::Supergroup)
    }
}

impl std::fmt::Display for ChatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A chat: numeric id, kind, and the optional display fields used for titles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chat {
    pub id: i64,
    pub kind: ChatKind,
    pub title: Option<String>,
    pub username: Option<String>,
}

impl Chat {
    /// A private chat with a user; used to address administrators and requesters.
    pub fn private(id: i64) -> Self {
        Self {
            id,
            kind: ChatKind::Private,
            title: None,
            username: None,
        }
    }

    /// Display title: title, then handle, then [`PRIVATE_CHAT_TITLE`].
    pub fn display_title(&self) -> String {
        self.title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.username.as_deref().filter(|u| !u.is_empty()))
            .unwrap_or(PRIVATE_CHAT_TITLE)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chat(title: Option<&str>, username: Option<&str>) -> Chat {
        Chat {
            id: -100,
            kind: ChatKind::Group,
            title: title.map(String::from),
            username: username.map(String::from),
        }
    }

    #[test]
    fn test_display_title_fallback_chain() {
        assert_eq!(chat(Some("Team"), Some("team_chat")).display_title(), "Team");
        assert_eq!(chat(None, Some("team_chat")).display_title(), "team_chat");
        assert_eq!(chat(None, None).display_title(), PRIVATE_CHAT_TITLE);
    }

    #[test]
    fn test_is_group_like() {
        assert!(ChatKind::Group.is_group_like());
        assert!(ChatKind::Supergroup.is_group_like());
        assert!(!ChatKind::Private.is_group_like());
        assert!(!ChatKind::Channel.is_group_like());
    }
}
