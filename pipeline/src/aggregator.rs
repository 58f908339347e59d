//! Conversation Aggregator: window rows → per-conversation text lists.

use std::collections::BTreeMap;
use std::str::FromStr;

use storage::ConversationRow;

/// Key used to decide which rows belong to the same conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    /// Display title. Two chats with the same title merge into one conversation.
    #[default]
    Title,
    /// Stable chat id; labelled `"<title> [<chat_id>]"`.
    ChatId,
}

impl FromStr for GroupBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(GroupBy::Title),
            "chat_id" | "chatid" | "id" => Ok(GroupBy::ChatId),
            other => Err(format!("unknown grouping '{}', expected title or chat_id", other)),
        }
    }
}

impl GroupBy {
    fn label(&self, row: &ConversationRow) -> String {
        match self {
            GroupBy::Title => row.chat_title.clone(),
            GroupBy::ChatId => format!("{} [{}]", row.chat_title, row.chat_id),
        }
    }
}

/// Groups rows into `label → texts`. Pure and total: every row lands in exactly one group and
/// texts keep their input order within a group.
///
/// With [`GroupBy::ChatId`] a chat renamed inside the window keeps the label of its first row.
pub fn aggregate(rows: &[ConversationRow], group_by: GroupBy) -> BTreeMap<String, Vec<String>> {
    let mut groups: BTreeMap<String, Vec<String>> = BTreeMap::new();
    match group_by {
        GroupBy::Title => {
            for row in rows {
                groups
                    .entry(group_by.label(row))
                    .or_default()
                    .push(row.message_text.clone());
            }
        }
        GroupBy::ChatId => {
            let mut labels: BTreeMap<i64, String> = BTreeMap::new();
            for row in rows {
                let label = labels
                    .entry(row.chat_id)
                    .or_insert_with(|| group_by.label(row))
                    .clone();
                groups.entry(label).or_default().push(row.message_text.clone());
            }
        }
    }
    groups
}

/// One conversation's slice of a window, ready for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationWindow {
    pub title: String,
    pub texts: Vec<String>,
}

impl ConversationWindow {
    /// Texts joined with newlines, the form written to the raw artifact and sent for analysis.
    pub fn text(&self) -> String {
        self.texts.join("\n")
    }

    pub fn from_groups(groups: BTreeMap<String, Vec<String>>) -> Vec<ConversationWindow> {
        groups
            .into_iter()
            .map(|(title, texts)| ConversationWindow { title, texts })
            .collect()
    }
}
