//! # Prompt
//!
//! Builds the message list sent to the analysis model for one conversation.
//!
//! ## Format
//!
//! - **System**: the fixed analyst persona ([`ANALYST_SYSTEM_PROMPT`]) unless the caller overrides it.
//! - **User**: the conversation's aggregated text. When the text was split into segments, the
//!   user turn starts with a `Part i of n` preface so the model knows it sees a fragment.
//!
//! ## External interactions
//!
//! - **AI models**: output is sent to an OpenAI-compatible chat completions API.

/// Role of a message, one-to-one with OpenAI Chat Completions API `role` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// System instruction (API `role: "system"`).
    System,
    /// User message (API `role: "user"`).
    User,
    /// Assistant message (API `role: "assistant"`).
    Assistant,
}

/// A single chat message, one-to-one with one element of OpenAI `messages` array.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: MessageRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// The analyst persona sent as the system turn of every analysis request.
pub const ANALYST_SYSTEM_PROMPT: &str = r#"#### ROLE
You are an expert analyst of Telegram group chats. Always write the report in Russian, whatever the language of the input. Identify key topics, requests, offers of help, and the emotional tone of the discussion as precisely as possible, and produce a structured report.

### PROCESS
1. Input
   - The input is plain text, one chat message per line, in the order the messages were sent.
   - If you are told that you see one part of a longer chat, analyze only that part and do not speculate about the rest.

2. Content analysis
   - Key topics: find the meaningful topics of discussion; ignore repeated or coincidental phrases.
   - Requests and offers: detect requests ("please", "need", "can you") and offers ("I can help", "I propose", "ready to assist").
   - Sentiment: classify the tone as positive, neutral or negative, and name prevailing emotions (joy, anger, frustration). Mark sarcasm or ambiguity with a probability estimate.

3. Grouping
   - Group messages into logical threads by time proximity and topic (a question and its answers form one thread).

4. Output
   - Key topics with short descriptions.
   - Requests and offers, quoting the message.
   - Percentage breakdown of sentiment.
   - A table where it helps:

| Message                        | Sentiment | Type       |
|--------------------------------|-----------|------------|
| When will the report be ready? | Neutral   | Request    |
| I can help with testing.       | Positive  | Offer      |

### DO NOT
- Do not report random word overlaps as topics.
- Do not skip ambiguous or sarcastic messages; mark them with a probability instead.
- Do not invent messages that are not in the input.
"#;

/// Preface for one segment of a conversation that was split into `total` parts (1-based `part`).
pub fn segment_preface(part: usize, total: usize) -> String {
    format!(
        "Part {} of {} of a longer chat. The first lines may repeat the end of the previous part.",
        part, total
    )
}

/// Builds `[system, user]` for one analysis request.
///
/// `segment` is `Some((part, total))` when `text` is one segment of a split conversation.
pub fn analysis_messages(
    system_prompt: &str,
    text: &str,
    segment: Option<(usize, usize)>,
) -> Vec<ChatMessage> {
    let user = match segment {
        Some((part, total)) => format!("{}\n\n{}", segment_preface(part, total), text),
        None => text.to_string(),
    };
    vec![ChatMessage::system(system_prompt), ChatMessage::user(user)]
}
