use std::time::Duration;

use tracing::{debug, error};

use crate::client::ApiClient;

/// Hint offered when an interactive chat starts
pub const GREETING_HINT: &str =
    "Try asking me: 'What should I pack for a beach trip?' or 'Plan a budget trip to Europe'";

/// Appended instead of a reply when the chat call fails
pub const CONNECTIVITY_APOLOGY: &str =
    "I'm having trouble connecting right now. Please try again later.";

/// Scripted suggestion appended after planning-related messages
pub const PLANNING_SUGGESTION: &str =
    "Would you like me to help you plan a trip? Run `trip plan <destination>` to get started!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Assistant,
}

/// A single transcript line
#[derive(Debug, Clone, PartialEq)]
pub struct ChatEntry {
    pub sender: Sender,
    pub text: String,
}

impl ChatEntry {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
        }
    }
}

/// True when a message should trigger the scripted planning suggestion
pub fn mentions_planning(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("plan") || lower.contains("trip")
}

/// Pending scripted suggestion; appended by `ChatSession::deliver` after its delay
#[derive(Debug)]
#[must_use = "a follow-up does nothing until delivered"]
pub struct FollowUp {
    delay: Duration,
}

impl FollowUp {
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Append-only chat transcript backed by stateless request/response calls
#[derive(Debug)]
pub struct ChatSession {
    client: ApiClient,
    transcript: Vec<ChatEntry>,
    follow_up_delay: Duration,
}

impl ChatSession {
    pub fn new(client: ApiClient, follow_up_delay: Duration) -> Self {
        Self {
            client,
            transcript: Vec::new(),
            follow_up_delay,
        }
    }

    pub fn transcript(&self) -> &[ChatEntry] {
        &self.transcript
    }

    pub fn push_greeting(&mut self) {
        self.transcript.push(ChatEntry::assistant(GREETING_HINT));
    }

    /// Send one message and append the reply.
    ///
    /// Blank input is ignored. A failed call appends the connectivity apology.
    /// When the call succeeded and the message is about planning, the
    /// returned `FollowUp` must be delivered to append the suggestion.
    pub async fn send(&mut self, message: &str) -> Option<FollowUp> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.transcript.push(ChatEntry::user(message));

        match self.client.chat(message).await {
            Ok(reply) => {
                debug!("Chat reply received ({} chars)", reply.response.len());
                self.transcript.push(ChatEntry::assistant(reply.response));
                mentions_planning(message).then(|| FollowUp {
                    delay: self.follow_up_delay,
                })
            }
            Err(e) => {
                error!("Chat request failed: {}", e);
                self.transcript.push(ChatEntry::assistant(CONNECTIVITY_APOLOGY));
                None
            }
        }
    }

    /// Wait out the follow-up delay, then append the planning suggestion
    pub async fn deliver(&mut self, follow_up: FollowUp) -> &ChatEntry {
        tokio::time::sleep(follow_up.delay).await;
        self.transcript.push(ChatEntry::assistant(PLANNING_SUGGESTION));
        &self.transcript[self.transcript.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mentions_planning() {
        assert!(mentions_planning("Can you PLAN a trip?"));
        assert!(mentions_planning("best trips in spring"));
        assert!(mentions_planning("airplane food"));
        assert!(!mentions_planning("What should I pack for the beach?"));
    }
}
