//! Message log
//!
//! Everything the game tells the player goes through here; the UI only
//! renders the tail of the list.

use serde::{Deserialize, Serialize};

const MAX_MESSAGES: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameMessage {
    pub text: String,
    /// Turn number when the message was logged
    pub turn: u64,
    pub category: MessageCategory,
}

/// Categories for message filtering/coloring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MessageCategory {
    Combat,
    Item,
    System,
    Warning,
}

impl MessageCategory {
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            MessageCategory::Combat => (220, 120, 120),
            MessageCategory::Item => (150, 200, 150),
            MessageCategory::System => (180, 180, 180),
            MessageCategory::Warning => (240, 200, 80),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageLog {
    messages: Vec<GameMessage>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, text: impl Into<String>, turn: u64, category: MessageCategory) {
        self.messages.push(GameMessage {
            text: text.into(),
            turn,
            category,
        });
        if self.messages.len() > MAX_MESSAGES {
            let overflow = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..overflow);
        }
    }

    pub fn messages(&self) -> &[GameMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&GameMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_keeps_only_the_tail() {
        let mut log = MessageLog::new();
        for i in 0..(MAX_MESSAGES + 50) {
            log.add(format!("msg {i}"), i as u64, MessageCategory::System);
        }
        assert_eq!(log.len(), MAX_MESSAGES);
        assert_eq!(log.last().unwrap().text, format!("msg {}", MAX_MESSAGES + 49));
        assert_eq!(log.messages()[0].text, "msg 50");
    }
}
